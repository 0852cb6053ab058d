//! Runtime settings (`SPEC_FULL.md` AMBIENT STACK). Scaled down from the host crate's
//! layered `AppConfig` to what a library, rather than a deployed server, needs: code
//! defaults overridable by environment variables, nothing file-backed.

use std::sync::OnceLock;

use figment::providers::{Env, Serialized};
use figment::Figment;
use serde::{Deserialize, Serialize};

/// Process-wide knobs for the run loop and its diagnostics.
///
/// `default_group` is diagnostic/informational rather than load-bearing: [`GroupId`](crate::ids::GroupId)
/// is a `&'static str` newtype over compile-time literals, so selecting a group to run
/// still happens in code (`run_group(GroupId("...)), ...)`); this setting exists for
/// tooling that wants to know, without recompiling, which group an operator expects a
/// deployment to default to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeSettings {
    pub default_group: String,
    /// If set, an observer that panics aborts the run instead of being caught and
    /// logged — useful in tests that want to fail loudly on a broken observer.
    pub observer_panics_fatal: bool,
}

impl Default for RuntimeSettings {
    fn default() -> Self {
        Self {
            default_group: "single".to_owned(),
            observer_panics_fatal: false,
        }
    }
}

impl RuntimeSettings {
    /// Loads settings layered as `defaults -> environment`, e.g. `COMPKIT_DEFAULT_GROUP`
    /// or `COMPKIT_OBSERVER_PANICS_FATAL=true`.
    ///
    /// # Errors
    /// Returns an error if an environment variable is present but fails to parse into
    /// its field's type.
    pub fn load() -> Result<Self, figment::Error> {
        Figment::new()
            .merge(Serialized::defaults(RuntimeSettings::default()))
            .merge(Env::prefixed("COMPKIT_"))
            .extract()
    }

    /// The process-wide settings, loaded and cached on first use. Falls back to
    /// [`RuntimeSettings::default`] if the environment has a value that fails to parse,
    /// rather than taking down a caller (such as `Broker::fire_observers`) that can't
    /// itself return a `figment::Error`.
    #[must_use]
    pub fn current() -> &'static RuntimeSettings {
        static SETTINGS: OnceLock<RuntimeSettings> = OnceLock::new();
        SETTINGS.get_or_init(|| RuntimeSettings::load().unwrap_or_default())
    }
}
