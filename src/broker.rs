//! Per-run component results and bookkeeping (`SPEC_FULL.md` §3, §4.5).

use std::any::Any;
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::time::Duration;

use parking_lot::RwLock;

use crate::config::RuntimeSettings;
use crate::error::{BrokerError, MissingRequirements};
use crate::ids::{ComponentId, TypeTag};
use crate::observer::ObserverFn;
use crate::registry::Registry;
use crate::value::Value;

/// A component body's failure, paired with the backtrace captured at the point it was
/// caught. The source system keys a process-wide `exceptions`/`tracebacks` pair of dicts
/// by component identity; Rust errors have no comparable identity to key by, so the pair
/// travels together as one record instead.
pub struct Failure {
    pub error: anyhow::Error,
    pub traceback: String,
}

/// The container a run populates: component values, unmet requirements, failures,
/// per-component timings, and the observers fired as each component finishes.
///
/// Constructing one with `Broker::new(Some(parent))` seeds `instances` from `parent` —
/// the mechanism `crate::run::run_incremental` uses to extend a prior run's results with
/// a newly-registered sub-graph without re-running anything already computed. Missing
/// requirements, failures, and timings are per-run and always start empty.
pub struct Broker {
    instances: RwLock<HashMap<ComponentId, Value>>,
    missing_requirements: RwLock<HashMap<ComponentId, MissingRequirements>>,
    failures: RwLock<HashMap<ComponentId, Failure>>,
    exec_times: RwLock<HashMap<ComponentId, Duration>>,
    observers: RwLock<HashMap<TypeTag, Vec<ObserverFn>>>,
}

impl Broker {
    /// Builds a fresh broker, optionally seeded with `parent`'s instances, and snapshots
    /// the registry's globally-registered observers at this moment.
    #[must_use]
    pub fn new(parent: Option<&Broker>) -> Self {
        let instances = parent.map(|p| p.instances.read().clone()).unwrap_or_default();
        Self {
            instances: RwLock::new(instances),
            missing_requirements: RwLock::new(HashMap::new()),
            failures: RwLock::new(HashMap::new()),
            exec_times: RwLock::new(HashMap::new()),
            observers: RwLock::new(Registry::global().observer_snapshot()),
        }
    }

    /// Stores `value` under `id`. Errors if `id` already has a value — components run
    /// once per broker.
    pub fn put(&self, id: ComponentId, value: Value) -> Result<(), BrokerError> {
        let mut instances = self.instances.write();
        if instances.contains_key(&id) {
            return Err(BrokerError::AlreadyPresent(id));
        }
        instances.insert(id, value);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, id: ComponentId) -> Option<Value> {
        self.instances.read().get(&id).cloned()
    }

    #[must_use]
    pub fn contains(&self, id: ComponentId) -> bool {
        self.instances.read().contains_key(&id)
    }

    pub fn delete(&self, id: ComponentId) -> Option<Value> {
        self.instances.write().remove(&id)
    }

    #[must_use]
    pub fn keys(&self) -> Vec<ComponentId> {
        self.instances.read().keys().copied().collect()
    }

    #[must_use]
    pub fn items(&self) -> Vec<(ComponentId, Value)> {
        self.instances.read().iter().map(|(&k, v)| (k, v.clone())).collect()
    }

    /// Every component currently registered under `type_tag` whose value downcasts to
    /// `T` — e.g. "give me every `FactValue` produced so far".
    #[must_use]
    pub fn get_by_type<T: std::any::Any + Send + Sync>(
        &self,
        type_tag: TypeTag,
    ) -> Vec<(ComponentId, std::sync::Arc<T>)> {
        let candidates = Registry::global().components_of_type(type_tag);
        let instances = self.instances.read();
        candidates
            .into_iter()
            .filter_map(|id| instances.get(&id).cloned().map(|v| (id, v)))
            .filter_map(|(id, v)| v.downcast::<T>().ok().map(|v| (id, v)))
            .collect()
    }

    pub fn add_missing_requirements(&self, id: ComponentId, mr: MissingRequirements) {
        self.missing_requirements.write().insert(id, mr);
    }

    #[must_use]
    pub fn missing_requirements(&self, id: ComponentId) -> Option<MissingRequirements> {
        self.missing_requirements.read().get(&id).cloned()
    }

    /// Records `error` (with its captured `traceback`) as `id`'s outcome for this run.
    pub fn add_exception(&self, id: ComponentId, error: anyhow::Error, traceback: String) {
        self.failures.write().insert(id, Failure { error, traceback });
    }

    #[must_use]
    pub fn has_exception(&self, id: ComponentId) -> bool {
        self.failures.read().contains_key(&id)
    }

    /// Runs `f` against `id`'s recorded failure, if any — failures carry a non-`Clone`
    /// `anyhow::Error`, so this avoids forcing callers to take ownership of it.
    pub fn with_exception<R>(&self, id: ComponentId, f: impl FnOnce(&Failure) -> R) -> Option<R> {
        self.failures.read().get(&id).map(f)
    }

    pub fn add_exec_time(&self, id: ComponentId, duration: Duration) {
        self.exec_times.write().insert(id, duration);
    }

    #[must_use]
    pub fn exec_time(&self, id: ComponentId) -> Option<Duration> {
        self.exec_times.read().get(&id).copied()
    }

    /// Registers a broker-local observer, in addition to whatever was snapshotted from
    /// the registry at construction time.
    pub fn add_observer(&self, type_tag: TypeTag, observer: ObserverFn) {
        self.observers.write().entry(type_tag).or_default().push(observer);
    }

    /// Fires every observer matching `id`'s type, plus every [`TypeTag::ANY`] observer.
    /// Called by the run loop once `id` has finished, regardless of outcome.
    ///
    /// A panicking observer is caught and logged rather than allowed to unwind through
    /// the run loop, unless [`RuntimeSettings::observer_panics_fatal`] is set, in which
    /// case the panic is resumed after being logged.
    pub fn fire_observers(&self, id: ComponentId) {
        let type_tag = Registry::global().get_type(id).unwrap_or(TypeTag::ANY);
        let observers = self.observers.read();
        if let Some(list) = observers.get(&type_tag) {
            for observer in list {
                Self::call_observer(observer, id, self);
            }
        }
        if type_tag != TypeTag::ANY {
            if let Some(list) = observers.get(&TypeTag::ANY) {
                for observer in list {
                    Self::call_observer(observer, id, self);
                }
            }
        }
    }

    fn call_observer(observer: &ObserverFn, id: ComponentId, broker: &Broker) {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| observer(id, broker)));
        let Err(payload) = outcome else {
            return;
        };
        let message = panic_message(&payload);
        tracing::error!(component = %id, panic = %message, "observer panicked");
        if RuntimeSettings::current().observer_panics_fatal {
            panic::resume_unwind(payload);
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}

impl Default for Broker {
    fn default() -> Self {
        Broker::new(None)
    }
}
