//! Tracing initialization, trimmed from the host crate's `init_minimal` — no file
//! rotation or OpenTelemetry export, since this crate has no server process to host
//! them. `RUST_LOG` still caps output the same way.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

fn stderr_supports_ansi() -> bool {
    std::io::IsTerminal::is_terminal(&std::io::stderr())
}

/// Installs a stderr `tracing` subscriber for the process, honoring `RUST_LOG` if set.
/// Safe to call more than once; later calls are no-ops (`try_init` fails silently).
pub fn init_tracing() {
    let env = EnvFilter::try_from_default_env().ok();

    let fmt_layer = fmt::layer()
        .with_ansi(stderr_supports_ansi())
        .with_target(true)
        .with_timer(fmt::time::UtcTime::rfc_3339());

    let subscriber = Registry::default().with(env).with(fmt_layer);
    let _ = subscriber.try_init();
}
