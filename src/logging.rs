//! Diagnostics on stderr, filtered by `RUST_LOG`.
//!
//! The library emits `debug` events per clue and per fixed point, and `trace` events per derived
//! statement, e.g. `RUST_LOG=minelogic_field=trace`.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Defaults to `warn` if `RUST_LOG` is unset.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
