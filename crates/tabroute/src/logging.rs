//! Tracing initialization for embedding binaries.

use tracing_subscriber::EnvFilter;

/// Installs a fmt subscriber with env-filter support and bridges the
/// `log` macros used by leaf modules into tracing. Safe to call more than
/// once; later calls are no-ops.
pub fn init_logging() {
    let _ = tracing_log::LogTracer::init();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}
