use tracing_subscriber::EnvFilter;

/// Initializes the tracing subscriber for hosts that do not install their
/// own. Safe to call more than once; later calls are ignored.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
