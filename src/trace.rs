use tracing_subscriber::EnvFilter;

/// Use RUST_LOG, fallback to info if not set or unparsable
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
