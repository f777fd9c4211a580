use tracing_subscriber::EnvFilter;

// Log to stderr; stdout is kept for the commands themselves.  Quiet unless
// RUST_LOG asks for more.
pub fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
