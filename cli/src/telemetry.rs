use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialise tracing output on stderr.
///
/// Diagnostics stay off stdout so the rendered report remains pipeable.
pub fn init_telemetry() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}
