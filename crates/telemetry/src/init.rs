// Path: crates/telemetry/src/init.rs
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Registry};

/// Environment variable controlling the log filter, e.g.
/// `AGORA_LOG=agora_registry=debug,info`. Falls back to `RUST_LOG`, then
/// to `info`.
pub const LOG_ENV_VAR: &str = "AGORA_LOG";

/// Initializes the global `tracing` subscriber for structured JSON logging
/// on stderr, and routes `log`-facade records from dependencies through it.
///
/// Call once at process start; a second call fails because the global
/// subscriber is already set.
pub fn init_tracing() -> Result<(), anyhow::Error> {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = fmt::layer()
        .json()
        .with_writer(std::io::stderr)
        .with_target(true);
    let subscriber = Registry::default().with(filter).with(fmt_layer);
    tracing_log::LogTracer::init()?;
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
