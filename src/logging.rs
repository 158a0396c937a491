use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Initialises tracing to stderr, so stdout carries only the form and results.
pub fn init() -> Result<()> {
    let filter = EnvFilter::try_from_env("RAILCAST_LOG")
        .or_else(|_| EnvFilter::try_new("railcast=info"))?;
    tracing_subscriber::fmt()
        .without_time()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))?;
    Ok(())
}
