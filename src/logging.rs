use anyhow::{anyhow, Result};
use tracing::Level;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

/// Install the global stderr subscriber. `RUST_LOG` takes precedence over
/// `level`.
pub fn init(level: Level) -> Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("failed to install log subscriber: {e}"))
}
