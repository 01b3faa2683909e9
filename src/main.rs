use anyhow::{anyhow, Context, Result};
use clap::Parser;
use flyplayer::{logging, Args, Config, FlyPlayerApp};
use tracing::info;

fn main() -> Result<()> {
    let config = Config::from(Args::parse());
    logging::init(config.log_level)?;

    ffmpeg_next::init().context("Failed to initialize FFmpeg")?;
    info!(version = env!("CARGO_PKG_VERSION"), "Starting FlyPlayer");

    let options = config.native_options();
    let title = config.window_title.clone();
    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| Ok(Box::new(FlyPlayerApp::new(cc, &config)))),
    )
    .map_err(|e| anyhow!("UI error: {e}"))
}
