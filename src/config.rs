use clap::Parser;
use std::path::PathBuf;
use tracing::Level;

use crate::control::command::{MAX_VOLUME, SEEK_STEP_MS, VOLUME_STEP};
use crate::control::Dispatcher;

/// Command line of the `flyplayer` binary
#[derive(Debug, Parser)]
#[command(name = "flyplayer", version, about = "Single-window video player")]
pub struct Args {
    /// Media file to open and play on startup
    pub file: Option<PathBuf>,

    /// Initial volume (0-100)
    #[arg(long, default_value_t = 50, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub volume: u8,

    /// Keyboard seek distance in milliseconds
    #[arg(long = "seek-step", value_name = "MS", default_value_t = SEEK_STEP_MS)]
    pub seek_step_ms: u64,

    /// Volume change per key press or wheel notch
    #[arg(long, default_value_t = VOLUME_STEP, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub volume_step: u8,

    /// Start in fullscreen instead of maximized
    #[arg(long)]
    pub fullscreen: bool,

    /// Default log level; RUST_LOG overrides it
    #[arg(long, default_value_t = Level::INFO)]
    pub log_level: Level,
}

/// Resolved startup configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub file: Option<PathBuf>,
    pub window_title: String,
    /// Size used when the window is restored from maximized
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
    pub initial_volume: u8,
    pub seek_step_ms: u64,
    pub volume_step: u8,
    pub fullscreen: bool,
    pub log_level: Level,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file: None,
            window_title: String::from("FlyPlayer"),
            window_size: [1280.0, 720.0],
            min_window_size: [640.0, 480.0],
            initial_volume: 50,
            seek_step_ms: SEEK_STEP_MS,
            volume_step: VOLUME_STEP,
            fullscreen: false,
            log_level: Level::INFO,
        }
    }
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Self {
            file: args.file,
            initial_volume: args.volume.min(MAX_VOLUME),
            seek_step_ms: args.seek_step_ms,
            volume_step: args.volume_step,
            fullscreen: args.fullscreen,
            log_level: args.log_level,
            ..Self::default()
        }
    }
}

impl Config {
    pub fn dispatcher(&self) -> Dispatcher {
        Dispatcher::new(self.seek_step_ms, self.volume_step)
    }

    pub fn native_options(&self) -> eframe::NativeOptions {
        eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_title(self.window_title.clone())
                .with_inner_size(self.window_size)
                .with_min_inner_size(self.min_window_size)
                .with_maximized(!self.fullscreen)
                .with_fullscreen(self.fullscreen)
                .with_drag_and_drop(true),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_player_conventions() {
        let config = Config::from(Args::try_parse_from(["flyplayer"]).unwrap());
        assert_eq!(config.file, None);
        assert_eq!(config.initial_volume, 50);
        assert_eq!(config.seek_step_ms, 5000);
        assert_eq!(config.volume_step, 10);
        assert!(!config.fullscreen);
        assert_eq!(config.log_level, Level::INFO);
        assert_eq!(config.window_title, "FlyPlayer");
    }

    #[test]
    fn parses_overrides() {
        let args = Args::try_parse_from([
            "flyplayer",
            "movie.mkv",
            "--volume",
            "80",
            "--seek-step",
            "10000",
            "--volume-step",
            "5",
            "--fullscreen",
            "--log-level",
            "debug",
        ])
        .unwrap();
        let config = Config::from(args);

        assert_eq!(config.file, Some(PathBuf::from("movie.mkv")));
        assert_eq!(config.initial_volume, 80);
        assert_eq!(config.seek_step_ms, 10_000);
        assert_eq!(config.volume_step, 5);
        assert!(config.fullscreen);
        assert_eq!(config.log_level, Level::DEBUG);
    }

    #[test]
    fn rejects_out_of_range_volume() {
        assert!(Args::try_parse_from(["flyplayer", "--volume", "101"]).is_err());
        assert!(Args::try_parse_from(["flyplayer", "--volume-step", "0"]).is_err());
    }
}
