pub mod app;
pub mod config;
pub mod control;
pub mod error;
pub mod logging;
pub mod player;
pub mod time;
pub mod ui;

pub use app::FlyPlayerApp;
pub use config::{Args, Config};
pub use error::OpenError;
pub use player::{PlaybackFacade, PlayerEvent, PlayerState, VideoPlayer};
pub use time::format_time;
