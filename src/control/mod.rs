//! Keyboard/wheel input routing and the playback commands it produces.

pub mod command;
pub mod dispatch;
pub mod input;

pub use command::{PlayPause, PlaybackCommand};
pub use dispatch::{Dispatcher, WindowControl};
pub use input::{claims, route, InputEvent, Key, WheelDirection};
