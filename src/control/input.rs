//! Input-event to playback-command routing.
//!
//! The router knows nothing about egui; `ui::input` translates toolkit
//! events into [`InputEvent`] before they get here.

use super::command::PlaybackCommand;

/// Keys the router distinguishes. Everything else is `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    M,
    Space,
    F,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelDirection {
    Up,
    Down,
}

/// Discrete input delivered to the player window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    KeyRelease(Key),
    WheelRotate(WheelDirection),
}

/// Map an input event to the command it triggers, if any.
pub fn route(event: InputEvent) -> Option<PlaybackCommand> {
    match event {
        InputEvent::KeyRelease(key) => match key {
            Key::Left => Some(PlaybackCommand::SeekBackward),
            Key::Right => Some(PlaybackCommand::SeekForward),
            Key::Up => Some(PlaybackCommand::VolumeUp),
            Key::Down => Some(PlaybackCommand::VolumeDown),
            Key::M => Some(PlaybackCommand::MuteToggle),
            Key::Space => Some(PlaybackCommand::TogglePlayPause),
            Key::F => Some(PlaybackCommand::FullscreenToggle),
            Key::Other => None,
        },
        InputEvent::WheelRotate(WheelDirection::Up) => Some(PlaybackCommand::VolumeUp),
        InputEvent::WheelRotate(WheelDirection::Down) => Some(PlaybackCommand::VolumeDown),
    }
}

/// Whether the player window swallows `event` instead of letting it reach
/// other widgets. Every key release is claimed, mapped or not.
pub fn claims(event: InputEvent) -> bool {
    match event {
        InputEvent::KeyRelease(_) => true,
        InputEvent::WheelRotate(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_every_mapped_key() {
        let cases = [
            (Key::Left, PlaybackCommand::SeekBackward),
            (Key::Right, PlaybackCommand::SeekForward),
            (Key::Up, PlaybackCommand::VolumeUp),
            (Key::Down, PlaybackCommand::VolumeDown),
            (Key::M, PlaybackCommand::MuteToggle),
            (Key::Space, PlaybackCommand::TogglePlayPause),
            (Key::F, PlaybackCommand::FullscreenToggle),
        ];

        for (key, command) in cases {
            assert_eq!(route(InputEvent::KeyRelease(key)), Some(command), "{key:?}");
        }
    }

    #[test]
    fn routes_wheel_to_volume() {
        assert_eq!(
            route(InputEvent::WheelRotate(WheelDirection::Up)),
            Some(PlaybackCommand::VolumeUp)
        );
        assert_eq!(
            route(InputEvent::WheelRotate(WheelDirection::Down)),
            Some(PlaybackCommand::VolumeDown)
        );
    }

    #[test]
    fn unmapped_key_is_claimed_without_command() {
        let event = InputEvent::KeyRelease(Key::Other);
        assert_eq!(route(event), None);
        assert!(claims(event));
    }
}
