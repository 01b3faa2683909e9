//! Player-window input subscription.
//!
//! Hooked into the window's raw input before egui sees it: routed events
//! become queued commands, claimed events are removed from the frame.

use crate::control::{claims, route, InputEvent, Key, PlaybackCommand, WheelDirection};

/// Translate an egui event into router input. Key presses, repeats and
/// everything that is not a key or wheel event yield `None`.
pub fn translate(event: &egui::Event) -> Option<InputEvent> {
    match event {
        egui::Event::Key {
            key,
            pressed: false,
            ..
        } => Some(InputEvent::KeyRelease(map_key(*key))),
        egui::Event::MouseWheel { delta, .. } => {
            if delta.y > 0.0 {
                Some(InputEvent::WheelRotate(WheelDirection::Up))
            } else if delta.y < 0.0 {
                Some(InputEvent::WheelRotate(WheelDirection::Down))
            } else {
                None
            }
        }
        _ => None,
    }
}

fn map_key(key: egui::Key) -> Key {
    match key {
        egui::Key::ArrowLeft => Key::Left,
        egui::Key::ArrowRight => Key::Right,
        egui::Key::ArrowUp => Key::Up,
        egui::Key::ArrowDown => Key::Down,
        egui::Key::M => Key::M,
        egui::Key::Space => Key::Space,
        egui::Key::F => Key::F,
        _ => Key::Other,
    }
}

/// Commands captured from input, in arrival order
#[derive(Default)]
pub struct InputSubscription {
    queued: Vec<PlaybackCommand>,
}

impl InputSubscription {
    pub fn intercept(&mut self, raw_input: &mut egui::RawInput) {
        let queued = &mut self.queued;
        raw_input.events.retain(|event| {
            let Some(input) = translate(event) else {
                return true;
            };
            if let Some(command) = route(input) {
                queued.push(command);
            }
            !claims(input)
        });
    }

    pub fn take_commands(&mut self) -> Vec<PlaybackCommand> {
        std::mem::take(&mut self.queued)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{Event, Modifiers, MouseWheelUnit, RawInput, Vec2};

    fn key(key: egui::Key, pressed: bool) -> Event {
        Event::Key {
            key,
            physical_key: None,
            pressed,
            repeat: false,
            modifiers: Modifiers::NONE,
        }
    }

    fn wheel(y: f32) -> Event {
        Event::MouseWheel {
            unit: MouseWheelUnit::Line,
            delta: Vec2::new(0.0, y),
            modifiers: Modifiers::NONE,
        }
    }

    #[test]
    fn translates_releases_only() {
        assert_eq!(
            translate(&key(egui::Key::Space, false)),
            Some(InputEvent::KeyRelease(Key::Space))
        );
        assert_eq!(translate(&key(egui::Key::Space, true)), None);
        assert_eq!(
            translate(&key(egui::Key::Q, false)),
            Some(InputEvent::KeyRelease(Key::Other))
        );
    }

    #[test]
    fn translates_wheel_direction() {
        assert_eq!(
            translate(&wheel(1.0)),
            Some(InputEvent::WheelRotate(WheelDirection::Up))
        );
        assert_eq!(
            translate(&wheel(-3.0)),
            Some(InputEvent::WheelRotate(WheelDirection::Down))
        );
        assert_eq!(translate(&wheel(0.0)), None);
    }

    #[test]
    fn intercept_queues_in_order_and_swallows_claimed() {
        let mut subscription = InputSubscription::default();
        let mut raw = RawInput {
            events: vec![
                key(egui::Key::ArrowRight, true),
                key(egui::Key::ArrowRight, false),
                key(egui::Key::Q, false),
                wheel(-1.0),
                key(egui::Key::M, false),
                Event::Text("x".into()),
            ],
            ..Default::default()
        };

        subscription.intercept(&mut raw);

        assert_eq!(
            subscription.take_commands(),
            vec![
                PlaybackCommand::SeekForward,
                PlaybackCommand::VolumeDown,
                PlaybackCommand::MuteToggle,
            ]
        );
        assert!(subscription.take_commands().is_empty());
        assert_eq!(
            raw.events,
            vec![key(egui::Key::ArrowRight, true), Event::Text("x".into())]
        );
    }
}
