use tracing::debug;

use super::command::{
    seek_backward, seek_forward, toggle_play_pause, volume_down, volume_up, PlayPause,
    PlaybackCommand, SEEK_STEP_MS, VOLUME_STEP,
};
use crate::player::PlaybackFacade;

/// Window-level state the dispatcher may change.
pub trait WindowControl {
    fn is_fullscreen(&self) -> bool;
    fn set_fullscreen(&mut self, fullscreen: bool);
}

/// Applies playback commands to a player and its window.
#[derive(Debug, Clone, Copy)]
pub struct Dispatcher {
    seek_step_ms: u64,
    volume_step: u8,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(SEEK_STEP_MS, VOLUME_STEP)
    }
}

impl Dispatcher {
    pub fn new(seek_step_ms: u64, volume_step: u8) -> Self {
        Self {
            seek_step_ms,
            volume_step,
        }
    }

    /// Apply `command`. `player` is `None` while no media is loaded, in
    /// which case only window commands take effect.
    pub fn dispatch<P, W>(&self, command: PlaybackCommand, player: Option<&mut P>, window: &mut W)
    where
        P: PlaybackFacade + ?Sized,
        W: WindowControl + ?Sized,
    {
        let player = match (command, player) {
            (PlaybackCommand::FullscreenToggle, _) => {
                let fullscreen = !window.is_fullscreen();
                debug!(fullscreen, "Toggling fullscreen");
                window.set_fullscreen(fullscreen);
                return;
            }
            (_, None) => {
                debug!(?command, "No media loaded, ignoring command");
                return;
            }
            (_, Some(player)) => player,
        };

        debug!(?command, "Dispatching");
        match command {
            PlaybackCommand::TogglePlayPause => match toggle_play_pause(player.is_playing()) {
                PlayPause::Play => player.play(),
                PlayPause::Pause => player.pause(),
            },
            PlaybackCommand::Stop => player.stop(),
            PlaybackCommand::SeekBackward => {
                let target = seek_backward(player.position(), self.seek_step_ms);
                player.set_position(target);
            }
            PlaybackCommand::SeekForward => {
                // Duration 0 means the container did not report one
                let limit = match player.duration() {
                    0 => u64::MAX,
                    duration => duration,
                };
                let target = seek_forward(player.position(), limit, self.seek_step_ms);
                player.set_position(target);
            }
            PlaybackCommand::VolumeUp => {
                let current = player.volume();
                let volume = volume_up(current, self.volume_step);
                if volume != current {
                    player.set_volume(volume);
                }
            }
            PlaybackCommand::VolumeDown => {
                let current = player.volume();
                let volume = volume_down(current, self.volume_step);
                if volume != current {
                    player.set_volume(volume);
                }
            }
            PlaybackCommand::MuteToggle => {
                let muted = player.is_muted();
                player.set_muted(!muted);
            }
            // Window commands return before a player is required
            PlaybackCommand::FullscreenToggle => {}
        }
    }
}
