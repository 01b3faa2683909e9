/// Default distance of a keyboard seek, in milliseconds
pub const SEEK_STEP_MS: u64 = 5000;
/// Default volume change per key press or wheel notch
pub const VOLUME_STEP: u8 = 10;
/// Upper bound of the volume scale
pub const MAX_VOLUME: u8 = 100;

/// Playback intent produced by the input router or the control bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaybackCommand {
    TogglePlayPause,
    Stop,
    SeekBackward,
    SeekForward,
    VolumeUp,
    VolumeDown,
    MuteToggle,
    FullscreenToggle,
}

/// Instruction chosen by [`toggle_play_pause`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayPause {
    Play,
    Pause,
}

pub fn toggle_play_pause(is_playing: bool) -> PlayPause {
    if is_playing {
        PlayPause::Pause
    } else {
        PlayPause::Play
    }
}

/// Step back from `current`, never below zero.
pub fn seek_backward(current: u64, step: u64) -> u64 {
    current.saturating_sub(step)
}

/// Step forward from `current`, never past `duration`.
pub fn seek_forward(current: u64, duration: u64, step: u64) -> u64 {
    current.saturating_add(step).min(duration)
}

/// Raise the volume by `step`, capped at [`MAX_VOLUME`].
/// A volume already at the cap is returned unchanged.
pub fn volume_up(current: u8, step: u8) -> u8 {
    if current < MAX_VOLUME {
        current.saturating_add(step).min(MAX_VOLUME)
    } else {
        current
    }
}

/// Lower the volume by `step`, floored at zero.
pub fn volume_down(current: u8, step: u8) -> u8 {
    if current > 0 {
        current.saturating_sub(step)
    } else {
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_pauses_when_playing() {
        assert_eq!(toggle_play_pause(true), PlayPause::Pause);
        assert_eq!(toggle_play_pause(false), PlayPause::Play);
    }

    #[test]
    fn seek_backward_stops_at_zero() {
        assert_eq!(seek_backward(12_000, SEEK_STEP_MS), 7_000);
        assert_eq!(seek_backward(3_000, SEEK_STEP_MS), 0);
        assert_eq!(seek_backward(0, SEEK_STEP_MS), 0);
    }

    #[test]
    fn seek_forward_stops_at_duration() {
        assert_eq!(seek_forward(97_000, 200_000, SEEK_STEP_MS), 102_000);
        assert_eq!(seek_forward(198_000, 200_000, SEEK_STEP_MS), 200_000);
        assert_eq!(seek_forward(200_000, 200_000, SEEK_STEP_MS), 200_000);
        assert_eq!(seek_forward(u64::MAX - 1, u64::MAX, SEEK_STEP_MS), u64::MAX);
    }

    #[test]
    fn volume_up_converges_to_max() {
        assert_eq!(volume_up(95, VOLUME_STEP), 100);
        assert_eq!(volume_up(100, VOLUME_STEP), 100);

        let mut volume = 0;
        for _ in 0..25 {
            volume = volume_up(volume, VOLUME_STEP);
            assert!(volume <= MAX_VOLUME);
        }
        assert_eq!(volume, MAX_VOLUME);
    }

    #[test]
    fn volume_down_converges_to_zero() {
        assert_eq!(volume_down(5, VOLUME_STEP), 0);
        assert_eq!(volume_down(0, VOLUME_STEP), 0);

        let mut volume = MAX_VOLUME;
        for _ in 0..25 {
            volume = volume_down(volume, VOLUME_STEP);
        }
        assert_eq!(volume, 0);
    }

    #[test]
    fn large_steps_do_not_overflow() {
        assert_eq!(volume_up(99, u8::MAX), MAX_VOLUME);
        assert_eq!(volume_down(1, u8::MAX), 0);
    }
}
