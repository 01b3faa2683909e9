use tracing::debug;

use super::{PlayerEvent, PlayerState};

/// Minimum playback progress between two `PositionChanged` events (ms)
const POSITION_NOTIFY_MS: u64 = 1000;
/// Distance from the end at which a drained stream counts as finished (ms)
const END_TOLERANCE_MS: u64 = 100;

/// What [`Timeline::play`] asks the engine to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayStart {
    AlreadyPlaying,
    Resume,
    /// The media had ended: rewind before resuming
    Restart,
}

/// Playback state, pending seek and change notifications of one media file.
///
/// A duration of 0 means the container did not report one: seeks are not
/// clamped and end of media is never inferred from the clock.
#[derive(Debug)]
pub struct Timeline {
    state: PlayerState,
    duration: u64,
    seek_target: Option<u64>,
    ended: bool,
    last_notified: Option<u64>,
    events: Vec<PlayerEvent>,
}

impl Timeline {
    pub fn new(duration: u64) -> Self {
        Self {
            state: PlayerState::Stopped,
            duration,
            seek_target: None,
            ended: false,
            last_notified: None,
            events: vec![PlayerEvent::DurationChanged(duration)],
        }
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn duration(&self) -> u64 {
        self.duration
    }

    pub fn seek_target(&self) -> Option<u64> {
        self.seek_target
    }

    pub fn is_seeking(&self) -> bool {
        self.seek_target.is_some()
    }

    fn clamp(&self, position: u64) -> u64 {
        if self.duration == 0 {
            position
        } else {
            position.min(self.duration)
        }
    }

    /// Position to display given the clock: the seek target while a seek
    /// is in flight.
    pub fn position(&self, clock_ms: u64) -> u64 {
        self.seek_target.unwrap_or_else(|| self.clamp(clock_ms))
    }

    fn set_state(&mut self, state: PlayerState) {
        if self.state != state {
            debug!(?state, "Playback state changed");
            self.state = state;
            self.events.push(PlayerEvent::StateChanged(state));
        }
    }

    fn notify_position(&mut self, position: u64) {
        self.last_notified = Some(position);
        self.events.push(PlayerEvent::PositionChanged(position));
    }

    /// Start a seek and return the clamped target.
    pub fn begin_seek(&mut self, position: u64) -> u64 {
        let target = self.clamp(position);
        self.seek_target = Some(target);
        self.ended = false;
        self.notify_position(target);
        target
    }

    /// The first frame at the seek target has been shown.
    pub fn finish_seek(&mut self) {
        self.seek_target = None;
    }

    pub fn play(&mut self) -> PlayStart {
        if self.state == PlayerState::Playing {
            return PlayStart::AlreadyPlaying;
        }
        let start = if self.ended {
            PlayStart::Restart
        } else {
            PlayStart::Resume
        };
        self.set_state(PlayerState::Playing);
        start
    }

    /// Returns false when there was nothing to pause.
    pub fn pause(&mut self) -> bool {
        if self.state != PlayerState::Playing {
            return false;
        }
        self.set_state(PlayerState::Paused);
        true
    }

    /// Stop and begin rewinding; returns the seek target.
    pub fn stop(&mut self) -> u64 {
        self.set_state(PlayerState::Stopped);
        self.begin_seek(0)
    }

    /// Account for one UI frame of playback. `drained` tells whether the
    /// decoder has nothing left in flight. Returns true when the media just
    /// ended.
    pub fn tick(&mut self, clock_ms: u64, drained: bool) -> bool {
        if self.state != PlayerState::Playing || self.is_seeking() {
            return false;
        }

        if self.duration > 0 && drained && clock_ms + END_TOLERANCE_MS >= self.duration {
            self.set_state(PlayerState::Stopped);
            self.ended = true;
            self.notify_position(self.duration);
            return true;
        }

        let position = self.position(clock_ms);
        if self
            .last_notified
            .map_or(true, |last| position.abs_diff(last) >= POSITION_NOTIFY_MS)
        {
            self.notify_position(position);
        }
        false
    }

    pub fn take_events(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.events)
    }
}
