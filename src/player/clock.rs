use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

/// Playback clock shared by the audio output, the decoder thread and the UI.
/// The audio output advances it, so audio is the master clock.
#[derive(Clone)]
pub struct PlaybackClock {
    position_us: Arc<AtomicU64>,
    paused: Arc<AtomicBool>,
    /// Set on seek so the audio output discards stale samples
    flush_pending: Arc<AtomicBool>,
    sample_rate: u32,
    channels: u16,
}

impl PlaybackClock {
    pub fn new(sample_rate: u32, channels: u16) -> Self {
        Self {
            position_us: Arc::new(AtomicU64::new(0)),
            paused: Arc::new(AtomicBool::new(true)),
            flush_pending: Arc::new(AtomicBool::new(false)),
            sample_rate,
            channels,
        }
    }

    /// Current position in milliseconds
    pub fn position_ms(&self) -> u64 {
        self.position_us.load(Ordering::Relaxed) / 1000
    }

    /// Jump to `ms` and ask the audio output to drop buffered samples.
    pub fn set_position_ms(&self, ms: u64) {
        self.position_us
            .store(ms.saturating_mul(1000), Ordering::Relaxed);
        self.flush_pending.store(true, Ordering::Relaxed);
    }

    /// Returns true once per `set_position_ms` call.
    pub fn take_flush(&self) -> bool {
        self.flush_pending.swap(false, Ordering::Relaxed)
    }

    /// Advance by `samples` interleaved samples unless paused.
    pub fn advance_samples(&self, samples: u64) {
        if self.paused.load(Ordering::Relaxed) {
            return;
        }
        let per_second = self.sample_rate as u64 * self.channels as u64;
        if per_second == 0 {
            return;
        }
        let delta_us = samples * 1_000_000 / per_second;
        self.position_us.fetch_add(delta_us, Ordering::Relaxed);
    }

    pub fn pause(&self) {
        self.paused.store(true, Ordering::Relaxed);
    }

    pub fn resume(&self) {
        self.paused.store(false, Ordering::Relaxed);
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }
}
