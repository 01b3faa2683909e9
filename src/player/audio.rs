use rodio::Source;
use std::sync::Arc;
use std::time::Duration;

use super::clock::PlaybackClock;
use super::sample_buffer::SampleBuffer;

/// Samples consumed between clock updates
const CLOCK_BATCH: u64 = 256;

/// Endless rodio source fed by the decoder. Counts what the device consumes
/// and advances the playback clock with it.
pub struct ClockedSource {
    buffer: Arc<SampleBuffer>,
    clock: PlaybackClock,
    /// The media has no audio track: silence drives the clock
    silent_track: bool,
    pending: u64,
}

impl ClockedSource {
    pub fn new(buffer: Arc<SampleBuffer>, clock: PlaybackClock, silent_track: bool) -> Self {
        Self {
            buffer,
            clock,
            silent_track,
            pending: 0,
        }
    }

    fn count_sample(&mut self) {
        self.pending += 1;
        if self.pending == CLOCK_BATCH {
            self.clock.advance_samples(CLOCK_BATCH);
            self.pending = 0;
        }
    }
}

impl Iterator for ClockedSource {
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        if self.clock.take_flush() {
            self.buffer.clear();
            self.pending = 0;
            return Some(0.0);
        }

        match self.buffer.pop() {
            Some(sample) => {
                self.count_sample();
                Some(sample)
            }
            None => {
                // Underrun. Only a track without audio lets silence count as time.
                if self.silent_track {
                    self.count_sample();
                }
                Some(0.0)
            }
        }
    }
}

impl Source for ClockedSource {
    fn current_frame_len(&self) -> Option<usize> {
        None
    }

    fn channels(&self) -> u16 {
        self.clock.channels()
    }

    fn sample_rate(&self) -> u32 {
        self.clock.sample_rate()
    }

    fn total_duration(&self) -> Option<Duration> {
        None
    }
}
