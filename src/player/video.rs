use crossbeam_channel::Receiver;
use std::collections::VecDeque;

/// Frames this far behind the clock are skipped (ms)
const DROP_THRESHOLD_MS: u64 = 20;
/// Frames this far ahead of the clock are held back (ms)
const HOLD_THRESHOLD_MS: u64 = 20;
/// After a seek, frames earlier than the target by more than this are stale (ms)
const SEEK_TOLERANCE_MS: u64 = 500;

/// Whether a frame at `pts_ms` is close enough to a seek to `target_ms` to be
/// shown for it.
pub fn reaches_seek_target(pts_ms: u64, target_ms: u64) -> bool {
    pts_ms >= target_ms.saturating_sub(SEEK_TOLERANCE_MS)
}

/// An RGBA frame ready for upload, tightly packed (`width * 4` bytes per row)
pub struct DecodedFrame {
    pub rgba: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub pts_ms: u64,
}

/// Buffers decoded frames and picks the one to show for a clock position.
pub struct FrameQueue {
    receiver: Receiver<DecodedFrame>,
    pending: VecDeque<DecodedFrame>,
    capacity: usize,
}

impl FrameQueue {
    pub fn new(receiver: Receiver<DecodedFrame>, capacity: usize) -> Self {
        Self {
            receiver,
            pending: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    fn fill(&mut self) {
        while self.pending.len() < self.capacity {
            match self.receiver.try_recv() {
                Ok(frame) => self.pending.push_back(frame),
                Err(_) => break,
            }
        }
    }

    /// Take the frame due at `clock_ms`, if a new one is due.
    /// Late frames are dropped on the way.
    pub fn next_due(&mut self, clock_ms: u64) -> Option<DecodedFrame> {
        self.fill();

        let earliest = clock_ms.saturating_sub(DROP_THRESHOLD_MS);
        while self.pending.front().is_some_and(|f| f.pts_ms < earliest) {
            self.pending.pop_front();
        }

        if self
            .pending
            .front()
            .is_some_and(|f| f.pts_ms <= clock_ms + HOLD_THRESHOLD_MS)
        {
            self.pending.pop_front()
        } else {
            None
        }
    }

    /// Take the first frame usable after seeking to `target_ms`.
    pub fn first_after_seek(&mut self, target_ms: u64) -> Option<DecodedFrame> {
        self.fill();

        while self
            .pending
            .front()
            .is_some_and(|f| !reaches_seek_target(f.pts_ms, target_ms))
        {
            self.pending.pop_front();
        }

        self.pending.pop_front()
    }

    /// Drop everything buffered, including frames still in the channel.
    pub fn clear(&mut self) {
        self.pending.clear();
        while self.receiver.try_recv().is_ok() {}
    }

    /// Nothing buffered and nothing in flight
    pub fn is_drained(&self) -> bool {
        self.pending.is_empty() && self.receiver.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::{bounded, Sender};

    fn frame(pts_ms: u64) -> DecodedFrame {
        DecodedFrame {
            rgba: vec![0; 4],
            width: 1,
            height: 1,
            pts_ms,
        }
    }

    fn queue_with(pts: &[u64]) -> (Sender<DecodedFrame>, FrameQueue) {
        let (sender, receiver) = bounded(16);
        for &p in pts {
            sender.send(frame(p)).unwrap();
        }
        (sender, FrameQueue::new(receiver, 16))
    }

    #[test]
    fn holds_frames_ahead_of_clock() {
        let (_tx, mut queue) = queue_with(&[1000]);
        assert!(queue.next_due(900).is_none());
        assert_eq!(queue.next_due(985).map(|f| f.pts_ms), Some(1000));
    }

    #[test]
    fn drops_late_frames() {
        let (_tx, mut queue) = queue_with(&[0, 40, 80, 120]);
        let shown = queue.next_due(100).map(|f| f.pts_ms);
        assert_eq!(shown, Some(80));
        assert_eq!(queue.next_due(120).map(|f| f.pts_ms), Some(120));
        assert!(queue.is_drained());
    }

    #[test]
    fn seek_skips_stale_frames() {
        let (_tx, mut queue) = queue_with(&[1000, 9000, 9600, 10_000]);
        assert_eq!(queue.first_after_seek(10_000).map(|f| f.pts_ms), Some(9600));
    }

    #[test]
    fn seek_target_tolerance() {
        assert!(reaches_seek_target(9_500, 10_000));
        assert!(reaches_seek_target(12_000, 10_000));
        assert!(!reaches_seek_target(9_499, 10_000));
        assert!(reaches_seek_target(0, 300));
    }

    #[test]
    fn paused_seek_waits_for_a_frame_near_the_target() {
        // Keyframe well before the target, then the frames decoded after it
        let (tx, mut queue) = queue_with(&[50_000]);
        assert!(queue.first_after_seek(55_000).is_none());

        tx.send(frame(54_600)).unwrap();
        assert_eq!(queue.first_after_seek(55_000).map(|f| f.pts_ms), Some(54_600));
    }

    #[test]
    fn clear_drains_channel() {
        let (tx, mut queue) = queue_with(&[0, 40]);
        queue.next_due(0);
        tx.send(frame(80)).unwrap();
        queue.clear();
        assert!(queue.is_drained());
        assert!(queue.next_due(1000).is_none());
    }
}
