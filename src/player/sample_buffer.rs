use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

/// Bounded audio sample queue between the decoder and the audio output.
/// Pushing never blocks: when full, the oldest samples are discarded.
pub struct SampleBuffer {
    inner: Mutex<VecDeque<f32>>,
    capacity: usize,
}

impl SampleBuffer {
    pub fn new(capacity: usize) -> Arc<Self> {
        Arc::new(Self {
            inner: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
        })
    }

    pub fn extend(&self, samples: &[f32]) {
        let mut buf = self.inner.lock();
        // Only the newest `capacity` samples can survive anyway
        let samples = &samples[samples.len().saturating_sub(self.capacity)..];
        let overflow = (buf.len() + samples.len()).saturating_sub(self.capacity);
        buf.drain(..overflow);
        buf.extend(samples.iter().copied());
    }

    pub fn pop(&self) -> Option<f32> {
        self.inner.lock().pop_front()
    }

    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.inner.lock().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_in_order() {
        let buffer = SampleBuffer::new(8);
        buffer.extend(&[0.1, 0.2, 0.3]);
        assert_eq!(buffer.pop(), Some(0.1));
        assert_eq!(buffer.pop(), Some(0.2));
        assert_eq!(buffer.pop(), Some(0.3));
        assert_eq!(buffer.pop(), None);
    }

    #[test]
    fn overwrites_oldest_when_full() {
        let buffer = SampleBuffer::new(4);
        buffer.extend(&[1.0, 2.0, 3.0]);
        buffer.extend(&[4.0, 5.0]);
        assert_eq!(buffer.len(), 4);
        assert_eq!(buffer.pop(), Some(2.0));
    }

    #[test]
    fn oversized_push_keeps_newest() {
        let buffer = SampleBuffer::new(2);
        buffer.extend(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(buffer.pop(), Some(4.0));
        assert_eq!(buffer.pop(), Some(5.0));
    }

    #[test]
    fn clear_empties() {
        let buffer = SampleBuffer::new(4);
        buffer.extend(&[1.0, 2.0]);
        buffer.clear();
        assert_eq!(buffer.pop(), None);
    }
}
