use std::collections::VecDeque;

use crate::features::FeatureVector;

pub const WINDOW_SIZE: usize = 30;

/// Sliding window of the most recent feature vectors. Never reset: once full
/// it stays full, evicting the oldest frame on every push.
#[derive(Debug)]
pub struct FrameWindow {
    frames: VecDeque<FeatureVector>,
    capacity: usize,
}

impl FrameWindow {
    pub fn new() -> Self {
        Self::with_capacity(WINDOW_SIZE)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            frames: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, features: FeatureVector) {
        self.frames.push_back(features);
        while self.frames.len() > self.capacity {
            self.frames.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.frames.len() == self.capacity
    }

    /// True once any buffered value is non-zero. Gates inference so a window
    /// full of empty frames is reported as waiting instead of classified.
    pub fn has_signal(&self) -> bool {
        self.frames.iter().flatten().any(|v| *v != 0.0)
    }

    /// Buffered vectors oldest first; this order is the time axis the model
    /// sees.
    pub fn snapshot(&self) -> Vec<FeatureVector> {
        self.frames.iter().copied().collect()
    }
}

impl Default for FrameWindow {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::FEATURE_DIM;

    fn filled(value: f32) -> FeatureVector {
        [value; FEATURE_DIM]
    }

    #[test]
    fn test_window_never_exceeds_capacity() {
        let mut window = FrameWindow::new();
        for i in 0..35 {
            window.push(filled(i as f32));
            assert!(window.len() <= WINDOW_SIZE);
        }
        assert_eq!(window.len(), WINDOW_SIZE);

        // Only the 30 most recent remain, oldest first.
        let snapshot = window.snapshot();
        assert_eq!(snapshot[0][0], 5.0);
        assert_eq!(snapshot[WINDOW_SIZE - 1][0], 34.0);
    }

    #[test]
    fn test_snapshot_preserves_insertion_order() {
        let mut window = FrameWindow::with_capacity(3);
        window.push(filled(1.0));
        window.push(filled(2.0));
        window.push(filled(3.0));

        let snapshot = window.snapshot();
        assert_eq!(snapshot.len(), 3);
        assert_eq!(snapshot[0][0], 1.0);
        assert_eq!(snapshot[1][0], 2.0);
        assert_eq!(snapshot[2][0], 3.0);
    }

    #[test]
    fn test_is_full_only_at_capacity() {
        let mut window = FrameWindow::new();
        for _ in 0..WINDOW_SIZE - 1 {
            window.push(filled(0.0));
        }
        assert!(!window.is_full());
        window.push(filled(0.0));
        assert!(window.is_full());
        window.push(filled(0.0));
        assert!(window.is_full());
    }

    #[test]
    fn test_has_signal_requires_nonzero_value() {
        let mut window = FrameWindow::new();
        assert!(!window.has_signal());

        window.push(filled(0.0));
        assert!(!window.has_signal());

        let mut spike = filled(0.0);
        spike[FEATURE_DIM - 1] = 0.001;
        window.push(spike);
        assert!(window.has_signal());
    }

    #[test]
    fn test_signal_expires_with_eviction() {
        let mut window = FrameWindow::new();
        window.push(filled(1.0));
        assert!(window.has_signal());

        for _ in 0..WINDOW_SIZE {
            window.push(filled(0.0));
        }
        assert!(!window.has_signal());
    }
}
