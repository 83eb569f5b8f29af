//! Deterministic [`RandomSource`] for testing.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::port::outbound::random::RandomSource;

/// Replays a fixed list of draws, cycling when it runs out.
pub struct SequenceRandom {
    values: Vec<f64>,
    next: AtomicUsize,
}

impl SequenceRandom {
    /// `values` must not be empty.
    pub fn new(values: Vec<f64>) -> Self {
        assert!(!values.is_empty(), "SequenceRandom needs at least one value");
        Self {
            values,
            next: AtomicUsize::new(0),
        }
    }

    /// Always returns `value`.
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }

    /// Number of draws taken so far.
    pub fn draws(&self) -> usize {
        self.next.load(Ordering::SeqCst)
    }
}

impl RandomSource for SequenceRandom {
    fn next_f64(&self) -> f64 {
        let i = self.next.fetch_add(1, Ordering::SeqCst);
        self.values[i % self.values.len()]
    }
}
