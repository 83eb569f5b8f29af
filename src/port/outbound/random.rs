//! Random source port.
//!
//! Synthetic prices and fallback values are drawn through this trait so
//! tests can replay exact sequences.

/// Source of uniformly distributed values in `[0, 1)`.
pub trait RandomSource: Send + Sync {
    /// Draw the next value in `[0, 1)`.
    fn next_f64(&self) -> f64;

    /// Draw an index in `0..len`. `len` must be non-zero.
    fn next_index(&self, len: usize) -> usize {
        let index = (self.next_f64() * len as f64).floor() as usize;
        index.min(len.saturating_sub(1))
    }
}
