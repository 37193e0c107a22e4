use std::fmt;

/// Source of randomness for the game
///
/// Implementors provide raw draws; the game-level helpers (`roll_die`,
/// `chance`, `pick_index`) are derived from them and may be overridden by
/// scripted sources.
pub trait RandomSource: Send + fmt::Debug {
    /// Next raw 64-bit value
    fn next_u64(&mut self) -> u64;

    /// Uniform value in `[0.0, 1.0)`
    fn next_f64(&mut self) -> f64;

    /// Uniform integer in `[min, max)`; returns `min` when the range is empty
    fn range(&mut self, min: i64, max: i64) -> i64;

    /// Six-sided die, 1..=6
    fn roll_die(&mut self) -> u8 {
        self.range(1, 7) as u8
    }

    /// True with the given probability
    fn chance(&mut self, probability: f64) -> bool {
        self.next_f64() < probability
    }

    /// Uniform index into a collection of `len` items (0 when empty)
    fn pick_index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.range(0, len as i64) as usize
    }
}
