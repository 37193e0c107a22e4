use crate::rng::source::RandomSource;
use std::collections::VecDeque;

/// Random source with preset results, for deterministic scenarios
///
/// - `roll_die` pops the next scripted die, then falls back to the default roll
/// - `chance` pops the next scripted outcome, then answers `false`
/// - `range` pops the next scripted value (clamped into the range), then
///   answers `min`
///
/// With nothing scripted no random event ever fires and every die shows the
/// default roll.
///
/// # Example
/// ```
/// use kanban_simulator_core_rs::rng::{RandomSource, ScriptedRng};
///
/// let mut rng = ScriptedRng::new(3).with_dice([6, 1]);
/// assert_eq!(rng.roll_die(), 6);
/// assert_eq!(rng.roll_die(), 1);
/// assert_eq!(rng.roll_die(), 3);
/// assert!(!rng.chance(0.99));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScriptedRng {
    dice: VecDeque<u8>,
    outcomes: VecDeque<bool>,
    ranges: VecDeque<i64>,
    default_roll: u8,
    counter: u64,
}

impl ScriptedRng {
    /// Scripted source whose unscripted dice show `default_roll` (clamped to 1..=6)
    pub fn new(default_roll: u8) -> Self {
        Self {
            default_roll: default_roll.clamp(1, 6),
            ..Self::default()
        }
    }

    pub fn with_dice(mut self, dice: impl IntoIterator<Item = u8>) -> Self {
        self.push_dice(dice);
        self
    }

    pub fn with_outcomes(mut self, outcomes: impl IntoIterator<Item = bool>) -> Self {
        self.push_outcomes(outcomes);
        self
    }

    pub fn with_ranges(mut self, values: impl IntoIterator<Item = i64>) -> Self {
        self.ranges.extend(values);
        self
    }

    pub fn push_dice(&mut self, dice: impl IntoIterator<Item = u8>) {
        self.dice.extend(dice);
    }

    pub fn push_outcomes(&mut self, outcomes: impl IntoIterator<Item = bool>) {
        self.outcomes.extend(outcomes);
    }
}

impl RandomSource for ScriptedRng {
    fn next_u64(&mut self) -> u64 {
        self.counter += 1;
        self.counter
    }

    fn next_f64(&mut self) -> f64 {
        0.0
    }

    fn range(&mut self, min: i64, max: i64) -> i64 {
        if min >= max {
            return min;
        }
        match self.ranges.pop_front() {
            Some(value) => value.clamp(min, max - 1),
            None => min,
        }
    }

    fn roll_die(&mut self) -> u8 {
        self.dice.pop_front().unwrap_or(self.default_roll)
    }

    fn chance(&mut self, _probability: f64) -> bool {
        self.outcomes.pop_front().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcomes_then_false() {
        let mut rng = ScriptedRng::new(1).with_outcomes([true, false, true]);
        assert!(rng.chance(0.0));
        assert!(!rng.chance(1.0));
        assert!(rng.chance(0.5));
        assert!(!rng.chance(1.0));
    }

    #[test]
    fn test_ranges_clamped() {
        let mut rng = ScriptedRng::new(1).with_ranges([99, -5, 3]);
        assert_eq!(rng.range(0, 6), 5);
        assert_eq!(rng.range(0, 6), 0);
        assert_eq!(rng.range(0, 6), 3);
        assert_eq!(rng.range(10, 20), 10);
    }

    #[test]
    fn test_pick_index_uses_ranges() {
        let mut rng = ScriptedRng::new(1).with_ranges([2]);
        assert_eq!(rng.pick_index(3), 2);
        assert_eq!(rng.pick_index(3), 0);
    }
}
