//! Deterministic random number generation.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical dice and rewards
//! - **Scriptable**: `ScriptedRandom` replays fixed values for rule scenarios
//!
//! The rules only ever ask for three things: a die face, an integer in a
//! range and a weighted coin flip. [`RandomSource`] is that seam.
//!
//! ```
//! use sands_engine::core::{GameRng, RandomSource};
//!
//! let mut a = GameRng::new(42);
//! let mut b = GameRng::new(42);
//! assert_eq!(a.roll_die(), b.roll_die());
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;
use std::ops::Range;

/// Source of every random draw the rules make.
pub trait RandomSource {
    /// A fair six-sided die, `1..=6`.
    fn roll_die(&mut self) -> u8;

    /// A uniform integer in `range`.
    fn gen_range(&mut self, range: Range<i64>) -> i64;

    /// `true` with the given probability.
    fn gen_bool(&mut self, probability: f64) -> bool;
}

/// Deterministic ChaCha8-backed RNG.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for GameRng {
    fn roll_die(&mut self) -> u8 {
        self.inner.gen_range(1..=6)
    }

    fn gen_range(&mut self, range: Range<i64>) -> i64 {
        if range.is_empty() {
            return range.start;
        }
        self.inner.gen_range(range)
    }

    fn gen_bool(&mut self, probability: f64) -> bool {
        self.inner.gen_bool(probability.clamp(0.0, 1.0))
    }
}

/// Replays queued values in order.
///
/// Each kind of draw has its own queue. When a queue runs dry the source
/// falls back to the lowest legal value: die 1, `range.start`, and `false`.
/// Scripted range values are clamped into the requested range.
///
/// ```
/// use sands_engine::core::{RandomSource, ScriptedRandom};
///
/// let mut rng = ScriptedRandom::new().dice([5]).values([40]);
/// assert_eq!(rng.roll_die(), 5);
/// assert_eq!(rng.gen_range(20..70), 40);
/// assert_eq!(rng.roll_die(), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ScriptedRandom {
    dice: VecDeque<u8>,
    values: VecDeque<i64>,
    flips: VecDeque<bool>,
}

impl ScriptedRandom {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue die faces.
    #[must_use]
    pub fn dice(mut self, faces: impl IntoIterator<Item = u8>) -> Self {
        self.dice.extend(faces);
        self
    }

    /// Queue range results.
    #[must_use]
    pub fn values(mut self, values: impl IntoIterator<Item = i64>) -> Self {
        self.values.extend(values);
        self
    }

    /// Queue coin flips.
    #[must_use]
    pub fn flips(mut self, flips: impl IntoIterator<Item = bool>) -> Self {
        self.flips.extend(flips);
        self
    }

    /// Queue more die faces on an existing source.
    pub fn push_dice(&mut self, faces: impl IntoIterator<Item = u8>) {
        self.dice.extend(faces);
    }

    /// True when every queue has been consumed.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.dice.is_empty() && self.values.is_empty() && self.flips.is_empty()
    }
}

impl RandomSource for ScriptedRandom {
    fn roll_die(&mut self) -> u8 {
        self.dice.pop_front().map_or(1, |face| face.clamp(1, 6))
    }

    fn gen_range(&mut self, range: Range<i64>) -> i64 {
        let last = (range.end - 1).max(range.start);
        self.values
            .pop_front()
            .map_or(range.start, |value| value.clamp(range.start, last))
    }

    fn gen_bool(&mut self, _probability: f64) -> bool {
        self.flips.pop_front().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.roll_die(), rng2.roll_die());
            assert_eq!(rng1.gen_range(20..70), rng2.gen_range(20..70));
        }
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = GameRng::new(1);
        let mut rng2 = GameRng::new(2);

        let seq1: Vec<_> = (0..20).map(|_| rng1.gen_range(0..1000)).collect();
        let seq2: Vec<_> = (0..20).map(|_| rng2.gen_range(0..1000)).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_die_faces_in_range() {
        let mut rng = GameRng::new(7);
        let mut seen = [false; 6];

        for _ in 0..600 {
            let face = rng.roll_die();
            assert!((1..=6).contains(&face));
            seen[usize::from(face - 1)] = true;
        }

        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_gen_bool_extremes() {
        let mut rng = GameRng::new(3);
        for _ in 0..50 {
            assert!(rng.gen_bool(1.0));
            assert!(!rng.gen_bool(0.0));
        }
    }

    #[test]
    fn test_clone_continues_same_stream() {
        let mut rng = GameRng::new(42);
        for _ in 0..100 {
            rng.roll_die();
        }

        let mut fork = rng.clone();
        let expected: Vec<_> = (0..10).map(|_| rng.gen_range(0..1000)).collect();
        let actual: Vec<_> = (0..10).map(|_| fork.gen_range(0..1000)).collect();

        assert_eq!(expected, actual);
    }

    #[test]
    fn test_scripted_replays_in_order() {
        let mut rng = ScriptedRandom::new().dice([3, 6]).values([40, 250]).flips([true]);

        assert_eq!(rng.roll_die(), 3);
        assert_eq!(rng.roll_die(), 6);
        assert_eq!(rng.gen_range(20..70), 40);
        assert_eq!(rng.gen_range(100..400), 250);
        assert!(rng.gen_bool(0.6));
        assert!(rng.is_exhausted());
    }

    #[test]
    fn test_scripted_fallbacks_and_clamping() {
        let mut rng = ScriptedRandom::new().dice([9]).values([500]);

        assert_eq!(rng.roll_die(), 6);
        assert_eq!(rng.gen_range(20..70), 69);
        assert_eq!(rng.roll_die(), 1);
        assert_eq!(rng.gen_range(20..70), 20);
        assert!(!rng.gen_bool(1.0));
    }
}
