//! Random number sources.
//!
//! Every stochastic operator in this crate draws integers through the
//! [`RandomSource`] trait rather than calling a generator directly. Real runs
//! plug in a seeded or thread-local [`rand`] generator; tests plug in a
//! [`ScriptedRandom`] that replays a fixed sequence, which makes every
//! operator deterministic without touching its code.

use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

// ===========================================================================
// RandomSource
// ===========================================================================

/// A source of uniformly distributed integers.
pub trait RandomSource {
    /// Returns an integer in `min..=max`.
    ///
    /// Both bounds are inclusive. Implementations backed by a real generator
    /// must draw uniformly and honor the bounds; scripted sources may ignore
    /// them.
    fn draw(&mut self, min: u32, max: u32) -> u32;
}

impl RandomSource for StdRng {
    fn draw(&mut self, min: u32, max: u32) -> u32 {
        self.random_range(min..=max)
    }
}

impl RandomSource for ThreadRng {
    fn draw(&mut self, min: u32, max: u32) -> u32 {
        self.random_range(min..=max)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn draw(&mut self, min: u32, max: u32) -> u32 {
        (**self).draw(min, max)
    }
}

/// Creates a reproducible generator from a seed.
///
/// # Examples
///
/// ```
/// use geneworld::RandomSource;
///
/// let mut rng = geneworld::random::seeded_rng(42);
/// let roll = rng.draw(1, 100);
/// assert!((1..=100).contains(&roll));
/// ```
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

// ===========================================================================
// ScriptedRandom
// ===========================================================================

/// A deterministic [`RandomSource`] that replays a fixed script.
///
/// `draw` returns the script values in order, ignoring the requested bounds,
/// and wraps around once the script is exhausted. Intended for tests that
/// need to steer an operator onto an exact path.
///
/// # Examples
///
/// ```
/// use geneworld::{RandomSource, ScriptedRandom};
///
/// let mut rng = ScriptedRandom::new([7, 50]);
/// assert_eq!(rng.draw(1, 100), 7);
/// assert_eq!(rng.draw(1, 100), 50);
/// assert_eq!(rng.draw(0, 5), 7); // wrapped around
/// ```
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    script: Vec<u32>,
    cursor: usize,
}

impl ScriptedRandom {
    /// Creates a source that cycles through `script`.
    ///
    /// # Panics
    ///
    /// Panics if `script` is empty.
    pub fn new<I>(script: I) -> Self
    where
        I: IntoIterator<Item = u32>,
    {
        let script: Vec<u32> = script.into_iter().collect();
        assert!(!script.is_empty(), "ScriptedRandom requires at least one value");
        Self { script, cursor: 0 }
    }
}

impl RandomSource for ScriptedRandom {
    fn draw(&mut self, _min: u32, _max: u32) -> u32 {
        let value = self.script[self.cursor];
        self.cursor = (self.cursor + 1) % self.script.len();
        value
    }
}

// ===========================================================================
// Tests
// ===========================================================================
