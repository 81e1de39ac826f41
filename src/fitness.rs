//! Fitness strategies.
//!
//! The engine scores genomes through a pluggable function, so selection and
//! champion detection never hard-code a decoding scheme. [`dice_total`] is
//! the default; [`World::with_fitness`](crate::World::with_fitness) installs
//! an alternative.

use crate::genome::Genome;

/// A boxed fitness strategy, as held by the engine.
pub type FitnessFn = Box<dyn Fn(&Genome) -> u32 + Send + Sync>;

/// Default fitness: the two-dice total of the first six genes.
///
/// Equivalent to [`Genome::total`], so it panics on genomes shorter than six
/// genes.
pub fn dice_total(genome: &Genome) -> u32 {
    genome.total()
}

/// Alternative fitness: the sum of every 3-bit block, not just the first
/// two. Works on any genome length, counting a trailing partial block.
pub fn block_sum(genome: &Genome) -> u32 {
    genome.block_values().sum()
}
