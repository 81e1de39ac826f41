//! A minimal bit-string genetic algorithm.
//!
//! Genomes are fixed-length bit strings read as 3-bit "dice" blocks; a
//! [`World`] evolves a population of them through the classic generational
//! pipeline:
//!
//! - **Selection**: biased roulette wheel; one roll, and the first genome
//!   whose fitness share covers it wins
//!   ([`World::spin_biased_roulette_wheel`]).
//! - **Crossover**: one-point prefix exchange over adjacent pairs
//!   ([`World::crossover`]).
//! - **Mutation**: a two-position gene swap on the first of each pair
//!   ([`World::mutate`]).
//! - **Replacement**: a full new generation drawn from the wheel
//!   ([`World::next_generation`]).
//!
//! Fitness defaults to the two-dice total ([`fitness::dice_total`], peak 14)
//! and is swappable via [`World::with_fitness`]. All randomness flows
//! through the [`RandomSource`] trait, so tests can script exact draws.
//!
//! # Example
//!
//! ```
//! use geneworld::{random, World, WorldConfig};
//!
//! let config = WorldConfig::default()
//!     .with_population_size(30)
//!     .with_crossover_chance(60)
//!     .with_mutation_chance(10);
//!
//! let mut rng = random::seeded_rng(42);
//! let mut world = World::new(config);
//! world.initialize_population(&mut rng);
//!
//! for generation in 0..200 {
//!     world.mutate(&mut rng)?;
//!     world.crossover(&mut rng)?;
//!     world.next_generation(&mut rng)?;
//!
//!     if let Some(champion) = world.champion() {
//!         println!("generation {generation}: {champion}");
//!         break;
//!     }
//! }
//! # Ok::<(), geneworld::Error>(())
//! ```

pub mod fitness;
pub mod random;

mod config;
mod error;
mod genome;
mod world;

pub use config::WorldConfig;
pub use error::{Error, Result};
pub use fitness::FitnessFn;
pub use genome::{Genome, GenomeId};
pub use random::{RandomSource, ScriptedRandom};
pub use world::World;
