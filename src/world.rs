//! The world: a genome population and its generational operators.
//!
//! A [`World`] owns the population and applies, per generation, biased
//! roulette selection, one-point crossover, and two-position swap mutation.
//! The classic loop mutates, crosses over, replaces the generation through
//! the wheel, then checks for a champion.
//!
//! # References
//!
//! - Goldberg, "Genetic Algorithms in Search, Optimization and Machine
//!   Learning" (1989): fitness-proportionate (roulette wheel) selection.

use std::fmt;

use crate::config::WorldConfig;
use crate::error::{Error, Result};
use crate::fitness::{self, FitnessFn};
use crate::genome::Genome;
use crate::random::RandomSource;

/// A population of genomes plus the operators that evolve it.
///
/// The population starts empty; call [`World::initialize_population`] before
/// any operator, or seed genomes directly through
/// [`World::population_mut`].
pub struct World {
    config: WorldConfig,
    population: Vec<Genome>,
    fitness: FitnessFn,
}

impl World {
    /// Fitness value at which a genome counts as the champion: two 3-bit
    /// dice both showing 7.
    pub const CHAMPION_TOTAL: u32 = 14;

    /// Creates a world with an empty population and the default
    /// [`fitness::dice_total`] strategy.
    pub fn new(config: WorldConfig) -> Self {
        Self { config, population: Vec::new(), fitness: Box::new(fitness::dice_total) }
    }

    /// Replaces the fitness strategy used by selection and champion
    /// detection.
    pub fn with_fitness<F>(mut self, fitness: F) -> Self
    where
        F: Fn(&Genome) -> u32 + Send + Sync + 'static,
    {
        self.fitness = Box::new(fitness);
        self
    }

    /// The configuration this world was built with.
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// The current population.
    pub fn population(&self) -> &[Genome] {
        &self.population
    }

    /// Mutable access to the population, for seeding known genomes.
    pub fn population_mut(&mut self) -> &mut Vec<Genome> {
        &mut self.population
    }

    /// Scores a genome with the installed fitness strategy.
    pub fn fitness_of(&self, genome: &Genome) -> u32 {
        (self.fitness)(genome)
    }

    /// Replaces the population with `population_size` freshly randomized
    /// genomes of `gene_size` genes each.
    pub fn initialize_population<R: RandomSource>(&mut self, rng: &mut R) {
        let mut population = Vec::with_capacity(self.config.population_size);
        for _ in 0..self.config.population_size {
            let mut genome = Genome::new(self.config.gene_size);
            genome.randomize(rng);
            population.push(genome);
        }
        self.population = population;
    }

    /// Selects one genome, biased toward higher fitness.
    ///
    /// Rolls once in `1..=100`, then walks the population in order and
    /// returns the first genome whose fitness share of the population total
    /// (as a percentage) is at or above the roll. A genome with zero fitness
    /// is returned as soon as the walk reaches it, since its share can never
    /// beat any roll. If no genome qualifies (including the all-zero
    /// population, whose shares are not numbers), the first genome is
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyPopulation`] if the population is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use geneworld::{Genome, ScriptedRandom, World, WorldConfig};
    ///
    /// let mut world = World::new(WorldConfig::default());
    /// world.population_mut().push("111 111".parse::<Genome>()?);
    /// world.population_mut().push("000 000".parse::<Genome>()?);
    ///
    /// let mut rng = ScriptedRandom::new([40]);
    /// let survivor = world.spin_biased_roulette_wheel(&mut rng)?;
    /// assert_eq!(survivor.total(), 14);
    /// # Ok::<(), geneworld::Error>(())
    /// ```
    pub fn spin_biased_roulette_wheel<R: RandomSource>(&self, rng: &mut R) -> Result<&Genome> {
        self.ensure_population()?;

        let population_total: u32 =
            self.population.iter().map(|genome| self.fitness_of(genome)).sum();
        let roll = rng.draw(1, 100);

        for genome in &self.population {
            let share =
                (f64::from(self.fitness_of(genome)) / f64::from(population_total)) * 100.0;
            if share <= 0.0 || f64::from(roll) <= share {
                return Ok(genome);
            }
        }

        // Only reachable when every share was NaN (population total of 0).
        Ok(&self.population[0])
    }

    /// Crosses over the population in adjacent pairs, or does nothing.
    ///
    /// One roll in `1..=100` against `crossover_chance` decides the whole
    /// generation. When it hits, each pair `(i, i + 1)` draws a split
    /// position and is replaced by two children: each child takes the other
    /// parent's genes before the position and its own from it onward.
    /// Children are new individuals with fresh ids. With an odd population
    /// the trailing genome is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyPopulation`] if the population is empty.
    pub fn crossover<R: RandomSource>(&mut self, rng: &mut R) -> Result<()> {
        self.ensure_population()?;

        let chance = self.config.crossover_chance;
        let roll = rng.draw(1, 100);
        if chance == 0 || roll > chance {
            log::debug!("no crossover this generation: rolled {roll} over the {chance}% threshold");
            return Ok(());
        }

        for i in (0..self.population.len() - 1).step_by(2) {
            let position = self.draw_position(rng);

            let mut first_child = self.population[i].duplicate();
            let mut second_child = self.population[i + 1].duplicate();
            first_child.swap_with(&self.population[i + 1], position);
            second_child.swap_with(&self.population[i], position);

            self.population[i] = first_child;
            self.population[i + 1] = second_child;
        }

        Ok(())
    }

    /// Mutates the population in adjacent pairs, or does nothing.
    ///
    /// One roll in `1..=100` against `mutation_chance` decides the whole
    /// generation. When it hits, the first genome of each pair draws two
    /// positions and swaps the genes there, in place; ids are unchanged.
    /// With an odd population the trailing genome forms a pair of its own
    /// and is mutated.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyPopulation`] if the population is empty.
    pub fn mutate<R: RandomSource>(&mut self, rng: &mut R) -> Result<()> {
        self.ensure_population()?;

        let chance = self.config.mutation_chance;
        let roll = rng.draw(1, 100);
        if chance == 0 || roll > chance {
            log::debug!("no mutation this generation: rolled {roll} over the {chance}% threshold");
            return Ok(());
        }

        for i in (0..self.population.len()).step_by(2) {
            let first = self.draw_position(rng);
            let second = self.draw_position(rng);
            self.population[i].swap_genes(first, second);
        }

        Ok(())
    }

    /// Replaces the population by spinning the wheel once per slot.
    ///
    /// Each selected genome is copied into the new generation with its id
    /// preserved, so a genome picked twice appears as two equal but
    /// independently stored individuals.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyPopulation`] if the population is empty.
    pub fn next_generation<R: RandomSource>(&mut self, rng: &mut R) -> Result<()> {
        self.ensure_population()?;

        let mut next = Vec::with_capacity(self.population.len());
        for _ in 0..self.population.len() {
            next.push(self.spin_biased_roulette_wheel(rng)?.clone());
        }
        self.population = next;

        Ok(())
    }

    /// The first genome whose fitness is exactly [`World::CHAMPION_TOTAL`],
    /// if any.
    pub fn champion(&self) -> Option<&Genome> {
        self.population.iter().find(|genome| self.fitness_of(genome) == Self::CHAMPION_TOTAL)
    }

    /// Draws a gene position in `0..gene_size`.
    fn draw_position<R: RandomSource>(&self, rng: &mut R) -> usize {
        rng.draw(0, self.config.gene_size as u32 - 1) as usize
    }

    fn ensure_population(&self) -> Result<()> {
        if self.population.is_empty() {
            return Err(Error::EmptyPopulation);
        }
        Ok(())
    }
}

impl fmt::Display for World {
    /// Renders the population, one genome per line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for genome in &self.population {
            writeln!(f, "{genome}")?;
        }
        Ok(())
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{seeded_rng, ScriptedRandom};

    fn genome(pattern: &str) -> Genome {
        pattern.parse().unwrap()
    }

    fn world(
        gene_size: usize,
        population_size: usize,
        crossover_chance: u32,
        mutation_chance: u32,
    ) -> World {
        World::new(WorldConfig::new(gene_size, population_size, crossover_chance, mutation_chance))
    }

    // ---- Initialization ----

    #[test]
    fn initialize_population_fills_the_configured_size() {
        let mut world = world(6, 4, 0, 0);
        let mut rng = seeded_rng(42);
        world.initialize_population(&mut rng);
        assert_eq!(world.population().len(), 4);
        assert!(world.population().iter().all(|genome| genome.len() == 6));
    }

    #[test]
    fn initialize_population_replaces_the_previous_population() {
        let mut world = world(6, 4, 0, 0);
        let mut rng = seeded_rng(42);
        world.initialize_population(&mut rng);
        let ids: Vec<_> = world.population().iter().map(|genome| genome.id()).collect();

        world.initialize_population(&mut rng);
        assert_eq!(world.population().len(), 4);
        assert!(world.population().iter().all(|genome| !ids.contains(&genome.id())));
    }

    #[test]
    fn display_renders_one_genome_per_line() {
        let mut world = world(6, 4, 0, 0);
        let mut rng = ScriptedRandom::new([60, 40]);
        world.initialize_population(&mut rng);

        let rendered = world.to_string();
        assert_eq!(rendered.lines().count(), 4);
        for line in rendered.lines() {
            assert_eq!(line, "101 010 (5,2)");
        }
    }

    // ---- Selection ----

    #[test]
    fn roulette_picks_the_first_genome_within_the_roll() {
        let mut world = world(6, 4, 0, 0);
        world.population_mut().extend([
            genome("111 111"),
            genome("110 000"),
            genome("100 000"),
            genome("000 000"),
        ]);
        let expected = world.population()[0].clone();

        // Total 24; the first genome holds 14/24 = 58.3%, so a roll of 50
        // lands on it.
        let mut rng = ScriptedRandom::new([50]);
        let selected = world.spin_biased_roulette_wheel(&mut rng).unwrap();
        assert_eq!(selected, &expected);
        assert_eq!(selected.total(), 14);
    }

    #[test]
    fn roulette_always_selects_a_zero_fitness_genome_it_reaches() {
        let mut world = world(6, 2, 0, 0);
        world.population_mut().extend([genome("000 000"), genome("111 111")]);

        let mut rng = ScriptedRandom::new([99]);
        let selected = world.spin_biased_roulette_wheel(&mut rng).unwrap();
        assert_eq!(selected.total(), 0);
    }

    #[test]
    fn roulette_falls_back_to_the_first_genome_when_the_total_is_zero() {
        let mut world = world(6, 2, 0, 0);
        world.population_mut().extend([genome("000 000"), genome("000 000")]);
        let expected = world.population()[0].clone();

        let mut rng = ScriptedRandom::new([1]);
        let selected = world.spin_biased_roulette_wheel(&mut rng).unwrap();
        assert_eq!(selected, &expected);
    }

    #[test]
    fn roulette_uses_the_installed_fitness_strategy() {
        // Inverted scoring: 20 - total gives the weaker genome the larger
        // share (14 of 20), so a roll of 65 selects it; under the default
        // strategy the same roll would select the stronger genome.
        let mut world = world(6, 2, 0, 0).with_fitness(|genome| 20 - genome.total());
        world.population_mut().extend([genome("110 000"), genome("111 111")]);

        let mut rng = ScriptedRandom::new([65]);
        let selected = world.spin_biased_roulette_wheel(&mut rng).unwrap();
        assert_eq!(selected.total(), 6);
    }

    #[test]
    fn roulette_errors_on_an_empty_population() {
        let world = world(6, 4, 0, 0);
        let mut rng = ScriptedRandom::new([50]);
        let err = world.spin_biased_roulette_wheel(&mut rng).unwrap_err();
        assert_eq!(err, Error::EmptyPopulation);
        assert_eq!(err.to_string(), "the population is empty; call initialize_population first");
    }

    // ---- Crossover ----

    #[test]
    fn crossover_swaps_prefixes_at_the_drawn_position() {
        let mut world = world(6, 2, 100, 0);
        world.population_mut().extend([genome("101 000"), genome("000 111")]);
        let first_parent = world.population()[0].clone();
        let second_parent = world.population()[1].clone();

        // Single-value script: the chance roll and the split position both
        // come out as 3.
        let mut rng = ScriptedRandom::new([3]);
        world.crossover(&mut rng).unwrap();

        assert_eq!(world.population().len(), 2);
        assert!(world.population()[0].to_string().starts_with("000 000"));
        assert!(world.population()[1].to_string().starts_with("101 111"));
        assert_ne!(world.population()[0], first_parent);
        assert_ne!(world.population()[1], second_parent);
    }

    #[test]
    fn crossover_skips_when_the_roll_misses() {
        let mut world = world(6, 2, 30, 0);
        world.population_mut().extend([genome("101 000"), genome("000 111")]);
        let before: Vec<Vec<bool>> =
            world.population().iter().map(|genome| genome.genes().to_vec()).collect();
        let first = world.population()[0].clone();

        let mut rng = ScriptedRandom::new([31]);
        world.crossover(&mut rng).unwrap();

        let after: Vec<Vec<bool>> =
            world.population().iter().map(|genome| genome.genes().to_vec()).collect();
        assert_eq!(before, after);
        assert_eq!(world.population()[0], first);
    }

    #[test]
    fn crossover_zero_chance_never_fires() {
        let mut world = world(6, 2, 0, 0);
        world.population_mut().extend([genome("101 000"), genome("000 111")]);
        let before: Vec<Vec<bool>> =
            world.population().iter().map(|genome| genome.genes().to_vec()).collect();

        let mut rng = ScriptedRandom::new([1]);
        world.crossover(&mut rng).unwrap();

        let after: Vec<Vec<bool>> =
            world.population().iter().map(|genome| genome.genes().to_vec()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn crossover_leaves_the_trailing_genome_of_an_odd_population() {
        let mut world = world(6, 3, 100, 0);
        world.population_mut().extend([
            genome("101 000"),
            genome("000 111"),
            genome("110 110"),
        ]);
        let trailing = world.population()[2].clone();

        let mut rng = ScriptedRandom::new([3]);
        world.crossover(&mut rng).unwrap();

        assert_eq!(world.population().len(), 3);
        assert_eq!(world.population()[2], trailing);
        assert_eq!(world.population()[2].genes(), trailing.genes());
    }

    // ---- Mutation ----

    #[test]
    fn mutate_swaps_two_positions_on_the_first_of_each_pair() {
        let mut world = world(6, 2, 0, 100);
        world.population_mut().extend([genome("000 111"), genome("111 001")]);

        // Chance roll 0 passes, then positions 5 and 0 are swapped on the
        // first genome only.
        let mut rng = ScriptedRandom::new([0, 5]);
        world.mutate(&mut rng).unwrap();

        assert!(world.population()[0].to_string().starts_with("100 110"));
        assert!(world.population()[1].to_string().starts_with("111 001"));
    }

    #[test]
    fn mutate_zero_chance_never_fires() {
        let mut world = world(6, 2, 0, 0);
        world.population_mut().extend([genome("000 111"), genome("111 001")]);
        let before: Vec<Vec<bool>> =
            world.population().iter().map(|genome| genome.genes().to_vec()).collect();

        let mut rng = ScriptedRandom::new([1]);
        world.mutate(&mut rng).unwrap();

        let after: Vec<Vec<bool>> =
            world.population().iter().map(|genome| genome.genes().to_vec()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn mutate_processes_the_trailing_genome_of_an_odd_population() {
        let mut world = world(6, 3, 0, 100);
        world.population_mut().extend([
            genome("000 111"),
            genome("111 001"),
            genome("000 111"),
        ]);

        let mut rng = ScriptedRandom::new([0, 5]);
        world.mutate(&mut rng).unwrap();

        assert!(world.population()[0].to_string().starts_with("100 110"));
        assert!(world.population()[1].to_string().starts_with("111 001"));
        assert!(world.population()[2].to_string().starts_with("100 110"));
    }

    // ---- Generational replacement ----

    #[test]
    fn next_generation_fills_every_slot_from_the_wheel() {
        let mut world = world(6, 2, 0, 0);
        world.population_mut().extend([genome("111 111"), genome("110 000")]);
        let first = world.population()[0].clone();

        // Total 20; the first genome holds 70%, so every roll of 50 selects
        // it for both slots.
        let mut rng = ScriptedRandom::new([50]);
        world.next_generation(&mut rng).unwrap();

        assert_eq!(world.population().len(), 2);
        assert!(world.population().iter().all(|genome| genome == &first));

        // The two copies are stored independently.
        world.population_mut()[0].set_gene_off(0);
        assert!(world.population()[1].genes()[0]);
    }

    #[test]
    fn operators_error_before_initialization() {
        let mut world = world(6, 4, 100, 100);
        let mut rng = ScriptedRandom::new([1]);

        assert_eq!(world.crossover(&mut rng).unwrap_err(), Error::EmptyPopulation);
        assert_eq!(world.mutate(&mut rng).unwrap_err(), Error::EmptyPopulation);
        assert_eq!(world.next_generation(&mut rng).unwrap_err(), Error::EmptyPopulation);
        assert!(world.spin_biased_roulette_wheel(&mut rng).is_err());

        let mut seeded = seeded_rng(7);
        world.initialize_population(&mut seeded);
        assert!(world.crossover(&mut rng).is_ok());

        world.population_mut().clear();
        assert_eq!(world.mutate(&mut rng).unwrap_err(), Error::EmptyPopulation);
    }

    // ---- Champion ----

    #[test]
    fn champion_finds_the_first_full_total() {
        let mut world = world(6, 3, 0, 0);
        world.population_mut().extend([
            genome("000 000"),
            genome("111 111"),
            genome("111 111"),
        ]);
        let expected = world.population()[1].clone();
        assert_eq!(world.champion(), Some(&expected));
    }

    #[test]
    fn champion_is_none_without_a_full_total() {
        assert!(world(6, 2, 0, 0).champion().is_none());

        let mut near_miss = world(6, 1, 0, 0);
        near_miss.population_mut().push(genome("110 110"));
        assert!(near_miss.champion().is_none());
    }

    #[test]
    fn champion_uses_the_installed_fitness_strategy() {
        let mut plain = world(6, 1, 0, 0);
        plain.population_mut().push(genome("110 000"));
        assert!(plain.champion().is_none());

        let mut scored = world(6, 1, 0, 0).with_fitness(|genome| {
            7 * genome.genes().iter().filter(|&&gene| gene).count() as u32
        });
        scored.population_mut().push(genome("110 000"));
        assert!(scored.champion().is_some());
    }

    // ---- Full loop ----

    #[test]
    fn population_shape_survives_a_full_evolution_loop() {
        let mut world = World::new(WorldConfig::new(6, 30, 100, 100));
        let mut rng = seeded_rng(42);
        world.initialize_population(&mut rng);
        assert_eq!(world.population().len(), 30);

        for _ in 0..50 {
            world.mutate(&mut rng).unwrap();
            world.crossover(&mut rng).unwrap();
            world.next_generation(&mut rng).unwrap();

            assert_eq!(world.population().len(), 30);
            assert!(world.population().iter().all(|genome| genome.len() == 6));

            if let Some(champion) = world.champion() {
                assert_eq!(champion.total(), World::CHAMPION_TOTAL);
                break;
            }
        }
    }
}
