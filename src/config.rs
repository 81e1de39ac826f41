//! World configuration.

/// Tunable parameters for a [`World`](crate::World).
///
/// Construction never validates; call [`WorldConfig::validate`] to catch
/// nonsensical values before a run.
///
/// # Examples
///
/// ```
/// use geneworld::WorldConfig;
///
/// let config = WorldConfig::default()
///     .with_population_size(50)
///     .with_crossover_chance(60);
/// assert_eq!(config.gene_size, 6);
/// assert_eq!(config.population_size, 50);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorldConfig {
    /// Genes per genome. The default 6 decodes as two 3-bit dice.
    pub gene_size: usize,
    /// Genomes per generation. An odd size is allowed; the paired operators
    /// leave the trailing genome uncrossed.
    pub population_size: usize,
    /// Percentage chance (0-100) that a generation undergoes crossover.
    pub crossover_chance: u32,
    /// Percentage chance (0-100) that a generation undergoes mutation.
    pub mutation_chance: u32,
}

impl Default for WorldConfig {
    /// The classic dice demo: 6 genes, 30 genomes, 30% crossover, 5%
    /// mutation.
    fn default() -> Self {
        Self { gene_size: 6, population_size: 30, crossover_chance: 30, mutation_chance: 5 }
    }
}

impl WorldConfig {
    /// Creates a configuration with every parameter spelled out.
    pub fn new(
        gene_size: usize,
        population_size: usize,
        crossover_chance: u32,
        mutation_chance: u32,
    ) -> Self {
        Self { gene_size, population_size, crossover_chance, mutation_chance }
    }

    /// Sets the number of genes per genome.
    pub fn with_gene_size(mut self, gene_size: usize) -> Self {
        self.gene_size = gene_size;
        self
    }

    /// Sets the number of genomes per generation.
    pub fn with_population_size(mut self, population_size: usize) -> Self {
        self.population_size = population_size;
        self
    }

    /// Sets the percentage chance of crossover per generation.
    pub fn with_crossover_chance(mut self, crossover_chance: u32) -> Self {
        self.crossover_chance = crossover_chance;
        self
    }

    /// Sets the percentage chance of mutation per generation.
    pub fn with_mutation_chance(mut self, mutation_chance: u32) -> Self {
        self.mutation_chance = mutation_chance;
        self
    }

    /// Checks the configuration for unusable values.
    pub fn validate(&self) -> Result<(), String> {
        if self.gene_size == 0 {
            return Err("gene_size must be at least 1".into());
        }
        if self.population_size == 0 {
            return Err("population_size must be at least 1".into());
        }
        if self.crossover_chance > 100 {
            return Err("crossover_chance must be a percentage (0-100)".into());
        }
        if self.mutation_chance > 100 {
            return Err("mutation_chance must be a percentage (0-100)".into());
        }
        Ok(())
    }
}
