//! Bit-string genomes.
//!
//! A genome is a fixed-length sequence of boolean genes plus a process-unique
//! identity. Genes group into 3-bit blocks decoded as big-endian integers;
//! with the default 6-gene layout the two blocks behave like a pair of
//! three-bit dice, so fitness peaks at a total of 14.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{Error, Result};
use crate::random::RandomSource;

/// Genes per block when decoding and rendering.
const BLOCK_BITS: usize = 3;

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

/// Process-unique identity of a [`Genome`].
///
/// Ids are allocated from an atomic counter. They carry no ordering meaning
/// and are only ever compared for equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GenomeId(u64);

impl GenomeId {
    fn next() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// A fixed-length bit-string genome.
///
/// Equality compares ids only, so two genomes with identical genes are still
/// distinct individuals. [`Clone`] preserves the id (the same individual,
/// e.g. surviving into the next generation); [`Genome::duplicate`] copies the
/// genes under a fresh id (a new individual, e.g. a crossover child).
///
/// # Examples
///
/// ```
/// use geneworld::Genome;
///
/// let genome: Genome = "111 010".parse()?;
/// assert_eq!(genome.total(), 9);
/// assert_eq!(genome.to_string(), "111 010 (7,2)");
/// # Ok::<(), geneworld::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Genome {
    genes: Vec<bool>,
    id: GenomeId,
}

impl Genome {
    /// Creates a genome of `gene_count` genes, all switched off.
    pub fn new(gene_count: usize) -> Self {
        Self { genes: vec![false; gene_count], id: GenomeId::next() }
    }

    /// The identity of this genome.
    pub fn id(&self) -> GenomeId {
        self.id
    }

    /// The raw gene sequence.
    pub fn genes(&self) -> &[bool] {
        &self.genes
    }

    /// Number of genes.
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Whether the genome has no genes.
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Re-rolls every gene: each is switched on when a draw in `1..=100`
    /// lands strictly above 50.
    pub fn randomize<R: RandomSource>(&mut self, rng: &mut R) {
        for gene in &mut self.genes {
            *gene = rng.draw(1, 100) > 50;
        }
    }

    /// Switches the gene at `index` on.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn set_gene_on(&mut self, index: usize) {
        self.genes[index] = true;
    }

    /// Switches the gene at `index` off.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn set_gene_off(&mut self, index: usize) {
        self.genes[index] = false;
    }

    /// Overwrites genes `0..to_position` with the donor's, leaving the rest
    /// untouched. This is the receiving half of one-point crossover.
    ///
    /// # Panics
    ///
    /// Panics if `to_position` exceeds either genome's length.
    pub fn swap_with(&mut self, donor: &Genome, to_position: usize) {
        self.genes[..to_position].copy_from_slice(&donor.genes[..to_position]);
    }

    /// Exchanges the genes at two positions.
    ///
    /// # Panics
    ///
    /// Panics if either position is out of range.
    pub fn swap_genes(&mut self, first: usize, second: usize) {
        self.genes.swap(first, second);
    }

    /// Deep-copies the genes into a new individual with a fresh id.
    pub fn duplicate(&self) -> Self {
        Self { genes: self.genes.clone(), id: GenomeId::next() }
    }

    /// Sum of the first two block values, i.e. the two-dice total in
    /// `0..=14`.
    ///
    /// # Panics
    ///
    /// Panics if the genome has fewer than two full blocks (6 genes). Genes
    /// beyond the first two blocks are ignored.
    pub fn total(&self) -> u32 {
        decode_block(&self.genes[..BLOCK_BITS])
            + decode_block(&self.genes[BLOCK_BITS..2 * BLOCK_BITS])
    }

    /// Decoded value of every 3-bit block, in gene order. A trailing partial
    /// block is decoded from the bits it has.
    pub fn block_values(&self) -> impl Iterator<Item = u32> + '_ {
        self.genes.chunks(BLOCK_BITS).map(decode_block)
    }
}

/// Reads a block of bits as a big-endian integer.
fn decode_block(bits: &[bool]) -> u32 {
    bits.iter().fold(0, |value, &bit| (value << 1) | u32::from(bit))
}

/// Identity equality: two genomes are equal iff they share an id, regardless
/// of gene content.
impl PartialEq for Genome {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Genome {}

impl FromStr for Genome {
    type Err = Error;

    /// Parses a bit pattern such as `"111 010"`.
    ///
    /// Whitespace is ignored. `'0'` switches a gene off; any other character
    /// switches it on. A pattern with no gene characters is an error.
    fn from_str(s: &str) -> Result<Self> {
        let genes: Vec<bool> =
            s.chars().filter(|c| !c.is_whitespace()).map(|c| c != '0').collect();
        if genes.is_empty() {
            return Err(Error::EmptyBitPattern);
        }
        Ok(Self { genes, id: GenomeId::next() })
    }
}

impl fmt::Display for Genome {
    /// Renders space-separated 3-bit blocks followed by the block values,
    /// e.g. `111 010 (7,2)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let blocks: Vec<String> = self
            .genes
            .chunks(BLOCK_BITS)
            .map(|block| block.iter().map(|&bit| if bit { '1' } else { '0' }).collect())
            .collect();
        let values: Vec<String> = self.block_values().map(|value| value.to_string()).collect();
        write!(f, "{} ({})", blocks.join(" "), values.join(","))
    }
}

// ===========================================================================
// Tests
// ===========================================================================
