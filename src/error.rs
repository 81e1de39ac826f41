//! Error types shared across the crate.

/// Convenience alias for fallible operations in this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by genome parsing and population operators.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A textual bit pattern contained no gene characters.
    #[error("bit pattern is empty")]
    EmptyBitPattern,

    /// A selection or variation operator ran against an empty population.
    #[error("the population is empty; call initialize_population first")]
    EmptyPopulation,
}
