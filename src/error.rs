//! Error types.
//!
//! [`ConfigError`] covers invalid parameter combinations, detected before a
//! run starts. [`TspError`] is what the engine returns: configuration
//! problems, malformed inputs, and permutation-invariant violations.

use thiserror::Error;

/// An invalid parameter combination in [`TspConfig`](crate::TspConfig).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("city_count must be at least 3, got {0}")]
    TooFewCities(usize),

    #[error("population_size must be at least 2, got {0}")]
    PopulationTooSmall(usize),

    #[error("generations must be at least 1")]
    ZeroGenerations,

    #[error("tournament_size must be at least 1")]
    ZeroTournament,

    #[error("tournament_size {tournament_size} exceeds population_size {population_size}")]
    TournamentTooLarge {
        tournament_size: usize,
        population_size: usize,
    },

    #[error("tournament select ratio must be within [0, 1], got {0}")]
    RatioOutOfRange(f64),

    #[error("tournament keeps no individuals per round (tournament_size {tournament_size}, survivors {survivors})")]
    NoSurvivors {
        tournament_size: usize,
        survivors: usize,
    },

    #[error("survivor count {survivors} exceeds tournament_size {tournament_size}")]
    TooManySurvivors {
        tournament_size: usize,
        survivors: usize,
    },

    #[error("elite_count {elite_count} must be less than population_size {population_size}")]
    TooManyElites {
        elite_count: usize,
        population_size: usize,
    },

    #[error("{name} must be within [0, 100], got {value}")]
    ProbabilityOutOfRange { name: &'static str, value: u32 },
}

/// Errors returned by the engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TspError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("permutation invariant violated: {reason} (tour {tour:?})")]
    InvariantViolation { tour: Vec<usize>, reason: String },
}
