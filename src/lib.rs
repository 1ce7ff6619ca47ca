//! Generational genetic algorithm for the symmetric Euclidean Traveling
//! Salesman Problem.
//!
//! A run evolves a population of tours (permutations of city indices) for a
//! fixed number of generations:
//!
//! - **Evaluation**: closed-tour Euclidean length ([`fitness`])
//! - **Selection**: repeated tournaments plus top-N elites ([`selection`])
//! - **Crossover**: one-cut order crossover ([`operators`])
//! - **Mutation**: swap of two positions ([`operators`])
//! - **Replacement**: offspring plus unchanged elites ([`Engine`])
//!
//! Every random draw goes through an explicit generator handle, so a seeded
//! run is fully reproducible.
//!
//! ```
//! use tsp_ga::{solve, TspConfig};
//!
//! let config = TspConfig::default()
//!     .with_city_count(15)
//!     .with_population_size(40)
//!     .with_generations(20)
//!     .with_seed(1124);
//!
//! let result = solve(config).unwrap();
//! assert_eq!(result.best_tour.len(), 15);
//! ```
//!
//! # Features
//!
//! - `parallel`: rayon-based evaluation and breeding (same results as the
//!   sequential path)
//! - `serde`: `Serialize`/`Deserialize` for configuration and results
//! - `cli` (default): the `tsp-ga` binary and TOML configuration loading

mod config;
mod engine;
mod error;
pub mod fitness;
pub mod map;
mod observer;
pub mod operators;
pub mod random;
pub mod selection;
mod types;

pub use config::TspConfig;
pub use engine::{solve, Engine, EnginePhase, RunResult};
pub use error::{ConfigError, TspError};
pub use observer::{
    GenerationReport, GenerationStats, History, NoopObserver, Observer, TracingObserver,
};
pub use selection::{FitnessLookup, SelectionOutcome, SelectionParams, Survivors};
pub use types::{
    check_permutation, is_permutation, FitnessVector, Objective, Point, Population,
    PositionTable, Tour,
};
