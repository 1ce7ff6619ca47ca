//! Run configuration.
//!
//! [`TspConfig`] holds every parameter of the evolutionary loop. It is
//! fixed before the run starts; [`TspConfig::validate`] rejects invalid
//! combinations up front.

use crate::error::ConfigError;
use crate::map::DEFAULT_COORDINATE_RANGE;
use crate::selection::{FitnessLookup, SelectionParams, Survivors};
use crate::types::Objective;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for the TSP genetic algorithm.
///
/// # Defaults
///
/// ```
/// use tsp_ga::TspConfig;
///
/// let config = TspConfig::default();
/// assert_eq!(config.population_size, 200);
/// assert_eq!(config.generations, 200);
/// assert_eq!(config.city_count, 30);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use tsp_ga::{Survivors, TspConfig};
///
/// let config = TspConfig::default()
///     .with_population_size(100)
///     .with_tournament_size(5)
///     .with_survivors(Survivors::Count(2))
///     .with_crossover_prob(80)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TspConfig {
    /// Number of tours in every generation.
    pub population_size: usize,

    /// Number of generational cycles after the initial evaluation.
    pub generations: usize,

    /// Number of cities on a generated map.
    pub city_count: usize,

    /// Individuals sampled per tournament round.
    ///
    /// Must not exceed `population_size`.
    pub tournament_size: usize,

    /// Individuals kept per tournament round.
    pub survivors: Survivors,

    /// Tours copied unchanged into the next generation.
    pub elite_count: usize,

    /// Crossover probability in percent (0–100).
    pub crossover_prob: u32,

    /// Per-child swap-mutation probability in percent (0–100).
    pub mutation_prob: u32,

    /// Whether lower or higher tour cost is preferred.
    pub objective: Objective,

    /// How selected costs are mapped back to tours.
    pub lookup: FitnessLookup,

    /// Upper bound of generated coordinates on both axes.
    pub coordinate_range: u32,

    /// Evaluate and breed with rayon (needs the `parallel` feature).
    ///
    /// Results are identical to the sequential path for a given seed.
    pub parallel: bool,

    /// Random seed for reproducibility. `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for TspConfig {
    fn default() -> Self {
        Self {
            population_size: 200,
            generations: 200,
            city_count: 30,
            tournament_size: 10,
            survivors: Survivors::Ratio(0.2),
            elite_count: 1,
            crossover_prob: 50,
            mutation_prob: 3,
            objective: Objective::Minimize,
            lookup: FitnessLookup::ByIndex,
            coordinate_range: DEFAULT_COORDINATE_RANGE,
            parallel: false,
            seed: None,
        }
    }
}

impl TspConfig {
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    pub fn with_city_count(mut self, n: usize) -> Self {
        self.city_count = n;
        self
    }

    pub fn with_tournament_size(mut self, k: usize) -> Self {
        self.tournament_size = k;
        self
    }

    pub fn with_survivors(mut self, survivors: Survivors) -> Self {
        self.survivors = survivors;
        self
    }

    /// Shorthand for `with_survivors(Survivors::Ratio(ratio))`.
    pub fn with_select_ratio(self, ratio: f64) -> Self {
        self.with_survivors(Survivors::Ratio(ratio))
    }

    pub fn with_elite_count(mut self, n: usize) -> Self {
        self.elite_count = n;
        self
    }

    /// Sets the crossover probability in percent.
    ///
    /// Not clamped: values above 100 are reported by [`validate`](Self::validate).
    pub fn with_crossover_prob(mut self, percent: u32) -> Self {
        self.crossover_prob = percent;
        self
    }

    /// Sets the mutation probability in percent.
    pub fn with_mutation_prob(mut self, percent: u32) -> Self {
        self.mutation_prob = percent;
        self
    }

    pub fn with_objective(mut self, objective: Objective) -> Self {
        self.objective = objective;
        self
    }

    pub fn with_lookup(mut self, lookup: FitnessLookup) -> Self {
        self.lookup = lookup;
        self
    }

    pub fn with_coordinate_range(mut self, range: u32) -> Self {
        self.coordinate_range = range;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Individuals kept per tournament round.
    pub fn survivor_count(&self) -> usize {
        self.survivors.count(self.tournament_size)
    }

    /// Number of children bred per generation.
    pub fn offspring_count(&self) -> usize {
        self.population_size.saturating_sub(self.elite_count)
    }

    /// Selection parameters derived from this configuration.
    pub fn selection_params(&self) -> SelectionParams {
        SelectionParams {
            tournament_size: self.tournament_size,
            survivors: self.survivor_count(),
            elite_count: self.elite_count,
            objective: self.objective,
            lookup: self.lookup,
        }
    }

    /// Parses a TOML table of named parameters. Missing keys keep their
    /// defaults.
    #[cfg(feature = "cli")]
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.city_count < 3 {
            return Err(ConfigError::TooFewCities(self.city_count));
        }
        if self.population_size < 2 {
            return Err(ConfigError::PopulationTooSmall(self.population_size));
        }
        if self.generations == 0 {
            return Err(ConfigError::ZeroGenerations);
        }
        if self.tournament_size == 0 {
            return Err(ConfigError::ZeroTournament);
        }
        if self.tournament_size > self.population_size {
            return Err(ConfigError::TournamentTooLarge {
                tournament_size: self.tournament_size,
                population_size: self.population_size,
            });
        }
        if let Survivors::Ratio(r) = self.survivors {
            if !(0.0..=1.0).contains(&r) {
                return Err(ConfigError::RatioOutOfRange(r));
            }
        }
        let survivors = self.survivor_count();
        if survivors == 0 {
            return Err(ConfigError::NoSurvivors {
                tournament_size: self.tournament_size,
                survivors,
            });
        }
        if survivors > self.tournament_size {
            return Err(ConfigError::TooManySurvivors {
                tournament_size: self.tournament_size,
                survivors,
            });
        }
        if self.elite_count >= self.population_size {
            return Err(ConfigError::TooManyElites {
                elite_count: self.elite_count,
                population_size: self.population_size,
            });
        }
        for (name, value) in [
            ("crossover_prob", self.crossover_prob),
            ("mutation_prob", self.mutation_prob),
        ] {
            if value > 100 {
                return Err(ConfigError::ProbabilityOutOfRange { name, value });
            }
        }
        Ok(())
    }
}
