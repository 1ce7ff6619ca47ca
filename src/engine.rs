//! Generational loop.
//!
//! [`Engine`] owns the population and drives each cycle:
//! evaluate → select → breed (crossover + mutation) → replace with elites.
//!
//! # Reproducibility
//!
//! One master generator, seeded from [`TspConfig::seed`], drives selection.
//! Each generation it also draws a breeding seed; pair `i` of that
//! generation breeds with `stream_rng(breeding_seed, i)`. Pairs therefore
//! do not share generator state, and the sequential and rayon paths produce
//! identical populations.

use crate::config::TspConfig;
use crate::error::TspError;
use crate::fitness::{evaluate_with, summarize};
use crate::map::{generate_map, random_population};
use crate::observer::{GenerationReport, GenerationStats, Observer, TracingObserver};
use crate::operators::{crossover, mutate};
use crate::random::{create_rng, stream_rng, TspRng};
use crate::selection::select;
use crate::types::{check_permutation, FitnessVector, Population, PositionTable, Tour};
use rand::Rng;
use tracing::{debug, info, trace, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Stream reserved for instance generation in [`Engine::with_random_instance`].
const INSTANCE_STREAM: u64 = u64::MAX;

/// Where the engine is in its cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnginePhase {
    /// Inputs accepted; nothing evaluated yet.
    Initialized,
    Evaluating,
    Selecting,
    Breeding,
    Replacing,
    /// All configured generations have run.
    Terminated,
}

/// Outcome of a completed run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RunResult {
    /// Best tour of the final population.
    pub best_tour: Tour,

    /// Cost of `best_tour`.
    pub best_cost: f64,

    /// Number of generational cycles executed.
    pub generations: usize,

    /// Seed the run used, including a randomly chosen one.
    pub seed: u64,

    /// Best and mean cost per generation, starting with the initial
    /// population (`generations + 1` entries).
    pub history: Vec<GenerationStats>,
}

/// Executes the genetic algorithm.
///
/// # Usage
///
/// ```
/// use tsp_ga::{Engine, History, TspConfig};
///
/// let config = TspConfig::default()
///     .with_city_count(10)
///     .with_population_size(20)
///     .with_tournament_size(4)
///     .with_select_ratio(0.5)
///     .with_generations(5)
///     .with_seed(42);
///
/// let mut engine = Engine::with_random_instance(config).unwrap();
/// let mut history = History::new();
/// let result = engine.run(&mut history).unwrap();
///
/// assert_eq!(result.generations, 5);
/// assert_eq!(history.stats.len(), 6);
/// ```
#[derive(Debug, Clone)]
pub struct Engine {
    config: TspConfig,
    positions: PositionTable,
    population: Population,
    fitness: FitnessVector,
    generation: usize,
    phase: EnginePhase,
    seed: u64,
    rng: TspRng,
    history: Vec<GenerationStats>,
}

impl Engine {
    /// Creates an engine over a given map and initial population.
    ///
    /// Fails if the configuration is invalid, the map does not have
    /// `city_count` cities, or the population is not `population_size`
    /// permutations of `0..city_count`.
    pub fn new(
        config: TspConfig,
        positions: PositionTable,
        population: Population,
    ) -> Result<Self, TspError> {
        config.validate()?;

        if positions.len() != config.city_count {
            return Err(TspError::InvalidInput(format!(
                "position table has {} cities, expected {}",
                positions.len(),
                config.city_count
            )));
        }
        if population.len() != config.population_size {
            return Err(TspError::InvalidInput(format!(
                "initial population has {} tours, expected {}",
                population.len(),
                config.population_size
            )));
        }
        for (i, tour) in population.iter().enumerate() {
            check_permutation(tour, config.city_count)
                .map_err(|e| TspError::InvalidInput(format!("initial tour {i}: {e}")))?;
        }

        if config.parallel && !cfg!(feature = "parallel") {
            warn!("parallel execution requested but the `parallel` feature is disabled; running sequentially");
        }

        let seed = config.seed.unwrap_or_else(rand::random);

        Ok(Self {
            rng: create_rng(seed),
            history: Vec::with_capacity(config.generations + 1),
            config,
            positions,
            population,
            fitness: Vec::new(),
            generation: 0,
            phase: EnginePhase::Initialized,
            seed,
        })
    }

    /// Creates an engine over a random map and random initial population,
    /// both derived from the configured seed.
    pub fn with_random_instance(mut config: TspConfig) -> Result<Self, TspError> {
        config.validate()?;

        let seed = config.seed.unwrap_or_else(rand::random);
        config.seed = Some(seed);

        let mut rng = stream_rng(seed, INSTANCE_STREAM);
        let range = config.coordinate_range;
        let positions = generate_map(&mut rng, config.city_count, range, range);
        let population = random_population(&mut rng, config.city_count, config.population_size);

        Self::new(config, positions, population)
    }

    pub fn config(&self) -> &TspConfig {
        &self.config
    }

    pub fn positions(&self) -> &PositionTable {
        &self.positions
    }

    /// The current population.
    pub fn population(&self) -> &[Tour] {
        &self.population
    }

    /// Costs of the current population, index-aligned with
    /// [`population`](Self::population). Empty before the first evaluation.
    pub fn fitness(&self) -> &[f64] {
        &self.fitness
    }

    /// Number of completed generational cycles.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// The phase most recently entered.
    pub fn phase(&self) -> EnginePhase {
        self.phase
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Statistics reported so far.
    pub fn history(&self) -> &[GenerationStats] {
        &self.history
    }

    /// Advances by one reported generation.
    ///
    /// The first call evaluates the initial population (generation 0).
    /// Each later call runs one full select → breed → replace → evaluate
    /// cycle. Returns `None` once all configured generations have run.
    pub fn step<O: Observer + ?Sized>(
        &mut self,
        observer: &mut O,
    ) -> Result<Option<GenerationStats>, TspError> {
        match self.phase {
            EnginePhase::Terminated => Ok(None),
            EnginePhase::Initialized => self.evaluate(observer).map(Some),
            _ if self.generation >= self.config.generations => {
                self.phase = EnginePhase::Terminated;
                Ok(None)
            }
            _ => {
                self.cycle()?;
                self.evaluate(observer).map(Some)
            }
        }
    }

    /// Runs until all configured generations have completed.
    pub fn run<O: Observer + ?Sized>(&mut self, observer: &mut O) -> Result<RunResult, TspError> {
        info!(
            cities = self.config.city_count,
            population = self.config.population_size,
            generations = self.config.generations,
            seed = self.seed,
            "starting run"
        );

        while self.step(observer)?.is_some() {}

        let result = self.result()?;
        info!(
            best_cost = result.best_cost,
            generations = result.generations,
            "run finished"
        );
        Ok(result)
    }

    /// Summary of the current population.
    ///
    /// Fails if nothing has been evaluated yet.
    pub fn result(&self) -> Result<RunResult, TspError> {
        let summary = summarize(&self.fitness, self.config.objective).ok_or_else(|| {
            TspError::InvalidInput("no generation has been evaluated".to_string())
        })?;

        Ok(RunResult {
            best_tour: self.population[summary.best_index].clone(),
            best_cost: summary.best_cost,
            generations: self.generation,
            seed: self.seed,
            history: self.history.clone(),
        })
    }

    fn evaluate<O: Observer + ?Sized>(
        &mut self,
        observer: &mut O,
    ) -> Result<GenerationStats, TspError> {
        self.phase = EnginePhase::Evaluating;
        self.fitness = evaluate_with(&self.positions, &self.population, self.config.parallel);

        let summary = summarize(&self.fitness, self.config.objective)
            .ok_or_else(|| TspError::InvalidInput("population is empty".to_string()))?;

        let report = GenerationReport {
            generation: self.generation,
            best_cost: summary.best_cost,
            mean_cost: summary.mean_cost,
            best_tour: &self.population[summary.best_index],
        };
        let stats = report.stats();
        observer.on_generation(&report);

        debug!(
            generation = stats.generation,
            best_cost = stats.best_cost,
            mean_cost = stats.mean_cost,
            "evaluated"
        );
        self.history.push(stats);
        Ok(stats)
    }

    /// Select, breed, and replace. Leaves the new population unevaluated.
    fn cycle(&mut self) -> Result<(), TspError> {
        self.phase = EnginePhase::Selecting;
        let params = self.config.selection_params();
        let selection = select(&self.population, &self.fitness, &params, &mut self.rng);
        trace!(
            pool = selection.pool.len(),
            elites = selection.elites.len(),
            "selected"
        );

        self.phase = EnginePhase::Breeding;
        let breeding_seed: u64 = self.rng.random();
        let mut next = self.breed(&selection.pool, breeding_seed)?;
        trace!(offspring = next.len(), "bred");

        self.phase = EnginePhase::Replacing;
        next.extend(selection.elite_tours(&self.population));
        debug_assert_eq!(next.len(), self.config.population_size);

        self.population = next;
        self.fitness.clear();
        self.generation += 1;
        Ok(())
    }

    /// Exactly `population_size - elite_count` children. When that count is
    /// odd, the second child of the last pair is dropped.
    fn breed(&self, pool: &[usize], seed: u64) -> Result<Population, TspError> {
        let target = self.config.offspring_count();
        let pairs = self.breed_pairs(pool, seed, target.div_ceil(2))?;

        let mut next = Vec::with_capacity(self.config.population_size);
        for (a, b) in pairs {
            next.push(a);
            next.push(b);
        }
        next.truncate(target);
        Ok(next)
    }

    #[cfg(feature = "parallel")]
    fn breed_pairs(
        &self,
        pool: &[usize],
        seed: u64,
        count: usize,
    ) -> Result<Vec<(Tour, Tour)>, TspError> {
        if self.config.parallel {
            (0..count)
                .into_par_iter()
                .map(|i| self.breed_pair(pool, seed, i))
                .collect()
        } else {
            (0..count).map(|i| self.breed_pair(pool, seed, i)).collect()
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn breed_pairs(
        &self,
        pool: &[usize],
        seed: u64,
        count: usize,
    ) -> Result<Vec<(Tour, Tour)>, TspError> {
        (0..count).map(|i| self.breed_pair(pool, seed, i)).collect()
    }

    fn breed_pair(&self, pool: &[usize], seed: u64, pair: usize) -> Result<(Tour, Tour), TspError> {
        let mut rng = stream_rng(seed, pair as u64);
        let (mut a, mut b) = crossover(pool, &self.population, self.config.crossover_prob, &mut rng);
        mutate(&mut a, self.config.mutation_prob, &mut rng);
        mutate(&mut b, self.config.mutation_prob, &mut rng);

        check_permutation(&a, self.config.city_count)?;
        check_permutation(&b, self.config.city_count)?;
        Ok((a, b))
    }
}

/// Runs on a random instance derived from `config.seed`, logging each
/// generation through `tracing`.
pub fn solve(config: TspConfig) -> Result<RunResult, TspError> {
    Engine::with_random_instance(config)?.run(&mut TracingObserver::default())
}
