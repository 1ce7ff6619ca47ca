//! Tournament selection and elite extraction.
//!
//! Each tournament round samples `tournament_size` distinct individuals
//! from the whole population and keeps the best few. Rounds are drawn
//! independently, so one individual may enter the pool more than once.
//! Rounds repeat until the pool holds at least half the population.
//!
//! # References
//!
//! - Miller & Goldberg (1995), "Genetic Algorithms, Tournament Selection,
//!   and the Effects of Noise"

use crate::types::{Objective, Tour};
use rand::seq::index;
use rand::Rng;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How many individuals each tournament round keeps.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Survivors {
    /// Keep `floor(tournament_size * ratio)`.
    Ratio(f64),

    /// Keep exactly this many.
    Count(usize),
}

impl Default for Survivors {
    fn default() -> Self {
        Survivors::Ratio(0.2)
    }
}

impl Survivors {
    /// Resolves to a per-round count for the given tournament size.
    pub fn count(&self, tournament_size: usize) -> usize {
        match *self {
            Survivors::Ratio(r) => (tournament_size as f64 * r).floor() as usize,
            Survivors::Count(k) => k,
        }
    }
}

/// How a selected cost is mapped back to a population index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FitnessLookup {
    /// Keep the sampled index with its cost. Ties are never confused.
    #[default]
    ByIndex,

    /// Search the fitness vector for the first equal cost.
    ///
    /// Reproduces the value-lookup behaviour of the classic script: when
    /// several tours share a cost, the lowest-indexed one is returned every
    /// time, so it can be selected repeatedly while its twins never are.
    ByValue,
}

impl FitnessLookup {
    fn resolve(self, fitness: &[f64], index: usize, cost: f64) -> usize {
        match self {
            FitnessLookup::ByIndex => index,
            FitnessLookup::ByValue => fitness.iter().position(|&c| c == cost).unwrap_or(index),
        }
    }
}

/// Parameters for one call to [`select`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionParams {
    pub tournament_size: usize,
    /// Individuals kept per round, already resolved from [`Survivors`].
    pub survivors: usize,
    pub elite_count: usize,
    pub objective: Objective,
    pub lookup: FitnessLookup,
}

/// Population indices chosen by [`select`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionOutcome {
    /// Parents for breeding. May contain repeats.
    pub pool: Vec<usize>,
    /// The best `elite_count` individuals, best first.
    pub elites: Vec<usize>,
}

impl SelectionOutcome {
    /// Clones the elite tours out of `population`.
    pub fn elite_tours(&self, population: &[Tour]) -> Vec<Tour> {
        self.elites.iter().map(|&i| population[i].clone()).collect()
    }
}

/// Minimum pool size for a population of `n`: half, rounded up, but never
/// fewer than the two distinct parents crossover needs.
pub fn pool_target(n: usize) -> usize {
    n.div_ceil(2).max(2)
}

/// Runs tournament rounds until the pool reaches [`pool_target`].
///
/// # Panics
/// Panics if `fitness` is empty.
pub fn tournament_select<R: Rng + ?Sized>(
    fitness: &[f64],
    params: &SelectionParams,
    rng: &mut R,
) -> Vec<usize> {
    let n = fitness.len();
    assert!(n > 0, "cannot select from empty population");

    let size = params.tournament_size.clamp(1, n);
    let keep = params.survivors.clamp(1, size);
    let target = pool_target(n);

    let mut pool = Vec::with_capacity(target + keep);
    let mut round: Vec<(usize, f64)> = Vec::with_capacity(size);
    while pool.len() < target {
        round.clear();
        round.extend(index::sample(rng, n, size).iter().map(|i| (i, fitness[i])));
        // stable: equal costs keep their draw order
        round.sort_by(|a, b| params.objective.cmp(a.1, b.1));

        for &(idx, cost) in &round[..keep] {
            pool.push(params.lookup.resolve(fitness, idx, cost));
        }
    }
    pool
}

/// The best `elite_count` individuals by raw fitness, best first.
///
/// With [`FitnessLookup::ByIndex`], ties are broken by population index.
pub fn select_elites(
    fitness: &[f64],
    elite_count: usize,
    objective: Objective,
    lookup: FitnessLookup,
) -> Vec<usize> {
    let mut order: Vec<usize> = (0..fitness.len()).collect();
    order.sort_by(|&a, &b| objective.cmp(fitness[a], fitness[b]));
    order
        .into_iter()
        .take(elite_count)
        .map(|i| lookup.resolve(fitness, i, fitness[i]))
        .collect()
}

/// Tournament pool plus elites. Neither input is modified.
///
/// # Panics
/// Panics if `population` and `fitness` differ in length, or are empty.
pub fn select<R: Rng + ?Sized>(
    population: &[Tour],
    fitness: &[f64],
    params: &SelectionParams,
    rng: &mut R,
) -> SelectionOutcome {
    assert_eq!(
        population.len(),
        fitness.len(),
        "fitness must be index-aligned with the population"
    );

    SelectionOutcome {
        pool: tournament_select(fitness, params, rng),
        elites: select_elites(fitness, params.elite_count, params.objective, params.lookup),
    }
}
