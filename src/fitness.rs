//! Closed-tour length evaluation.
//!
//! Fitness is the total Euclidean length of a cyclic tour, including the
//! edge from the last city back to the first. Evaluation is pure; each tour
//! is independent, which makes the parallel path a plain `par_iter` map.

use crate::types::{FitnessVector, Objective, PositionTable, Tour};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Length of the closed loop visiting `tour` in order.
///
/// Tours of length 0 or 1 have length 0.
///
/// # Panics
/// Panics if the tour references a city outside `positions`.
pub fn tour_length(positions: &PositionTable, tour: &[usize]) -> f64 {
    let n = tour.len();
    if n < 2 {
        return 0.0;
    }

    let mut total = 0.0;
    for i in 0..n {
        let next = if i + 1 == n { 0 } else { i + 1 };
        total += positions.distance(tour[i], tour[next]);
    }
    total
}

/// Evaluates every tour.
///
/// The result is index-aligned with `population`.
pub fn evaluate(positions: &PositionTable, population: &[Tour]) -> FitnessVector {
    population
        .iter()
        .map(|tour| tour_length(positions, tour))
        .collect()
}

/// Evaluates every tour using rayon.
///
/// Produces exactly the same vector as [`evaluate`].
#[cfg(feature = "parallel")]
pub fn evaluate_parallel(positions: &PositionTable, population: &[Tour]) -> FitnessVector {
    population
        .par_iter()
        .map(|tour| tour_length(positions, tour))
        .collect()
}

/// Evaluates with rayon when `parallel` is set and the `parallel` feature
/// is enabled, sequentially otherwise.
pub fn evaluate_with(
    positions: &PositionTable,
    population: &[Tour],
    parallel: bool,
) -> FitnessVector {
    #[cfg(feature = "parallel")]
    {
        if parallel {
            return evaluate_parallel(positions, population);
        }
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;

    evaluate(positions, population)
}

/// Best and mean cost of one generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitnessSummary {
    /// Population index of the best tour (first one on ties).
    pub best_index: usize,
    pub best_cost: f64,
    pub mean_cost: f64,
}

/// Summarizes a fitness vector. Returns `None` if it is empty.
pub fn summarize(fitness: &[f64], objective: Objective) -> Option<FitnessSummary> {
    let (best_index, best_cost) = objective.best_of(fitness)?;
    let mean_cost = fitness.iter().sum::<f64>() / fitness.len() as f64;
    Some(FitnessSummary {
        best_index,
        best_cost,
        mean_cost,
    })
}
