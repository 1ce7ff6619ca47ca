//! Per-generation reporting.
//!
//! The engine calls an [`Observer`] once per evaluated generation. The
//! observer gets a read-only view; what it does with it (plotting, metric
//! export, logging) is outside the solver.

use tracing::info;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One generation's evaluation result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationReport<'a> {
    /// 0 for the initial population, then `1..=generations`.
    pub generation: usize,
    pub best_cost: f64,
    pub mean_cost: f64,
    pub best_tour: &'a [usize],
}

impl GenerationReport<'_> {
    pub fn stats(&self) -> GenerationStats {
        GenerationStats {
            generation: self.generation,
            best_cost: self.best_cost,
            mean_cost: self.mean_cost,
        }
    }
}

/// Owned summary of a [`GenerationReport`], without the tour.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GenerationStats {
    pub generation: usize,
    pub best_cost: f64,
    pub mean_cost: f64,
}

/// Receives one report per generation.
pub trait Observer {
    fn on_generation(&mut self, report: &GenerationReport<'_>);
}

impl<F> Observer for F
where
    F: FnMut(&GenerationReport<'_>),
{
    fn on_generation(&mut self, report: &GenerationReport<'_>) {
        self(report)
    }
}

/// Ignores every report.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl Observer for NoopObserver {
    fn on_generation(&mut self, _report: &GenerationReport<'_>) {}
}

/// Emits a `tracing` event per generation.
///
/// `every` thins the output: generation 0 and every `every`-th generation
/// are logged. `every == 0` is treated as 1.
#[derive(Debug, Clone, Copy)]
pub struct TracingObserver {
    every: usize,
}

impl TracingObserver {
    pub fn new(every: usize) -> Self {
        Self {
            every: every.max(1),
        }
    }
}

impl Default for TracingObserver {
    fn default() -> Self {
        Self::new(1)
    }
}

impl Observer for TracingObserver {
    fn on_generation(&mut self, report: &GenerationReport<'_>) {
        if report.generation % self.every == 0 {
            info!(
                generation = report.generation,
                best_cost = report.best_cost,
                mean_cost = report.mean_cost,
                "generation evaluated"
            );
        }
    }
}

/// Records every generation's statistics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct History {
    pub stats: Vec<GenerationStats>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn best_costs(&self) -> Vec<f64> {
        self.stats.iter().map(|s| s.best_cost).collect()
    }
}

impl Observer for History {
    fn on_generation(&mut self, report: &GenerationReport<'_>) {
        self.stats.push(report.stats());
    }
}
