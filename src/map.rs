//! Random instance and initial-population generation.

use crate::types::{Point, Population, PositionTable, Tour};
use rand::seq::SliceRandom;
use rand::Rng;

/// Default upper bound of both coordinates.
pub const DEFAULT_COORDINATE_RANGE: u32 = 200;

/// Places `city_count` cities at integer coordinates drawn uniformly from
/// `[0, x_range] x [0, y_range]`. Cities may coincide.
pub fn generate_map<R: Rng + ?Sized>(
    rng: &mut R,
    city_count: usize,
    x_range: u32,
    y_range: u32,
) -> PositionTable {
    let xs: Vec<u32> = (0..city_count).map(|_| rng.random_range(0..=x_range)).collect();
    let ys: Vec<u32> = (0..city_count).map(|_| rng.random_range(0..=y_range)).collect();

    PositionTable::new(
        xs.into_iter()
            .zip(ys)
            .map(|(x, y)| Point::new(x as f64, y as f64))
            .collect(),
    )
}

/// A uniformly shuffled permutation of `0..city_count`.
pub fn random_tour<R: Rng + ?Sized>(rng: &mut R, city_count: usize) -> Tour {
    let mut tour: Tour = (0..city_count).collect();
    tour.shuffle(rng);
    tour
}

/// `population_size` independent random tours.
pub fn random_population<R: Rng + ?Sized>(
    rng: &mut R,
    city_count: usize,
    population_size: usize,
) -> Population {
    (0..population_size)
        .map(|_| random_tour(rng, city_count))
        .collect()
}
