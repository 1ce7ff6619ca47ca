//! Core data model: points, the position table, tours, and the objective.

use crate::error::TspError;
use std::cmp::Ordering;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An ordered visiting sequence of city indices.
///
/// A valid tour over `n` cities is a permutation of `0..n`.
pub type Tour = Vec<usize>;

/// The current generation's tours.
pub type Population = Vec<Tour>;

/// One cost per tour, index-aligned with a [`Population`].
pub type FitnessVector = Vec<f64>;

/// A city location.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// City coordinates keyed by contiguous index `0..N`.
///
/// Read-only once built.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PositionTable {
    points: Vec<Point>,
}

impl PositionTable {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Builds a table from `(x, y)` pairs.
    pub fn from_coords<I>(coords: I) -> Self
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        Self {
            points: coords.into_iter().map(|(x, y)| Point::new(x, y)).collect(),
        }
    }

    /// Number of cities.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Point> {
        self.points.get(index)
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Distance between cities `a` and `b`.
    ///
    /// # Panics
    /// Panics if either index is out of range.
    pub fn distance(&self, a: usize, b: usize) -> f64 {
        self.points[a].distance(&self.points[b])
    }
}

/// Whether lower or higher cost is better.
///
/// TSP minimizes tour length; `Maximize` exists for the reverse ordering
/// of the selection sort.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Objective {
    #[default]
    Minimize,
    Maximize,
}

impl Objective {
    /// Orders `a` before `b` when `a` is better.
    pub fn cmp(self, a: f64, b: f64) -> Ordering {
        match self {
            Objective::Minimize => a.total_cmp(&b),
            Objective::Maximize => b.total_cmp(&a),
        }
    }

    /// Whether `a` is strictly better than `b`.
    pub fn is_better(self, a: f64, b: f64) -> bool {
        self.cmp(a, b) == Ordering::Less
    }

    /// Index and value of the best entry; the first one wins on ties.
    pub fn best_of(self, values: &[f64]) -> Option<(usize, f64)> {
        let mut best: Option<(usize, f64)> = None;
        for (i, &v) in values.iter().enumerate() {
            match best {
                Some((_, b)) if !self.is_better(v, b) => {}
                _ => best = Some((i, v)),
            }
        }
        best
    }
}

/// Check that `tour` is a permutation of `0..n`.
pub fn is_permutation(tour: &[usize], n: usize) -> bool {
    if tour.len() != n {
        return false;
    }
    let mut seen = vec![false; n];
    for &city in tour {
        if city >= n || seen[city] {
            return false;
        }
        seen[city] = true;
    }
    true
}

/// Like [`is_permutation`], but reports what went wrong.
pub fn check_permutation(tour: &[usize], n: usize) -> Result<(), TspError> {
    let violation = |reason: String| TspError::InvariantViolation {
        tour: tour.to_vec(),
        reason,
    };

    if tour.len() != n {
        return Err(violation(format!("length {} != {n}", tour.len())));
    }
    let mut seen = vec![false; n];
    for &city in tour {
        if city >= n {
            return Err(violation(format!("city {city} out of range")));
        }
        if seen[city] {
            return Err(violation(format!("city {city} appears twice")));
        }
        seen[city] = true;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert!((a.distance(&b) - 5.0).abs() < 1e-12);
        assert!((b.distance(&a) - 5.0).abs() < 1e-12);
        assert_eq!(a.distance(&a), 0.0);
    }

    #[test]
    fn test_position_table() {
        let table = PositionTable::from_coords([(0.0, 0.0), (0.0, 10.0)]);
        assert_eq!(table.len(), 2);
        assert!(!table.is_empty());
        assert_eq!(table.get(1), Some(&Point::new(0.0, 10.0)));
        assert!(table.get(2).is_none());
        assert!((table.distance(0, 1) - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_is_permutation() {
        assert!(is_permutation(&[2, 0, 1], 3));
        assert!(!is_permutation(&[0, 1], 3));
        assert!(!is_permutation(&[0, 1, 1], 3));
        assert!(!is_permutation(&[0, 1, 3], 3));
        assert!(is_permutation(&[], 0));
    }

    #[test]
    fn test_check_permutation_reports_duplicate() {
        let err = check_permutation(&[0, 2, 2], 3).unwrap_err();
        match err {
            TspError::InvariantViolation { tour, reason } => {
                assert_eq!(tour, vec![0, 2, 2]);
                assert!(reason.contains("twice"), "{reason}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(check_permutation(&[1, 0, 2], 3).is_ok());
    }

    #[test]
    fn test_objective_ordering() {
        assert!(Objective::Minimize.is_better(1.0, 2.0));
        assert!(!Objective::Minimize.is_better(2.0, 2.0));
        assert!(Objective::Maximize.is_better(2.0, 1.0));
        assert_eq!(Objective::default(), Objective::Minimize);
    }

    #[test]
    fn test_best_of_first_wins_on_ties() {
        let values = [3.0, 1.0, 1.0, 5.0];
        assert_eq!(Objective::Minimize.best_of(&values), Some((1, 1.0)));
        assert_eq!(Objective::Maximize.best_of(&values), Some((3, 5.0)));
        assert_eq!(Objective::Minimize.best_of(&[]), None);
    }
}
