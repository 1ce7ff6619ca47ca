//! Permutation crossover and mutation.
//!
//! Both operators take `&[usize]` tours and keep them permutations of
//! `0..n`: crossover rebuilds each child from a parent-1 slice followed by
//! the remaining cities in parent-2 order, and mutation only swaps
//! positions.
//!
//! # Crossover
//!
//! - [`order_crossover`]: one-cut order crossover
//! - [`crossover`]: parent draw from a selection pool + probability check
//!
//! # Mutation
//!
//! - [`swap_mutation`]: exchange two distinct positions, O(1)
//! - [`mutate`]: probability check + swap
//!
//! # References
//!
//! - Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains"
//! - Cicirello (2023), "Genetic Operators for Permutation Representation"

use crate::random::roll_percent;
use crate::types::Tour;
use rand::seq::index;
use rand::Rng;

// ============================================================================
// Crossover
// ============================================================================

/// Order crossover at a fixed cut.
///
/// - child 1: `parent1[..cut]`, then every city of `parent2` not yet present,
///   in `parent2` order
/// - child 2: `parent1[cut..]`, then the same fill from `parent2`
///
/// Scanning all of `parent2` places each missing city exactly once, so both
/// children are permutations whenever the parents are.
///
/// # Panics
/// Panics if parents have different lengths or `cut > len`.
pub fn order_crossover_at(parent1: &[usize], parent2: &[usize], cut: usize) -> (Tour, Tour) {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");
    assert!(cut <= n, "cut {cut} out of range for length {n}");

    let child1 = ox_build_child(&parent1[..cut], parent2, n);
    let child2 = ox_build_child(&parent1[cut..], parent2, n);
    (child1, child2)
}

/// Copy `head`, then append `donor` cities not already in the child.
fn ox_build_child(head: &[usize], donor: &[usize], n: usize) -> Tour {
    let mut child = Vec::with_capacity(n);
    let mut present = vec![false; n];

    for &city in head {
        child.push(city);
        present[city] = true;
    }
    for &city in donor {
        if !present[city] {
            present[city] = true;
            child.push(city);
        }
    }
    child
}

/// Order crossover with a random cut in `[1, n - 2]`.
///
/// The cut range keeps a non-empty prefix and a suffix of at least two
/// cities.
///
/// # Panics
/// Panics if parents have different lengths or fewer than 3 cities.
pub fn order_crossover<R: Rng + ?Sized>(
    parent1: &[usize],
    parent2: &[usize],
    rng: &mut R,
) -> (Tour, Tour) {
    let n = parent1.len();
    assert!(n >= 3, "order crossover needs at least 3 cities, got {n}");

    let cut = rng.random_range(1..=n - 2);
    order_crossover_at(parent1, parent2, cut)
}

/// Draws two distinct pool entries and recombines them.
///
/// `pool` holds indices into `population`. With probability
/// `crossover_prob` percent the parents go through [`order_crossover`];
/// otherwise clones of the parents are returned unchanged. Entries are
/// distinct slots in the pool, not necessarily distinct tours.
///
/// # Panics
/// Panics if the pool has fewer than 2 entries.
pub fn crossover<R: Rng + ?Sized>(
    pool: &[usize],
    population: &[Tour],
    crossover_prob: u32,
    rng: &mut R,
) -> (Tour, Tour) {
    assert!(pool.len() >= 2, "crossover needs at least 2 pool entries");

    let picks = index::sample(rng, pool.len(), 2);
    let parent1 = &population[pool[picks.index(0)]];
    let parent2 = &population[pool[picks.index(1)]];

    if roll_percent(rng, crossover_prob) {
        order_crossover(parent1, parent2, rng)
    } else {
        (parent1.clone(), parent2.clone())
    }
}

// ============================================================================
// Mutation
// ============================================================================

/// Swap mutation: exchange two distinct random positions.
///
/// # Complexity
/// O(1)
pub fn swap_mutation<R: Rng + ?Sized>(tour: &mut [usize], rng: &mut R) {
    let n = tour.len();
    if n < 2 {
        return;
    }
    let picks = index::sample(rng, n, 2);
    tour.swap(picks.index(0), picks.index(1));
}

/// Applies [`swap_mutation`] with probability `mutation_prob` percent.
///
/// Returns whether the tour was changed.
pub fn mutate<R: Rng + ?Sized>(tour: &mut [usize], mutation_prob: u32, rng: &mut R) -> bool {
    if roll_percent(rng, mutation_prob) && tour.len() >= 2 {
        swap_mutation(tour, rng);
        true
    } else {
        false
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use crate::types::is_permutation;

    // ---- Order crossover ----

    #[test]
    fn test_ox_at_known_cut() {
        let p1 = vec![0, 1, 2, 3, 4, 5];
        let p2 = vec![5, 3, 1, 4, 2, 0];
        let (c1, c2) = order_crossover_at(&p1, &p2, 2);
        assert_eq!(c1, vec![0, 1, 5, 3, 4, 2]);
        assert_eq!(c2, vec![2, 3, 4, 5, 1, 0]);
    }

    #[test]
    fn test_ox_child1_keeps_prefix_child2_keeps_suffix() {
        let mut rng = create_rng(42);
        let p1: Vec<usize> = vec![3, 7, 0, 5, 1, 6, 2, 4];
        let p2: Vec<usize> = vec![6, 1, 4, 0, 3, 2, 7, 5];
        for _ in 0..100 {
            let (c1, c2) = order_crossover(&p1, &p2, &mut rng);
            // suffix length of child 2 tells us the cut
            let cut = (1..=6)
                .find(|&c| c1[..c] == p1[..c] && c2[..8 - c] == p1[c..])
                .expect("children must carry a parent-1 prefix and suffix");
            assert!((1..=6).contains(&cut));
        }
    }

    #[test]
    fn test_ox_produces_valid_permutations() {
        let mut rng = create_rng(42);
        let p1 = vec![0, 1, 2, 3, 4, 5, 6, 7];
        let p2 = vec![7, 6, 5, 4, 3, 2, 1, 0];

        for _ in 0..100 {
            let (c1, c2) = order_crossover(&p1, &p2, &mut rng);
            assert!(is_permutation(&c1, 8), "OX child1 not valid: {c1:?}");
            assert!(is_permutation(&c2, 8), "OX child2 not valid: {c2:?}");
        }
    }

    #[test]
    fn test_ox_three_cities() {
        let mut rng = create_rng(42);
        let p1 = vec![0, 1, 2];
        let p2 = vec![2, 1, 0];
        // only cut = 1 is possible
        let (c1, c2) = order_crossover(&p1, &p2, &mut rng);
        assert_eq!(c1, vec![0, 2, 1]);
        assert_eq!(c2, vec![1, 2, 0]);
    }

    #[test]
    fn test_ox_identical_parents() {
        let p = vec![4, 2, 0, 3, 1];
        let (c1, c2) = order_crossover_at(&p, &p, 3);
        assert_eq!(c1, p);
        assert_eq!(c2, vec![3, 1, 4, 2, 0]);
    }

    #[test]
    #[should_panic(expected = "at least 3 cities")]
    fn test_ox_rejects_two_cities() {
        let mut rng = create_rng(42);
        order_crossover(&[0, 1], &[1, 0], &mut rng);
    }

    // ---- Pool crossover ----

    #[test]
    fn test_crossover_zero_probability_passes_parents_through() {
        let mut rng = create_rng(42);
        let population = vec![vec![0, 1, 2, 3, 4], vec![4, 3, 2, 1, 0], vec![2, 0, 4, 1, 3]];
        let pool = vec![0, 1, 2];
        for _ in 0..200 {
            let (c1, c2) = crossover(&pool, &population, 0, &mut rng);
            assert!(population.contains(&c1));
            assert!(population.contains(&c2));
            assert_ne!(c1, c2, "parents are drawn from distinct pool entries");
        }
    }

    #[test]
    fn test_crossover_full_probability_recombines() {
        let mut rng = create_rng(7);
        let population = vec![vec![0, 1, 2, 3, 4, 5, 6], vec![6, 5, 4, 3, 2, 1, 0]];
        let pool = vec![0, 1];
        let mut recombined = false;
        for _ in 0..50 {
            let (c1, c2) = crossover(&pool, &population, 100, &mut rng);
            assert!(is_permutation(&c1, 7));
            assert!(is_permutation(&c2, 7));
            if !population.contains(&c1) {
                recombined = true;
            }
        }
        assert!(recombined);
    }

    #[test]
    fn test_crossover_pool_with_repeats() {
        // the same tour twice in the pool is a legal parent pair
        let mut rng = create_rng(1);
        let population = vec![vec![0, 1, 2, 3]];
        let (c1, c2) = crossover(&[0, 0], &population, 0, &mut rng);
        assert_eq!(c1, population[0]);
        assert_eq!(c2, population[0]);
    }

    // ---- Swap mutation ----

    #[test]
    fn test_swap_changes_exactly_two_positions() {
        let mut rng = create_rng(42);
        for _ in 0..100 {
            let original: Vec<usize> = (0..10).collect();
            let mut tour = original.clone();
            swap_mutation(&mut tour, &mut rng);
            assert!(is_permutation(&tour, 10));
            let diff = tour.iter().zip(&original).filter(|(a, b)| a != b).count();
            assert_eq!(diff, 2);
        }
    }

    #[test]
    fn test_swap_single_element() {
        let mut rng = create_rng(42);
        let mut tour = vec![0];
        swap_mutation(&mut tour, &mut rng);
        assert_eq!(tour, vec![0]);
    }

    #[test]
    fn test_mutate_zero_probability_is_identity() {
        let mut rng = create_rng(42);
        let original = vec![3, 1, 4, 0, 2];
        for _ in 0..200 {
            let mut tour = original.clone();
            assert!(!mutate(&mut tour, 0, &mut rng));
            assert_eq!(tour, original);
        }
    }

    #[test]
    fn test_mutate_full_probability_always_swaps() {
        let mut rng = create_rng(42);
        let original = vec![3, 1, 4, 0, 2];
        for _ in 0..50 {
            let mut tour = original.clone();
            assert!(mutate(&mut tour, 100, &mut rng));
            assert_ne!(tour, original);
            assert!(is_permutation(&tour, 5));
        }
    }

    // ---- Pipeline ----

    #[test]
    fn test_full_pipeline_preserves_validity() {
        let mut rng = create_rng(42);
        let population: Vec<Tour> = vec![(0..20).collect(), (0..20).rev().collect()];
        let pool = vec![0, 1, 1, 0];

        for _ in 0..50 {
            let (mut c1, mut c2) = crossover(&pool, &population, 80, &mut rng);
            mutate(&mut c1, 50, &mut rng);
            mutate(&mut c2, 50, &mut rng);
            assert!(is_permutation(&c1, 20), "pipeline c1 invalid: {c1:?}");
            assert!(is_permutation(&c2, 20), "pipeline c2 invalid: {c2:?}");
        }
    }
}
