//! Ascending-by-fitness ranking shared by the cuckoo and biogeography walkers.

use ndarray::Array1;
use std::cmp::Ordering;

/// Total order on scores: ascending, NaN after every number
pub fn compare_scores(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

/// Candidate indices sorted best first; equal scores keep index order
pub fn rank_ascending(fitness: &Array1<f64>) -> Vec<usize> {
    let mut order: Vec<usize> = (0..fitness.len()).collect();
    order.sort_by(|&a, &b| compare_scores(fitness[a], fitness[b]));
    order
}
