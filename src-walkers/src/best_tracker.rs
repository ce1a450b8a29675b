//! Deterministic `(index, score)` reduction.
//!
//! A fold keeps the earliest index among equal scores and never accepts NaN.
//! Partials from contiguous partitions are combined left to right with the
//! same predicate, so the answer does not depend on how many partitions ran.

use ndarray::{ArrayView1, Axis};
use serde::{Deserialize, Serialize};

/// Best candidate seen so far
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BestRecord {
    pub index: usize,
    pub score: f64,
}

impl BestRecord {
    /// Not-yet-known sentinel: index 0, score `+inf`
    pub fn unknown() -> Self {
        Self::starting_at(0)
    }

    pub(crate) fn starting_at(index: usize) -> Self {
        Self {
            index,
            score: f64::INFINITY,
        }
    }

    /// Fold one candidate in
    #[inline]
    pub fn observe(&mut self, index: usize, score: f64) {
        if score < self.score {
            self.index = index;
            self.score = score;
        }
    }

    /// Combine with a partial computed over a later partition
    #[inline]
    pub fn combine(self, later: BestRecord) -> BestRecord {
        if later.score < self.score { later } else { self }
    }
}

impl Default for BestRecord {
    fn default() -> Self {
        Self::unknown()
    }
}

/// Fold `scores` whose first element sits at `offset` in the population
pub fn fold_scores(scores: ArrayView1<f64>, offset: usize) -> BestRecord {
    let mut best = BestRecord::starting_at(offset);
    for (k, &s) in scores.iter().enumerate() {
        best.observe(offset + k, s);
    }
    best
}

/// Reduce the whole score array in one pass
pub fn reduce_best(scores: ArrayView1<f64>) -> BestRecord {
    fold_scores(scores, 0)
}

/// Reduce in `partitions` contiguous blocks, then combine partials in order
pub fn reduce_best_partitioned(scores: ArrayView1<f64>, partitions: usize) -> BestRecord {
    let n = scores.len();
    if n == 0 {
        return BestRecord::unknown();
    }
    let chunk = n.div_ceil(partitions.max(1));
    scores
        .axis_chunks_iter(Axis(0), chunk)
        .enumerate()
        .map(|(b, block)| fold_scores(block, b * chunk))
        .fold(BestRecord::unknown(), BestRecord::combine)
}

/// `candidate` is strictly better than `current`
#[inline]
pub fn improves(candidate: f64, current: f64) -> bool {
    candidate < current || (current.is_nan() && !candidate.is_nan())
}

/// `candidate` may replace `current` in a greedy acceptance step
#[inline]
pub fn not_worse(candidate: f64, current: f64) -> bool {
    candidate <= current || (current.is_nan() && !candidate.is_nan())
}
