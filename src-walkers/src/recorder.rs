use ndarray::{Array1, ArrayView1};
use serde::{Deserialize, Serialize};

/// One entry of the walk: the iteration's best candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalkRecord {
    /// Iteration number
    pub iteration: usize,
    /// Coordinates of the iteration's best candidate (a copy)
    pub x: Vec<f64>,
    /// Score of that candidate
    pub best_result: f64,
    /// Spread of the population (standard deviation of finite scores)
    pub convergence: f64,
    /// Whether this score beat every earlier score of the run
    pub is_improvement: bool,
}

/// Records the per-iteration walk and the best score ever seen
#[derive(Debug, Clone)]
pub struct TrajectoryRecorder {
    records: Vec<WalkRecord>,
    best_value: f64,
    best_x: Vec<f64>,
}

impl TrajectoryRecorder {
    /// Start from the initial population's best candidate
    pub fn new(capacity: usize, initial_x: ArrayView1<f64>, initial_score: f64) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
            best_value: initial_score,
            best_x: initial_x.to_vec(),
        }
    }

    /// Append the best candidate of `iteration`
    pub fn record(&mut self, iteration: usize, x: ArrayView1<f64>, score: f64, convergence: f64) {
        let is_improvement = score < self.best_value;
        if is_improvement {
            self.best_value = score;
            self.best_x = x.to_vec();
        }
        self.records.push(WalkRecord {
            iteration,
            x: x.to_vec(),
            best_result: score,
            convergence,
            is_improvement,
        });
    }

    pub fn records(&self) -> &[WalkRecord] {
        &self.records
    }

    pub fn num_iterations(&self) -> usize {
        self.records.len()
    }

    /// Best score over the initial population and every recorded iteration
    pub fn best_value(&self) -> f64 {
        self.best_value
    }

    pub fn best_x(&self) -> &[f64] {
        &self.best_x
    }

    pub(crate) fn into_parts(self) -> (Vec<WalkRecord>, f64, Vec<f64>) {
        (self.records, self.best_value, self.best_x)
    }
}

/// Standard deviation of the finite scores, 0 when fewer than two
pub fn fitness_spread(fitness: &Array1<f64>) -> f64 {
    let finite: Vec<f64> = fitness.iter().copied().filter(|f| f.is_finite()).collect();
    if finite.len() < 2 {
        return 0.0;
    }
    let n = finite.len() as f64;
    let mean = finite.iter().sum::<f64>() / n;
    let var = finite.iter().map(|f| (f - mean) * (f - mean)).sum::<f64>() / n;
    var.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_recorder_tracks_improvements() {
        let start = array![1.0, 2.0];
        let mut recorder = TrajectoryRecorder::new(3, start.view(), 5.0);

        recorder.record(0, array![0.5, 1.0].view(), 1.25, 0.1);
        recorder.record(1, array![0.7, 1.0].view(), 2.0, 0.2);
        recorder.record(2, array![0.1, 0.1].view(), 1.25, 0.0);

        let records = recorder.records();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].x, vec![0.5, 1.0]);
        assert!(records[0].is_improvement);
        assert!(!records[1].is_improvement);
        // equal score is not an improvement
        assert!(!records[2].is_improvement);

        assert_eq!(recorder.best_value(), 1.25);
        assert_eq!(recorder.best_x(), &[0.5, 1.0]);
    }

    #[test]
    fn test_nan_never_improves() {
        let start = array![0.0];
        let mut recorder = TrajectoryRecorder::new(1, start.view(), f64::INFINITY);
        recorder.record(0, array![1.0].view(), f64::NAN, 0.0);
        assert!(!recorder.records()[0].is_improvement);
        assert!(recorder.best_value().is_infinite());
    }

    #[test]
    fn test_fitness_spread() {
        assert_eq!(fitness_spread(&array![1.0]), 0.0);
        assert_eq!(fitness_spread(&array![2.0, 2.0, f64::NAN]), 0.0);
        assert!((fitness_spread(&array![1.0, 3.0, f64::INFINITY]) - 1.0).abs() < 1e-12);
    }
}
