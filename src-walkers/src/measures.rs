//! Statistical measures over a recorded walk.
//!
//! A walk is treated as a time series of points, one row per iteration.
//! Mean square displacement and velocity autocorrelation are time averages
//! over every admissible start point for a given lag.

use crate::recorder::WalkRecord;
use ndarray::{Array1, Array2, Axis, s};
use serde::{Deserialize, Serialize};

/// Stack the walk's coordinates into an `iterations x dim` matrix
pub fn walk_points(walk: &[WalkRecord]) -> Array2<f64> {
    let dim = walk.first().map_or(0, |r| r.x.len());
    let mut points = Array2::zeros((walk.len(), dim));
    for (mut row, record) in points.rows_mut().into_iter().zip(walk) {
        row.assign(&Array1::from(record.x.clone()));
    }
    points
}

/// Step vectors between consecutive points: `(n - 1) x dim`
pub fn velocity(points: &Array2<f64>) -> Array2<f64> {
    let n = points.nrows();
    if n < 2 {
        return Array2::zeros((0, points.ncols()));
    }
    &points.slice(s![1.., ..]) - &points.slice(s![..n - 1, ..])
}

/// Euclidean length of every step
pub fn speeds(points: &Array2<f64>) -> Array1<f64> {
    velocity(points).map_axis(Axis(1), |v| v.dot(&v).sqrt())
}

/// Time averaged mean square displacement for lags `0..=max_lag`
/// (capped at `n - 1`). Entry 0 is always 0.
pub fn mean_square_displacement(points: &Array2<f64>, max_lag: usize) -> Array1<f64> {
    let n = points.nrows();
    if n == 0 {
        return Array1::zeros(0);
    }
    let max_lag = max_lag.min(n - 1);
    Array1::from_shape_fn(max_lag + 1, |lag| {
        if lag == 0 {
            return 0.0;
        }
        let d = &points.slice(s![lag.., ..]) - &points.slice(s![..n - lag, ..]);
        d.mapv(|v| v * v).sum() / (n - lag) as f64
    })
}

/// Time averaged velocity autocorrelation `<v(t) . v(t + lag)>` for lags `0..=max_lag`
pub fn velocity_autocorrelation(points: &Array2<f64>, max_lag: usize) -> Array1<f64> {
    let v = velocity(points);
    let m = v.nrows();
    if m == 0 {
        return Array1::zeros(0);
    }
    let max_lag = max_lag.min(m - 1);
    Array1::from_shape_fn(max_lag + 1, |lag| {
        let a = v.slice(s![..m - lag, ..]);
        let b = v.slice(s![lag.., ..]);
        (&a * &b).sum() / (m - lag) as f64
    })
}

/// Total distance travelled along the walk
pub fn path_length(points: &Array2<f64>) -> f64 {
    speeds(points).sum()
}

/// Straight-line distance from the first to the last point
pub fn net_displacement(points: &Array2<f64>) -> f64 {
    let n = points.nrows();
    if n < 2 {
        return 0.0;
    }
    let d = &points.row(n - 1) - &points.row(0);
    d.dot(&d).sqrt()
}

/// Summary of one walk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryMeasures {
    pub steps: usize,
    pub path_length: f64,
    pub net_displacement: f64,
    pub mean_speed: f64,
    /// Net displacement over path length, 1 for a straight walk
    pub straightness: f64,
    pub msd: Vec<f64>,
    pub vacf: Vec<f64>,
}

impl TrajectoryMeasures {
    /// Measures with lags up to `max_lag`
    pub fn from_points(points: &Array2<f64>, max_lag: usize) -> Self {
        let speeds = speeds(points);
        let steps = speeds.len();
        let path_length = speeds.sum();
        let net_displacement = net_displacement(points);
        Self {
            steps,
            path_length,
            net_displacement,
            mean_speed: if steps > 0 { path_length / steps as f64 } else { 0.0 },
            straightness: if path_length > 0.0 {
                net_displacement / path_length
            } else {
                0.0
            },
            msd: mean_square_displacement(points, max_lag).to_vec(),
            vacf: velocity_autocorrelation(points, max_lag).to_vec(),
        }
    }

    pub fn from_walk(walk: &[WalkRecord], max_lag: usize) -> Self {
        Self::from_points(&walk_points(walk), max_lag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn straight_line(n: usize) -> Array2<f64> {
        // every step is (3, 4), length 5
        Array2::from_shape_fn((n, 2), |(t, j)| t as f64 * if j == 0 { 3.0 } else { 4.0 })
    }

    #[test]
    fn test_straight_line() {
        let points = straight_line(11);
        let v = velocity(&points);
        assert_eq!(v.nrows(), 10);
        assert!(v.rows().into_iter().all(|r| r == array![3.0, 4.0]));

        assert!((path_length(&points) - 50.0).abs() < 1e-12);
        assert!((net_displacement(&points) - 50.0).abs() < 1e-12);

        // msd(lag) = (5 lag)^2 for ballistic motion
        let msd = mean_square_displacement(&points, 4);
        assert_eq!(msd.len(), 5);
        for (lag, &m) in msd.iter().enumerate() {
            assert!((m - 25.0 * (lag * lag) as f64).abs() < 1e-9, "lag {}: {}", lag, m);
        }

        let vacf = velocity_autocorrelation(&points, 3);
        assert!(vacf.iter().all(|&c| (c - 25.0).abs() < 1e-12));

        let measures = TrajectoryMeasures::from_points(&points, 2);
        assert_eq!(measures.steps, 10);
        assert!((measures.mean_speed - 5.0).abs() < 1e-12);
        assert!((measures.straightness - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_constant_point() {
        let points = Array2::from_elem((6, 3), 1.5);
        assert_eq!(path_length(&points), 0.0);
        assert_eq!(net_displacement(&points), 0.0);
        assert!(mean_square_displacement(&points, 10).iter().all(|&m| m == 0.0));
        assert_eq!(mean_square_displacement(&points, 10).len(), 6);

        let measures = TrajectoryMeasures::from_points(&points, 3);
        assert_eq!(measures.straightness, 0.0);
        assert_eq!(measures.mean_speed, 0.0);
    }

    #[test]
    fn test_back_and_forth() {
        let points = array![[0.0], [1.0], [0.0], [1.0]];
        assert_eq!(path_length(&points), 3.0);
        assert_eq!(net_displacement(&points), 1.0);
        let vacf = velocity_autocorrelation(&points, 1);
        assert_eq!(vacf.to_vec(), vec![1.0, -1.0]);
    }

    #[test]
    fn test_empty_walk() {
        let measures = TrajectoryMeasures::from_walk(&[], 5);
        assert_eq!(measures.steps, 0);
        assert!(measures.msd.is_empty());
        assert!(measures.vacf.is_empty());
    }

    #[test]
    fn test_walk_points_copies_rows() {
        let walk = vec![
            WalkRecord { iteration: 0, x: vec![1.0, 2.0], best_result: 3.0, convergence: 0.0, is_improvement: true },
            WalkRecord { iteration: 1, x: vec![4.0, 5.0], best_result: 1.0, convergence: 0.0, is_improvement: true },
        ];
        assert_eq!(walk_points(&walk), array![[1.0, 2.0], [4.0, 5.0]]);
    }
}
