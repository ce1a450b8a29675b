//! Multimodal landscapes
//!
//! Functions with many local minima, ridges or steep drops. These are where
//! the walkers' exploration phases actually matter.

use ndarray::Array1;
use std::f64::consts::{E, PI};

/// Ackley function - many local minima, N-dimensional
/// Global minimum: f(x) = 0 at x = (0, ..., 0)
/// Bounds: x_i in [-32.768, 32.768]
pub fn ackley(x: &Array1<f64>) -> f64 {
    let n = x.len() as f64;
    let sum_sq = x.iter().map(|&xi| xi * xi).sum::<f64>() / n;
    let sum_cos = x.iter().map(|&xi| (2.0 * PI * xi).cos()).sum::<f64>() / n;
    -20.0 * (-0.2 * sum_sq.sqrt()).exp() - sum_cos.exp() + 20.0 + E
}

/// Bukin function N.6 - many local minima along a ridge, 2D
/// Global minimum: f(x) = 0 at x = (-10, 1)
/// Bounds: x_i in [-15, 3]
pub fn bukin_n6(x: &Array1<f64>) -> f64 {
    100.0 * (x[1] - 0.01 * x[0] * x[0]).abs().sqrt() + 0.01 * (x[0] + 10.0).abs()
}

/// Cross-in-tray function - four symmetric global minima, 2D
/// Global minimum: f(x) = -2.06261 at x = (±1.34941, ±1.34941)
/// Bounds: x_i in [-10, 10]
pub fn cross_in_tray(x: &Array1<f64>) -> f64 {
    let r = (x[0] * x[0] + x[1] * x[1]).sqrt();
    let inner = (x[0].sin() * x[1].sin() * (100.0 - r / PI).abs().exp()).abs() + 1.0;
    -0.0001 * inner.powf(0.1)
}

/// Drop-wave function - concentric ripples, 2D
/// Global minimum: f(x) = -1 at x = (0, 0)
/// Bounds: x_i in [-5.12, 5.12]
pub fn drop_wave(x: &Array1<f64>) -> f64 {
    let r2 = x[0] * x[0] + x[1] * x[1];
    -(1.0 + (12.0 * r2.sqrt()).cos()) / (0.5 * r2 + 2.0)
}

/// Eggholder function - deceptive, minimum on the boundary, 2D
/// Global minimum: f(x) = -959.6407 at x = (512, 404.2319)
/// Bounds: x_i in [-512, 512]
pub fn eggholder(x: &Array1<f64>) -> f64 {
    let y47 = x[1] + 47.0;
    -y47 * (y47 + x[0] / 2.0).abs().sqrt().sin() - x[0] * (x[0] - y47).abs().sqrt().sin()
}

/// Gramacy & Lee (2012) function - 1D
/// Global minimum: f(x) = -0.869011134989500 at x = 0.548563444114526
/// Bounds: x in [0.5, 2.5]
pub fn gramacy_lee(x: &Array1<f64>) -> f64 {
    let x = x[0];
    (10.0 * PI * x).sin() / (2.0 * x) + (x - 1.0).powi(4)
}

/// Griewank function - many widespread local minima, N-dimensional
/// Global minimum: f(x) = 0 at x = (0, ..., 0)
/// Bounds: x_i in [-600, 600]
pub fn griewank(x: &Array1<f64>) -> f64 {
    let sum = x.iter().map(|&xi| xi * xi).sum::<f64>() / 4000.0;
    let prod = x
        .iter()
        .enumerate()
        .map(|(i, &xi)| (xi / ((i + 1) as f64).sqrt()).cos())
        .product::<f64>();
    1.0 + sum - prod
}

/// Holder table function - four global minima in the corners, 2D
/// Global minimum: f(x) = -19.2085 at x = (±8.05502, ±9.66459)
/// Bounds: x_i in [-10, 10]
pub fn holder_table(x: &Array1<f64>) -> f64 {
    let r = (x[0] * x[0] + x[1] * x[1]).sqrt();
    -(x[0].sin() * x[1].cos() * (1.0 - r / PI).abs().exp()).abs()
}

/// Levy function - many local minima, N-dimensional
/// Global minimum: f(x) = 0 at x = (1, ..., 1)
/// Bounds: x_i in [-10, 10]
pub fn levy(x: &Array1<f64>) -> f64 {
    let w: Vec<f64> = x.iter().map(|&xi| 1.0 + (xi - 1.0) / 4.0).collect();
    let d = w.len();
    let head = (PI * w[0]).sin().powi(2);
    let body: f64 = w[..d - 1]
        .iter()
        .map(|&wi| (wi - 1.0).powi(2) * (1.0 + 10.0 * (PI * wi + 1.0).sin().powi(2)))
        .sum();
    let last = w[d - 1];
    let tail = (last - 1.0).powi(2) * (1.0 + (2.0 * PI * last).sin().powi(2));
    head + body + tail
}

/// Levy function N.13 - 2D
/// Global minimum: f(x) = 0 at x = (1, 1)
/// Bounds: x_i in [-10, 10]
pub fn levy_n13(x: &Array1<f64>) -> f64 {
    let (a, b) = (x[0], x[1]);
    (3.0 * PI * a).sin().powi(2)
        + (a - 1.0).powi(2) * (1.0 + (3.0 * PI * b).sin().powi(2))
        + (b - 1.0).powi(2) * (1.0 + (2.0 * PI * b).sin().powi(2))
}

/// McCormick function - 2D
/// Global minimum: f(x) = -1.913223 at x = (-0.54719, -1.54719)
/// Bounds: x_i in [-3, 4]
pub fn mccormick(x: &Array1<f64>) -> f64 {
    let (a, b) = (x[0], x[1]);
    (a + b).sin() + (a - b).powi(2) - 1.5 * a + 2.5 * b + 1.0
}

/// Rastrigin function - regularly distributed local minima, N-dimensional
/// Global minimum: f(x) = 0 at x = (0, ..., 0)
/// Bounds: x_i in [-5.12, 5.12]
pub fn rastrigin(x: &Array1<f64>) -> f64 {
    10.0 * x.len() as f64
        + x.iter()
            .map(|&xi| xi * xi - 10.0 * (2.0 * PI * xi).cos())
            .sum::<f64>()
}

/// Schaffer function N.2 - 2D
/// Global minimum: f(x) = 0 at x = (0, 0)
/// Bounds: x_i in [-100, 100]
pub fn schaffer_n2(x: &Array1<f64>) -> f64 {
    let (a2, b2) = (x[0] * x[0], x[1] * x[1]);
    let den = 1.0 + 0.001 * (a2 + b2);
    0.5 + ((a2 - b2).sin().powi(2) - 0.5) / (den * den)
}

/// Schaffer function N.4 - 2D
/// Global minimum: f(x) = 0.292579 at x = (0, ±1.25313) and (±1.25313, 0)
/// Bounds: x_i in [-100, 100]
pub fn schaffer_n4(x: &Array1<f64>) -> f64 {
    let (a2, b2) = (x[0] * x[0], x[1] * x[1]);
    let den = 1.0 + 0.001 * (a2 + b2);
    0.5 + ((a2 - b2).abs().sin().cos().powi(2) - 0.5) / (den * den)
}

/// Schwefel function - deceptive, optimum far from the next best, N-dimensional
/// Global minimum: f(x) ≈ 0 at x = (420.9687, ..., 420.9687)
/// Bounds: x_i in [-500, 500]
pub fn schwefel(x: &Array1<f64>) -> f64 {
    418.9829 * x.len() as f64 - x.iter().map(|&xi| xi * xi.abs().sqrt().sin()).sum::<f64>()
}

/// Shubert function - 18 global minima among 760 local ones, 2D
/// Global minimum: f(x) = -186.7309
/// Bounds: x_i in [-10, 10]
pub fn shubert(x: &Array1<f64>) -> f64 {
    x.iter()
        .take(2)
        .map(|&xk| {
            (1..=5)
                .map(|i| {
                    let i = i as f64;
                    i * ((i + 1.0) * xk + i).cos()
                })
                .sum::<f64>()
        })
        .product()
}

/// Six-hump camel function - six local minima, two global, 2D
/// Global minimum: f(x) = -1.0316 at x = (0.0898, -0.7126) and (-0.0898, 0.7126)
/// Bounds: x_i in [-3, 3]
pub fn six_hump_camel(x: &Array1<f64>) -> f64 {
    let (a, b) = (x[0], x[1]);
    let a2 = a * a;
    let b2 = b * b;
    (4.0 - 2.1 * a2 + a2 * a2 / 3.0) * a2 + a * b + (-4.0 + 4.0 * b2) * b2
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_shubert_is_bounded_below() {
        // coarse grid scan, nothing should go below the known minimum
        let mut lowest = f64::INFINITY;
        for i in 0..=200 {
            for j in 0..=200 {
                let x = array![-10.0 + 0.1 * i as f64, -10.0 + 0.1 * j as f64];
                lowest = lowest.min(shubert(&x));
            }
        }
        assert!(lowest >= -186.7310, "lowest grid value {}", lowest);
        assert!(lowest < -150.0);
    }

    #[test]
    fn test_cross_in_tray_symmetry() {
        let a = cross_in_tray(&array![1.34941, 1.34941]);
        let b = cross_in_tray(&array![-1.34941, 1.34941]);
        let c = cross_in_tray(&array![-1.34941, -1.34941]);
        assert!((a - b).abs() < 1e-12);
        assert!((a - c).abs() < 1e-12);
    }

    #[test]
    fn test_drop_wave_far_away_is_shallow() {
        let f = drop_wave(&array![5.0, 5.0]);
        assert!(f > -0.1 && f <= 0.0);
    }
}
