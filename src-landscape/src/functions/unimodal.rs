//! Unimodal landscapes
//!
//! Bowl, plate and valley shaped functions with a single global basin. They
//! mostly measure how fast a walker contracts onto the optimum.

use ndarray::Array1;

/// Booth function - plate shaped, 2D
/// Global minimum: f(x) = 0 at x = (1, 3)
/// Bounds: x_i in [-10, 10]
pub fn booth(x: &Array1<f64>) -> f64 {
    let a = x[0] + 2.0 * x[1] - 7.0;
    let b = 2.0 * x[0] + x[1] - 5.0;
    a * a + b * b
}

/// Matyas function - plate shaped, 2D
/// Global minimum: f(x) = 0 at x = (0, 0)
/// Bounds: x_i in [-10, 10]
pub fn matyas(x: &Array1<f64>) -> f64 {
    0.26 * (x[0] * x[0] + x[1] * x[1]) - 0.48 * x[0] * x[1]
}

/// Zakharov function - plate shaped, N-dimensional
/// Global minimum: f(x) = 0 at x = (0, ..., 0)
/// Bounds: x_i in [-5, 10]
pub fn zakharov(x: &Array1<f64>) -> f64 {
    let sum_sq: f64 = x.iter().map(|&xi| xi * xi).sum();
    let weighted: f64 = x
        .iter()
        .enumerate()
        .map(|(i, &xi)| 0.5 * (i + 1) as f64 * xi)
        .sum();
    let w2 = weighted * weighted;
    sum_sq + w2 + w2 * w2
}

/// Rosenbrock function - valley shaped, N-dimensional (N >= 2)
/// Global minimum: f(x) = 0 at x = (1, ..., 1)
/// Bounds: x_i in [-5, 10]
pub fn rosenbrock(x: &Array1<f64>) -> f64 {
    x.windows(2)
        .into_iter()
        .map(|w| {
            let a = w[1] - w[0] * w[0];
            let b = w[0] - 1.0;
            100.0 * a * a + b * b
        })
        .sum()
}

/// Dixon-Price function - valley shaped, N-dimensional
/// Global minimum: f(x) = 0 at x_i = 2^(-(2^i - 2) / 2^i), i = 1..N
/// Bounds: x_i in [-10, 10]
pub fn dixon_price(x: &Array1<f64>) -> f64 {
    let head = (x[0] - 1.0) * (x[0] - 1.0);
    let tail: f64 = (1..x.len())
        .map(|i| {
            let t = 2.0 * x[i] * x[i] - x[i - 1];
            (i + 1) as f64 * t * t
        })
        .sum();
    head + tail
}

/// Minimizer of the Dixon-Price function in `dim` dimensions
pub fn dixon_price_minimizer(dim: usize) -> Vec<f64> {
    (1..=dim)
        .map(|i| {
            let p = 2f64.powi(i as i32);
            2f64.powf(-(p - 2.0) / p)
        })
        .collect()
}

/// Three-hump camel function - valley shaped, 2D
/// Global minimum: f(x) = 0 at x = (0, 0)
/// Bounds: x_i in [-5, 5]
pub fn three_hump_camel(x: &Array1<f64>) -> f64 {
    let x2 = x[0] * x[0];
    let x4 = x2 * x2;
    2.0 * x2 - 1.05 * x4 + x4 * x2 / 6.0 + x[0] * x[1] + x[1] * x[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dixon_price_minimizer_is_zero() {
        for dim in 1..6 {
            let x = Array1::from(dixon_price_minimizer(dim));
            assert!(dixon_price(&x).abs() < 1e-12, "dim {}: {}", dim, dixon_price(&x));
        }
    }

    #[test]
    fn test_rosenbrock_away_from_minimum() {
        let x = Array1::from(vec![0.0, 0.0]);
        assert_eq!(rosenbrock(&x), 1.0);
    }
}
