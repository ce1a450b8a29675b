use crate::error::{Result, WalkerError};
use ndarray::{Array2, ArrayView1};
use rand::Rng;

/// Axis-aligned box shared by every coordinate: `[lower, upper]^dim`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchSpace {
    dim: usize,
    lower: f64,
    upper: f64,
}

impl SearchSpace {
    /// Build a search space, rejecting empty or degenerate boxes
    pub fn new(dim: usize, lower: f64, upper: f64) -> Result<Self> {
        if dim == 0 {
            return Err(WalkerError::InvalidDimension { dim });
        }
        if !lower.is_finite() || !upper.is_finite() || lower >= upper {
            return Err(WalkerError::InvalidBounds { lower, upper });
        }
        Ok(Self { dim, lower, upper })
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn lower(&self) -> f64 {
        self.lower
    }

    pub fn upper(&self) -> f64 {
        self.upper
    }

    /// `upper - lower`, always strictly positive
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// Project one coordinate onto `[lower, upper]`; NaN lands on `lower`
    #[inline]
    pub fn clip(&self, v: f64) -> f64 {
        if v.is_nan() {
            self.lower
        } else {
            v.clamp(self.lower, self.upper)
        }
    }

    pub fn clip_all(&self, positions: &mut Array2<f64>) {
        positions.mapv_inplace(|v| self.clip(v));
    }

    /// Uniform draw in `[lower, upper]`
    #[inline]
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.lower + rng.random::<f64>() * self.width()
    }

    /// True when some coordinate sits exactly on `lower` or `upper`
    pub fn on_boundary(&self, x: ArrayView1<f64>) -> bool {
        x.iter().any(|&v| v == self.lower || v == self.upper)
    }
}
