//! Candidate arena: one row-major `n x dim` matrix plus its fitness vector.

use crate::best_tracker::not_worse;
use crate::error::{Result, WalkerError};
use crate::search_space::SearchSpace;
use ndarray::{Array1, Array2, ArrayView1};
use rand::Rng;

/// The set of candidates and their scores
#[derive(Debug, Clone)]
pub struct Population {
    pub(crate) positions: Array2<f64>,
    pub(crate) fitness: Array1<f64>,
}

/// Reject populations whose arena size does not fit in `usize`
pub fn check_arena(population: usize, dim: usize) -> Result<usize> {
    population
        .checked_mul(dim)
        .ok_or(WalkerError::PopulationTooLarge { population, dim })
}

/// A warm start must be `n x dim` and finite
pub fn check_initial(initial: &Array2<f64>, n: usize, dim: usize) -> Result<()> {
    let (rows, cols) = initial.dim();
    if rows != n || cols != dim {
        return Err(WalkerError::InitialPopulationShape {
            expected_rows: n,
            expected_cols: dim,
            rows,
            cols,
        });
    }
    if let Some(((row, col), _)) = initial.indexed_iter().find(|(_, v)| !v.is_finite()) {
        return Err(WalkerError::NonFiniteInitialPopulation { row, col });
    }
    Ok(())
}

impl Population {
    /// Uniform random draw of every coordinate, row by row.
    /// Fitness is `+inf` until the first evaluation.
    pub fn initialize<R: Rng + ?Sized>(n: usize, space: &SearchSpace, rng: &mut R) -> Self {
        let mut positions = Array2::zeros((n, space.dim()));
        for v in positions.iter_mut() {
            *v = space.sample(rng);
        }
        Self {
            positions,
            fitness: Array1::from_elem(n, f64::INFINITY),
        }
    }

    /// Warm start from caller-provided candidates, clipped into the box
    pub fn from_initial(initial: &Array2<f64>, n: usize, space: &SearchSpace) -> Result<Self> {
        check_initial(initial, n, space.dim())?;
        let mut positions = initial.to_owned();
        space.clip_all(&mut positions);
        Ok(Self {
            positions,
            fitness: Array1::from_elem(n, f64::INFINITY),
        })
    }

    pub fn len(&self) -> usize {
        self.positions.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.nrows() == 0
    }

    pub fn dim(&self) -> usize {
        self.positions.ncols()
    }

    pub fn positions(&self) -> &Array2<f64> {
        &self.positions
    }

    pub fn fitness(&self) -> &Array1<f64> {
        &self.fitness
    }

    pub fn row(&self, i: usize) -> ArrayView1<'_, f64> {
        self.positions.row(i)
    }

    /// Greedy acceptance: each trial replaces its slot when not worse.
    /// Returns how many slots changed.
    pub fn accept_improvements(&mut self, trial: &Array2<f64>, trial_fitness: &Array1<f64>) -> usize {
        let mut accepted = 0;
        for i in 0..self.len() {
            if not_worse(trial_fitness[i], self.fitness[i]) {
                self.positions.row_mut(i).assign(&trial.row(i));
                self.fitness[i] = trial_fitness[i];
                accepted += 1;
            }
        }
        accepted
    }

    pub(crate) fn replace(&mut self, i: usize, position: ArrayView1<f64>, score: f64) {
        self.positions.row_mut(i).assign(&position);
        self.fitness[i] = score;
    }

    pub(crate) fn into_parts(self) -> (Array2<f64>, Array1<f64>) {
        (self.positions, self.fitness)
    }
}
