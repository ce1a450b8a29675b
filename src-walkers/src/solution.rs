use crate::Optimizer;
use crate::measures::{TrajectoryMeasures, walk_points};
use crate::recorder::WalkRecord;
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of one walker run
#[derive(Clone, Serialize, Deserialize)]
pub struct Solution {
    pub optimizer: Optimizer,
    pub dim: usize,
    pub population_size: usize,
    pub max_iters: usize,
    /// Seed the run was driven by (drawn from the OS when none was given)
    pub seed: u64,
    /// Best score over the initial population and every iteration
    pub best_score: f64,
    pub best_position: Vec<f64>,
    /// Wall-clock seconds
    pub execution_time: f64,
    pub walk: Vec<WalkRecord>,
    pub population: Array2<f64>,
    pub population_fitness: Array1<f64>,
}

impl Solution {
    pub fn optimizer_name(&self) -> &'static str {
        self.optimizer.name()
    }

    pub fn population_size(&self) -> usize {
        self.population_size
    }

    pub fn max_iters(&self) -> usize {
        self.max_iters
    }

    pub fn best_score(&self) -> f64 {
        self.best_score
    }

    pub fn best_position(&self) -> &[f64] {
        &self.best_position
    }

    pub fn execution_time(&self) -> f64 {
        self.execution_time
    }

    pub fn walk(&self) -> &[WalkRecord] {
        &self.walk
    }

    /// Walk coordinates as an `iterations x dim` matrix
    pub fn walk_points(&self) -> Array2<f64> {
        walk_points(&self.walk)
    }

    /// Trajectory statistics of the walk with lags up to `max_lag`
    pub fn measures(&self, max_lag: usize) -> TrajectoryMeasures {
        TrajectoryMeasures::from_walk(&self.walk, max_lag)
    }
}

impl fmt::Debug for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Solution")
            .field("optimizer", &self.optimizer_name())
            .field("dim", &self.dim)
            .field("population_size", &self.population_size)
            .field("max_iters", &self.max_iters)
            .field("seed", &self.seed)
            .field("best_score", &self.best_score)
            .field("best_position", &format!("len={}", self.best_position.len()))
            .field("execution_time", &self.execution_time)
            .field("walk", &format!("len={}", self.walk.len()))
            .field(
                "population",
                &format!("{}x{}", self.population.nrows(), self.population.ncols()),
            )
            .finish()
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "optimizer:       {}", self.optimizer_name())?;
        writeln!(f, "dimension:       {}", self.dim)?;
        writeln!(f, "population:      {}", self.population_size)?;
        writeln!(f, "iterations:      {}", self.max_iters)?;
        writeln!(f, "seed:            {}", self.seed)?;
        writeln!(f, "best score:      {:.6e}", self.best_score)?;
        let coords: Vec<String> = self.best_position.iter().map(|v| format!("{:.6}", v)).collect();
        writeln!(f, "best position:   [{}]", coords.join(", "))?;
        write!(f, "execution time:  {:.3} s", self.execution_time)
    }
}
