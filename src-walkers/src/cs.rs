//! Cuckoo search.
//!
//! Every iteration has two greedy phases. First each nest takes a Levy
//! flight scaled by its distance to the best nest (Mantegna's algorithm).
//! Then the worst `ceil(pa * n)` nests are discovered and replaced by a
//! biased random walk between two random nests.

use crate::WalkerConfig;
use crate::best_tracker::not_worse;
use crate::error::{Result, WalkerError};
use crate::random_streams::gaussian;
use crate::ranking::rank_ascending;
use crate::run::MovementRule;
use crate::run_context::RunContext;
use ndarray::{Array1, Array2};
use rand::Rng;
use serde::{Deserialize, Serialize};
use statrs::function::gamma;
use std::f64::consts::PI;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CuckooParams {
    /// Fraction of nests discovered each iteration
    pub pa: f64,
    /// Levy exponent, in (0, 2)
    pub beta: f64,
    /// Levy step scale
    pub alpha: f64,
}

impl Default for CuckooParams {
    fn default() -> Self {
        Self {
            pa: 0.25,
            beta: 1.5,
            alpha: 0.01,
        }
    }
}

impl CuckooParams {
    pub fn validate(&self) -> Result<()> {
        let invalid = |name, value, reason| WalkerError::InvalidParameter {
            optimizer: "CS",
            name,
            value,
            reason,
        };
        if !(0.0..=1.0).contains(&self.pa) {
            return Err(invalid("pa", self.pa, "must be in [0, 1]"));
        }
        if !(self.beta > 0.0 && self.beta < 2.0) {
            return Err(invalid("beta", self.beta, "must be in (0, 2)"));
        }
        if !(self.alpha >= 0.0 && self.alpha.is_finite()) {
            return Err(invalid("alpha", self.alpha, "must be finite and >= 0"));
        }
        Ok(())
    }

    /// Mantegna's sigma for the numerator of a Levy step
    pub fn mantegna_sigma(&self) -> f64 {
        let b = self.beta;
        let num = gamma::gamma(1.0 + b) * (PI * b / 2.0).sin();
        let den = gamma::gamma((1.0 + b) / 2.0) * b * 2f64.powf((b - 1.0) / 2.0);
        (num / den).powf(1.0 / b)
    }

    /// Number of nests discovered in a population of `n`
    pub fn discovered(&self, n: usize) -> usize {
        ((self.pa * n as f64).ceil() as usize).min(n)
    }
}

pub(crate) struct Cuckoo {
    params: CuckooParams,
    sigma: f64,
    trial: Array2<f64>,
    trial_fitness: Array1<f64>,
}

impl Cuckoo {
    fn levy_flights<F>(&mut self, ctx: &mut RunContext, objective: &F)
    where
        F: Fn(&Array1<f64>) -> f64 + Sync,
    {
        let CuckooParams { beta, alpha, .. } = self.params;
        let sigma = self.sigma;
        let best = ctx.best_position().to_owned();
        let positions = &ctx.population.positions;

        ctx.team.update_rows(self.trial.view_mut(), |i, rng, mut t| {
            for j in 0..t.len() {
                let u = gaussian(rng) * sigma;
                let v = gaussian(rng);
                let step = u / v.abs().powf(1.0 / beta);
                let x = positions[[i, j]];
                t[j] = x + alpha * step * (x - best[j]) * gaussian(rng);
            }
        });

        ctx.space.clip_all(&mut self.trial);
        ctx.evaluate(&self.trial, &mut self.trial_fitness, objective);
        ctx.population
            .accept_improvements(&self.trial, &self.trial_fitness);
    }

    fn discover_nests<F>(&mut self, ctx: &mut RunContext, objective: &F)
    where
        F: Fn(&Array1<f64>) -> f64 + Sync,
    {
        let n = ctx.population.len();
        let k = self.params.discovered(n);
        if k == 0 {
            return;
        }
        let order = rank_ascending(&ctx.population.fitness);
        let worst = &order[n - k..];

        let dim = ctx.population.dim();
        let mut walk = Array2::zeros((k, dim));
        let rng = ctx.team.master();
        let positions = &ctx.population.positions;
        for (mut row, &i) in walk.rows_mut().into_iter().zip(worst) {
            let k1 = rng.random_range(0..n);
            let k2 = rng.random_range(0..n);
            for j in 0..dim {
                let u = rng.random::<f64>();
                row[j] = positions[[i, j]] + u * (positions[[k1, j]] - positions[[k2, j]]);
            }
        }

        ctx.space.clip_all(&mut walk);
        let mut walk_fitness = Array1::from_elem(k, f64::INFINITY);
        ctx.evaluate(&walk, &mut walk_fitness, objective);
        for (r, &i) in worst.iter().enumerate() {
            if not_worse(walk_fitness[r], ctx.population.fitness[i]) {
                ctx.population.replace(i, walk.row(r), walk_fitness[r]);
            }
        }
    }
}

impl MovementRule for Cuckoo {
    fn prepare(ctx: &RunContext, config: &WalkerConfig) -> Self {
        let shape = ctx.population.positions.dim();
        Self {
            params: config.cs,
            sigma: config.cs.mantegna_sigma(),
            trial: Array2::zeros(shape),
            trial_fitness: Array1::from_elem(shape.0, f64::INFINITY),
        }
    }

    fn advance<F>(&mut self, ctx: &mut RunContext, objective: &F)
    where
        F: Fn(&Array1<f64>) -> f64 + Sync,
    {
        self.levy_flights(ctx, objective);
        self.discover_nests(ctx, objective);
    }
}
