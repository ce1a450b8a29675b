//! Bat echolocation.
//!
//! Each bat tunes a frequency, accelerates towards the current best and,
//! when its pulse rate check fails, takes a small Gaussian step around the
//! best instead. A move is kept only if it is not worse and a
//! loudness check passes, so every bat's fitness is non-increasing.
//!
//! A bat whose trial is worse than where it stands, or whose trial hit the
//! box wall, loses its velocity. Without this the pull keeps adding up
//! while the bat stays put and every later trial ends on the wall.

use crate::WalkerConfig;
use crate::best_tracker::not_worse;
use crate::error::{Result, WalkerError};
use crate::random_streams::gaussian;
use crate::run::MovementRule;
use crate::run_context::RunContext;
use ndarray::{Array1, Array2};
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BatParams {
    /// Acceptance probability `A` in [0, 1]
    pub loudness: f64,
    /// Pulse rate `r` in [0, 1]; above it a bat explores around the best
    pub pulse_rate: f64,
    /// Frequency range; a bat with frequency `q` gains `q * (best - x)`
    pub qmin: f64,
    pub qmax: f64,
    /// Scale of the Gaussian step around the best
    pub step: f64,
}

impl Default for BatParams {
    fn default() -> Self {
        Self {
            loudness: 0.5,
            pulse_rate: 0.5,
            qmin: 0.0,
            qmax: 2.0,
            step: 1e-3,
        }
    }
}

impl BatParams {
    pub fn validate(&self) -> Result<()> {
        let invalid = |name, value, reason| WalkerError::InvalidParameter {
            optimizer: "BAT",
            name,
            value,
            reason,
        };
        if !(0.0..=1.0).contains(&self.loudness) {
            return Err(invalid("loudness", self.loudness, "must be in [0, 1]"));
        }
        if !(0.0..=1.0).contains(&self.pulse_rate) {
            return Err(invalid("pulse_rate", self.pulse_rate, "must be in [0, 1]"));
        }
        if !self.qmin.is_finite() || !self.qmax.is_finite() || self.qmin > self.qmax {
            return Err(invalid("qmax", self.qmax, "must be finite and >= qmin"));
        }
        if !self.step.is_finite() || self.step < 0.0 {
            return Err(invalid("step", self.step, "must be finite and >= 0"));
        }
        Ok(())
    }
}

pub(crate) struct Bat {
    params: BatParams,
    velocity: Array2<f64>,
    trial: Array2<f64>,
    trial_fitness: Array1<f64>,
}

impl MovementRule for Bat {
    fn prepare(ctx: &RunContext, config: &WalkerConfig) -> Self {
        let shape = ctx.population.positions.dim();
        Self {
            params: config.bat,
            velocity: Array2::zeros(shape),
            trial: Array2::zeros(shape),
            trial_fitness: Array1::from_elem(shape.0, f64::INFINITY),
        }
    }

    fn advance<F>(&mut self, ctx: &mut RunContext, objective: &F)
    where
        F: Fn(&Array1<f64>) -> f64 + Sync,
    {
        let p = self.params;
        let best = ctx.best_position().to_owned();
        let positions = &ctx.population.positions;

        // frequency and velocity
        ctx.team.update_rows(self.velocity.view_mut(), |i, rng, mut v| {
            let q = p.qmin + (p.qmax - p.qmin) * rng.random::<f64>();
            for j in 0..v.len() {
                v[j] += q * (best[j] - positions[[i, j]]);
            }
        });

        // candidate move or local walk around the best
        let velocity = &self.velocity;
        ctx.team.update_rows(self.trial.view_mut(), |i, rng, mut t| {
            if rng.random::<f64>() > p.pulse_rate {
                for j in 0..t.len() {
                    t[j] = best[j] + p.step * gaussian(rng);
                }
            } else {
                for j in 0..t.len() {
                    t[j] = positions[[i, j]] + velocity[[i, j]];
                }
            }
        });

        ctx.space.clip_all(&mut self.trial);
        ctx.evaluate(&self.trial, &mut self.trial_fitness, objective);

        let rng = ctx.team.master();
        for i in 0..self.trial.nrows() {
            let loud = rng.random::<f64>() < p.loudness;
            let better = not_worse(self.trial_fitness[i], ctx.population.fitness[i]);
            if loud && better {
                ctx.population
                    .replace(i, self.trial.row(i), self.trial_fitness[i]);
            } else if !better || ctx.space.on_boundary(self.trial.row(i)) {
                self.velocity.row_mut(i).fill(0.0);
            }
        }
    }
}
