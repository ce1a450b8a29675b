//! Whale optimization algorithm.
//!
//! Whales either shrink an encircling ring around the leader (or around a
//! random other whale while `|A| >= 1`), or swim a logarithmic spiral
//! towards the leader. The leader is the best whale seen so far.

use crate::WalkerConfig;
use crate::best_tracker::improves;
use crate::error::{Result, WalkerError};
use crate::run::MovementRule;
use crate::run_context::RunContext;
use ndarray::{Array1, Array2};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WoaParams {
    /// Spiral shape constant
    pub b: f64,
}

impl Default for WoaParams {
    fn default() -> Self {
        Self { b: 1.0 }
    }
}

impl WoaParams {
    pub fn validate(&self) -> Result<()> {
        if !self.b.is_finite() {
            return Err(WalkerError::InvalidParameter {
                optimizer: "WOA",
                name: "b",
                value: self.b,
                reason: "must be finite",
            });
        }
        Ok(())
    }
}

pub(crate) struct Whale {
    params: WoaParams,
    leader: Array1<f64>,
    leader_score: f64,
    trial: Array2<f64>,
}

impl Whale {
    fn update_leader(&mut self, ctx: &RunContext) {
        if improves(ctx.best.score, self.leader_score) {
            self.leader_score = ctx.best.score;
            self.leader.assign(&ctx.best_position());
        }
    }
}

impl MovementRule for Whale {
    fn prepare(ctx: &RunContext, config: &WalkerConfig) -> Self {
        Self {
            params: config.woa,
            leader: ctx.best_position().to_owned(),
            leader_score: ctx.best.score,
            trial: Array2::zeros(ctx.population.positions.dim()),
        }
    }

    fn advance<F>(&mut self, ctx: &mut RunContext, objective: &F)
    where
        F: Fn(&Array1<f64>) -> f64 + Sync,
    {
        let progress = ctx.progress();
        // a: 2 -> 0, a2: -1 -> -2
        let a = 2.0 - 2.0 * progress;
        let a2 = -1.0 - progress;
        let b = self.params.b;
        let n = ctx.population.len();
        let leader = &self.leader;
        let positions = &ctx.population.positions;

        ctx.team.update_rows(self.trial.view_mut(), |i, rng, mut next| {
            let big_a = 2.0 * a * rng.random::<f64>() - a;
            let big_c = 2.0 * rng.random::<f64>();
            let l = (a2 - 1.0) * rng.random::<f64>() + 1.0;
            let p = rng.random::<f64>();

            if p < 0.5 {
                if big_a.abs() >= 1.0 {
                    // explore around a random other whale
                    let k = if n > 1 {
                        let k = rng.random_range(0..n - 1);
                        if k >= i { k + 1 } else { k }
                    } else {
                        i
                    };
                    for j in 0..next.len() {
                        let target = positions[[k, j]];
                        let d = (big_c * target - positions[[i, j]]).abs();
                        next[j] = target - big_a * d;
                    }
                } else {
                    for j in 0..next.len() {
                        let d = (big_c * leader[j] - positions[[i, j]]).abs();
                        next[j] = leader[j] - big_a * d;
                    }
                }
            } else {
                let spiral = (b * l).exp() * (2.0 * PI * l).cos();
                for j in 0..next.len() {
                    let d = (leader[j] - positions[[i, j]]).abs();
                    next[j] = d * spiral + leader[j];
                }
            }
        });

        std::mem::swap(&mut ctx.population.positions, &mut self.trial);
        ctx.space.clip_all(&mut ctx.population.positions);
        ctx.evaluate_population(objective);
        ctx.refresh_best();
        self.update_leader(ctx);
    }
}
