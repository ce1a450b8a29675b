//! Chaotic flow algorithm.
//!
//! The population is split into four equal groups (`m = n / 4`, the
//! remainder joins the fourth). Three chaotic scalars drawn once per iteration
//! drive the first three groups relative to the best; the fourth re-draws
//! uniformly. A trial only replaces its candidate when it is not worse.

use crate::WalkerConfig;
use crate::random_streams::uniform;
use crate::run::MovementRule;
use crate::run_context::RunContext;
use ndarray::{Array1, Array2};

/// Behavioural group of candidate `i` in a population of `n`
pub(crate) fn group_of(i: usize, n: usize) -> usize {
    let m = n / 4;
    if m == 0 { 3 } else { (i / m).min(3) }
}

pub(crate) struct Cfa {
    trial: Array2<f64>,
    trial_fitness: Array1<f64>,
}

impl MovementRule for Cfa {
    fn prepare(ctx: &RunContext, _config: &WalkerConfig) -> Self {
        let shape = ctx.population.positions.dim();
        Self {
            trial: Array2::zeros(shape),
            trial_fitness: Array1::from_elem(shape.0, f64::INFINITY),
        }
    }

    fn advance<F>(&mut self, ctx: &mut RunContext, objective: &F)
    where
        F: Fn(&Array1<f64>) -> f64 + Sync,
    {
        let rng = ctx.team.master();
        let r = uniform(rng, -1.0, 2.0);
        let v = uniform(rng, -1.5, 1.5);
        let w = uniform(rng, -1.0, 1.0);

        let best = ctx.best_position().to_owned();
        let mean_best = best.mean().unwrap_or(0.0);
        let n = ctx.population.len();
        let space = ctx.space;
        let positions = &ctx.population.positions;

        ctx.team.update_rows(self.trial.view_mut(), |i, rng, mut t| {
            let group = group_of(i, n);
            for j in 0..t.len() {
                let x = positions[[i, j]];
                t[j] = match group {
                    0 => r * x + (best[j] - x),
                    1 => v * (best[j] - x) + best[j],
                    2 => w * (best[j] - mean_best) + best[j],
                    _ => space.sample(rng),
                };
            }
        });

        ctx.space.clip_all(&mut self.trial);
        ctx.evaluate(&self.trial, &mut self.trial_fitness, objective);
        ctx.population
            .accept_improvements(&self.trial, &self.trial_fitness);
    }
}
