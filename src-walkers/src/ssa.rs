//! Salp swarm algorithm.
//!
//! The first half of the chain scatters around the food source (best salp
//! seen so far) with a shrinking radius; every follower moves to the midpoint
//! between itself and its already-moved predecessor.

use crate::WalkerConfig;
use crate::best_tracker::improves;
use crate::run::MovementRule;
use crate::run_context::RunContext;
use ndarray::{Array1, Zip, s};
use rand::Rng;

pub(crate) struct Salp {
    food: Array1<f64>,
    food_score: f64,
}

/// `c1 = 2 exp(-(4 (t + 2) / T)^2)`
pub(crate) fn leader_radius(t: usize, max_iters: usize) -> f64 {
    let x = 4.0 * (t + 2) as f64 / max_iters.max(1) as f64;
    2.0 * (-(x * x)).exp()
}

impl MovementRule for Salp {
    fn prepare(ctx: &RunContext, _config: &WalkerConfig) -> Self {
        Self {
            food: ctx.best_position().to_owned(),
            food_score: ctx.best.score,
        }
    }

    fn advance<F>(&mut self, ctx: &mut RunContext, objective: &F)
    where
        F: Fn(&Array1<f64>) -> f64 + Sync,
    {
        let c1 = leader_radius(ctx.iteration, ctx.max_iters);
        let n = ctx.population.len();
        let half = n / 2;
        let space = ctx.space;
        let food = &self.food;

        ctx.team.update_rows(
            ctx.population.positions.slice_mut(s![..half, ..]),
            |_, rng, mut row| {
                for j in 0..row.len() {
                    let c2 = space.sample(rng);
                    row[j] = if rng.random::<f64>() < 0.5 {
                        food[j] + c1 * c2
                    } else {
                        food[j] - c1 * c2
                    };
                }
            },
        );

        // followers depend on the updated predecessor, so this stays in order
        let positions = &mut ctx.population.positions;
        for i in half.max(1)..n {
            let (prev, mut cur) = positions.multi_slice_mut((s![i - 1, ..], s![i, ..]));
            Zip::from(&mut cur)
                .and(&prev)
                .for_each(|c, &p| *c = 0.5 * (*c + p));
        }

        ctx.space.clip_all(&mut ctx.population.positions);
        ctx.evaluate_population(objective);
        ctx.refresh_best();
        if improves(ctx.best.score, self.food_score) {
            self.food_score = ctx.best.score;
            self.food.assign(&ctx.best_position());
        }
    }
}
