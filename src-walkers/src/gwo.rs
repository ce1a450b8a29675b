//! Grey wolf optimizer.
//!
//! The pack is pulled towards the three best wolves seen so far (alpha,
//! beta, delta). Leaders hold copies of their positions, so moving the pack
//! never changes them behind the leaders' back.

use crate::WalkerConfig;
use crate::run::MovementRule;
use crate::run_context::RunContext;
use ndarray::{Array1, Array2, ArrayView1};
use rand::Rng;

#[derive(Debug, Clone)]
struct Leader {
    position: Array1<f64>,
    score: f64,
}

/// Running top-3, updated candidate by candidate without sorting
#[derive(Debug, Clone)]
pub(crate) struct Leaders {
    alpha: Leader,
    beta: Leader,
    delta: Leader,
}

impl Leaders {
    /// Every slot starts at `seed_position` with an unknown score
    pub(crate) fn new(seed_position: ArrayView1<f64>) -> Self {
        let empty = Leader {
            position: seed_position.to_owned(),
            score: f64::INFINITY,
        };
        Self {
            alpha: empty.clone(),
            beta: empty.clone(),
            delta: empty,
        }
    }

    pub(crate) fn observe(&mut self, x: ArrayView1<f64>, score: f64) {
        if score < self.alpha.score {
            self.delta = std::mem::replace(&mut self.beta, self.alpha.clone());
            self.alpha = Leader { position: x.to_owned(), score };
        } else if score < self.beta.score {
            self.delta = std::mem::replace(&mut self.beta, Leader { position: x.to_owned(), score });
        } else if score < self.delta.score {
            self.delta = Leader { position: x.to_owned(), score };
        }
    }

    pub(crate) fn observe_all(&mut self, positions: &Array2<f64>, fitness: &Array1<f64>) {
        for (row, &f) in positions.rows().into_iter().zip(fitness.iter()) {
            self.observe(row, f);
        }
    }

    /// Leader positions; slots never filled fall back to alpha
    fn positions(&self) -> [&Array1<f64>; 3] {
        [
            &self.alpha.position,
            self.filled_or_alpha(&self.beta),
            self.filled_or_alpha(&self.delta),
        ]
    }

    fn filled_or_alpha<'a>(&'a self, leader: &'a Leader) -> &'a Array1<f64> {
        if leader.score < f64::INFINITY {
            &leader.position
        } else {
            &self.alpha.position
        }
    }
}

pub(crate) struct GreyWolf {
    leaders: Leaders,
    trial: Array2<f64>,
}

impl MovementRule for GreyWolf {
    fn prepare(ctx: &RunContext, _config: &WalkerConfig) -> Self {
        let mut leaders = Leaders::new(ctx.best_position());
        leaders.observe_all(&ctx.population.positions, &ctx.population.fitness);
        Self {
            leaders,
            trial: Array2::zeros(ctx.population.positions.dim()),
        }
    }

    fn advance<F>(&mut self, ctx: &mut RunContext, objective: &F)
    where
        F: Fn(&Array1<f64>) -> f64 + Sync,
    {
        // a decays linearly from 2 to 0
        let a = 2.0 - 2.0 * ctx.progress();
        let pull = self.leaders.positions();
        let positions = &ctx.population.positions;

        ctx.team.update_rows(self.trial.view_mut(), |i, rng, mut next| {
            for j in 0..next.len() {
                let x = positions[[i, j]];
                let mut sum = 0.0;
                for leader in pull {
                    let r1 = rng.random::<f64>();
                    let r2 = rng.random::<f64>();
                    let big_a = 2.0 * a * r1 - a;
                    let big_c = 2.0 * r2;
                    let d = (big_c * leader[j] - x).abs();
                    sum += leader[j] - big_a * d;
                }
                next[j] = sum / 3.0;
            }
        });

        std::mem::swap(&mut ctx.population.positions, &mut self.trial);
        ctx.space.clip_all(&mut ctx.population.positions);
        ctx.evaluate_population(objective);
        self.leaders
            .observe_all(&ctx.population.positions, &ctx.population.fitness);
    }
}
