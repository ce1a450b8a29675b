//! Particle swarm optimization with linearly annealed inertia.

use crate::WalkerConfig;
use crate::best_tracker::improves;
use crate::error::{Result, WalkerError};
use crate::run::MovementRule;
use crate::run_context::RunContext;
use ndarray::{Array1, Array2, Zip};
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PsoParams {
    /// Velocity clamp, applied per coordinate
    pub vmax: f64,
    pub wmax: f64,
    pub wmin: f64,
    /// Cognitive weight
    pub c1: f64,
    /// Social weight
    pub c2: f64,
}

impl Default for PsoParams {
    fn default() -> Self {
        Self {
            vmax: 6.0,
            wmax: 0.9,
            wmin: 0.2,
            c1: 2.0,
            c2: 2.0,
        }
    }
}

impl PsoParams {
    pub fn validate(&self) -> Result<()> {
        let invalid = |name, value, reason| WalkerError::InvalidParameter {
            optimizer: "PSO",
            name,
            value,
            reason,
        };
        if !(self.vmax > 0.0 && self.vmax.is_finite()) {
            return Err(invalid("vmax", self.vmax, "must be finite and > 0"));
        }
        if !self.wmin.is_finite() || !self.wmax.is_finite() || self.wmin > self.wmax {
            return Err(invalid("wmin", self.wmin, "must be finite and <= wmax"));
        }
        if !(self.c1 >= 0.0 && self.c1.is_finite()) {
            return Err(invalid("c1", self.c1, "must be finite and >= 0"));
        }
        if !(self.c2 >= 0.0 && self.c2.is_finite()) {
            return Err(invalid("c2", self.c2, "must be finite and >= 0"));
        }
        Ok(())
    }

    /// Inertia at iteration `t` of `max_iters`: `wmax` first, `wmin` last
    pub fn inertia(&self, t: usize, max_iters: usize) -> f64 {
        if max_iters <= 1 {
            return self.wmax;
        }
        self.wmax - (self.wmax - self.wmin) * t as f64 / (max_iters - 1) as f64
    }
}

pub(crate) struct ParticleSwarm {
    params: PsoParams,
    velocity: Array2<f64>,
    personal_best: Array2<f64>,
    personal_best_fitness: Array1<f64>,
    global_best: Array1<f64>,
    global_best_score: f64,
}

impl MovementRule for ParticleSwarm {
    fn prepare(ctx: &RunContext, config: &WalkerConfig) -> Self {
        Self {
            params: config.pso,
            velocity: Array2::zeros(ctx.population.positions.dim()),
            personal_best: ctx.population.positions.clone(),
            personal_best_fitness: ctx.population.fitness.clone(),
            global_best: ctx.best_position().to_owned(),
            global_best_score: ctx.best.score,
        }
    }

    fn advance<F>(&mut self, ctx: &mut RunContext, objective: &F)
    where
        F: Fn(&Array1<f64>) -> f64 + Sync,
    {
        let p = self.params;
        let w = p.inertia(ctx.iteration, ctx.max_iters);
        let positions = &ctx.population.positions;
        let pbest = &self.personal_best;
        let gbest = &self.global_best;

        ctx.team.update_rows(self.velocity.view_mut(), |i, rng, mut v| {
            for j in 0..v.len() {
                let x = positions[[i, j]];
                let r1 = rng.random::<f64>();
                let r2 = rng.random::<f64>();
                let next = w * v[j] + p.c1 * r1 * (pbest[[i, j]] - x) + p.c2 * r2 * (gbest[j] - x);
                v[j] = next.clamp(-p.vmax, p.vmax);
            }
        });

        Zip::from(&mut ctx.population.positions)
            .and(&self.velocity)
            .for_each(|x, &v| *x += v);
        ctx.space.clip_all(&mut ctx.population.positions);
        ctx.evaluate_population(objective);

        for i in 0..ctx.population.len() {
            let f = ctx.population.fitness[i];
            if improves(f, self.personal_best_fitness[i]) {
                self.personal_best_fitness[i] = f;
                self.personal_best
                    .row_mut(i)
                    .assign(&ctx.population.positions.row(i));
            }
        }
        ctx.refresh_best();
        if improves(ctx.best.score, self.global_best_score) {
            self.global_best_score = ctx.best.score;
            self.global_best.assign(&ctx.best_position());
        }
    }
}
