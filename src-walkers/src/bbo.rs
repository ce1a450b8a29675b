//! Biogeography-based optimization.
//!
//! Habitats are ranked best first. Rank `k` emigrates with
//! `mu_k = (n - k) / (n + 1)` and immigrates with `lambda_k = 1 - mu_k`, so
//! good habitats mostly give and bad ones mostly take. An immigrating
//! coordinate is blended with the same coordinate of a source picked by
//! roulette on `mu`, then mutated with a small probability. The previous
//! elites replace the worst habitats after evaluation.

use crate::WalkerConfig;
use crate::error::{Result, WalkerError};
use crate::ranking::rank_ascending;
use crate::run::MovementRule;
use crate::run_context::RunContext;
use ndarray::{Array1, Array2, Axis, s};
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BboParams {
    /// Per coordinate mutation probability
    pub p_mutate: f64,
    /// Number of habitats carried over unchanged
    pub elite: usize,
    /// Share of the habitat's own coordinate kept on immigration; 0 copies the source
    pub blend: f64,
}

impl Default for BboParams {
    fn default() -> Self {
        Self {
            p_mutate: 0.01,
            elite: 2,
            blend: 0.5,
        }
    }
}

impl BboParams {
    pub fn validate(&self) -> Result<()> {
        let invalid = |name, value| WalkerError::InvalidParameter {
            optimizer: "BBO",
            name,
            value,
            reason: "must be in [0, 1]",
        };
        if !(0.0..=1.0).contains(&self.p_mutate) {
            return Err(invalid("p_mutate", self.p_mutate));
        }
        if !(0.0..=1.0).contains(&self.blend) {
            return Err(invalid("blend", self.blend));
        }
        Ok(())
    }

    /// Elites actually kept in a population of `n`; the worst habitat always moves
    pub fn elites_for(&self, n: usize) -> usize {
        self.elite.min(n.saturating_sub(1))
    }
}

/// Emigration rates by rank, best first
pub(crate) fn emigration_rates(n: usize) -> Vec<f64> {
    (0..n).map(|k| (n - k) as f64 / (n + 1) as f64).collect()
}

/// Index of the first cumulative weight reaching `r`
fn roulette(cumulative: &[f64], r: f64) -> usize {
    cumulative
        .partition_point(|&c| c < r)
        .min(cumulative.len() - 1)
}

pub(crate) struct Bbo {
    params: BboParams,
    mu: Vec<f64>,
    cumulative_mu: Vec<f64>,
    trial: Array2<f64>,
}

impl MovementRule for Bbo {
    fn prepare(ctx: &RunContext, config: &WalkerConfig) -> Self {
        let n = ctx.population.len();
        let mu = emigration_rates(n);
        let cumulative_mu = mu
            .iter()
            .scan(0.0, |acc, &m| {
                *acc += m;
                Some(*acc)
            })
            .collect();
        Self {
            params: config.bbo,
            mu,
            cumulative_mu,
            trial: Array2::zeros(ctx.population.positions.dim()),
        }
    }

    fn advance<F>(&mut self, ctx: &mut RunContext, objective: &F)
    where
        F: Fn(&Array1<f64>) -> f64 + Sync,
    {
        let n = ctx.population.len();
        let BboParams { p_mutate, blend, .. } = self.params;
        let order = rank_ascending(&ctx.population.fitness);
        let sorted = ctx.population.positions.select(Axis(0), &order);
        let sorted_fitness = ctx.population.fitness.select(Axis(0), &order);

        let e = self.params.elites_for(n);
        let elites = sorted.slice(s![..e, ..]).to_owned();
        let elite_fitness = sorted_fitness.slice(s![..e]).to_owned();

        let total = self.cumulative_mu.last().copied().unwrap_or(0.0);
        let mu = &self.mu;
        let cumulative = &self.cumulative_mu;
        let space = ctx.space;
        let sorted_ref = &sorted;

        ctx.team.update_rows(self.trial.view_mut(), |k, rng, mut h| {
            let lambda = 1.0 - mu[k];
            for j in 0..h.len() {
                h[j] = if rng.random::<f64>() < lambda {
                    let source = roulette(cumulative, rng.random::<f64>() * total);
                    blend * sorted_ref[[k, j]] + (1.0 - blend) * sorted_ref[[source, j]]
                } else {
                    sorted_ref[[k, j]]
                };
                if rng.random::<f64>() < p_mutate {
                    h[j] = space.sample(rng);
                }
            }
        });

        std::mem::swap(&mut ctx.population.positions, &mut self.trial);
        ctx.space.clip_all(&mut ctx.population.positions);
        ctx.evaluate_population(objective);

        if e > 0 {
            let ranked = rank_ascending(&ctx.population.fitness);
            for (r, &slot) in ranked[n - e..].iter().enumerate() {
                ctx.population.replace(slot, elites.row(r), elite_fitness[r]);
            }
        }
    }
}
