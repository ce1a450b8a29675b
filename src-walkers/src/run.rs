use crate::bat::Bat;
use crate::bbo::Bbo;
use crate::cfa::Cfa;
use crate::cs::Cuckoo;
use crate::error::Result;
use crate::gwo::GreyWolf;
use crate::pso::ParticleSwarm;
use crate::recorder::{TrajectoryRecorder, fitness_spread};
use crate::run_context::RunContext;
use crate::solution::Solution;
use crate::ssa::Salp;
use crate::woa::Whale;
use crate::{Optimizer, Verbosity, WalkerConfig};
use ndarray::Array1;
use std::time::Instant;

/// One movement rule: per-variant buffers plus the per-iteration update.
///
/// `advance` moves the population, clips it into the box and re-evaluates
/// it. The driver then refreshes the best record and appends to the walk.
pub(crate) trait MovementRule: Sized {
    /// Allocate variant buffers once the initial population is scored
    fn prepare(ctx: &RunContext, config: &WalkerConfig) -> Self;

    fn advance<F>(&mut self, ctx: &mut RunContext, objective: &F)
    where
        F: Fn(&Array1<f64>) -> f64 + Sync;
}

/// Run the configured optimizer on `objective` and return the walk
///
/// The configuration is validated before any worker starts. Exactly
/// `max_iters` iterations are performed.
pub fn run<F>(objective: &F, config: &WalkerConfig) -> Result<Solution>
where
    F: Fn(&Array1<f64>) -> f64 + Sync,
{
    config.validate()?;
    match config.optimizer {
        Optimizer::Bat => drive::<Bat, F>(objective, config),
        Optimizer::Gwo => drive::<GreyWolf, F>(objective, config),
        Optimizer::Woa => drive::<Whale, F>(objective, config),
        Optimizer::Ssa => drive::<Salp, F>(objective, config),
        Optimizer::Cfa => drive::<Cfa, F>(objective, config),
        Optimizer::Pso => drive::<ParticleSwarm, F>(objective, config),
        Optimizer::Cs => drive::<Cuckoo, F>(objective, config),
        Optimizer::Bbo => drive::<Bbo, F>(objective, config),
    }
}

fn drive<W, F>(objective: &F, config: &WalkerConfig) -> Result<Solution>
where
    W: MovementRule,
    F: Fn(&Array1<f64>) -> f64 + Sync,
{
    let start = Instant::now();
    let name = config.optimizer.name();
    let verbosity = config.verbosity;

    let mut ctx = RunContext::new(config, objective)?;
    let mut walker = W::prepare(&ctx, config);
    let mut recorder = TrajectoryRecorder::new(ctx.max_iters, ctx.best_position(), ctx.best.score);

    if verbosity >= Verbosity::Progress {
        log::info!(
            "{} is optimizing: dim={}, population={}, iterations={}, workers={}, seed={}",
            name,
            config.dim,
            config.population_size,
            ctx.max_iters,
            ctx.team.workers(),
            ctx.seed
        );
        log::info!("{} initial best: f={:.6e} at index {}", name, ctx.best.score, ctx.best.index);
    }

    let report_every = (ctx.max_iters / 10).max(1);
    while ctx.iteration < ctx.max_iters {
        walker.advance(&mut ctx, objective);
        ctx.refresh_best();
        recorder.record(
            ctx.iteration,
            ctx.best_position(),
            ctx.best.score,
            fitness_spread(&ctx.population.fitness),
        );

        let t = ctx.iteration;
        match verbosity {
            Verbosity::Iterations => {
                log::info!("{} iter {:4}  best_f={:.6e}", name, t, ctx.best.score);
            }
            Verbosity::Progress if (t + 1) % report_every == 0 => {
                log::info!(
                    "{} {:3.0}%  best_f={:.6e}  ({:.3} s)",
                    name,
                    100.0 * (t + 1) as f64 / ctx.max_iters as f64,
                    recorder.best_value(),
                    start.elapsed().as_secs_f64()
                );
            }
            _ => {}
        }
        ctx.iteration += 1;
    }

    let execution_time = start.elapsed().as_secs_f64();
    let seed = ctx.seed;
    let max_iters = ctx.max_iters;
    let iterations = recorder.num_iterations();
    let (population, population_fitness) = ctx.population.into_parts();
    let (walk, best_score, best_position) = recorder.into_parts();

    if verbosity >= Verbosity::Progress {
        log::info!(
            "{} finished: best_f={:.6e} after {} iterations in {:.3} s",
            name,
            best_score,
            iterations,
            execution_time
        );
    }

    Ok(Solution {
        optimizer: config.optimizer,
        dim: config.dim,
        population_size: config.population_size,
        max_iters,
        seed,
        best_score,
        best_position,
        execution_time,
        walk,
        population,
        population_fitness,
    })
}
