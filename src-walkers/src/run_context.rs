//! Everything one run owns, passed explicitly to every phase.

use crate::WalkerConfig;
use crate::best_tracker::BestRecord;
use crate::error::Result;
use crate::population::Population;
use crate::search_space::SearchSpace;
use crate::worker_team::WorkerTeam;
use ndarray::{Array1, Array2, ArrayView1};
use rand::Rng;

pub struct RunContext {
    pub space: SearchSpace,
    pub team: WorkerTeam,
    pub population: Population,
    /// Best candidate of the current population
    pub best: BestRecord,
    /// Zero-based index of the iteration being computed
    pub iteration: usize,
    pub max_iters: usize,
    pub seed: u64,
}

impl RunContext {
    /// INIT: build the team, draw (or take) the population, evaluate it
    pub fn new<F>(config: &WalkerConfig, objective: &F) -> Result<Self>
    where
        F: Fn(&Array1<f64>) -> f64 + Sync,
    {
        let space = SearchSpace::new(config.dim, config.lower, config.upper)?;
        let seed = match config.seed {
            Some(s) => s,
            None => {
                let s = rand::rng().random::<u64>();
                log::info!("no seed given, using {}", s);
                s
            }
        };
        let mut team = WorkerTeam::new(&config.parallel, seed)?;
        let population = match &config.initial_population {
            Some(initial) => Population::from_initial(initial, config.population_size, &space)?,
            None => Population::initialize(config.population_size, &space, team.master()),
        };

        let mut ctx = Self {
            space,
            team,
            population,
            best: BestRecord::unknown(),
            iteration: 0,
            max_iters: config.max_iters,
            seed,
        };
        ctx.evaluate_population(objective);
        ctx.refresh_best();
        Ok(ctx)
    }

    /// Re-score every candidate in place
    pub fn evaluate_population<F>(&mut self, objective: &F)
    where
        F: Fn(&Array1<f64>) -> f64 + Sync,
    {
        self.team.evaluate(
            &self.population.positions,
            &mut self.population.fitness,
            objective,
        );
    }

    /// Score a trial arena on the team
    pub fn evaluate<F>(&self, positions: &Array2<f64>, fitness: &mut Array1<f64>, objective: &F)
    where
        F: Fn(&Array1<f64>) -> f64 + Sync,
    {
        self.team.evaluate(positions, fitness, objective);
    }

    pub fn refresh_best(&mut self) {
        self.best = self.team.reduce_best(&self.population.fitness);
    }

    pub fn best_position(&self) -> ArrayView1<'_, f64> {
        self.population.row(self.best.index)
    }

    /// `t / T`, 0 when there are no iterations
    pub fn progress(&self) -> f64 {
        if self.max_iters == 0 {
            0.0
        } else {
            self.iteration as f64 / self.max_iters as f64
        }
    }
}
