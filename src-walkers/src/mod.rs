//! Swarm and nature-inspired global optimizers in pure Rust using ndarray
//!
//! A walker run approximates the global minimum of a black-box objective over
//! the box `[lower, upper]^dim` by moving a population of candidates for a fixed
//! number of iterations and recording the best candidate of every iteration.
//!
//! Supported movement rules:
//! - BAT: bat echolocation with loudness and pulse rate
//! - GWO: grey wolves pulled by the three best leaders
//! - WOA: whale encircling and bubble-net spirals
//! - SSA: salp chains following the food source
//! - CFA: chaotic flow with four behavioural groups
//! - PSO: particle swarm with annealed inertia
//! - CS: cuckoo search with Mantegna Levy flights
//! - BBO: biogeography-based migration with elitism
//!
//! Runs are reproducible: every draw comes from a stream seeded by
//! `(seed, worker)`, and the best-candidate reduction does not depend on how
//! many workers took part.
//!
//! [`tune`] searches the parameters of one walker with another.

#![allow(missing_docs)]
use std::fmt;
use std::str::FromStr;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub mod best_tracker;
pub mod error;
pub mod measures;
pub mod population;
pub mod random_streams;
pub mod ranking;
pub mod recorder;
pub mod run;
pub mod run_context;
pub mod search_space;
pub mod solution;
pub mod tuning;
pub mod worker_team;

pub mod bat;
pub mod bbo;
pub mod cfa;
pub mod cs;
pub mod gwo;
pub mod pso;
pub mod ssa;
pub mod woa;

pub use bat::BatParams;
pub use bbo::BboParams;
pub use best_tracker::BestRecord;
pub use cs::CuckooParams;
pub use error::{Result, WalkerError};
pub use measures::TrajectoryMeasures;
pub use pso::PsoParams;
pub use recorder::{TrajectoryRecorder, WalkRecord};
pub use run::run;
pub use search_space::SearchSpace;
pub use solution::Solution;
pub use tuning::{Hyperparameter, ParamRange, Tuning, TuningConfig, tune};
pub use woa::WoaParams;
pub use worker_team::{ParallelConfig, Sampling};

/// Movement rule driving the population
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Optimizer {
	/// Bat echolocation
	Bat,
	/// Grey wolf optimizer
	Gwo,
	/// Whale optimization algorithm
	Woa,
	/// Salp swarm algorithm
	Ssa,
	/// Chaotic flow algorithm
	Cfa,
	/// Particle swarm optimization
	Pso,
	/// Cuckoo search
	Cs,
	/// Biogeography-based optimization
	Bbo,
}

impl Optimizer {
	/// Every optimizer, in a stable order
	pub const ALL: [Optimizer; 8] = [
		Optimizer::Bat,
		Optimizer::Gwo,
		Optimizer::Woa,
		Optimizer::Ssa,
		Optimizer::Cfa,
		Optimizer::Pso,
		Optimizer::Cs,
		Optimizer::Bbo,
	];

	/// Short upper-case tag
	pub fn name(&self) -> &'static str {
		match self {
			Optimizer::Bat => "BAT",
			Optimizer::Gwo => "GWO",
			Optimizer::Woa => "WOA",
			Optimizer::Ssa => "SSA",
			Optimizer::Cfa => "CFA",
			Optimizer::Pso => "PSO",
			Optimizer::Cs => "CS",
			Optimizer::Bbo => "BBO",
		}
	}
}

impl fmt::Display for Optimizer {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

impl FromStr for Optimizer {
	type Err = String;
	fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
		let t = s.to_lowercase();
		match t.as_str() {
			"bat" => Ok(Optimizer::Bat),
			"gwo" | "grey-wolf" | "grey_wolf" | "greywolf" => Ok(Optimizer::Gwo),
			"woa" | "whale" => Ok(Optimizer::Woa),
			"ssa" | "salp" => Ok(Optimizer::Ssa),
			"cfa" | "chaotic-flow" | "chaotic_flow" => Ok(Optimizer::Cfa),
			"pso" | "particle-swarm" | "particle_swarm" => Ok(Optimizer::Pso),
			"cs" | "cuckoo" => Ok(Optimizer::Cs),
			"bbo" | "biogeography" => Ok(Optimizer::Bbo),
			_ => Err(format!("unknown optimizer: {}", s)),
		}
	}
}

/// How much a run reports through the `log` facade
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
	/// Nothing
	#[default]
	Silent,
	/// Start and end lines plus one line every 10% of the iterations
	Progress,
	/// One line per iteration
	Iterations,
}

impl From<u8> for Verbosity {
	fn from(level: u8) -> Self {
		match level {
			0 => Verbosity::Silent,
			1 => Verbosity::Progress,
			_ => Verbosity::Iterations,
		}
	}
}

/// Configuration of one walker run
#[derive(Debug, Clone)]
pub struct WalkerConfig {
	pub optimizer: Optimizer,
	pub dim: usize,
	/// Lower bound shared by every coordinate
	pub lower: f64,
	/// Upper bound shared by every coordinate
	pub upper: f64,
	pub population_size: usize,
	/// Exact number of iterations; 0 only evaluates the initial population
	pub max_iters: usize,
	/// None draws a seed from the OS and logs it
	pub seed: Option<u64>,
	pub verbosity: Verbosity,
	pub parallel: ParallelConfig,
	pub bat: BatParams,
	pub woa: WoaParams,
	pub pso: PsoParams,
	pub cs: CuckooParams,
	pub bbo: BboParams,
	/// Optional warm start (`population_size x dim`), clipped into the box
	pub initial_population: Option<Array2<f64>>,
}

impl Default for WalkerConfig {
	fn default() -> Self {
		Self {
			optimizer: Optimizer::Bat,
			dim: 2,
			lower: -10.0,
			upper: 10.0,
			population_size: 50,
			max_iters: 500,
			seed: None,
			verbosity: Verbosity::default(),
			parallel: ParallelConfig::default(),
			bat: BatParams::default(),
			woa: WoaParams::default(),
			pso: PsoParams::default(),
			cs: CuckooParams::default(),
			bbo: BboParams::default(),
			initial_population: None,
		}
	}
}

impl WalkerConfig {
	/// Check every setting before anything is allocated
	pub fn validate(&self) -> Result<()> {
		SearchSpace::new(self.dim, self.lower, self.upper)?;
		if self.population_size == 0 {
			return Err(WalkerError::InvalidPopulation { size: 0 });
		}
		population::check_arena(self.population_size, self.dim)?;
		if self.parallel.workers == 0 {
			return Err(WalkerError::InvalidWorkerCount { workers: 0 });
		}
		match self.optimizer {
			Optimizer::Bat => self.bat.validate()?,
			Optimizer::Woa => self.woa.validate()?,
			Optimizer::Pso => self.pso.validate()?,
			Optimizer::Cs => self.cs.validate()?,
			Optimizer::Bbo => self.bbo.validate()?,
			Optimizer::Gwo | Optimizer::Ssa | Optimizer::Cfa => {}
		}
		if let Some(initial) = &self.initial_population {
			population::check_initial(initial, self.population_size, self.dim)?;
		}
		Ok(())
	}
}

/// Fluent builder for `WalkerConfig` for ergonomic configuration.
pub struct WalkerConfigBuilder {
	cfg: WalkerConfig,
}
impl Default for WalkerConfigBuilder {
	fn default() -> Self {
		Self::new()
	}
}
impl WalkerConfigBuilder {
	pub fn new() -> Self {
		Self { cfg: WalkerConfig::default() }
	}
	pub fn optimizer(mut self, v: Optimizer) -> Self {
		self.cfg.optimizer = v;
		self
	}
	pub fn dim(mut self, v: usize) -> Self {
		self.cfg.dim = v;
		self
	}
	pub fn bounds(mut self, lower: f64, upper: f64) -> Self {
		self.cfg.lower = lower;
		self.cfg.upper = upper;
		self
	}
	pub fn population_size(mut self, v: usize) -> Self {
		self.cfg.population_size = v;
		self
	}
	pub fn max_iters(mut self, v: usize) -> Self {
		self.cfg.max_iters = v;
		self
	}
	pub fn seed(mut self, v: u64) -> Self {
		self.cfg.seed = Some(v);
		self
	}
	pub fn verbosity(mut self, v: Verbosity) -> Self {
		self.cfg.verbosity = v;
		self
	}
	pub fn parallel(mut self, parallel: ParallelConfig) -> Self {
		self.cfg.parallel = parallel;
		self
	}
	pub fn workers(mut self, workers: usize) -> Self {
		self.cfg.parallel.workers = workers;
		self
	}
	pub fn sampling(mut self, sampling: Sampling) -> Self {
		self.cfg.parallel.sampling = sampling;
		self
	}
	pub fn bat(mut self, params: BatParams) -> Self {
		self.cfg.bat = params;
		self
	}
	pub fn woa(mut self, params: WoaParams) -> Self {
		self.cfg.woa = params;
		self
	}
	pub fn pso(mut self, params: PsoParams) -> Self {
		self.cfg.pso = params;
		self
	}
	pub fn cs(mut self, params: CuckooParams) -> Self {
		self.cfg.cs = params;
		self
	}
	pub fn bbo(mut self, params: BboParams) -> Self {
		self.cfg.bbo = params;
		self
	}
	pub fn initial_population(mut self, v: Array2<f64>) -> Self {
		self.cfg.initial_population = Some(v);
		self
	}
	pub fn build(self) -> WalkerConfig {
		self.cfg
	}
}

#[cfg(test)]
mod tests;
