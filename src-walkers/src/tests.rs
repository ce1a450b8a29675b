use crate::bat::Bat;
use crate::cfa::Cfa;
use crate::cs::Cuckoo;
use crate::run::MovementRule;
use crate::run_context::RunContext;
use crate::{
	BboParams, CuckooParams, Optimizer, PsoParams, Sampling, Verbosity, WalkerConfig,
	WalkerConfigBuilder, WalkerError, WoaParams, run,
};
use ndarray::{Array1, Array2};
use std::str::FromStr;

fn sphere(x: &Array1<f64>) -> f64 {
	x.iter().map(|v| v * v).sum()
}

fn base(optimizer: Optimizer) -> WalkerConfigBuilder {
	WalkerConfigBuilder::new()
		.optimizer(optimizer)
		.dim(3)
		.bounds(-5.0, 5.0)
		.population_size(12)
		.max_iters(25)
		.seed(7)
}

/// Deterministic in-bounds warm start
fn grid_population(n: usize, dim: usize, lower: f64, upper: f64) -> Array2<f64> {
	Array2::from_shape_fn((n, dim), |(i, j)| {
		let t = ((i * 7 + j * 3) % 11) as f64 / 10.0;
		lower + t * (upper - lower)
	})
}

#[test]
fn test_optimizer_from_str() {
	assert_eq!(Optimizer::from_str("bat").unwrap(), Optimizer::Bat);
	assert_eq!(Optimizer::from_str("GWO").unwrap(), Optimizer::Gwo);
	assert_eq!(Optimizer::from_str("whale").unwrap(), Optimizer::Woa);
	assert_eq!(Optimizer::from_str("cuckoo").unwrap(), Optimizer::Cs);
	assert_eq!(Optimizer::from_str("biogeography").unwrap(), Optimizer::Bbo);
	let err = Optimizer::from_str("tabu").unwrap_err();
	assert_eq!(err, "unknown optimizer: tabu");

	for opt in Optimizer::ALL {
		assert_eq!(Optimizer::from_str(opt.name()).unwrap(), opt);
		assert_eq!(opt.to_string(), opt.name());
	}
}

#[test]
fn test_verbosity_levels() {
	assert_eq!(Verbosity::from(0), Verbosity::Silent);
	assert_eq!(Verbosity::from(1), Verbosity::Progress);
	assert_eq!(Verbosity::from(5), Verbosity::Iterations);
	assert!(Verbosity::Iterations > Verbosity::Progress);
}

#[test]
fn test_builder_sets_fields() {
	let cfg = WalkerConfigBuilder::new()
		.optimizer(Optimizer::Pso)
		.dim(4)
		.bounds(-1.0, 2.0)
		.population_size(9)
		.max_iters(3)
		.seed(99)
		.workers(3)
		.sampling(Sampling::PerWorker)
		.build();
	assert_eq!(cfg.optimizer, Optimizer::Pso);
	assert_eq!(cfg.dim, 4);
	assert_eq!((cfg.lower, cfg.upper), (-1.0, 2.0));
	assert_eq!(cfg.population_size, 9);
	assert_eq!(cfg.max_iters, 3);
	assert_eq!(cfg.seed, Some(99));
	assert_eq!(cfg.parallel.workers, 3);
	assert_eq!(cfg.parallel.sampling, Sampling::PerWorker);
	assert!(cfg.validate().is_ok());
}

#[test]
fn test_validation_errors() {
	let cfg = base(Optimizer::Bat).dim(0).build();
	assert!(matches!(run(&sphere, &cfg), Err(WalkerError::InvalidDimension { dim: 0 })));

	let cfg = base(Optimizer::Bat).population_size(0).build();
	assert!(matches!(run(&sphere, &cfg), Err(WalkerError::InvalidPopulation { size: 0 })));

	let cfg = base(Optimizer::Bat).bounds(1.0, 1.0).build();
	assert!(run(&sphere, &cfg).unwrap_err().is_bounds_error());

	let cfg = base(Optimizer::Bat).bounds(f64::NEG_INFINITY, 1.0).build();
	assert!(run(&sphere, &cfg).unwrap_err().is_bounds_error());

	let cfg = base(Optimizer::Bat).workers(0).build();
	assert!(matches!(
		run(&sphere, &cfg),
		Err(WalkerError::InvalidWorkerCount { workers: 0 })
	));

	let cfg = base(Optimizer::Woa).woa(WoaParams { b: f64::NAN }).build();
	assert!(run(&sphere, &cfg).unwrap_err().is_config_error());

	let cfg = base(Optimizer::Pso)
		.pso(PsoParams { vmax: -1.0, ..Default::default() })
		.build();
	assert!(run(&sphere, &cfg).unwrap_err().is_config_error());

	let cfg = base(Optimizer::Cs)
		.cs(CuckooParams { pa: 2.0, ..Default::default() })
		.build();
	assert!(run(&sphere, &cfg).unwrap_err().is_config_error());

	let cfg = base(Optimizer::Bbo)
		.bbo(BboParams { p_mutate: -0.5, ..Default::default() })
		.build();
	assert!(run(&sphere, &cfg).unwrap_err().is_config_error());
}

#[test]
fn test_parameters_of_other_optimizers_are_ignored() {
	// an invalid cuckoo setting does not stop a grey wolf run
	let cfg = base(Optimizer::Gwo)
		.cs(CuckooParams { beta: 5.0, ..Default::default() })
		.build();
	assert!(run(&sphere, &cfg).is_ok());
}

#[test]
fn test_warm_start_validation() {
	let cfg = base(Optimizer::Ssa)
		.initial_population(Array2::zeros((5, 3)))
		.build();
	assert!(matches!(
		run(&sphere, &cfg),
		Err(WalkerError::InitialPopulationShape {
			expected_rows: 12,
			expected_cols: 3,
			rows: 5,
			cols: 3
		})
	));

	let mut bad = Array2::zeros((12, 3));
	bad[[4, 2]] = f64::NAN;
	let cfg = base(Optimizer::Ssa).initial_population(bad).build();
	assert!(matches!(
		run(&sphere, &cfg),
		Err(WalkerError::NonFiniteInitialPopulation { row: 4, col: 2 })
	));
}

#[test]
fn test_walk_has_one_record_per_iteration() {
	for opt in Optimizer::ALL {
		let cfg = base(opt).build();
		let sol = run(&sphere, &cfg).unwrap();
		assert_eq!(sol.walk().len(), 25, "{}", opt);
		for (t, rec) in sol.walk().iter().enumerate() {
			assert_eq!(rec.iteration, t);
			assert_eq!(rec.x.len(), 3);
			assert!((sphere(&Array1::from(rec.x.clone())) - rec.best_result).abs() < 1e-12);
		}
		assert_eq!(sol.population.dim(), (12, 3));
		assert_eq!(sol.population_fitness.len(), 12);
	}
}

#[test]
fn test_positions_stay_in_bounds() {
	for opt in Optimizer::ALL {
		let cfg = base(opt).bounds(-0.5, 0.25).build();
		let sol = run(&sphere, &cfg).unwrap();
		for rec in sol.walk() {
			assert!(rec.x.iter().all(|&v| (-0.5..=0.25).contains(&v)), "{}", opt);
		}
		assert!(sol.population.iter().all(|&v| (-0.5..=0.25).contains(&v)), "{}", opt);
	}
}

#[test]
fn test_best_score_is_best_ever() {
	let initial = grid_population(12, 3, -5.0, 5.0);
	let initial_best = initial
		.rows()
		.into_iter()
		.map(|r| sphere(&r.to_owned()))
		.fold(f64::INFINITY, f64::min);

	for opt in Optimizer::ALL {
		let cfg = base(opt).initial_population(initial.clone()).build();
		let sol = run(&sphere, &cfg).unwrap();
		let walk_best = sol
			.walk()
			.iter()
			.map(|r| r.best_result)
			.fold(f64::INFINITY, f64::min);
		assert_eq!(sol.best_score(), walk_best.min(initial_best), "{}", opt);
		assert!((sphere(&Array1::from(sol.best_position().to_vec())) - sol.best_score()).abs() < 1e-12);
	}
}

#[test]
fn test_greedy_variants_never_worsen_a_candidate() {
	let initial = grid_population(12, 3, -5.0, 5.0);
	let start: Vec<f64> = initial.rows().into_iter().map(|r| sphere(&r.to_owned())).collect();

	for opt in [Optimizer::Bat, Optimizer::Cfa, Optimizer::Cs] {
		let cfg = base(opt).initial_population(initial.clone()).build();
		let sol = run(&sphere, &cfg).unwrap();
		for (i, (&end, &begin)) in sol.population_fitness.iter().zip(start.iter()).enumerate() {
			assert!(end <= begin, "{} candidate {} got worse: {} > {}", opt, i, end, begin);
		}
	}
}

/// Drive `W` by hand and check every slot after every iteration
fn assert_fitness_never_rises<W: MovementRule>(cfg: &WalkerConfig) {
	let objective = |x: &Array1<f64>| (x[0] + 2.0 * x[1] - 7.0).powi(2) + sphere(x);
	let mut ctx = RunContext::new(cfg, &objective).unwrap();
	let mut walker = W::prepare(&ctx, cfg);
	while ctx.iteration < ctx.max_iters {
		let before = ctx.population.fitness.clone();
		walker.advance(&mut ctx, &objective);
		ctx.refresh_best();
		for (i, (&now, &prev)) in ctx.population.fitness.iter().zip(before.iter()).enumerate() {
			assert!(
				now <= prev,
				"{} iteration {} candidate {}: {} > {}",
				cfg.optimizer,
				ctx.iteration,
				i,
				now,
				prev
			);
		}
		ctx.iteration += 1;
	}
}

#[test]
fn test_greedy_fitness_is_non_increasing_every_iteration() {
	for sampling in [Sampling::SingleStream, Sampling::PerWorker] {
		let cfg = |opt| base(opt).max_iters(40).workers(3).sampling(sampling).build();
		assert_fitness_never_rises::<Bat>(&cfg(Optimizer::Bat));
		assert_fitness_never_rises::<Cfa>(&cfg(Optimizer::Cfa));
		assert_fitness_never_rises::<Cuckoo>(&cfg(Optimizer::Cs));
	}
}

#[test]
fn test_zero_iterations() {
	let initial = grid_population(12, 3, -5.0, 5.0);
	for opt in Optimizer::ALL {
		let cfg = base(opt).max_iters(0).initial_population(initial.clone()).build();
		let sol = run(&sphere, &cfg).unwrap();
		assert!(sol.walk().is_empty());
		assert_eq!(sol.population, initial);
		let best = sol.population_fitness.iter().copied().fold(f64::INFINITY, f64::min);
		assert_eq!(sol.best_score(), best);
	}
}

#[test]
fn test_same_seed_same_walk() {
	for opt in Optimizer::ALL {
		let a = run(&sphere, &base(opt).build()).unwrap();
		let b = run(&sphere, &base(opt).build()).unwrap();
		assert_eq!(a.walk(), b.walk(), "{}", opt);
		assert_eq!(a.population, b.population);

		let c = run(&sphere, &base(opt).seed(8).build()).unwrap();
		assert_ne!(a.population, c.population, "{}", opt);
	}
}

#[test]
fn test_single_stream_ignores_worker_count() {
	for opt in Optimizer::ALL {
		let one = run(&sphere, &base(opt).workers(1).build()).unwrap();
		let four = run(&sphere, &base(opt).workers(4).build()).unwrap();
		assert_eq!(one.walk(), four.walk(), "{}", opt);
		assert_eq!(one.best_score(), four.best_score());
		assert_eq!(one.population, four.population);
	}
}

#[test]
fn test_per_worker_sampling_is_reproducible() {
	for opt in Optimizer::ALL {
		let cfg = base(opt).workers(3).sampling(Sampling::PerWorker).build();
		let a = run(&sphere, &cfg).unwrap();
		let b = run(&sphere, &cfg).unwrap();
		assert_eq!(a.walk(), b.walk(), "{}", opt);
		assert!(a.population.iter().all(|&v| (-5.0..=5.0).contains(&v)));
	}
}

#[test]
fn test_unseeded_run_reports_its_seed() {
	let cfg = WalkerConfig {
		max_iters: 5,
		population_size: 6,
		..WalkerConfig::default()
	};
	let sol = run(&sphere, &cfg).unwrap();
	let again = run(&sphere, &WalkerConfig { seed: Some(sol.seed), ..cfg }).unwrap();
	assert_eq!(sol.walk(), again.walk());
}

#[test]
fn test_descending_objective_is_clipped_to_upper() {
	// minimized by pushing every coordinate past the upper bound
	let ramp = |x: &Array1<f64>| -x.sum();
	for opt in Optimizer::ALL {
		let cfg = base(opt).bounds(-1.0, 1.0).max_iters(60).population_size(20).build();
		let sol = run(&ramp, &cfg).unwrap();
		assert!(sol.best_position().iter().all(|&v| v <= 1.0), "{}", opt);
		assert!(sol.best_score() >= -3.0);
	}

	// swarms that overshoot land exactly on the bound
	for opt in [Optimizer::Pso, Optimizer::Gwo] {
		let cfg = base(opt).bounds(-1.0, 1.0).max_iters(60).population_size(20).build();
		let sol = run(&ramp, &cfg).unwrap();
		assert_eq!(sol.best_position(), &[1.0, 1.0, 1.0][..], "{}", opt);
		assert_eq!(sol.best_score(), -3.0);
	}
}

#[test]
fn test_single_candidate() {
	for opt in Optimizer::ALL {
		let cfg = base(opt).population_size(1).max_iters(5).build();
		let sol = run(&sphere, &cfg).unwrap();
		assert_eq!(sol.walk().len(), 5, "{}", opt);
		assert!(sol.best_score().is_finite());
	}
}

#[test]
fn test_nan_objective_does_not_break_the_run() {
	let holey = |x: &Array1<f64>| if x[0] > 0.0 { f64::NAN } else { sphere(x) };
	for opt in Optimizer::ALL {
		let sol = run(&holey, &base(opt).build()).unwrap();
		assert_eq!(sol.walk().len(), 25);
		assert!(!sol.best_score().is_nan(), "{}", opt);
	}
}
