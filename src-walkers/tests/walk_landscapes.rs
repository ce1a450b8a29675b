use walkers::{Optimizer, WalkerConfigBuilder, run};
use walkers_landscape::landscapes;

#[test]
fn test_walkers_never_beat_known_minima() {
    for landscape in landscapes() {
        let dim = landscape.dimensions.default_dim();
        let Some(known) = landscape.minimum_value(dim) else {
            continue;
        };
        for opt in [Optimizer::Gwo, Optimizer::Pso, Optimizer::Cs] {
            let config = WalkerConfigBuilder::new()
                .optimizer(opt)
                .dim(dim)
                .bounds(landscape.lower, landscape.upper)
                .population_size(20)
                .max_iters(40)
                .seed(3)
                .build();
            let solution = run(&landscape.function, &config).unwrap();
            let tolerance = 1e-3 * known.abs().max(1.0);
            assert!(
                solution.best_score() >= known - tolerance,
                "{} on {}: {} below known minimum {}",
                opt,
                landscape.name,
                solution.best_score(),
                known
            );
            let x = ndarray::Array1::from(solution.best_position().to_vec());
            assert_eq!(landscape.evaluate(&x), solution.best_score());
        }
    }
}

#[test]
fn test_walk_stays_inside_landscape_bounds() {
    for landscape in landscapes() {
        let dim = landscape.dimensions.default_dim();
        let config = WalkerConfigBuilder::new()
            .optimizer(Optimizer::Bat)
            .dim(dim)
            .bounds(landscape.lower, landscape.upper)
            .population_size(10)
            .max_iters(20)
            .seed(17)
            .build();
        let solution = run(&landscape.function, &config).unwrap();
        for record in solution.walk() {
            assert!(
                record
                    .x
                    .iter()
                    .all(|&v| v >= landscape.lower && v <= landscape.upper),
                "{} left its box",
                landscape.name
            );
        }
    }
}
