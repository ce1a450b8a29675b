use clap::Parser;
use std::error::Error;
use walkers::{Optimizer, Sampling, TuningConfig, Verbosity, WalkerConfigBuilder, run, tune};
use walkers_landscape::{get_landscape, landscapes};

/// Walk a benchmark landscape with one of the swarm optimizers
#[derive(Parser)]
#[command(name = "run_walkers")]
#[command(about = "Run a swarm optimizer on a benchmark landscape and report its walk")]
struct Cli {
    /// Optimizer: bat, gwo, woa, ssa, cfa, pso, cs or bbo
    #[arg(short, long, required_unless_present = "list")]
    optimizer: Option<Optimizer>,

    /// Landscape name, see --list
    #[arg(short, long, required_unless_present = "list")]
    landscape: Option<String>,

    /// Dimension (defaults to the smallest the landscape supports)
    #[arg(short, long)]
    dim: Option<usize>,

    /// Number of candidates
    #[arg(short, long, default_value = "50")]
    population: usize,

    /// Number of iterations
    #[arg(short = 'i', long, default_value = "500")]
    max_iters: usize,

    /// Random seed (drawn from the OS when omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Size of the worker team
    #[arg(short, long, default_value = "1")]
    workers: usize,

    /// Give every worker its own random stream
    #[arg(long)]
    per_worker_sampling: bool,

    /// 0: silent, 1: progress, 2: every iteration
    #[arg(short, long, default_value = "1")]
    verbosity: u8,

    /// Print the full solution as JSON
    #[arg(long)]
    json: bool,

    /// Tune the optimizer's parameters with this optimizer first
    #[arg(long)]
    tune: Option<Optimizer>,

    /// List the available landscapes and exit
    #[arg(long)]
    list: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    if let Err(e) = run_cli(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run_cli(cli: Cli) -> Result<(), Box<dyn Error>> {
    if cli.list {
        println!("{:<18} {:>12} {:>12}  {:<10} minimum", "landscape", "lower", "upper", "dims");
        for l in landscapes() {
            let dims = match l.dimensions {
                walkers_landscape::Dimensions::Fixed(d) => format!("{}", d),
                walkers_landscape::Dimensions::AtLeast(d) => format!(">= {}", d),
            };
            let minimum = l
                .minimum_value(l.dimensions.default_dim())
                .map(|v| format!("{:.6}", v))
                .unwrap_or_else(|| "-".to_string());
            println!("{:<18} {:>12} {:>12}  {:<10} {}", l.name, l.lower, l.upper, dims, minimum);
        }
        return Ok(());
    }

    let optimizer = cli.optimizer.ok_or("--optimizer is required")?;
    let name = cli.landscape.ok_or("--landscape is required")?;
    let landscape = get_landscape(&name).ok_or_else(|| format!("unknown landscape: {}", name))?;

    let dim = cli.dim.unwrap_or_else(|| landscape.dimensions.default_dim());
    if !landscape.accepts(dim) {
        return Err(format!("landscape {} does not support dimension {}", landscape.name, dim).into());
    }

    let sampling = if cli.per_worker_sampling {
        Sampling::PerWorker
    } else {
        Sampling::SingleStream
    };
    let mut builder = WalkerConfigBuilder::new()
        .optimizer(optimizer)
        .dim(dim)
        .bounds(landscape.lower, landscape.upper)
        .population_size(cli.population)
        .max_iters(cli.max_iters)
        .workers(cli.workers)
        .sampling(sampling)
        .verbosity(Verbosity::from(cli.verbosity));
    if let Some(seed) = cli.seed {
        builder = builder.seed(seed);
    }
    let mut config = builder.build();

    if let Some(tuner) = cli.tune {
        let tuning = TuningConfig {
            tuner,
            seed: cli.seed,
            verbosity: config.verbosity,
            ..TuningConfig::default()
        };
        let tuned = tune(&landscape.function, &config, &tuning)?;
        if !cli.json {
            println!("tuned by {}:", tuner);
            for (param, value) in &tuned.values {
                println!("  {:<16} {:.6e}", param.to_string(), value);
            }
        }
        config = tuned.config;
    }

    let solution = run(&landscape.function, &config)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&solution)?);
        return Ok(());
    }

    println!("landscape:       {} (dim {})", landscape.name, dim);
    println!("{}", solution);
    if let Some(known) = landscape.minimum_value(dim) {
        println!("known minimum:   {:.6e} (gap {:.3e})", known, solution.best_score() - known);
    }
    Ok(())
}
