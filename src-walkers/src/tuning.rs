//! Tuning the parameters of one walker with another walker.
//!
//! The tuner walks the unit box `[0, 1]^k`, one coordinate per tuned
//! parameter, and coordinate `u` maps onto `lower + u * (upper - lower)`.
//! A point scores the best value a full run of the tuned walker reaches on
//! the objective with those parameters. Every inner run shares one seed, so
//! the tuner sees a deterministic landscape.

use crate::error::{Result, WalkerError};
use crate::run::run;
use crate::solution::Solution;
use crate::{Optimizer, Verbosity, WalkerConfig};
use ndarray::Array1;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A continuous parameter of one movement rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hyperparameter {
    BatLoudness,
    BatPulseRate,
    BatQmin,
    BatQmax,
    BatStep,
    WoaSpiral,
    PsoVmax,
    PsoWmax,
    PsoWmin,
    PsoC1,
    PsoC2,
    CsPa,
    CsBeta,
    CsAlpha,
    BboMutation,
    BboBlend,
}

impl Hyperparameter {
    pub const ALL: [Hyperparameter; 16] = [
        Hyperparameter::BatLoudness,
        Hyperparameter::BatPulseRate,
        Hyperparameter::BatQmin,
        Hyperparameter::BatQmax,
        Hyperparameter::BatStep,
        Hyperparameter::WoaSpiral,
        Hyperparameter::PsoVmax,
        Hyperparameter::PsoWmax,
        Hyperparameter::PsoWmin,
        Hyperparameter::PsoC1,
        Hyperparameter::PsoC2,
        Hyperparameter::CsPa,
        Hyperparameter::CsBeta,
        Hyperparameter::CsAlpha,
        Hyperparameter::BboMutation,
        Hyperparameter::BboBlend,
    ];

    /// Optimizer whose configuration holds this parameter
    pub fn optimizer(&self) -> Optimizer {
        use Hyperparameter::*;
        match self {
            BatLoudness | BatPulseRate | BatQmin | BatQmax | BatStep => Optimizer::Bat,
            WoaSpiral => Optimizer::Woa,
            PsoVmax | PsoWmax | PsoWmin | PsoC1 | PsoC2 => Optimizer::Pso,
            CsPa | CsBeta | CsAlpha => Optimizer::Cs,
            BboMutation | BboBlend => Optimizer::Bbo,
        }
    }

    /// Field name inside the optimizer's parameter struct
    pub fn name(&self) -> &'static str {
        use Hyperparameter::*;
        match self {
            BatLoudness => "loudness",
            BatPulseRate => "pulse_rate",
            BatQmin => "qmin",
            BatQmax => "qmax",
            BatStep => "step",
            WoaSpiral => "b",
            PsoVmax => "vmax",
            PsoWmax => "wmax",
            PsoWmin => "wmin",
            PsoC1 => "c1",
            PsoC2 => "c2",
            CsPa => "pa",
            CsBeta => "beta",
            CsAlpha => "alpha",
            BboMutation => "p_mutate",
            BboBlend => "blend",
        }
    }

    /// Range searched when the caller gives none.
    ///
    /// Any point of the default ranges of one optimizer is a valid
    /// configuration.
    pub fn default_range(&self) -> (f64, f64) {
        use Hyperparameter::*;
        match self {
            BatLoudness | BatPulseRate | BatQmin => (0.0, 1.0),
            BatQmax => (1.0, 3.0),
            BatStep => (1e-3, 1e-1),
            WoaSpiral => (0.1, 2.0),
            PsoVmax => (0.5, 10.0),
            PsoWmax => (0.5, 1.0),
            PsoWmin => (0.0, 0.5),
            PsoC1 | PsoC2 => (0.5, 2.5),
            CsPa => (0.05, 0.5),
            CsBeta => (0.5, 1.9),
            CsAlpha => (1e-3, 1e-1),
            BboMutation => (0.0, 0.1),
            BboBlend => (0.0, 1.0),
        }
    }

    /// Every tunable parameter of `optimizer`
    pub fn of(optimizer: Optimizer) -> Vec<Hyperparameter> {
        Self::ALL
            .into_iter()
            .filter(|p| p.optimizer() == optimizer)
            .collect()
    }

    pub fn get(&self, config: &WalkerConfig) -> f64 {
        use Hyperparameter::*;
        match self {
            BatLoudness => config.bat.loudness,
            BatPulseRate => config.bat.pulse_rate,
            BatQmin => config.bat.qmin,
            BatQmax => config.bat.qmax,
            BatStep => config.bat.step,
            WoaSpiral => config.woa.b,
            PsoVmax => config.pso.vmax,
            PsoWmax => config.pso.wmax,
            PsoWmin => config.pso.wmin,
            PsoC1 => config.pso.c1,
            PsoC2 => config.pso.c2,
            CsPa => config.cs.pa,
            CsBeta => config.cs.beta,
            CsAlpha => config.cs.alpha,
            BboMutation => config.bbo.p_mutate,
            BboBlend => config.bbo.blend,
        }
    }

    pub fn set(&self, config: &mut WalkerConfig, value: f64) {
        use Hyperparameter::*;
        let slot = match self {
            BatLoudness => &mut config.bat.loudness,
            BatPulseRate => &mut config.bat.pulse_rate,
            BatQmin => &mut config.bat.qmin,
            BatQmax => &mut config.bat.qmax,
            BatStep => &mut config.bat.step,
            WoaSpiral => &mut config.woa.b,
            PsoVmax => &mut config.pso.vmax,
            PsoWmax => &mut config.pso.wmax,
            PsoWmin => &mut config.pso.wmin,
            PsoC1 => &mut config.pso.c1,
            PsoC2 => &mut config.pso.c2,
            CsPa => &mut config.cs.pa,
            CsBeta => &mut config.cs.beta,
            CsAlpha => &mut config.cs.alpha,
            BboMutation => &mut config.bbo.p_mutate,
            BboBlend => &mut config.bbo.blend,
        };
        *slot = value;
    }
}

impl fmt::Display for Hyperparameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.optimizer().name(), self.name())
    }
}

/// Closed interval searched for one parameter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParamRange {
    pub param: Hyperparameter,
    pub lower: f64,
    pub upper: f64,
}

impl ParamRange {
    pub fn new(param: Hyperparameter, lower: f64, upper: f64) -> Self {
        Self { param, lower, upper }
    }

    pub fn default_for(param: Hyperparameter) -> Self {
        let (lower, upper) = param.default_range();
        Self::new(param, lower, upper)
    }

    /// Map a unit-box coordinate onto the range
    #[inline]
    pub fn decode(&self, u: f64) -> f64 {
        (self.lower + u * (self.upper - self.lower))
            .max(self.lower)
            .min(self.upper)
    }
}

/// How the tuner itself runs
#[derive(Debug, Clone)]
pub struct TuningConfig {
    /// Walker searching the parameter box
    pub tuner: Optimizer,
    pub population_size: usize,
    pub max_iters: usize,
    /// Seeds the tuner, and the tuned runs when their config has no seed
    pub seed: Option<u64>,
    /// Parameters to tune; empty tunes every parameter over its default range
    pub ranges: Vec<ParamRange>,
    pub verbosity: Verbosity,
}

impl Default for TuningConfig {
    fn default() -> Self {
        Self {
            tuner: Optimizer::Pso,
            population_size: 10,
            max_iters: 50,
            seed: None,
            ranges: Vec::new(),
            verbosity: Verbosity::Progress,
        }
    }
}

/// Result of a tuning run
#[derive(Debug, Clone)]
pub struct Tuning {
    /// The tuned walker's configuration with the best values applied
    pub config: WalkerConfig,
    /// Best values, in range order
    pub values: Vec<(Hyperparameter, f64)>,
    /// Best score the tuned walker reaches with `config`
    pub best_score: f64,
    /// The tuner's own run over the unit box
    pub search: Solution,
}

fn resolve_ranges(optimizer: Optimizer, requested: &[ParamRange]) -> Result<Vec<ParamRange>> {
    let ranges: Vec<ParamRange> = if requested.is_empty() {
        Hyperparameter::of(optimizer)
            .into_iter()
            .map(ParamRange::default_for)
            .collect()
    } else {
        requested.to_vec()
    };
    if ranges.is_empty() {
        return Err(WalkerError::NothingToTune {
            optimizer: optimizer.name(),
        });
    }

    let invalid = |r: &ParamRange, reason| WalkerError::InvalidTuning {
        optimizer: optimizer.name(),
        name: r.param.name(),
        reason,
    };
    for (k, r) in ranges.iter().enumerate() {
        if r.param.optimizer() != optimizer {
            return Err(invalid(r, "parameter belongs to another optimizer"));
        }
        if !r.lower.is_finite() || !r.upper.is_finite() || r.lower > r.upper {
            return Err(invalid(r, "range must be finite and ordered"));
        }
        if ranges[..k].iter().any(|p| p.param == r.param) {
            return Err(invalid(r, "parameter listed twice"));
        }
    }
    Ok(ranges)
}

/// Write the decoded values of `unit` into `config`
fn apply<I>(config: &mut WalkerConfig, ranges: &[ParamRange], unit: I) -> Vec<(Hyperparameter, f64)>
where
    I: IntoIterator<Item = f64>,
{
    ranges
        .iter()
        .zip(unit)
        .map(|(r, u)| {
            let value = r.decode(u);
            r.param.set(config, value);
            (r.param, value)
        })
        .collect()
}

/// Tune the parameters of `target.optimizer` on `objective` with `tuning.tuner`
///
/// Parameter values the tuned walker rejects score `+inf`. The returned
/// configuration reproduces `best_score` when passed back to [`run`].
pub fn tune<F>(objective: &F, target: &WalkerConfig, tuning: &TuningConfig) -> Result<Tuning>
where
    F: Fn(&Array1<f64>) -> f64 + Sync,
{
    target.validate()?;
    let ranges = resolve_ranges(target.optimizer, &tuning.ranges)?;

    let mut inner = target.clone();
    inner.verbosity = Verbosity::Silent;
    if inner.seed.is_none() {
        let seed = tuning.seed.unwrap_or_else(|| rand::rng().random());
        inner.seed = Some(seed);
    }
    if tuning.verbosity >= Verbosity::Progress {
        log::info!(
            "{} tunes {} over {} parameters, inner seed {:?}",
            tuning.tuner,
            target.optimizer,
            ranges.len(),
            inner.seed
        );
    }

    let score = |u: &Array1<f64>| -> f64 {
        let mut config = inner.clone();
        apply(&mut config, &ranges, u.iter().copied());
        match run(objective, &config) {
            Ok(solution) => solution.best_score(),
            Err(e) => {
                log::debug!("{} parameters rejected: {}", target.optimizer, e);
                f64::INFINITY
            }
        }
    };

    let outer = WalkerConfig {
        optimizer: tuning.tuner,
        dim: ranges.len(),
        lower: 0.0,
        upper: 1.0,
        population_size: tuning.population_size,
        max_iters: tuning.max_iters,
        seed: tuning.seed,
        verbosity: tuning.verbosity,
        ..WalkerConfig::default()
    };
    let search = run(&score, &outer)?;

    let mut config = inner;
    config.verbosity = target.verbosity;
    let values = apply(&mut config, &ranges, search.best_position().iter().copied());
    config.validate()?;

    if tuning.verbosity >= Verbosity::Progress {
        for (param, value) in &values {
            log::info!("  {} = {:.6e}", param, value);
        }
    }

    Ok(Tuning {
        config,
        values,
        best_score: search.best_score(),
        search,
    })
}
