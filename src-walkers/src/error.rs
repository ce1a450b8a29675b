//! Error types for the walkers.
//!
//! Every configuration problem is reported before a run starts, so a run that
//! returns `Ok` always completed all of its iterations.

use thiserror::Error;

/// Errors that can occur while setting up a walker run.
#[derive(Debug, Error)]
pub enum WalkerError {
    /// Dimension of the search space is zero.
    #[error("dimension must be > 0 (got {dim})")]
    InvalidDimension {
        /// The invalid dimension
        dim: usize,
    },

    /// Population size is zero.
    #[error("population size must be > 0 (got {size})")]
    InvalidPopulation {
        /// The invalid population size
        size: usize,
    },

    /// Bounds are not finite or not strictly ordered.
    #[error("invalid bounds: lower ({lower}) must be finite and < upper ({upper})")]
    InvalidBounds {
        /// The lower bound value
        lower: f64,
        /// The upper bound value
        upper: f64,
    },

    /// A variant parameter is out of its valid range.
    #[error("invalid {optimizer} parameter {name} = {value}: {reason}")]
    InvalidParameter {
        /// Optimizer the parameter belongs to
        optimizer: &'static str,
        /// Parameter name
        name: &'static str,
        /// The invalid value
        value: f64,
        /// Accepted range
        reason: &'static str,
    },

    /// Worker count is zero.
    #[error("worker count must be > 0 (got {workers})")]
    InvalidWorkerCount {
        /// The invalid worker count
        workers: usize,
    },

    /// The population arena would not fit in memory addressing.
    #[error("population of {population} x {dim} coordinates overflows usize")]
    PopulationTooLarge {
        /// Requested population size
        population: usize,
        /// Requested dimension
        dim: usize,
    },

    /// Warm start population has the wrong shape.
    #[error("initial population shape mismatch: expected {expected_rows}x{expected_cols}, got {rows}x{cols}")]
    InitialPopulationShape {
        /// Expected number of candidates
        expected_rows: usize,
        /// Expected dimension
        expected_cols: usize,
        /// Rows provided
        rows: usize,
        /// Columns provided
        cols: usize,
    },

    /// Warm start population holds a NaN or infinite coordinate.
    #[error("initial population has a non-finite coordinate at ({row}, {col})")]
    NonFiniteInitialPopulation {
        /// Candidate index
        row: usize,
        /// Coordinate index
        col: usize,
    },

    /// Tuning found no parameter to search.
    #[error("nothing to tune for {optimizer}")]
    NothingToTune {
        /// Optimizer being tuned
        optimizer: &'static str,
    },

    /// A tuned parameter range cannot be searched.
    #[error("cannot tune {optimizer} parameter {name}: {reason}")]
    InvalidTuning {
        /// Optimizer being tuned
        optimizer: &'static str,
        /// Parameter name
        name: &'static str,
        /// What is wrong with the range
        reason: &'static str,
    },

    /// The per-run worker pool could not be built.
    #[error("failed to build worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

/// A specialized `Result` type for walker operations.
pub type Result<T> = std::result::Result<T, WalkerError>;

impl WalkerError {
    /// Returns `true` if this is a bounds-related error.
    pub fn is_bounds_error(&self) -> bool {
        matches!(self, WalkerError::InvalidBounds { .. })
    }

    /// Returns `true` if this is a configuration-related error.
    ///
    /// This includes every validation failure except bounds and resources.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            WalkerError::InvalidDimension { .. }
                | WalkerError::InvalidPopulation { .. }
                | WalkerError::InvalidParameter { .. }
                | WalkerError::InvalidWorkerCount { .. }
                | WalkerError::InitialPopulationShape { .. }
                | WalkerError::NonFiniteInitialPopulation { .. }
                | WalkerError::NothingToTune { .. }
                | WalkerError::InvalidTuning { .. }
        )
    }

    /// Returns `true` if the run could not get the resources it asked for.
    pub fn is_resource_error(&self) -> bool {
        matches!(
            self,
            WalkerError::PopulationTooLarge { .. } | WalkerError::WorkerPool(_)
        )
    }
}
