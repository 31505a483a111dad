//! Error type for configuration and persistence failures

use crate::Algorithm;

/// Errors surfaced by the optimization core
///
/// Configuration variants are raised before any trial starts. Numeric
/// trouble inside a trial is never an error: the offending agent simply
/// gets an infinite fitness.
#[derive(Debug, thiserror::Error)]
pub enum SwarmError {
    #[error("population_size must be positive, got {0}")]
    InvalidPopulationSize(usize),

    #[error("iterations must be positive, got {0}")]
    InvalidIterations(usize),

    #[error("trials must be positive, got {0}")]
    InvalidTrials(usize),

    #[error("no bounds given: the search space is empty")]
    EmptyBounds,

    #[error("bound[{index}] is malformed: lower={lower} upper={upper}")]
    InvalidBounds { index: usize, lower: f64, upper: f64 },

    #[error("{bounds} bounds but {constraints} sign constraints")]
    DimensionMismatch { bounds: usize, constraints: usize },

    #[error("coefficient {name} has invalid value {value}")]
    InvalidCoefficient { name: &'static str, value: f64 },

    #[error("{algorithm} needs at least {required} agents, got {actual}")]
    PopulationTooSmall { algorithm: Algorithm, required: usize, actual: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SwarmError>;
