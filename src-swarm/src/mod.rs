//! Population-based global optimizers in pure Rust using ndarray
//!
//! Four nature-inspired algorithms share one population engine:
//!
//! - PSO: classic velocity update with fixed inertia and acceleration
//! - APSO: PSO with inertia and acceleration scheduled on the iteration index
//! - FPA: flower pollination with Lévy-flight global moves and greedy acceptance
//! - Modified FPA: FPA with a decaying switch probability and a coordinate
//!   refinement of the global best after global pollination
//!
//! Supported features:
//! - Uniform initialization inside per-parameter bounds
//! - Sign constraints (`x >= 0`, `x <= 0`) enforced by clipping after every move
//! - Non-finite costs treated as `+inf` so a diverging agent never becomes best
//! - Per-iteration histories (every agent's loss, running best loss and parameters)
//! - Repeated independent trials with one `StdRng` per trial, optionally on rayon
//! - Summary statistics across trials and CSV/JSON records
//!
//! # Example
//!
//! ```rust
//! use ndarray::Array1;
//! use throttle_swarm::{Algorithm, ExperimentRunner, Sign, SwarmConfigBuilder};
//!
//! let config = SwarmConfigBuilder::new()
//!     .population_size(20)
//!     .iterations(50)
//!     .trials(2)
//!     .seed(7)
//!     .bounds(vec![(-5.0, 5.0), (-5.0, 5.0)])
//!     .constraints(vec![Sign::NonNegative, Sign::Free])
//!     .build();
//!
//! let sphere = |x: &Array1<f64>| x.iter().map(|v| v * v).sum::<f64>();
//! let runner = ExperimentRunner::new(config).unwrap();
//! let result = runner.run(Algorithm::ModifiedFpa, &sphere).unwrap();
//! assert!(result.summary.min_final_loss.unwrap() < 1.0);
//! ```

pub mod apso;
pub mod config;
pub mod constraint;
pub mod distinct_indices;
pub mod error;
pub mod fpa;
pub mod history;
pub mod levy;
pub mod modified_fpa;
pub mod optimizer;
pub mod population;
pub mod pso;
pub mod recorder;
pub mod runner;
pub mod schedule;
pub mod stats;
pub mod trial;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use config::{
    ApsoParams, FpaParams, ModifiedFpaParams, PsoParams, SwarmConfig, SwarmConfigBuilder,
};
pub use constraint::{ConstraintProjector, Sign};
pub use error::{Result, SwarmError};
pub use history::TrialHistory;
pub use optimizer::{Objective, Optimizer, StepContext, StepStats};
pub use population::{Agent, GlobalBest, Population, PopulationState};
pub use runner::{AlgorithmResult, BestFit, ExperimentReport, ExperimentRunner};
pub use stats::{SummaryStats, mean_std};
pub use trial::{TrialOutcome, TrialStatus, run_trial, trial_seed};

/// Index and value of the smallest entry; earliest index wins ties
pub(crate) fn argmin<'a, I>(values: I) -> Option<(usize, f64)>
where
    I: IntoIterator<Item = &'a f64>,
{
    let mut best: Option<(usize, f64)> = None;
    for (i, &val) in values.into_iter().enumerate() {
        match best {
            Some((_, b)) if val >= b => {}
            _ if val.is_nan() => {}
            _ => best = Some((i, val)),
        }
    }
    best
}

/// Optimizer variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    /// Particle swarm with fixed coefficients
    Pso,
    /// Particle swarm with iteration-scheduled coefficients
    Apso,
    /// Baseline flower pollination
    Fpa,
    /// Flower pollination with switch-probability decay and best refinement
    ModifiedFpa,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] =
        [Algorithm::Pso, Algorithm::Apso, Algorithm::Fpa, Algorithm::ModifiedFpa];

    /// Canonical name used in reports and record file names
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Pso => "pso",
            Algorithm::Apso => "apso",
            Algorithm::Fpa => "fpa_original",
            Algorithm::ModifiedFpa => "fpa",
        }
    }

    /// Smallest population the update rule can work with
    pub fn min_population(&self) -> usize {
        match self {
            Algorithm::Pso | Algorithm::Apso => 1,
            // local pollination draws two partners distinct from the agent
            Algorithm::Fpa | Algorithm::ModifiedFpa => 3,
        }
    }

    /// Instantiate a fresh optimizer for one trial
    pub fn build(&self, config: &SwarmConfig) -> Result<Box<dyn Optimizer>> {
        Ok(match self {
            Algorithm::Pso => Box::new(pso::PsoOptimizer::new(config.pso.clone())),
            Algorithm::Apso => Box::new(apso::ApsoOptimizer::new(config.apso.clone())),
            Algorithm::Fpa => Box::new(fpa::FpaOptimizer::new(config.fpa.clone())?),
            Algorithm::ModifiedFpa => Box::new(modified_fpa::ModifiedFpaOptimizer::new(
                config.fpa.clone(),
                config.modified_fpa.clone(),
            )?),
        })
    }

    /// Parse a comma separated list; `all` expands to every algorithm
    pub fn parse_list(s: &str) -> std::result::Result<Vec<Algorithm>, String> {
        let mut out = Vec::new();
        for token in s.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            if token.eq_ignore_ascii_case("all") {
                for a in Algorithm::ALL {
                    if !out.contains(&a) {
                        out.push(a);
                    }
                }
                continue;
            }
            let a: Algorithm = token.parse()?;
            if !out.contains(&a) {
                out.push(a);
            }
        }
        if out.is_empty() {
            return Err("no algorithm given".to_string());
        }
        Ok(out)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let t = s.to_lowercase();
        match t.as_str() {
            "pso" => Ok(Algorithm::Pso),
            "apso" | "adaptive-pso" | "adaptive_pso" => Ok(Algorithm::Apso),
            "fpa_original" | "fpa-original" | "original_fpa" => Ok(Algorithm::Fpa),
            "fpa" | "mfpa" | "modified_fpa" | "modified-fpa" => Ok(Algorithm::ModifiedFpa),
            _ => Err(format!("unknown algorithm: {}", s)),
        }
    }
}
