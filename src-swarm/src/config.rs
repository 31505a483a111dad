//! Experiment configuration and its validation

use serde::{Deserialize, Serialize};

use crate::{Algorithm, Result, Sign, SwarmError};

/// Classic PSO coefficients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PsoParams {
    /// Inertia weight
    pub w: f64,
    /// Cognitive coefficient (pull towards the agent's own best)
    pub c1: f64,
    /// Social coefficient (pull towards the global best)
    pub c2: f64,
}

impl Default for PsoParams {
    fn default() -> Self {
        Self { w: 0.7, c1: 1.5, c2: 1.5 }
    }
}

/// Iteration-scheduled PSO coefficients
///
/// Inertia decreases linearly from `w_max` to `w_min`; `c1` and `c2` ramp
/// linearly between their start and end values (time-varying acceleration).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApsoParams {
    pub w_max: f64,
    pub w_min: f64,
    pub c1_start: f64,
    pub c1_end: f64,
    pub c2_start: f64,
    pub c2_end: f64,
}

impl Default for ApsoParams {
    fn default() -> Self {
        Self { w_max: 0.9, w_min: 0.4, c1_start: 2.5, c1_end: 0.5, c2_start: 0.5, c2_end: 2.5 }
    }
}

/// Flower pollination parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FpaParams {
    /// Probability of global (Lévy) pollination for each agent and iteration
    pub switch_probability: f64,
    /// Lévy exponent λ in (0, 2]
    pub levy_exponent: f64,
    /// Multiplier applied to every Lévy step
    pub levy_scale: f64,
}

impl Default for FpaParams {
    fn default() -> Self {
        Self { switch_probability: 0.8, levy_exponent: 1.5, levy_scale: 0.01 }
    }
}

/// Extra knobs of the modified FPA
///
/// The switch probability decays linearly from `p_start` to `p_end`, and after
/// every iteration that performed at least one global pollination the global
/// best is refined by a greedy coordinate search whose step, as a fraction of
/// each bound span, shrinks from `refine_scale` to `refine_min_scale`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModifiedFpaParams {
    pub p_start: f64,
    pub p_end: f64,
    pub refine_scale: f64,
    pub refine_min_scale: f64,
}

impl Default for ModifiedFpaParams {
    fn default() -> Self {
        Self { p_start: 0.8, p_end: 0.2, refine_scale: 0.05, refine_min_scale: 1e-4 }
    }
}

/// Configuration shared by every optimizer and the experiment runner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwarmConfig {
    /// Number of agents M (fixed for the whole trial)
    pub population_size: usize,
    /// Iteration budget per trial
    pub iterations: usize,
    /// Number of independent trials
    pub trials: usize,
    /// Seed base; trial `k` draws from its own stream derived from it
    pub seed: u64,
    /// Initialization bounds per parameter
    pub bounds: Vec<(f64, f64)>,
    /// Sign constraint per parameter (empty = all free)
    pub constraints: Vec<Sign>,
    /// Initial velocities are drawn in `±velocity_scale * (upper - lower)`
    pub velocity_scale: f64,
    /// Optional early stop once the global best reaches this loss
    pub loss_threshold: Option<f64>,
    /// Run trials on the rayon pool
    pub parallel: bool,
    pub pso: PsoParams,
    pub apso: ApsoParams,
    pub fpa: FpaParams,
    pub modified_fpa: ModifiedFpaParams,
}

impl Default for SwarmConfig {
    fn default() -> Self {
        Self {
            population_size: 20,
            iterations: 100,
            trials: 10,
            seed: 0,
            bounds: Vec::new(),
            constraints: Vec::new(),
            velocity_scale: 0.1,
            loss_threshold: None,
            parallel: false,
            pso: PsoParams::default(),
            apso: ApsoParams::default(),
            fpa: FpaParams::default(),
            modified_fpa: ModifiedFpaParams::default(),
        }
    }
}

fn check_coefficient(name: &'static str, value: f64, ok: bool) -> Result<()> {
    if value.is_finite() && ok {
        Ok(())
    } else {
        Err(SwarmError::InvalidCoefficient { name, value })
    }
}

fn check_probability(name: &'static str, value: f64) -> Result<()> {
    check_coefficient(name, value, (0.0..=1.0).contains(&value))
}

fn check_non_negative(name: &'static str, value: f64) -> Result<()> {
    check_coefficient(name, value, value >= 0.0)
}

impl SwarmConfig {
    /// Number of decision variables
    pub fn dimension(&self) -> usize {
        self.bounds.len()
    }

    /// Check everything that does not depend on the chosen algorithm
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(SwarmError::InvalidPopulationSize(self.population_size));
        }
        if self.iterations == 0 {
            return Err(SwarmError::InvalidIterations(self.iterations));
        }
        if self.trials == 0 {
            return Err(SwarmError::InvalidTrials(self.trials));
        }
        if self.bounds.is_empty() {
            return Err(SwarmError::EmptyBounds);
        }
        for (index, &(lower, upper)) in self.bounds.iter().enumerate() {
            if !lower.is_finite() || !upper.is_finite() || lower > upper {
                return Err(SwarmError::InvalidBounds { index, lower, upper });
            }
        }
        if !self.constraints.is_empty() && self.constraints.len() != self.bounds.len() {
            return Err(SwarmError::DimensionMismatch {
                bounds: self.bounds.len(),
                constraints: self.constraints.len(),
            });
        }
        check_non_negative("velocity_scale", self.velocity_scale)?;
        if let Some(th) = self.loss_threshold {
            check_coefficient("loss_threshold", th, true)?;
        }

        check_non_negative("pso.w", self.pso.w)?;
        check_non_negative("pso.c1", self.pso.c1)?;
        check_non_negative("pso.c2", self.pso.c2)?;

        check_non_negative("apso.w_max", self.apso.w_max)?;
        check_non_negative("apso.w_min", self.apso.w_min)?;
        check_coefficient("apso.w_min", self.apso.w_min, self.apso.w_min <= self.apso.w_max)?;
        check_non_negative("apso.c1_start", self.apso.c1_start)?;
        check_non_negative("apso.c1_end", self.apso.c1_end)?;
        check_non_negative("apso.c2_start", self.apso.c2_start)?;
        check_non_negative("apso.c2_end", self.apso.c2_end)?;

        check_probability("fpa.switch_probability", self.fpa.switch_probability)?;
        let lambda = self.fpa.levy_exponent;
        check_coefficient("fpa.levy_exponent", lambda, lambda > 0.0 && lambda <= 2.0)?;
        check_non_negative("fpa.levy_scale", self.fpa.levy_scale)?;

        check_probability("modified_fpa.p_start", self.modified_fpa.p_start)?;
        check_probability("modified_fpa.p_end", self.modified_fpa.p_end)?;
        check_non_negative("modified_fpa.refine_scale", self.modified_fpa.refine_scale)?;
        check_non_negative("modified_fpa.refine_min_scale", self.modified_fpa.refine_min_scale)?;
        Ok(())
    }

    /// [`validate`](Self::validate) plus the algorithm's own requirements
    pub fn validate_for(&self, algorithm: Algorithm) -> Result<()> {
        self.validate()?;
        let required = algorithm.min_population();
        if self.population_size < required {
            return Err(SwarmError::PopulationTooSmall {
                algorithm,
                required,
                actual: self.population_size,
            });
        }
        Ok(())
    }
}

/// Fluent builder for `SwarmConfig`
pub struct SwarmConfigBuilder {
    cfg: SwarmConfig,
}

impl Default for SwarmConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SwarmConfigBuilder {
    pub fn new() -> Self {
        Self { cfg: SwarmConfig::default() }
    }
    pub fn from_config(cfg: SwarmConfig) -> Self {
        Self { cfg }
    }
    pub fn population_size(mut self, v: usize) -> Self {
        self.cfg.population_size = v;
        self
    }
    pub fn iterations(mut self, v: usize) -> Self {
        self.cfg.iterations = v;
        self
    }
    pub fn trials(mut self, v: usize) -> Self {
        self.cfg.trials = v;
        self
    }
    pub fn seed(mut self, v: u64) -> Self {
        self.cfg.seed = v;
        self
    }
    pub fn bounds(mut self, v: Vec<(f64, f64)>) -> Self {
        self.cfg.bounds = v;
        self
    }
    pub fn constraints(mut self, v: Vec<Sign>) -> Self {
        self.cfg.constraints = v;
        self
    }
    pub fn velocity_scale(mut self, v: f64) -> Self {
        self.cfg.velocity_scale = v;
        self
    }
    pub fn loss_threshold(mut self, v: f64) -> Self {
        self.cfg.loss_threshold = Some(v);
        self
    }
    pub fn parallel(mut self, v: bool) -> Self {
        self.cfg.parallel = v;
        self
    }
    pub fn pso(mut self, v: PsoParams) -> Self {
        self.cfg.pso = v;
        self
    }
    pub fn apso(mut self, v: ApsoParams) -> Self {
        self.cfg.apso = v;
        self
    }
    pub fn fpa(mut self, v: FpaParams) -> Self {
        self.cfg.fpa = v;
        self
    }
    pub fn switch_probability(mut self, p: f64) -> Self {
        self.cfg.fpa.switch_probability = p;
        self
    }
    pub fn modified_fpa(mut self, v: ModifiedFpaParams) -> Self {
        self.cfg.modified_fpa = v;
        self
    }
    pub fn build(self) -> SwarmConfig {
        self.cfg
    }
}
