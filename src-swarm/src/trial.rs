//! One independent optimization run

use ndarray::Array1;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;

use crate::{
    Algorithm, ConstraintProjector, Objective, Population, PopulationState, Result, StepContext,
    SwarmConfig, TrialHistory,
};

/// Seed of trial `index`, a function of the seed base and the index only
///
/// Trial 0 gets the same stream whether 1 or 1000 trials are requested.
pub fn trial_seed(base: u64, index: usize) -> u64 {
    base.wrapping_add((index as u64) << 32)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrialStatus {
    Success,
    /// The global best stayed non-finite for the whole run
    Failed,
}

/// Everything one trial produced
#[derive(Debug, Clone)]
pub struct TrialOutcome {
    pub index: usize,
    pub seed: u64,
    pub history: TrialHistory,
    pub best_loss: f64,
    pub best_params: Array1<f64>,
    pub status: TrialStatus,
    /// Number of cost function calls
    pub nfev: usize,
}

impl TrialOutcome {
    pub fn is_success(&self) -> bool {
        self.status == TrialStatus::Success
    }
}

/// Run `algorithm` once from a fresh random population
///
/// The trial owns its generator, population and history; nothing is shared
/// with other trials.
pub fn run_trial(
    algorithm: Algorithm,
    config: &SwarmConfig,
    objective: &Objective,
    trial: usize,
) -> Result<TrialOutcome> {
    config.validate_for(algorithm)?;
    let seed = trial_seed(config.seed, trial);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut optimizer = algorithm.build(config)?;
    let projector = ConstraintProjector::new(config.constraints.clone());

    let velocity_scale = optimizer.uses_velocity().then_some(config.velocity_scale);
    let population =
        Population::random(config.population_size, &config.bounds, velocity_scale, &mut rng);
    let mut state = PopulationState::new(population);
    state.project_all(&projector);
    state.evaluate(objective, 0);

    let mut history = TrialHistory::with_capacity(config.iterations);
    for iteration in 1..=config.iterations {
        let ctx = StepContext {
            iteration,
            iterations: config.iterations,
            projector: &projector,
            bounds: &config.bounds,
        };
        let stats = optimizer.step(&mut state, objective, &ctx, &mut rng);
        history.record(iteration, &state.population, &state.global_best);

        log::debug!(
            "{} trial {} iter {}: best={:.6e} accepted={} global={}",
            optimizer.name(),
            trial,
            iteration,
            state.global_best.fitness,
            stats.accepted,
            stats.global_moves
        );

        let threshold = config.loss_threshold.unwrap_or(f64::NEG_INFINITY);
        if state.global_best.fitness <= threshold {
            log::info!(
                "{} trial {} reached loss threshold {:.3e} at iteration {}",
                optimizer.name(),
                trial,
                threshold,
                iteration
            );
            break;
        }
    }

    if state.non_finite > 0 {
        log::warn!(
            "{} trial {}: {} non-finite cost evaluations treated as +inf",
            optimizer.name(),
            trial,
            state.non_finite
        );
    }

    let status = if state.global_best.is_finite() {
        TrialStatus::Success
    } else {
        log::warn!("{} trial {} never found a finite loss", optimizer.name(), trial);
        TrialStatus::Failed
    };

    Ok(TrialOutcome {
        index: trial,
        seed,
        best_loss: state.global_best.fitness,
        best_params: state.global_best.position.clone(),
        history,
        status,
        nfev: state.nfev,
    })
}
