//! The capability shared by every optimizer variant

use ndarray::Array1;
use rand::rngs::StdRng;

use crate::{ConstraintProjector, PopulationState};

/// Black-box cost: lower is better, non-finite values are tolerated
pub type Objective<'a> = dyn Fn(&Array1<f64>) -> f64 + Sync + 'a;

/// What an optimizer needs to know about the current iteration
#[derive(Debug, Clone, Copy)]
pub struct StepContext<'a> {
    /// Current iteration, 1-based
    pub iteration: usize,
    /// Iteration budget
    pub iterations: usize,
    pub projector: &'a ConstraintProjector,
    pub bounds: &'a [(f64, f64)],
}

impl StepContext<'_> {
    /// Normalized progress `t / T` in `[0, 1]`
    pub fn progress(&self) -> f64 {
        if self.iterations == 0 {
            return 1.0;
        }
        (self.iteration.min(self.iterations)) as f64 / self.iterations as f64
    }
}

/// Bookkeeping returned by one step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepStats {
    /// Agents whose position changed
    pub accepted: usize,
    /// Global (Lévy) pollination moves attempted
    pub global_moves: usize,
    /// Whether the global best improved
    pub improved: bool,
}

/// One population-based update rule
///
/// A step moves the agents, projects every new position, evaluates it once
/// and refreshes the global best. Agents read the state as it was at the
/// start of the step, never partially updated positions.
pub trait Optimizer {
    fn name(&self) -> &'static str;

    /// Whether agents need a velocity vector
    fn uses_velocity(&self) -> bool {
        false
    }

    fn step(
        &mut self,
        state: &mut PopulationState,
        objective: &Objective,
        ctx: &StepContext,
        rng: &mut StdRng,
    ) -> StepStats;
}
