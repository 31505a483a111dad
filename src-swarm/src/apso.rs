//! Adaptive PSO: coefficients scheduled on the iteration index
//!
//! Inertia decreases linearly from `w_max` to `w_min` while the cognitive
//! coefficient decays and the social one grows (time-varying acceleration
//! coefficients). Schedules depend on `t / T` only, so a seeded run is fully
//! reproducible.

use rand::rngs::StdRng;

use crate::pso::velocity_step;
use crate::schedule::LinearSchedule;
use crate::{ApsoParams, Objective, Optimizer, PopulationState, StepContext, StepStats};

/// Adaptive PSO
#[derive(Debug, Clone)]
pub struct ApsoOptimizer {
    w: LinearSchedule,
    c1: LinearSchedule,
    c2: LinearSchedule,
}

impl ApsoOptimizer {
    pub fn new(params: ApsoParams) -> Self {
        Self {
            w: LinearSchedule::new(params.w_max, params.w_min),
            c1: LinearSchedule::new(params.c1_start, params.c1_end),
            c2: LinearSchedule::new(params.c2_start, params.c2_end),
        }
    }

    /// `(w, c1, c2)` used at `iteration` of `iterations`
    pub fn coefficients(&self, iteration: usize, iterations: usize) -> (f64, f64, f64) {
        (
            self.w.value_at(iteration, iterations),
            self.c1.value_at(iteration, iterations),
            self.c2.value_at(iteration, iterations),
        )
    }
}

impl Optimizer for ApsoOptimizer {
    fn name(&self) -> &'static str {
        "apso"
    }

    fn uses_velocity(&self) -> bool {
        true
    }

    fn step(
        &mut self,
        state: &mut PopulationState,
        objective: &Objective,
        ctx: &StepContext,
        rng: &mut StdRng,
    ) -> StepStats {
        let (w, c1, c2) = self.coefficients(ctx.iteration, ctx.iterations);
        velocity_step(state, w, c1, c2, ctx, rng);
        let improved = state.evaluate(objective, ctx.iteration);
        StepStats { accepted: state.len(), global_moves: 0, improved }
    }
}
