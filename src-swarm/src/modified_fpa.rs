//! Modified flower pollination
//!
//! Two changes on top of [`FpaOptimizer`](crate::fpa::FpaOptimizer):
//!
//! 1. the switch probability decays linearly from `p_start` to `p_end`, so
//!    the search drifts from Lévy exploration to local pollination;
//! 2. after every iteration that performed at least one global pollination,
//!    the best agent is polished by a greedy coordinate search. Each
//!    coordinate tries `x_d ± s_d` with
//!    `s_d = max(refine_scale * (1 - t/T), refine_min_scale) * (upper_d - lower_d)`
//!    and keeps a trial point only if it is strictly better.
//!
//! Both phases only ever replace an agent with a point that is not worse, so
//! the greedy acceptance of the baseline is preserved.

use rand::rngs::StdRng;

use crate::fpa::pollinate;
use crate::levy::LevySampler;
use crate::schedule::LinearSchedule;
use crate::{
    FpaParams, ModifiedFpaParams, Objective, Optimizer, PopulationState, Result, StepContext,
    StepStats,
};

#[derive(Debug, Clone)]
pub struct ModifiedFpaOptimizer {
    params: ModifiedFpaParams,
    switch: LinearSchedule,
    levy: LevySampler,
}

impl ModifiedFpaOptimizer {
    pub fn new(fpa: FpaParams, params: ModifiedFpaParams) -> Result<Self> {
        let levy = LevySampler::new(fpa.levy_exponent, fpa.levy_scale)?;
        let switch = LinearSchedule::new(params.p_start, params.p_end);
        Ok(Self { params, switch, levy })
    }

    /// Switch probability used at `iteration`
    pub fn switch_probability(&self, iteration: usize, iterations: usize) -> f64 {
        self.switch.value_at(iteration, iterations).clamp(0.0, 1.0)
    }

    /// Relative coordinate step at the current progress
    fn refine_fraction(&self, ctx: &StepContext) -> f64 {
        (self.params.refine_scale * (1.0 - ctx.progress())).max(self.params.refine_min_scale)
    }

    /// Greedy coordinate search around the best agent; returns accepted moves
    fn refine_best(
        &self,
        state: &mut PopulationState,
        objective: &Objective,
        ctx: &StepContext,
    ) -> usize {
        let Some(idx) = state.best_agent() else {
            return 0;
        };
        let fraction = self.refine_fraction(ctx);
        let mut accepted = 0;

        for (d, &(lo, hi)) in ctx.bounds.iter().enumerate() {
            let step = fraction * (hi - lo);
            if step <= 0.0 || d >= state.population.agents[idx].position.len() {
                continue;
            }
            for sign in [1.0, -1.0] {
                let mut candidate = state.population.agents[idx].position.clone();
                candidate[d] += sign * step;
                ctx.projector.project_inplace(&mut candidate);
                if candidate == state.population.agents[idx].position {
                    continue;
                }
                let f = state.score(objective, &candidate);
                let agent = &mut state.population.agents[idx];
                if f < agent.fitness {
                    agent.position = candidate;
                    agent.set_fitness(f);
                    accepted += 1;
                    break;
                }
            }
        }
        accepted
    }
}

impl Optimizer for ModifiedFpaOptimizer {
    fn name(&self) -> &'static str {
        "fpa"
    }

    fn step(
        &mut self,
        state: &mut PopulationState,
        objective: &Objective,
        ctx: &StepContext,
        rng: &mut StdRng,
    ) -> StepStats {
        let p = self.switch_probability(ctx.iteration, ctx.iterations);
        let mut stats = pollinate(state, objective, &self.levy, p, ctx, rng);
        if stats.global_moves > 0 {
            stats.accepted += self.refine_best(state, objective, ctx);
            stats.improved |= state.update_global_best(ctx.iteration);
        }
        stats
    }
}
