//! Particle swarm optimization with fixed coefficients

use ndarray::Array1;
use rand::Rng;
use rand::rngs::StdRng;

use crate::{Objective, Optimizer, PopulationState, PsoParams, StepContext, StepStats};

/// Move every particle with
/// `v ← w v + c1 r1 (pbest - x) + c2 r2 (gbest - x)`, `x ← x + v`,
/// then project. `r1`, `r2` are fresh uniform draws per component.
pub(crate) fn velocity_step<R: Rng + ?Sized>(
    state: &mut PopulationState,
    w: f64,
    c1: f64,
    c2: f64,
    ctx: &StepContext,
    rng: &mut R,
) {
    let gbest = state.global_best.position.clone();
    for agent in state.population.agents.iter_mut() {
        let n = agent.position.len();
        let v = agent.velocity.get_or_insert_with(|| Array1::zeros(n));
        for d in 0..n {
            let r1: f64 = rng.random();
            let r2: f64 = rng.random();
            v[d] = w * v[d]
                + c1 * r1 * (agent.best_position[d] - agent.position[d])
                + c2 * r2 * (gbest[d] - agent.position[d]);
        }
        agent.position += &*v;
        ctx.projector.project_inplace(&mut agent.position);
    }
}

/// Classic PSO
#[derive(Debug, Clone)]
pub struct PsoOptimizer {
    params: PsoParams,
}

impl PsoOptimizer {
    pub fn new(params: PsoParams) -> Self {
        Self { params }
    }
}

impl Optimizer for PsoOptimizer {
    fn name(&self) -> &'static str {
        "pso"
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
        let PsoParams { w, c1, c2 } = self.params;
        velocity_step(state, w, c1, c2, ctx, rng);
        let improved = state.evaluate(objective, ctx.iteration);
        StepStats { accepted: state.len(), global_moves: 0, improved }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Agent, ConstraintProjector, Population, Sign};
    use ndarray::array;
    use rand::SeedableRng;

    #[test]
    fn test_zero_coefficients_only_coast() {
        // with c1 = c2 = 0 and w = 1 a particle keeps its velocity
        let mut state = PopulationState::new(Population::new(vec![Agent::new(
            array![1.0, -1.0],
            Some(array![0.5, 0.25]),
        )]));
        let projector = ConstraintProjector::default();
        let ctx = StepContext { iteration: 1, iterations: 1, projector: &projector, bounds: &[] };
        let mut rng = StdRng::seed_from_u64(0);
        velocity_step(&mut state, 1.0, 0.0, 0.0, &ctx, &mut rng);
        assert_eq!(state.population.agents[0].position, array![1.5, -0.75]);
    }

    #[test]
    fn test_projection_after_move() {
        let mut state = PopulationState::new(Population::new(vec![Agent::new(
            array![0.1],
            Some(array![-1.0]),
        )]));
        let projector = ConstraintProjector::new(vec![Sign::NonNegative]);
        let ctx = StepContext { iteration: 1, iterations: 1, projector: &projector, bounds: &[] };
        let mut rng = StdRng::seed_from_u64(0);
        velocity_step(&mut state, 1.0, 0.0, 0.0, &ctx, &mut rng);
        assert_eq!(state.population.agents[0].position, array![0.0]);
    }

    #[test]
    fn test_step_converges_on_sphere() {
        let sphere = |x: &Array1<f64>| x.iter().map(|v| v * v).sum::<f64>();
        let mut rng = StdRng::seed_from_u64(11);
        let bounds = vec![(-5.0, 5.0), (-5.0, 5.0)];
        let pop = Population::random(20, &bounds, Some(0.1), &mut rng);
        let mut state = PopulationState::new(pop);
        state.evaluate(&sphere, 0);
        let projector = ConstraintProjector::default();
        let mut pso = PsoOptimizer::new(PsoParams::default());
        for t in 1..=100 {
            let ctx = StepContext {
                iteration: t,
                iterations: 100,
                projector: &projector,
                bounds: &bounds,
            };
            pso.step(&mut state, &sphere, &ctx, &mut rng);
        }
        assert!(state.global_best.fitness < 1e-4, "f={}", state.global_best.fitness);
        assert_eq!(state.nfev, 20 * 101);
    }
}
