//! Flower pollination algorithm
//!
//! Each agent, each iteration, draws one Bernoulli trial with probability `p`:
//!
//! - global pollination: `x ← x + L ⊙ (x - gbest)` with `L` a Lévy step vector
//! - local pollination: `x ← x + ε (x_j - x_k)`, `j ≠ k ≠ i`, `ε ~ U[0, 1]`
//!
//! The candidate is projected and evaluated once; it replaces the agent only
//! if its fitness is not worse (greedy acceptance). All candidates are built
//! from the positions held at the start of the iteration.

use ndarray::Array1;
use rand::Rng;
use rand::rngs::StdRng;

use crate::distinct_indices::distinct_indices;
use crate::levy::LevySampler;
use crate::{FpaParams, Objective, Optimizer, PopulationState, Result, StepContext, StepStats};

/// One pollination sweep with switch probability `p`
pub(crate) fn pollinate<R: Rng + ?Sized>(
    state: &mut PopulationState,
    objective: &Objective,
    levy: &LevySampler,
    p: f64,
    ctx: &StepContext,
    rng: &mut R,
) -> StepStats {
    let snapshot = state.population.positions();
    let gbest = state.global_best.position.clone();
    let n = snapshot.len();
    let mut stats = StepStats::default();

    for i in 0..n {
        let x = &snapshot[i];
        let mut candidate: Array1<f64> = if rng.random::<f64>() < p {
            stats.global_moves += 1;
            let step = levy.sample_vec(x.len(), rng);
            x + &(step * &(x - &gbest))
        } else {
            let jk = distinct_indices(i, 2, n, rng);
            let eps: f64 = rng.random();
            x + &((&snapshot[jk[0]] - &snapshot[jk[1]]) * eps)
        };
        ctx.projector.project_inplace(&mut candidate);

        let f = state.score(objective, &candidate);
        let agent = &mut state.population.agents[i];
        if f <= agent.fitness {
            agent.position = candidate;
            agent.set_fitness(f);
            stats.accepted += 1;
        }
    }

    stats.improved = state.update_global_best(ctx.iteration);
    stats
}

/// Baseline FPA
#[derive(Debug, Clone)]
pub struct FpaOptimizer {
    params: FpaParams,
    levy: LevySampler,
}

impl FpaOptimizer {
    pub fn new(params: FpaParams) -> Result<Self> {
        let levy = LevySampler::new(params.levy_exponent, params.levy_scale)?;
        Ok(Self { params, levy })
    }
}

impl Optimizer for FpaOptimizer {
    fn name(&self) -> &'static str {
        "fpa_original"
    }

    fn step(
        &mut self,
        state: &mut PopulationState,
        objective: &Objective,
        ctx: &StepContext,
        rng: &mut StdRng,
    ) -> StepStats {
        pollinate(state, objective, &self.levy, self.params.switch_probability, ctx, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ConstraintProjector, Population, Sign};
    use rand::SeedableRng;

    fn sphere(x: &Array1<f64>) -> f64 {
        x.iter().map(|v| (v - 1.0) * (v - 1.0)).sum()
    }

    fn setup(seed: u64) -> (PopulationState, StdRng) {
        let mut rng = StdRng::seed_from_u64(seed);
        let pop = Population::random(15, &[(-4.0, 4.0), (-4.0, 4.0)], None, &mut rng);
        let mut state = PopulationState::new(pop);
        state.evaluate(&sphere, 0);
        (state, rng)
    }

    #[test]
    fn test_greedy_acceptance_per_agent() {
        let (mut state, mut rng) = setup(21);
        let projector = ConstraintProjector::new(vec![Sign::NonNegative, Sign::Free]);
        state.project_all(&projector);
        state.evaluate(&sphere, 0);
        let initial_best = state.global_best.fitness;
        let mut fpa = FpaOptimizer::new(FpaParams::default()).unwrap();
        for t in 1..=60 {
            let before = state.population.fitness();
            let ctx = StepContext {
                iteration: t,
                iterations: 60,
                projector: &projector,
                bounds: &[],
            };
            fpa.step(&mut state, &sphere, &ctx, &mut rng);
            for (b, a) in before.iter().zip(state.population.fitness()) {
                assert!(a <= *b, "agent got worse: {} -> {}", b, a);
            }
            assert!(state.population.agents.iter().all(|a| projector.is_feasible(&a.position)));
        }
        assert!(state.global_best.fitness < initial_best, "no progress from {}", initial_best);
    }

    #[test]
    fn test_pure_local_pollination() {
        // p = 0: every move is a local one, no Lévy draws
        let (mut state, mut rng) = setup(4);
        let projector = ConstraintProjector::default();
        let levy = LevySampler::new(1.5, 0.01).unwrap();
        let ctx = StepContext { iteration: 1, iterations: 1, projector: &projector, bounds: &[] };
        let stats = pollinate(&mut state, &sphere, &levy, 0.0, &ctx, &mut rng);
        assert_eq!(stats.global_moves, 0);
        assert_eq!(state.nfev, 30);
    }

    #[test]
    fn test_pure_global_pollination() {
        let (mut state, mut rng) = setup(4);
        let projector = ConstraintProjector::default();
        let levy = LevySampler::new(1.5, 0.01).unwrap();
        let ctx = StepContext { iteration: 1, iterations: 1, projector: &projector, bounds: &[] };
        let stats = pollinate(&mut state, &sphere, &levy, 1.0, &ctx, &mut rng);
        assert_eq!(stats.global_moves, 15);
    }

    #[test]
    fn test_rejected_move_keeps_position() {
        // a cost that punishes any move away from the starting points
        let start = |x: &Array1<f64>| if x.iter().all(|v| v.fract() == 0.0) { 0.0 } else { 1.0 };
        let pop = Population::new(vec![
            crate::Agent::new(ndarray::array![1.0, 2.0], None),
            crate::Agent::new(ndarray::array![3.0, 4.0], None),
            crate::Agent::new(ndarray::array![5.0, 7.0], None),
        ]);
        let mut state = PopulationState::new(pop);
        state.evaluate(&start, 0);
        let before = state.population.positions();
        let projector = ConstraintProjector::default();
        let levy = LevySampler::new(1.5, 0.01).unwrap();
        let ctx = StepContext { iteration: 1, iterations: 1, projector: &projector, bounds: &[] };
        let mut rng = StdRng::seed_from_u64(8);
        pollinate(&mut state, &start, &levy, 1.0, &ctx, &mut rng);
        assert_eq!(state.population.positions(), before);
    }
}
