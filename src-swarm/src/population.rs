//! Agents, the population and the trial's global best

use ndarray::Array1;
use rand::Rng;

use crate::{ConstraintProjector, Objective, argmin};

/// Map any non-finite cost to the worst possible fitness
#[inline]
pub(crate) fn sanitize(f: f64) -> f64 {
    if f.is_finite() { f } else { f64::INFINITY }
}

/// One candidate solution
#[derive(Debug, Clone)]
pub struct Agent {
    pub position: Array1<f64>,
    /// Only velocity-based algorithms carry one
    pub velocity: Option<Array1<f64>>,
    /// Fitness of `position`; `+inf` until evaluated
    pub fitness: f64,
    /// Best position this agent ever held
    pub best_position: Array1<f64>,
    pub best_fitness: f64,
}

impl Agent {
    pub fn new(position: Array1<f64>, velocity: Option<Array1<f64>>) -> Self {
        Self {
            best_position: position.clone(),
            position,
            velocity,
            fitness: f64::INFINITY,
            best_fitness: f64::INFINITY,
        }
    }

    /// Store a new fitness for the current position and track the personal best
    pub fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
        if fitness < self.best_fitness {
            self.best_fitness = fitness;
            self.best_position = self.position.clone();
        }
    }
}

/// Ordered, fixed-size collection of agents
#[derive(Debug, Clone)]
pub struct Population {
    pub agents: Vec<Agent>,
}

impl Population {
    pub fn new(agents: Vec<Agent>) -> Self {
        Self { agents }
    }

    /// `size` agents drawn uniformly inside `bounds`
    ///
    /// With `velocity_scale = Some(s)` each agent also gets a velocity drawn
    /// uniformly in `±s * (upper - lower)` per component.
    pub fn random<R: Rng + ?Sized>(
        size: usize,
        bounds: &[(f64, f64)],
        velocity_scale: Option<f64>,
        rng: &mut R,
    ) -> Self {
        let agents = (0..size)
            .map(|_| {
                let position = Array1::from_iter(bounds.iter().map(|&(lo, hi)| {
                    if hi > lo { rng.random_range(lo..=hi) } else { lo }
                }));
                let velocity = velocity_scale.map(|s| {
                    Array1::from_iter(bounds.iter().map(|&(lo, hi)| {
                        let vmax = s * (hi - lo);
                        if vmax > 0.0 { rng.random_range(-vmax..=vmax) } else { 0.0 }
                    }))
                });
                Agent::new(position, velocity)
            })
            .collect();
        Self { agents }
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn fitness(&self) -> Vec<f64> {
        self.agents.iter().map(|a| a.fitness).collect()
    }

    pub fn positions(&self) -> Vec<Array1<f64>> {
        self.agents.iter().map(|a| a.position.clone()).collect()
    }
}

/// Best position and fitness seen so far in a trial
#[derive(Debug, Clone)]
pub struct GlobalBest {
    pub position: Array1<f64>,
    pub fitness: f64,
    /// Iteration at which the incumbent was found (0 = initialization)
    pub found_at: Option<usize>,
}

impl GlobalBest {
    pub fn is_finite(&self) -> bool {
        self.fitness.is_finite()
    }
}

/// A population together with its global best and evaluation counter
#[derive(Debug, Clone)]
pub struct PopulationState {
    pub population: Population,
    pub global_best: GlobalBest,
    /// Number of cost function calls
    pub nfev: usize,
    /// Agents whose last cost came back non-finite
    pub non_finite: usize,
}

impl PopulationState {
    /// Wrap a population; the global best starts at `+inf`
    pub fn new(population: Population) -> Self {
        let position = population
            .agents
            .first()
            .map(|a| a.position.clone())
            .unwrap_or_else(|| Array1::zeros(0));
        Self {
            population,
            global_best: GlobalBest { position, fitness: f64::INFINITY, found_at: None },
            nfev: 0,
            non_finite: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.population.len()
    }

    pub fn is_empty(&self) -> bool {
        self.population.is_empty()
    }

    /// Project every agent onto the feasible set
    pub fn project_all(&mut self, projector: &ConstraintProjector) {
        for agent in self.population.agents.iter_mut() {
            projector.project_inplace(&mut agent.position);
        }
    }

    /// One cost call, non-finite results mapped to `+inf`
    pub fn score(&mut self, objective: &Objective, x: &Array1<f64>) -> f64 {
        self.nfev += 1;
        let f = objective(x);
        if !f.is_finite() {
            self.non_finite += 1;
        }
        sanitize(f)
    }

    /// Evaluate every agent at its current position, then offer the
    /// population to the global best
    pub fn evaluate(&mut self, objective: &Objective, iteration: usize) -> bool {
        for i in 0..self.population.len() {
            let f = {
                let x = self.population.agents[i].position.clone();
                self.score(objective, &x)
            };
            self.population.agents[i].set_fitness(f);
        }
        self.update_global_best(iteration)
    }

    /// Replace the global best with the best current agent if it is strictly
    /// better; equal fitness keeps the incumbent. Returns true on improvement.
    pub fn update_global_best(&mut self, iteration: usize) -> bool {
        let fitness = self.population.fitness();
        match argmin(&fitness) {
            Some((idx, f)) if f < self.global_best.fitness => {
                self.global_best.fitness = f;
                self.global_best.position = self.population.agents[idx].position.clone();
                self.global_best.found_at = Some(iteration);
                true
            }
            _ => false,
        }
    }

    /// Index of the best current agent (earliest on ties)
    pub fn best_agent(&self) -> Option<usize> {
        argmin(&self.population.fitness()).map(|(i, _)| i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Sign;
    use ndarray::array;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn sphere(x: &Array1<f64>) -> f64 {
        x.iter().map(|v| v * v).sum()
    }

    #[test]
    fn test_random_population_inside_bounds() {
        let mut rng = StdRng::seed_from_u64(3);
        let bounds = [(-1.0, 2.0), (-1.0, 0.0), (0.0, 10.0)];
        let pop = Population::random(50, &bounds, Some(0.1), &mut rng);
        assert_eq!(pop.len(), 50);
        for a in &pop.agents {
            for (d, &(lo, hi)) in bounds.iter().enumerate() {
                assert!(a.position[d] >= lo && a.position[d] <= hi);
                let v = a.velocity.as_ref().unwrap()[d];
                assert!(v.abs() <= 0.1 * (hi - lo));
            }
        }
        let pop = Population::random(5, &bounds, None, &mut rng);
        assert!(pop.agents.iter().all(|a| a.velocity.is_none()));
    }

    #[test]
    fn test_degenerate_bound_is_fixed() {
        let mut rng = StdRng::seed_from_u64(3);
        let pop = Population::random(10, &[(1.5, 1.5)], Some(0.5), &mut rng);
        for a in &pop.agents {
            assert_eq!(a.position[0], 1.5);
            assert_eq!(a.velocity.as_ref().unwrap()[0], 0.0);
        }
    }

    #[test]
    fn test_evaluate_sets_global_best() {
        let pop = Population::new(vec![
            Agent::new(array![2.0, 0.0], None),
            Agent::new(array![1.0, 0.0], None),
            Agent::new(array![3.0, 0.0], None),
        ]);
        let mut state = PopulationState::new(pop);
        assert!(state.evaluate(&sphere, 0));
        assert_eq!(state.global_best.fitness, 1.0);
        assert_eq!(state.global_best.position, array![1.0, 0.0]);
        assert_eq!(state.global_best.found_at, Some(0));
        assert_eq!(state.nfev, 3);
    }

    #[test]
    fn test_ties_keep_incumbent() {
        let pop = Population::new(vec![
            Agent::new(array![1.0, 0.0], None),
            Agent::new(array![0.0, 1.0], None),
        ]);
        let mut state = PopulationState::new(pop);
        state.evaluate(&sphere, 0);
        // earliest agent wins within one evaluation
        assert_eq!(state.global_best.position, array![1.0, 0.0]);

        // an equally good newcomer does not replace it
        state.population.agents[0].position = array![-1.0, 0.0];
        state.population.agents[1].position = array![0.0, -1.0];
        assert!(!state.evaluate(&sphere, 1));
        assert_eq!(state.global_best.position, array![1.0, 0.0]);
        assert_eq!(state.global_best.found_at, Some(0));
    }

    #[test]
    fn test_non_finite_never_best() {
        let bad = |x: &Array1<f64>| if x[0] < 0.0 { f64::NAN } else { x[0] + 10.0 };
        let pop = Population::new(vec![
            Agent::new(array![-1.0], None),
            Agent::new(array![5.0], None),
        ]);
        let mut state = PopulationState::new(pop);
        state.evaluate(&bad, 0);
        assert_eq!(state.population.agents[0].fitness, f64::INFINITY);
        assert_eq!(state.global_best.fitness, 15.0);
        assert_eq!(state.non_finite, 1);
    }

    #[test]
    fn test_all_non_finite_leaves_best_infinite() {
        let pop = Population::new(vec![Agent::new(array![1.0], None)]);
        let mut state = PopulationState::new(pop);
        assert!(!state.evaluate(&|_: &Array1<f64>| f64::INFINITY, 0));
        assert!(!state.global_best.is_finite());
        assert_eq!(state.global_best.found_at, None);
    }

    #[test]
    fn test_project_all() {
        let mut state = PopulationState::new(Population::new(vec![Agent::new(
            array![-0.5, 0.2, 3.0],
            None,
        )]));
        let p =
            ConstraintProjector::new(vec![Sign::NonNegative, Sign::NonPositive, Sign::NonNegative]);
        state.project_all(&p);
        assert_eq!(state.population.agents[0].position, array![0.0, 0.0, 3.0]);
    }
}
