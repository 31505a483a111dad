//! Per-iteration trial record

use ndarray::{Array1, Array2};

use crate::{GlobalBest, Population};

/// Append-only record of one trial, one entry per iteration
#[derive(Debug, Clone, Default)]
pub struct TrialHistory {
    /// Iteration number of each entry (1-based)
    pub iterations: Vec<usize>,
    /// Fitness of every agent after the iteration
    pub loss_history: Vec<Vec<f64>>,
    /// Running global best fitness
    pub best_loss_history: Vec<f64>,
    /// Running global best parameters
    pub best_param_history: Vec<Array1<f64>>,
}

impl TrialHistory {
    pub fn with_capacity(n: usize) -> Self {
        Self {
            iterations: Vec::with_capacity(n),
            loss_history: Vec::with_capacity(n),
            best_loss_history: Vec::with_capacity(n),
            best_param_history: Vec::with_capacity(n),
        }
    }

    /// Append the population's fitness and a snapshot of the global best
    ///
    /// Called once per iteration whether or not anything improved.
    pub fn record(&mut self, iteration: usize, population: &Population, global_best: &GlobalBest) {
        self.iterations.push(iteration);
        self.loss_history.push(population.fitness());
        self.best_loss_history.push(global_best.fitness);
        self.best_param_history.push(global_best.position.clone());
    }

    pub fn len(&self) -> usize {
        self.best_loss_history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.best_loss_history.is_empty()
    }

    /// Global best fitness after the last iteration
    pub fn final_best_loss(&self) -> Option<f64> {
        self.best_loss_history.last().copied()
    }

    pub fn final_best_params(&self) -> Option<&Array1<f64>> {
        self.best_param_history.last()
    }

    /// Per-agent losses as an `iterations x population` matrix
    pub fn loss_matrix(&self) -> Array2<f64> {
        let rows = self.loss_history.len();
        let cols = self.loss_history.first().map_or(0, |r| r.len());
        Array2::from_shape_fn((rows, cols), |(i, j)| self.loss_history[i][j])
    }

    /// Mean agent loss per iteration, ignoring non-finite entries
    pub fn mean_loss_per_iteration(&self) -> Vec<f64> {
        self.loss_history
            .iter()
            .map(|row| {
                let finite: Vec<f64> = row.iter().copied().filter(|v| v.is_finite()).collect();
                if finite.is_empty() {
                    f64::INFINITY
                } else {
                    finite.iter().sum::<f64>() / finite.len() as f64
                }
            })
            .collect()
    }

    /// True when the best loss never increases
    pub fn is_monotonic(&self) -> bool {
        self.best_loss_history.windows(2).all(|w| w[1] <= w[0])
    }
}
