//! Cross-trial summary statistics

use ndarray::{Array2, ArrayView1};
use serde::Serialize;

use crate::TrialOutcome;

/// Mean and population standard deviation (ddof = 0), `None` when empty
pub fn mean_std(values: &[f64]) -> Option<(f64, f64)> {
    let view = ArrayView1::from(values);
    let mean = view.mean()?;
    Some((mean, view.std(0.0)))
}

/// What is reported per algorithm
///
/// `mean_loss` and `std_loss` pool the raw per-agent losses of every
/// iteration of every successful trial (the stability view);
/// `min_final_loss` is the best final global-best loss over those trials.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SummaryStats {
    pub min_final_loss: Option<f64>,
    pub mean_loss: Option<f64>,
    pub std_loss: Option<f64>,
    pub successful_trials: usize,
    pub failed_trials: usize,
    /// Non-finite per-agent losses left out of the pooled mean/std
    pub excluded_values: usize,
}

impl SummaryStats {
    /// Statistics of an `iterations x trials` loss matrix: mean and std
    /// over every entry, min over the last row
    pub fn from_loss_matrix(matrix: &Array2<f64>) -> Self {
        let (finite, excluded): (Vec<f64>, Vec<f64>) =
            matrix.iter().copied().partition(|v| v.is_finite());
        let (mean, std) = mean_std(&finite).unzip();
        let min_final_loss = matrix
            .rows()
            .into_iter()
            .last()
            .and_then(|row| row.iter().copied().filter(|v| v.is_finite()).reduce(f64::min));
        Self {
            min_final_loss,
            mean_loss: mean,
            std_loss: std,
            successful_trials: matrix.ncols(),
            failed_trials: 0,
            excluded_values: excluded.len(),
        }
    }

    /// Pool the trials of one algorithm; failed trials are counted, never
    /// averaged in
    pub fn from_trials(trials: &[TrialOutcome]) -> Self {
        let mut pooled = Vec::new();
        let mut excluded = 0;
        let mut min_final_loss: Option<f64> = None;
        let mut successful = 0;

        for trial in trials.iter().filter(|t| t.is_success()) {
            successful += 1;
            min_final_loss = Some(match min_final_loss {
                Some(m) => m.min(trial.best_loss),
                None => trial.best_loss,
            });
            for row in &trial.history.loss_history {
                for &v in row {
                    if v.is_finite() {
                        pooled.push(v);
                    } else {
                        excluded += 1;
                    }
                }
            }
        }

        let (mean, std) = mean_std(&pooled).unzip();
        Self {
            min_final_loss,
            mean_loss: mean,
            std_loss: std,
            successful_trials: successful,
            failed_trials: trials.len() - successful,
            excluded_values: excluded,
        }
    }
}
