//! Repeated independent trials and the experiment report

use std::collections::BTreeMap;

use ndarray::Array1;
use rayon::prelude::*;
use serde::Serialize;

use crate::{Algorithm, Objective, Result, SummaryStats, SwarmConfig, TrialOutcome, run_trial};

/// All trials of one algorithm and their summary
#[derive(Debug, Clone)]
pub struct AlgorithmResult {
    pub algorithm: Algorithm,
    /// In trial order
    pub trials: Vec<TrialOutcome>,
    pub summary: SummaryStats,
}

impl AlgorithmResult {
    /// Successful trial with the lowest final loss (earliest on ties)
    pub fn best_trial(&self) -> Option<&TrialOutcome> {
        self.trials
            .iter()
            .filter(|t| t.is_success())
            .fold(None, |best: Option<&TrialOutcome>, t| match best {
                Some(b) if b.best_loss <= t.best_loss => Some(b),
                _ => Some(t),
            })
    }
}

/// The single best parameter set of an experiment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BestFit {
    pub algorithm: String,
    pub trial: usize,
    pub loss: f64,
    pub params: Vec<f64>,
}

/// Results keyed by algorithm name
#[derive(Debug, Clone, Default)]
pub struct ExperimentReport {
    pub results: BTreeMap<String, AlgorithmResult>,
}

impl ExperimentReport {
    pub fn insert(&mut self, result: AlgorithmResult) {
        self.results.insert(result.algorithm.name().to_string(), result);
    }

    pub fn get(&self, algorithm: Algorithm) -> Option<&AlgorithmResult> {
        self.results.get(algorithm.name())
    }

    /// Lowest final loss among the successful trials of every algorithm
    pub fn best_overall(&self) -> Option<BestFit> {
        let mut best: Option<BestFit> = None;
        for (name, result) in &self.results {
            let Some(trial) = result.best_trial() else {
                continue;
            };
            if best.as_ref().is_none_or(|b| trial.best_loss < b.loss) {
                best = Some(BestFit {
                    algorithm: name.clone(),
                    trial: trial.index,
                    loss: trial.best_loss,
                    params: trial.best_params.to_vec(),
                });
            }
        }
        best
    }
}

/// Drives `trials` independent runs of an algorithm
pub struct ExperimentRunner {
    config: SwarmConfig,
}

impl ExperimentRunner {
    /// Fails on an invalid configuration before anything runs
    pub fn new(config: SwarmConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SwarmConfig {
        &self.config
    }

    pub fn run<F>(&self, algorithm: Algorithm, objective: &F) -> Result<AlgorithmResult>
    where
        F: Fn(&Array1<f64>) -> f64 + Sync,
    {
        self.run_dyn(algorithm, objective)
    }

    fn run_dyn(&self, algorithm: Algorithm, objective: &Objective) -> Result<AlgorithmResult> {
        self.config.validate_for(algorithm)?;
        let cfg = &self.config;
        log::info!(
            "{}: {} trials, population {}, {} iterations, seed {}",
            algorithm,
            cfg.trials,
            cfg.population_size,
            cfg.iterations,
            cfg.seed
        );

        let trials: Vec<TrialOutcome> = if cfg.parallel {
            (0..cfg.trials)
                .into_par_iter()
                .map(|k| run_trial(algorithm, cfg, objective, k))
                .collect::<Result<_>>()?
        } else {
            (0..cfg.trials)
                .map(|k| run_trial(algorithm, cfg, objective, k))
                .collect::<Result<_>>()?
        };

        for t in &trials {
            log::info!(
                "{} trial {}: best loss {:.6e} ({} evaluations)",
                algorithm,
                t.index,
                t.best_loss,
                t.nfev
            );
        }

        let summary = SummaryStats::from_trials(&trials);
        if summary.failed_trials > 0 {
            log::warn!(
                "{}: {} of {} trials failed",
                algorithm,
                summary.failed_trials,
                trials.len()
            );
        }
        log::info!(
            "{}: min final loss {:?}, mean {:?}, std {:?}",
            algorithm,
            summary.min_final_loss,
            summary.mean_loss,
            summary.std_loss
        );
        Ok(AlgorithmResult { algorithm, trials, summary })
    }

    /// Run every listed algorithm with the same configuration
    pub fn run_all<F>(&self, algorithms: &[Algorithm], objective: &F) -> Result<ExperimentReport>
    where
        F: Fn(&Array1<f64>) -> f64 + Sync,
    {
        // fail fast before any trial when one algorithm cannot run
        for &a in algorithms {
            self.config.validate_for(a)?;
        }
        let mut report = ExperimentReport::default();
        for &a in algorithms {
            report.insert(self.run_dyn(a, objective)?);
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SwarmConfigBuilder, SwarmError, TrialStatus};

    fn sphere(x: &Array1<f64>) -> f64 {
        x.iter().map(|v| v * v).sum()
    }

    fn config() -> SwarmConfigBuilder {
        SwarmConfigBuilder::new()
            .population_size(10)
            .iterations(20)
            .trials(4)
            .seed(11)
            .bounds(vec![(-3.0, 3.0), (-3.0, 3.0)])
    }

    #[test]
    fn test_invalid_config_fails_before_running() {
        let cfg = config().trials(0).build();
        assert!(matches!(ExperimentRunner::new(cfg), Err(SwarmError::InvalidTrials(0))));

        let runner = ExperimentRunner::new(config().population_size(2).build()).unwrap();
        let calls = std::sync::atomic::AtomicUsize::new(0);
        let counting = |x: &Array1<f64>| {
            calls.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
            sphere(x)
        };
        let res = runner.run_all(&[Algorithm::Pso, Algorithm::Fpa], &counting);
        assert!(matches!(res, Err(SwarmError::PopulationTooSmall { .. })));
        assert_eq!(calls.load(std::sync::atomic::Ordering::Relaxed), 0);
    }

    #[test]
    fn test_trials_in_order_and_summarized() {
        let runner = ExperimentRunner::new(config().build()).unwrap();
        let res = runner.run(Algorithm::Pso, &sphere).unwrap();
        assert_eq!(res.trials.len(), 4);
        assert!(res.trials.iter().enumerate().all(|(k, t)| t.index == k));
        assert_eq!(res.summary.successful_trials, 4);
        let min = res.trials.iter().map(|t| t.best_loss).fold(f64::INFINITY, f64::min);
        assert_eq!(res.summary.min_final_loss, Some(min));
        assert_eq!(res.best_trial().unwrap().best_loss, min);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let seq = ExperimentRunner::new(config().build()).unwrap();
        let par = ExperimentRunner::new(config().parallel(true).build()).unwrap();
        let a = seq.run(Algorithm::ModifiedFpa, &sphere).unwrap();
        let b = par.run(Algorithm::ModifiedFpa, &sphere).unwrap();
        for (x, y) in a.trials.iter().zip(&b.trials) {
            assert_eq!(x.history.best_loss_history, y.history.best_loss_history);
            assert_eq!(x.best_params, y.best_params);
        }
        assert_eq!(a.summary, b.summary);
    }

    #[test]
    fn test_best_overall_skips_failed_trials() {
        let runner = ExperimentRunner::new(config().trials(2).build()).unwrap();
        let mut report = runner.run_all(&[Algorithm::Pso, Algorithm::Fpa], &sphere).unwrap();
        let pso = report.get(Algorithm::Pso).unwrap().best_trial().unwrap().best_loss;
        let fpa = report.get(Algorithm::Fpa).unwrap().best_trial().unwrap().best_loss;
        let best = report.best_overall().unwrap();
        assert_eq!(best.loss, pso.min(fpa));
        assert_eq!(best.params.len(), 2);

        // failed trials never win
        let fpa_result = report.results.get_mut("fpa_original").unwrap();
        for t in fpa_result.trials.iter_mut() {
            t.status = TrialStatus::Failed;
            t.best_loss = f64::INFINITY;
        }
        let best = report.best_overall().unwrap();
        assert_eq!(best.algorithm, "pso");
        assert_eq!(best.loss, pso);
    }

    #[test]
    fn test_empty_report_has_no_best() {
        assert!(ExperimentReport::default().best_overall().is_none());
    }
}
