//! Shared pipeline of the throttle_fit binary
//!
//! Load data, assemble the configuration, run the optimizers, report.

use std::fs;
use std::path::{Path, PathBuf};

use ndarray::Array1;
use throttle_model::{DEFAULT_BOUNDS, Dataset, LeastSquaresCost, PARAMETER_NAMES};
use throttle_swarm::{ExperimentReport, ExperimentRunner, Sign, SwarmConfig, recorder};

use crate::{Args, FitError};

/// Sign constraints of (β1, β2, β3)
pub fn model_constraints() -> Vec<Sign> {
    vec![Sign::NonNegative, Sign::NonPositive, Sign::NonNegative]
}

pub fn load_dataset(path: &Path) -> Result<Dataset, FitError> {
    let data = Dataset::read_csv(path)?;
    log::info!("loaded {} readings from {}", data.len(), path.display());
    Ok(data)
}

/// Start from the config file (or defaults), fill in the model bounds and
/// constraints when absent, then apply the command line overrides
pub fn build_config(args: &Args) -> Result<SwarmConfig, FitError> {
    let mut cfg = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .map_err(|source| FitError::ConfigIo { path: path.clone(), source })?;
            serde_json::from_str(&text)
                .map_err(|source| FitError::ConfigParse { path: path.clone(), source })?
        }
        None => SwarmConfig::default(),
    };

    if cfg.bounds.is_empty() {
        cfg.bounds = DEFAULT_BOUNDS.to_vec();
    }
    if cfg.constraints.is_empty() {
        cfg.constraints = model_constraints();
    }
    if let Some(v) = args.population {
        cfg.population_size = v;
    }
    if let Some(v) = args.iterations {
        cfg.iterations = v;
    }
    if let Some(v) = args.trials {
        cfg.trials = v;
    }
    if let Some(v) = args.seed {
        cfg.seed = v;
    }
    if args.loss_threshold.is_some() {
        cfg.loss_threshold = args.loss_threshold;
    }
    cfg.parallel |= args.parallel;

    cfg.validate()?;
    if cfg.dimension() != PARAMETER_NAMES.len() {
        return Err(FitError::Dimension {
            expected: PARAMETER_NAMES.len(),
            found: cfg.dimension(),
        });
    }
    Ok(cfg)
}

/// Run every requested optimizer on the least-squares cost of `data`
pub fn run_experiment(args: &Args, data: Dataset) -> Result<ExperimentReport, FitError> {
    let algorithms = args.algorithms()?;
    let config = build_config(args)?;
    let runner = ExperimentRunner::new(config)?;
    let cost = LeastSquaresCost::new(data);
    let objective = |theta: &Array1<f64>| cost.cost(theta);
    Ok(runner.run_all(&algorithms, &objective)?)
}

fn fmt_loss(v: Option<f64>) -> String {
    v.map_or_else(|| "-".to_string(), |x| format!("{:.6e}", x))
}

/// Summary table plus the best parameter set across all trials
pub fn print_summary(report: &ExperimentReport) {
    println!(
        "{:<14} {:>14} {:>14} {:>14} {:>8}",
        "algorithm", "min final", "mean", "std", "failed"
    );
    for (name, result) in &report.results {
        let s = &result.summary;
        println!(
            "{:<14} {:>14} {:>14} {:>14} {:>8}",
            name,
            fmt_loss(s.min_final_loss),
            fmt_loss(s.mean_loss),
            fmt_loss(s.std_loss),
            s.failed_trials
        );
    }

    match report.best_overall() {
        Some(best) => {
            println!("\nbest: {} trial {} loss {:.6e}", best.algorithm, best.trial, best.loss);
            for (name, value) in PARAMETER_NAMES.iter().zip(&best.params) {
                println!("  {:<6} = {:+.6}", name, value);
            }
        }
        None => println!("\nno trial produced a finite loss"),
    }
}

/// Write one convergence CSV per trial, one loss matrix per optimizer and
/// `report.json`; returns the written paths
pub fn write_records(report: &ExperimentReport, dir: &Path) -> Result<Vec<PathBuf>, FitError> {
    let mut written = Vec::new();
    for (name, result) in &report.results {
        for trial in &result.trials {
            let path = dir.join(format!("{}_trial{}_history.csv", name, trial.index));
            recorder::save_history_csv(&trial.history, &PARAMETER_NAMES, &path)?;
            written.push(path);
        }
        let path = dir.join(format!("{}_loss_history.csv", name));
        recorder::save_loss_matrix_csv(result, &path)?;
        written.push(path);
    }
    let path = dir.join("report.json");
    recorder::save_report_json(report, &path)?;
    written.push(path);
    log::info!("wrote {} files to {}", written.len(), dir.display());
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use throttle_swarm::SwarmError;

    #[test]
    fn test_default_config_uses_model_shape() {
        let args = Args::parse_from(["throttle_fit", "--data", "d.csv"]);
        let cfg = build_config(&args).unwrap();
        assert_eq!(cfg.bounds, DEFAULT_BOUNDS.to_vec());
        assert_eq!(cfg.constraints, model_constraints());
        assert_eq!(cfg.population_size, 20);
    }

    #[test]
    fn test_config_file_then_flags() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg.json");
        fs::write(&path, r#"{ "population_size": 12, "iterations": 7, "seed": 3 }"#).unwrap();
        let args = Args::parse_from([
            "throttle_fit",
            "--data",
            "d.csv",
            "--config",
            path.to_str().unwrap(),
            "--iterations",
            "9",
        ]);
        let cfg = build_config(&args).unwrap();
        assert_eq!(cfg.population_size, 12);
        assert_eq!(cfg.iterations, 9);
        assert_eq!(cfg.seed, 3);
    }

    #[test]
    fn test_bad_config_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg.json");
        fs::write(&path, "{ not json").unwrap();
        let args =
            Args::parse_from(["throttle_fit", "-d", "d.csv", "--config", path.to_str().unwrap()]);
        assert!(matches!(build_config(&args), Err(FitError::ConfigParse { .. })));

        fs::write(&path, r#"{ "bounds": [[2.0, 1.0], [0.0, 1.0], [0.0, 1.0]] }"#).unwrap();
        assert!(matches!(
            build_config(&args),
            Err(FitError::Swarm(SwarmError::InvalidBounds { index: 0, .. }))
        ));
    }

    #[test]
    fn test_config_of_wrong_dimension_rejected_before_any_trial() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg.json");
        fs::write(
            &path,
            r#"{ "bounds": [[0, 2], [-1, 0]], "constraints": ["non_negative", "non_positive"] }"#,
        )
        .unwrap();
        let args = Args::parse_from([
            "throttle_fit",
            "-d",
            "d.csv",
            "--config",
            path.to_str().unwrap(),
            "--algo",
            "pso",
        ]);
        assert!(matches!(
            build_config(&args),
            Err(FitError::Dimension { expected: 3, found: 2 })
        ));

        let data = Dataset::from_pairs(&[(0.0, 0.0), (5.0, 0.3), (10.0, 0.55)]).unwrap();
        assert!(matches!(
            run_experiment(&args, data),
            Err(FitError::Dimension { expected: 3, found: 2 })
        ));
    }
}
