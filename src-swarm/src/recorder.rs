//! CSV and JSON records of an experiment for plotting and reporting

use std::fs::{File, create_dir_all};
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::{AlgorithmResult, BestFit, ExperimentReport, Result, SummaryStats, TrialHistory};

fn ensure_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => create_dir_all(dir)?,
        _ => {}
    }
    Ok(())
}

/// Convergence view of one trial
///
/// Columns: `iteration`, one per parameter (running best), `best_loss`,
/// `mean_loss` (finite agent losses only) and `min_loss` of the iteration.
pub fn save_history_csv<P: AsRef<Path>>(
    history: &TrialHistory,
    param_names: &[&str],
    path: P,
) -> Result<()> {
    let path = path.as_ref();
    ensure_parent(path)?;
    let mut wtr = csv::Writer::from_path(path)?;

    let mut header = vec!["iteration".to_string()];
    let dim = history.best_param_history.first().map_or(0, |p| p.len());
    for d in 0..dim {
        header.push(param_names.get(d).map_or_else(|| format!("x{}", d), |s| s.to_string()));
    }
    header.extend(["best_loss", "mean_loss", "min_loss"].map(String::from));
    wtr.write_record(&header)?;

    let means = history.mean_loss_per_iteration();
    for (i, iteration) in history.iterations.iter().enumerate() {
        let mut row = vec![iteration.to_string()];
        row.extend(history.best_param_history[i].iter().map(|v| v.to_string()));
        row.push(history.best_loss_history[i].to_string());
        row.push(means[i].to_string());
        let min = history.loss_history[i].iter().copied().fold(f64::INFINITY, f64::min);
        row.push(min.to_string());
        wtr.write_record(&row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Stability view of one algorithm: one row per iteration, one column per
/// (trial, agent); trials stopped early leave their later cells empty
pub fn save_loss_matrix_csv<P: AsRef<Path>>(result: &AlgorithmResult, path: P) -> Result<()> {
    let path = path.as_ref();
    ensure_parent(path)?;
    let mut wtr = csv::Writer::from_path(path)?;

    let mut header = vec!["iteration".to_string()];
    for t in &result.trials {
        let agents = t.history.loss_history.first().map_or(0, |r| r.len());
        header.extend((0..agents).map(|j| format!("trial{}_agent{}", t.index, j)));
    }
    wtr.write_record(&header)?;

    let rows = result.trials.iter().map(|t| t.history.len()).max().unwrap_or(0);
    for i in 0..rows {
        let mut row = vec![(i + 1).to_string()];
        for t in &result.trials {
            let agents = t.history.loss_history.first().map_or(0, |r| r.len());
            match t.history.loss_history.get(i) {
                Some(losses) => row.extend(losses.iter().map(|v| v.to_string())),
                None => row.extend(std::iter::repeat_n(String::new(), agents)),
            }
        }
        wtr.write_record(&row)?;
    }
    wtr.flush()?;
    Ok(())
}

#[derive(Serialize)]
struct TrialRecord {
    index: usize,
    seed: u64,
    status: crate::TrialStatus,
    best_loss: Option<f64>,
    best_params: Vec<f64>,
    iterations: usize,
    nfev: usize,
}

#[derive(Serialize)]
struct AlgorithmRecord<'a> {
    summary: &'a SummaryStats,
    trials: Vec<TrialRecord>,
}

#[derive(Serialize)]
struct ReportRecord<'a> {
    algorithms: std::collections::BTreeMap<&'a str, AlgorithmRecord<'a>>,
    best: Option<BestFit>,
}

/// Summaries, per-trial results and the best fit as pretty JSON
///
/// Infinite losses are written as `null`.
pub fn save_report_json<P: AsRef<Path>>(report: &ExperimentReport, path: P) -> Result<()> {
    let path = path.as_ref();
    ensure_parent(path)?;

    let algorithms = report
        .results
        .iter()
        .map(|(name, result)| {
            let trials = result
                .trials
                .iter()
                .map(|t| TrialRecord {
                    index: t.index,
                    seed: t.seed,
                    status: t.status,
                    best_loss: t.best_loss.is_finite().then_some(t.best_loss),
                    best_params: t.best_params.to_vec(),
                    iterations: t.history.len(),
                    nfev: t.nfev,
                })
                .collect();
            (name.as_str(), AlgorithmRecord { summary: &result.summary, trials })
        })
        .collect();

    let record = ReportRecord { algorithms, best: report.best_overall() };
    let mut out = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut out, &record)?;
    out.flush()?;
    Ok(())
}
