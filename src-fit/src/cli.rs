//! Command line arguments of the throttle_fit binary
//!
//! Copyright (C) 2025 Pierre Aubert pierre(at)spinorama(dot)org
//!
//! This program is free software: you can redistribute it and/or modify
//! it under the terms of the GNU General Public License as published by
//! the Free Software Foundation, either version 3 of the License, or
//! (at your option) any later version.
//!
//! This program is distributed in the hope that it will be useful,
//! but WITHOUT ANY WARRANTY; without even the implied warranty of
//! MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
//! GNU General Public License for more details.
//!
//! You should have received a copy of the GNU General Public License
//! along with this program.  If not, see <https://www.gnu.org/licenses/>.

use std::path::PathBuf;

use clap::Parser;
use throttle_swarm::Algorithm;

use crate::FitError;

fn parse_positive_usize(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(v) => Ok(v),
        Err(e) => Err(e.to_string()),
    }
}

fn parse_nonnegative_f64(s: &str) -> Result<f64, String> {
    let v: f64 = s.parse().map_err(|e: std::num::ParseFloatError| e.to_string())?;
    if v.is_finite() && v >= 0.0 {
        Ok(v)
    } else {
        Err(format!("must be a finite value >= 0, got {}", s))
    }
}

/// Fit `u = max(β1 (1 - exp(β2 (v - β3))), 0)` to throttle data.
#[derive(Parser, Debug, Clone)]
#[command(author, about, long_about = None)]
pub struct Args {
    /// CSV file with `speed` and `throttle` columns.
    #[arg(short, long, required_unless_present = "algo_list")]
    pub data: Option<PathBuf>,

    /// Comma separated optimizers: pso, apso, fpa_original, fpa, or all.
    #[arg(long, default_value = "all")]
    pub algo: String,

    /// Number of agents; overrides the config file.
    #[arg(long, value_parser = parse_positive_usize)]
    pub population: Option<usize>,

    /// Iterations per trial; overrides the config file.
    #[arg(long, value_parser = parse_positive_usize)]
    pub iterations: Option<usize>,

    /// Independent trials per optimizer; overrides the config file.
    #[arg(long, value_parser = parse_positive_usize)]
    pub trials: Option<usize>,

    /// Seed base; trial k uses a stream derived from (seed, k).
    #[arg(long)]
    pub seed: Option<u64>,

    /// JSON file with a full or partial optimizer configuration.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Run the trials of each optimizer on all cores.
    #[arg(long, default_value_t = false)]
    pub parallel: bool,

    /// Stop a trial once its best loss reaches this value.
    #[arg(long, value_parser = parse_nonnegative_f64)]
    pub loss_threshold: Option<f64>,

    /// Directory for the CSV histories and the JSON report.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Display the available optimizers and exit.
    #[arg(long, default_value_t = false)]
    pub algo_list: bool,
}

impl Args {
    /// Optimizers requested with `--algo`, in order, without duplicates
    pub fn algorithms(&self) -> Result<Vec<Algorithm>, FitError> {
        Algorithm::parse_list(&self.algo).map_err(FitError::Algorithm)
    }
}

/// Display available optimizers
pub fn display_algorithm_list() {
    println!("Available optimizers");
    println!("====================\n");
    for algo in Algorithm::ALL {
        let description = match algo {
            Algorithm::Pso => "particle swarm, fixed inertia and acceleration",
            Algorithm::Apso => {
                "particle swarm, inertia and acceleration scheduled on the iteration"
            }
            Algorithm::Fpa => "flower pollination, Lévy global moves and greedy acceptance",
            Algorithm::ModifiedFpa => {
                "flower pollination, decaying switch probability, refinement of the best agent"
            }
        };
        println!("   - {:<14} | {}", algo.name(), description);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["throttle_fit", "--data", "readings.csv"]);
        assert_eq!(args.data, Some(PathBuf::from("readings.csv")));
        assert_eq!(args.algorithms().unwrap(), Algorithm::ALL.to_vec());
        assert_eq!(args.population, None);
        assert!(!args.parallel);
    }

    #[test]
    fn test_overrides() {
        let args = Args::parse_from([
            "throttle_fit",
            "--data",
            "d.csv",
            "--algo",
            "fpa,pso",
            "--population",
            "30",
            "--trials",
            "3",
            "--seed",
            "9",
            "--loss-threshold",
            "1e-6",
            "--parallel",
        ]);
        assert_eq!(args.algorithms().unwrap(), vec![Algorithm::ModifiedFpa, Algorithm::Pso]);
        assert_eq!(args.population, Some(30));
        assert_eq!(args.trials, Some(3));
        assert_eq!(args.seed, Some(9));
        assert_eq!(args.loss_threshold, Some(1e-6));
        assert!(args.parallel);
    }

    #[test]
    fn test_rejects_bad_values() {
        fn parse(extra: &[&str]) -> Result<Args, clap::Error> {
            Args::try_parse_from(["throttle_fit", "--data", "d.csv"].iter().chain(extra))
        }
        assert!(parse(&["--population", "0"]).is_err());
        assert!(parse(&["--loss-threshold", "-1"]).is_err());
        assert!(Args::try_parse_from(["throttle_fit"]).is_err());
        assert!(Args::try_parse_from(["throttle_fit", "--algo-list"]).is_ok());
    }

    #[test]
    fn test_unknown_algorithm() {
        let args = Args::parse_from(["throttle_fit", "--data", "d.csv", "--algo", "ga"]);
        assert!(matches!(args.algorithms(), Err(FitError::Algorithm(_))));
    }
}
