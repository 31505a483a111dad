//! throttle-fit: fit the steady-state throttle model and compare optimizers
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
//!
//! The binary reads a (speed, throttle) dataset, builds the least-squares
//! cost, runs every requested optimizer for a number of independent trials
//! and reports the best parameter set found across all of them.

use std::path::PathBuf;
use std::sync::Once;

use throttle_model::ModelError;
use throttle_swarm::SwarmError;

pub mod cli;
pub mod workflow;

pub use cli::Args;

/// Errors surfaced by the command line workflow
#[derive(Debug, thiserror::Error)]
pub enum FitError {
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Swarm(#[from] SwarmError),

    #[error("failed to read config {path}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("config has {found} parameters, the throttle model takes {expected}")]
    Dimension { expected: usize, found: usize },

    #[error("invalid --algo: {0}")]
    Algorithm(String),
}

static INIT: Once = Once::new();

/// Install `env_logger`, `info` unless `RUST_LOG` says otherwise
pub fn init_logging() {
    INIT.call_once(|| {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    });
}
