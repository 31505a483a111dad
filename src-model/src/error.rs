//! Errors raised while building a training dataset
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

/// Error type for dataset loading and validation
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("training dataset is empty: the cost function is undefined")]
    EmptyDataset,

    #[error("speed and throttle columns differ in length: {speed} vs {throttle}")]
    LengthMismatch { speed: usize, throttle: usize },

    #[error("non-finite value in training data at row {row}")]
    NonFiniteValue { row: usize },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
}
