//! Training dataset of steady-state (speed, throttle) readings
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

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use ndarray::Array1;
use serde::Deserialize;

use crate::ModelError;

/// Paired steady-state readings: `speed[i]` was held with `throttle[i]`
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// Steady-state vehicle speed
    pub speed: Array1<f64>,
    /// Observed throttle at that speed
    pub throttle: Array1<f64>,
}

#[derive(Debug, Deserialize)]
struct Row {
    speed: f64,
    throttle: f64,
}

impl Dataset {
    /// Build a dataset from two equal-length, non-empty columns
    pub fn new(speed: Vec<f64>, throttle: Vec<f64>) -> Result<Self, ModelError> {
        if speed.len() != throttle.len() {
            return Err(ModelError::LengthMismatch { speed: speed.len(), throttle: throttle.len() });
        }
        if speed.is_empty() {
            return Err(ModelError::EmptyDataset);
        }
        if let Some(row) = speed
            .iter()
            .zip(throttle.iter())
            .position(|(v, u)| !v.is_finite() || !u.is_finite())
        {
            return Err(ModelError::NonFiniteValue { row });
        }
        Ok(Self { speed: Array1::from_vec(speed), throttle: Array1::from_vec(throttle) })
    }

    /// Build a dataset from `(speed, throttle)` pairs
    pub fn from_pairs(pairs: &[(f64, f64)]) -> Result<Self, ModelError> {
        let (speed, throttle) = pairs.iter().copied().unzip();
        Self::new(speed, throttle)
    }

    /// Read a CSV file with `speed` and `throttle` columns
    ///
    /// The header row is required; other columns are ignored and surrounding
    /// whitespace is trimmed.
    pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|source| ModelError::Io { path: path.to_path_buf(), source })?;
        Self::from_reader(BufReader::new(file))
    }

    /// Parse CSV content from any reader
    pub fn from_reader<R: std::io::Read>(reader: R) -> Result<Self, ModelError> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .comment(Some(b'#'))
            .from_reader(reader);

        let mut speed = Vec::new();
        let mut throttle = Vec::new();
        for row in rdr.deserialize() {
            let row: Row = row?;
            speed.push(row.speed);
            throttle.push(row.throttle);
        }
        Self::new(speed, throttle)
    }

    /// Number of readings
    pub fn len(&self) -> usize {
        self.speed.len()
    }

    /// Always false for a constructed dataset
    pub fn is_empty(&self) -> bool {
        self.speed.is_empty()
    }
}
