//! Least-squares cost of the throttle model over a training dataset
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

use ndarray::Array1;

use crate::Dataset;
use crate::model::predict;

/// `J(θ) = 1/(2m) Σᵢ (uᵢ - û(vᵢ, θ))²`
///
/// Pure function of `θ` and the fixed dataset. An empty dataset cannot be
/// built, so the cost is always defined.
#[derive(Debug, Clone)]
pub struct LeastSquaresCost {
    data: Dataset,
}

impl LeastSquaresCost {
    pub fn new(data: Dataset) -> Self {
        Self { data }
    }

    /// Evaluate the cost; may return `inf` or `NaN` when the model overflows
    pub fn cost(&self, theta: &Array1<f64>) -> f64 {
        let r = self.residuals(theta);
        r.dot(&r) / (2.0 * self.data.len() as f64)
    }

    /// `uᵢ - û(vᵢ, θ)` for every reading
    pub fn residuals(&self, theta: &Array1<f64>) -> Array1<f64> {
        &self.data.throttle - &predict(&self.data.speed, theta)
    }

    pub fn dataset(&self) -> &Dataset {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
