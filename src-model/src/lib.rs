//! Throttle model - steady-state throttle as a function of vehicle speed
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
//! This crate provides the pieces the optimizers treat as a black box:
//!
//! - `model`: the exponential saturation curve `u = β1 (1 - exp(β2 (v - β3)))`
//! - `dataset`: paired (speed, throttle) readings and a CSV reader
//! - `cost`: the least-squares objective `J(θ) = 1/(2m) Σ (u - û)²`
//!
//! # Example
//!
//! ```rust
//! use ndarray::array;
//! use throttle_model::{Dataset, LeastSquaresCost};
//!
//! let data = Dataset::new(vec![0.0, 5.0, 10.0], vec![0.0, 0.3, 0.55]).unwrap();
//! let cost = LeastSquaresCost::new(data);
//! let j = cost.cost(&array![1.0, -0.1, 0.0]);
//! assert!(j.is_finite());
//! ```

pub mod cost;
pub mod dataset;
pub mod error;
pub mod model;

pub use cost::LeastSquaresCost;
pub use dataset::Dataset;
pub use error::ModelError;
pub use model::{DEFAULT_BOUNDS, PARAMETER_NAMES, ZERO_SPEED_EPS, predict, throttle};
