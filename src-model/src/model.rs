//! Exponential saturation model of steady-state throttle
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

/// Speeds at or below this value are treated as a stationary vehicle
pub const ZERO_SPEED_EPS: f64 = 1e-2;

/// Names of the model parameters, in vector order
pub const PARAMETER_NAMES: [&str; 3] = ["beta1", "beta2", "beta3"];

/// Initialization bounds for (β1, β2, β3)
pub const DEFAULT_BOUNDS: [(f64, f64); 3] = [(0.0, 2.0), (-1.0, 0.0), (0.0, 10.0)];

/// Predicted throttle at speed `v` for parameters `theta = (β1, β2, β3)`
///
/// Returns exactly `0.0` when `v <= ZERO_SPEED_EPS`. Otherwise the curve is
/// clipped from below at zero. Overflow in the exponential is not caught
/// here: callers get `inf`/`NaN` back and decide what to do with it.
pub fn throttle(v: f64, theta: &Array1<f64>) -> f64 {
    if v <= ZERO_SPEED_EPS {
        return 0.0;
    }
    let (b1, b2, b3) = (theta[0], theta[1], theta[2]);
    let u = b1 * (1.0 - (b2 * (v - b3)).exp());
    // f64::max would swallow a NaN
    if u.is_nan() { u } else { u.max(0.0) }
}

/// Vectorised form of [`throttle`]
pub fn predict(speeds: &Array1<f64>, theta: &Array1<f64>) -> Array1<f64> {
    speeds.mapv(|v| throttle(v, theta))
}
