//! Sign constraints enforced by clipping each component to its half-line

use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Feasible half-line of one parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sign {
    /// `x >= 0`
    NonNegative,
    /// `x <= 0`
    NonPositive,
    /// unconstrained
    #[default]
    Free,
}

impl Sign {
    #[inline]
    pub fn clip(self, x: f64) -> f64 {
        match self {
            Sign::NonNegative => x.max(0.0),
            Sign::NonPositive => x.min(0.0),
            Sign::Free => x,
        }
    }

    #[inline]
    pub fn is_satisfied(self, x: f64) -> bool {
        match self {
            Sign::NonNegative => x >= 0.0,
            Sign::NonPositive => x <= 0.0,
            Sign::Free => true,
        }
    }
}

/// Clips candidate vectors onto the feasible orthant
///
/// Never reflects or resamples: the projection is a deterministic,
/// component-wise `max(x, 0)` / `min(x, 0)`. An empty projector leaves every
/// component free.
#[derive(Debug, Clone, Default)]
pub struct ConstraintProjector {
    signs: Vec<Sign>,
}

impl ConstraintProjector {
    pub fn new(signs: Vec<Sign>) -> Self {
        Self { signs }
    }

    pub fn signs(&self) -> &[Sign] {
        &self.signs
    }

    pub fn project_inplace(&self, x: &mut Array1<f64>) {
        for (xi, sign) in x.iter_mut().zip(self.signs.iter()) {
            *xi = sign.clip(*xi);
        }
    }

    pub fn project(&self, x: &Array1<f64>) -> Array1<f64> {
        let mut y = x.clone();
        self.project_inplace(&mut y);
        y
    }

    pub fn is_feasible(&self, x: &Array1<f64>) -> bool {
        x.iter().zip(self.signs.iter()).all(|(&xi, sign)| sign.is_satisfied(xi))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn throttle_projector() -> ConstraintProjector {
        ConstraintProjector::new(vec![Sign::NonNegative, Sign::NonPositive, Sign::NonNegative])
    }

    #[test]
    fn test_project_clips_each_half_line() {
        let p = throttle_projector();
        assert_eq!(p.project(&array![-0.5, 0.3, -2.0]), array![0.0, 0.0, 0.0]);
        assert_eq!(p.project(&array![1.5, -0.3, 4.0]), array![1.5, -0.3, 4.0]);
    }

    #[test]
    fn test_project_is_idempotent() {
        let p = throttle_projector();
        let once = p.project(&array![-1.0, 2.0, 3.0]);
        assert_eq!(p.project(&once), once);
        assert!(p.is_feasible(&once));
    }

    #[test]
    fn test_free_components_untouched() {
        let p = ConstraintProjector::new(vec![Sign::Free, Sign::NonNegative]);
        assert_eq!(p.project(&array![-3.0, -3.0]), array![-3.0, 0.0]);
        let empty = ConstraintProjector::default();
        assert_eq!(empty.project(&array![-1.0, 1.0]), array![-1.0, 1.0]);
    }

    #[test]
    fn test_infeasible_detected() {
        let p = throttle_projector();
        assert!(!p.is_feasible(&array![0.1, 0.1, 0.1]));
        assert!(p.is_feasible(&array![0.0, 0.0, 0.0]));
    }
}
