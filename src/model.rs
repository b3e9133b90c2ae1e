//! The ground-truth regression plane.
//!
//! Every generated dataset is centred on the plane
//! `E[y | x1, x2] = beta0 + beta1 * x1 + beta2 * x2`. The coefficients are
//! fixed so that every chart built from this crate shows the same plane and
//! only the noise process differs between regimes.

use serde::{Deserialize, Serialize};

/// Intercept of the true plane.
pub const BETA_0: f64 = 50.0;
/// Slope on `x1`.
pub const BETA_1: f64 = 2.5;
/// Slope on `x2`.
pub const BETA_2: f64 = -1.5;

/// Coefficients of a linear model in two predictors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TruePlane {
    /// Intercept.
    pub beta0: f64,
    /// Coefficient of the first predictor.
    pub beta1: f64,
    /// Coefficient of the second predictor.
    pub beta2: f64,
}

impl TruePlane {
    /// The plane used by the generator: `50 + 2.5 * x1 - 1.5 * x2`.
    pub const STANDARD: TruePlane = TruePlane {
        beta0: BETA_0,
        beta1: BETA_1,
        beta2: BETA_2,
    };

    /// Expected response at `(x1, x2)`.
    pub fn mean(&self, x1: f64, x2: f64) -> f64 {
        self.beta0 + self.beta1 * x1 + self.beta2 * x2
    }
}

impl Default for TruePlane {
    fn default() -> Self {
        Self::STANDARD
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_coefficients() {
        let plane = TruePlane::default();
        assert_eq!(plane.beta0, 50.0);
        assert_eq!(plane.beta1, 2.5);
        assert_eq!(plane.beta2, -1.5);
    }

    #[test]
    fn test_mean_at_corners() {
        let plane = TruePlane::STANDARD;
        assert_eq!(plane.mean(0.0, 0.0), 50.0);
        assert_eq!(plane.mean(50.0, 0.0), 175.0);
        assert_eq!(plane.mean(0.0, 50.0), -25.0);
        assert_eq!(plane.mean(50.0, 50.0), 100.0);
    }
}
