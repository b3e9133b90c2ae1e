//! Noise regimes for the observed responses.
//!
//! The error term of each observation is drawn uniformly on
//! `[-sd, +sd]`, where the half-width `sd` depends on the regime:
//!
//! - [`NoiseRegime::Homoscedastic`]: `sd = 15` everywhere.
//! - [`NoiseRegime::Heteroscedastic`]: `sd = 2 + 0.8 * x1`, so the cloud
//!   widens along `x1` only.
//!
//! The uniform shape is intentional and must not be replaced by a normal
//! distribution; the charts are calibrated against these bounds.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Error scale used by the homoscedastic regime.
pub const HOMOSCEDASTIC_STD_DEV: f64 = 15.0;
/// Error scale at `x1 = 0` for the heteroscedastic regime.
pub const HETEROSCEDASTIC_BASE_STD_DEV: f64 = 2.0;
/// Growth of the heteroscedastic error scale per unit of `x1`.
pub const HETEROSCEDASTIC_SLOPE: f64 = 0.8;

/// How the per-point error scale is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoiseRegime {
    /// Constant error variance across the whole plane.
    Homoscedastic,
    /// Error variance that grows with `x1`.
    Heteroscedastic,
}

impl NoiseRegime {
    /// Both regimes, in chart order.
    pub const ALL: [NoiseRegime; 2] = [NoiseRegime::Homoscedastic, NoiseRegime::Heteroscedastic];

    /// Map the boolean flag used by callers that only distinguish
    /// "constant variance" from "not".
    pub fn from_homoscedastic_flag(is_homoscedastic: bool) -> Self {
        if is_homoscedastic {
            NoiseRegime::Homoscedastic
        } else {
            NoiseRegime::Heteroscedastic
        }
    }

    /// Half-width of the error support at a point with first predictor `x1`.
    ///
    /// Independent of `x2` in both regimes.
    pub fn error_std_dev(&self, x1: f64) -> f64 {
        match self {
            NoiseRegime::Homoscedastic => HOMOSCEDASTIC_STD_DEV,
            NoiseRegime::Heteroscedastic => {
                HETEROSCEDASTIC_BASE_STD_DEV + HETEROSCEDASTIC_SLOPE * x1
            }
        }
    }

    /// Draw one error term for a point with first predictor `x1`.
    pub fn sample_error<R: Rng + ?Sized>(&self, x1: f64, rng: &mut R) -> f64 {
        uniform_error(self.error_std_dev(x1), rng)
    }

    /// Lowercase name, also used as the file stem of rendered charts.
    pub fn name(&self) -> &'static str {
        match self {
            NoiseRegime::Homoscedastic => "homoscedastic",
            NoiseRegime::Heteroscedastic => "heteroscedastic",
        }
    }
}

impl fmt::Display for NoiseRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Zero-mean uniform error on `[-std_dev, +std_dev]`.
///
/// Computed as `(u - 0.5) * 2 * std_dev` with `u ~ U[0, 1)`.
pub fn uniform_error<R: Rng + ?Sized>(std_dev: f64, rng: &mut R) -> f64 {
    let u: f64 = rng.random();
    (u - 0.5) * 2.0 * std_dev
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_flag_mapping() {
        assert_eq!(
            NoiseRegime::from_homoscedastic_flag(true),
            NoiseRegime::Homoscedastic
        );
        assert_eq!(
            NoiseRegime::from_homoscedastic_flag(false),
            NoiseRegime::Heteroscedastic
        );
    }

    #[test]
    fn test_homoscedastic_std_dev_is_constant() {
        for x1 in [0.0, 12.5, 25.0, 50.0, 1000.0] {
            assert_eq!(NoiseRegime::Homoscedastic.error_std_dev(x1), 15.0);
        }
    }

    #[test]
    fn test_heteroscedastic_std_dev_grows_with_x1() {
        let regime = NoiseRegime::Heteroscedastic;
        assert_relative_eq!(regime.error_std_dev(0.0), 2.0);
        assert_relative_eq!(regime.error_std_dev(50.0), 42.0);

        let xs: Vec<f64> = (0..=50).map(|i| i as f64).collect();
        for pair in xs.windows(2) {
            assert!(regime.error_std_dev(pair[1]) > regime.error_std_dev(pair[0]));
            assert_relative_eq!(
                regime.error_std_dev(pair[1]) - regime.error_std_dev(pair[0]),
                0.8,
                epsilon = 1e-12
            );
        }
    }

    #[test]
    fn test_uniform_error_is_bounded() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..10_000 {
            let e = uniform_error(3.0, &mut rng);
            assert!(e >= -3.0 && e < 3.0);
        }
    }

    #[test]
    fn test_uniform_error_is_roughly_centred() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let n = 20_000;
        let mean: f64 = (0..n).map(|_| uniform_error(15.0, &mut rng)).sum::<f64>() / n as f64;
        // Var(U[-15, 15]) = 75, so the standard error of the mean is ~0.06.
        assert!(mean.abs() < 0.5, "mean = {}", mean);
    }

    #[test]
    fn test_uniform_error_covers_both_tails() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let draws: Vec<f64> = (0..5_000).map(|_| uniform_error(1.0, &mut rng)).collect();
        let min = draws.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = draws.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        assert!(min < -0.99);
        assert!(max > 0.99);
    }

    #[test]
    fn test_regime_serde_names() {
        let json = serde_json::to_string(&NoiseRegime::Heteroscedastic).unwrap();
        assert_eq!(json, "\"heteroscedastic\"");
        let back: NoiseRegime = serde_json::from_str("\"homoscedastic\"").unwrap();
        assert_eq!(back, NoiseRegime::Homoscedastic);
        assert_eq!(NoiseRegime::Homoscedastic.to_string(), "homoscedastic");
    }
}
