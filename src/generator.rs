//! Synthetic regression surface generation.
//!
//! A generator call lays a regular `n × n` grid over `[0, range]²`, evaluates
//! the [`TruePlane`] at every node and perturbs each value with one
//! independent uniform error drawn under the requested [`NoiseRegime`].
//!
//! Randomness is always supplied by the caller, either as an RNG or as a
//! seed for a ChaCha8 stream, so any dataset can be regenerated exactly.

use crate::error::{RegSurfaceError, Result};
use crate::grid::{GridAxis, validate_grid};
use crate::model::TruePlane;
use crate::noise::NoiseRegime;
use crate::types::{RegressionOutput, ScatterDataset, SurfaceDataset};
use ndarray::{Array1, Array2};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Default number of grid points per axis (400 points in total).
pub const DEFAULT_POINTS_PER_AXIS: usize = 20;
/// Default extent of both predictor axes.
pub const DEFAULT_RANGE: f64 = 50.0;

/// Generate one dataset.
///
/// # Arguments
/// * `regime` - Noise behaviour of the observed values
/// * `points_per_axis` - Grid resolution, at least 2
/// * `range` - Upper end of both predictor axes, strictly positive
/// * `rng` - Source of the noise draws
///
/// # Errors
/// `InvalidConfiguration` when `points_per_axis < 2`, when `n * n` does not
/// fit in `usize` or when `range` is not a positive finite number.
pub fn generate<R: Rng + ?Sized>(
    regime: NoiseRegime,
    points_per_axis: usize,
    range: f64,
    rng: &mut R,
) -> Result<RegressionOutput> {
    validate_grid(points_per_axis, range)?;
    let n = points_per_axis;
    let plane = TruePlane::STANDARD;

    let x1_axis = GridAxis::new(n, range)?;
    let x2_axis = GridAxis::new(n, range)?;

    let mut x1_flat = Vec::with_capacity(n * n);
    let mut x2_flat = Vec::with_capacity(n * n);
    let mut y_observed = Vec::with_capacity(n * n);
    let mut y_true = Array2::zeros((n, n));

    for (j, x2) in x2_axis.iter().enumerate() {
        for (i, x1) in x1_axis.iter().enumerate() {
            let true_y = plane.mean(x1, x2);
            y_true[[j, i]] = true_y;

            let error = regime.sample_error(x1, rng);

            x1_flat.push(x1);
            x2_flat.push(x2);
            y_observed.push(true_y + error);
        }
    }

    debug!(
        %regime,
        points_per_axis = n,
        range,
        samples = y_observed.len(),
        "generated regression surface"
    );

    Ok(RegressionOutput::new(
        regime,
        ScatterDataset::new(
            Array1::from_vec(x1_flat),
            Array1::from_vec(x2_flat),
            Array1::from_vec(y_observed),
        ),
        SurfaceDataset::new(x1_axis, x2_axis, y_true),
    ))
}

/// Boolean entry point with the domain fixed at `[0, 50]`.
///
/// `is_homoscedastic = true` selects constant variance, `false` selects
/// variance growing with `x1`.
pub fn generate_regression_data<R: Rng + ?Sized>(
    is_homoscedastic: bool,
    points_per_axis: usize,
    rng: &mut R,
) -> Result<RegressionOutput> {
    generate(
        NoiseRegime::from_homoscedastic_flag(is_homoscedastic),
        points_per_axis,
        DEFAULT_RANGE,
        rng,
    )
}

/// Configuration for [`RegressionSurfaceGenerator`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Grid resolution per axis.
    pub points_per_axis: usize,
    /// Extent of both predictor axes.
    pub range: f64,
    /// Seed for reproducible output. `None` draws a fresh seed per call.
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            points_per_axis: DEFAULT_POINTS_PER_AXIS,
            range: DEFAULT_RANGE,
            seed: None,
        }
    }
}

impl GeneratorConfig {
    /// Check that the grid parameters are usable.
    pub fn validate(&self) -> Result<()> {
        validate_grid(self.points_per_axis, self.range)
    }

    /// Load a configuration from a JSON file. Missing fields take their defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            RegSurfaceError::IoError(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config: GeneratorConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }
}

/// Both regimes generated from one configuration.
#[derive(Debug, Clone)]
pub struct RegimePair {
    pub homoscedastic: RegressionOutput,
    pub heteroscedastic: RegressionOutput,
    /// Seed the pair was drawn from; passing it back to
    /// [`RegressionSurfaceGenerator::generate_pair`] reproduces both outputs.
    pub seed: u64,
}

impl RegimePair {
    pub fn get(&self, regime: NoiseRegime) -> &RegressionOutput {
        match regime {
            NoiseRegime::Homoscedastic => &self.homoscedastic,
            NoiseRegime::Heteroscedastic => &self.heteroscedastic,
        }
    }

    /// Outputs in chart order: homoscedastic first.
    pub fn iter(&self) -> impl Iterator<Item = &RegressionOutput> {
        [&self.homoscedastic, &self.heteroscedastic].into_iter()
    }
}

/// Generator bound to a validated configuration.
#[derive(Debug, Clone, Default)]
pub struct RegressionSurfaceGenerator {
    config: GeneratorConfig,
}

impl RegressionSurfaceGenerator {
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate one regime from the given RNG.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        regime: NoiseRegime,
        rng: &mut R,
    ) -> Result<RegressionOutput> {
        generate(regime, self.config.points_per_axis, self.config.range, rng)
    }

    /// Generate one regime from a ChaCha8 stream seeded with `seed`.
    pub fn generate_seeded(&self, regime: NoiseRegime, seed: u64) -> Result<RegressionOutput> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.generate(regime, &mut rng)
    }

    /// Generate both regimes in parallel.
    ///
    /// The homoscedastic dataset uses `seed`, the heteroscedastic one
    /// `seed + 1`, so the two noise streams never coincide. Falls back to the
    /// configured seed, then to a random one, when `seed` is `None`.
    pub fn generate_pair(&self, seed: Option<u64>) -> Result<RegimePair> {
        let seed = seed
            .or(self.config.seed)
            .unwrap_or_else(rand::random::<u64>);
        debug!(seed, "generating both noise regimes");

        let (homoscedastic, heteroscedastic) = rayon::join(
            || self.generate_seeded(NoiseRegime::Homoscedastic, seed),
            || self.generate_seeded(NoiseRegime::Heteroscedastic, seed.wrapping_add(1)),
        );

        Ok(RegimePair {
            homoscedastic: homoscedastic?,
            heteroscedastic: heteroscedastic?,
            seed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn seeded(seed: u64) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(seed)
    }

    #[test]
    fn test_three_point_example() {
        let out = generate(NoiseRegime::Homoscedastic, 3, 50.0, &mut seeded(1)).unwrap();

        assert_eq!(out.surface().x1_axis().to_vec(), vec![0.0, 25.0, 50.0]);
        assert_eq!(out.surface().x2_axis().to_vec(), vec![0.0, 25.0, 50.0]);
        assert_eq!(out.surface().y_true()[[0, 0]], 50.0);
        assert_eq!(out.surface().y_true()[[2, 2]], 100.0);
        assert_eq!(out.surface().y_true()[[0, 2]], 175.0);
        assert_eq!(out.surface().y_true()[[2, 0]], -25.0);
    }

    #[test]
    fn test_cardinalities() {
        for n in [2, 5, 20] {
            let out = generate(NoiseRegime::Heteroscedastic, n, 50.0, &mut seeded(2)).unwrap();
            assert_eq!(out.scatter().x1().len(), n * n);
            assert_eq!(out.scatter().x2().len(), n * n);
            assert_eq!(out.scatter().y_observed().len(), n * n);
            assert_eq!(out.surface().y_true().dim(), (n, n));
            assert_eq!(out.surface().x1_axis().len(), n);
            assert_eq!(out.surface().x2_axis().len(), n);
        }
    }

    #[test]
    fn test_surface_is_exact_plane() {
        let out = generate(NoiseRegime::Heteroscedastic, 20, 50.0, &mut seeded(3)).unwrap();
        let s = out.surface();
        for j in 0..20 {
            for i in 0..20 {
                let x1 = s.x1_axis().get(i).unwrap();
                let x2 = s.x2_axis().get(j).unwrap();
                assert_eq!(s.y_true()[[j, i]], 50.0 + 2.5 * x1 - 1.5 * x2);
            }
        }
    }

    #[test]
    fn test_scatter_is_row_major_over_grid() {
        let n = 6;
        let out = generate(NoiseRegime::Homoscedastic, n, 30.0, &mut seeded(4)).unwrap();
        for k in 0..n * n {
            assert_eq!(out.scatter().x1()[k], out.surface().x1_axis().get(k % n).unwrap());
            assert_eq!(out.scatter().x2()[k], out.surface().x2_axis().get(k / n).unwrap());
        }
    }

    #[test]
    fn test_errors_within_regime_bounds() {
        for regime in NoiseRegime::ALL {
            let out = generate(regime, 20, 50.0, &mut seeded(5)).unwrap();
            for (x1, x2, y) in out.scatter().points() {
                let truth = TruePlane::STANDARD.mean(x1, x2);
                assert!((y - truth).abs() <= regime.error_std_dev(x1));
            }
        }
    }

    #[test]
    fn test_invalid_configuration() {
        let err = generate(NoiseRegime::Homoscedastic, 1, 50.0, &mut seeded(0)).unwrap_err();
        assert!(matches!(err, RegSurfaceError::InvalidConfiguration(_)));

        let err = generate(NoiseRegime::Homoscedastic, 5, 0.0, &mut seeded(0)).unwrap_err();
        assert!(matches!(err, RegSurfaceError::InvalidConfiguration(_)));

        let err = generate(NoiseRegime::Heteroscedastic, 5, -1.0, &mut seeded(0)).unwrap_err();
        assert!(matches!(err, RegSurfaceError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_oversized_grid_is_rejected_before_allocating() {
        let result = generate(NoiseRegime::Homoscedastic, usize::MAX, 50.0, &mut seeded(0));
        assert!(matches!(result, Err(RegSurfaceError::InvalidConfiguration(_))));

        let config = GeneratorConfig {
            points_per_axis: usize::MAX,
            ..GeneratorConfig::default()
        };
        assert!(matches!(
            RegressionSurfaceGenerator::new(config),
            Err(RegSurfaceError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_same_seed_same_output() {
        let generator = RegressionSurfaceGenerator::default();
        let a = generator.generate_seeded(NoiseRegime::Heteroscedastic, 42).unwrap();
        let b = generator.generate_seeded(NoiseRegime::Heteroscedastic, 42).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_streams_share_surface() {
        let generator = RegressionSurfaceGenerator::default();
        let a = generator.generate_seeded(NoiseRegime::Homoscedastic, 1).unwrap();
        let b = generator.generate_seeded(NoiseRegime::Homoscedastic, 2).unwrap();
        assert_eq!(a.surface(), b.surface());
        assert_ne!(a.scatter().y_observed(), b.scatter().y_observed());
    }

    #[test]
    fn test_boolean_entry_point() {
        let out = generate_regression_data(true, DEFAULT_POINTS_PER_AXIS, &mut seeded(9)).unwrap();
        assert_eq!(out.regime(), NoiseRegime::Homoscedastic);
        assert_eq!(out.scatter().len(), 400);
        assert_eq!(out.surface().x1_axis().get(19), Some(50.0));

        let out = generate_regression_data(false, 4, &mut seeded(9)).unwrap();
        assert_eq!(out.regime(), NoiseRegime::Heteroscedastic);
        assert!(generate_regression_data(false, 1, &mut seeded(9)).is_err());
    }

    #[test]
    fn test_config_defaults_and_validation() {
        let config = GeneratorConfig::default();
        assert_eq!(config.points_per_axis, 20);
        assert_relative_eq!(config.range, 50.0);
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());

        let bad = GeneratorConfig {
            points_per_axis: 1,
            ..GeneratorConfig::default()
        };
        assert!(RegressionSurfaceGenerator::new(bad).is_err());
    }

    #[test]
    fn test_config_partial_json() {
        let config: GeneratorConfig = serde_json::from_str(r#"{"points_per_axis": 8}"#).unwrap();
        assert_eq!(config.points_per_axis, 8);
        assert_relative_eq!(config.range, 50.0);
    }

    #[test]
    fn test_pair_is_reproducible() {
        let generator = RegressionSurfaceGenerator::new(GeneratorConfig {
            points_per_axis: 10,
            range: 50.0,
            seed: Some(123),
        })
        .unwrap();

        let a = generator.generate_pair(None).unwrap();
        let b = generator.generate_pair(Some(123)).unwrap();
        assert_eq!(a.homoscedastic, b.homoscedastic);
        assert_eq!(a.heteroscedastic, b.heteroscedastic);
        assert_eq!(a.get(NoiseRegime::Homoscedastic).regime(), NoiseRegime::Homoscedastic);
        assert_eq!(a.iter().count(), 2);
        assert_eq!(a.seed, 123);
        assert_eq!(b.seed, 123);
    }

    #[test]
    fn test_random_seed_is_returned_and_replays() {
        let generator = RegressionSurfaceGenerator::new(GeneratorConfig {
            points_per_axis: 8,
            ..GeneratorConfig::default()
        })
        .unwrap();

        let first = generator.generate_pair(None).unwrap();
        let replay = generator.generate_pair(Some(first.seed)).unwrap();
        assert_eq!(replay.seed, first.seed);
        assert_eq!(replay.homoscedastic, first.homoscedastic);
        assert_eq!(replay.heteroscedastic, first.heteroscedastic);
    }

    #[test]
    fn test_residual_spread_tracks_regime() {
        let generator = RegressionSurfaceGenerator::new(GeneratorConfig {
            points_per_axis: 40,
            range: 50.0,
            seed: None,
        })
        .unwrap();
        let pair = generator.generate_pair(Some(2024)).unwrap();

        let hetero = pair.heteroscedastic.residual_spread_by_x1();
        let last = *hetero.last().unwrap();
        assert!(hetero[0] <= 2.0);
        assert!(last > 30.0 && last <= 42.0);

        let homo = pair.homoscedastic.residual_spread_by_x1();
        assert!(homo.iter().all(|&s| s <= 15.0));
    }
}
