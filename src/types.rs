//! Core data types produced by the generator.
//!
//! All three types are read-only once built. The scatter always holds
//! `n * n` points and the surface an `n × n` matrix for the same `n`.

use crate::grid::GridAxis;
use crate::noise::NoiseRegime;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

/// Observed sample points, one `(x1, x2, y)` triple per grid node.
///
/// The three sequences are index aligned. Points are stored row-major with
/// `x2` as the outer loop and `x1` as the inner loop.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterDataset {
    x1: Array1<f64>,
    x2: Array1<f64>,
    y_observed: Array1<f64>,
}

impl ScatterDataset {
    pub(crate) fn new(x1: Array1<f64>, x2: Array1<f64>, y_observed: Array1<f64>) -> Self {
        debug_assert!(x1.len() == y_observed.len() && x2.len() == y_observed.len());
        Self { x1, x2, y_observed }
    }

    pub fn x1(&self) -> ArrayView1<'_, f64> {
        self.x1.view()
    }

    pub fn x2(&self) -> ArrayView1<'_, f64> {
        self.x2.view()
    }

    pub fn y_observed(&self) -> ArrayView1<'_, f64> {
        self.y_observed.view()
    }

    pub fn len(&self) -> usize {
        self.y_observed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.y_observed.is_empty()
    }

    /// Iterate over `(x1, x2, y_observed)` triples.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
        self.x1
            .iter()
            .zip(self.x2.iter())
            .zip(self.y_observed.iter())
            .map(|((&x1, &x2), &y)| (x1, x2, y))
    }
}

/// Noise-free heights of the true plane over the grid.
///
/// `y_true[[j, i]]` is the plane evaluated at `(x1_axis[i], x2_axis[j])`.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceDataset {
    x1_axis: GridAxis,
    x2_axis: GridAxis,
    y_true: Array2<f64>,
}

impl SurfaceDataset {
    pub(crate) fn new(x1_axis: GridAxis, x2_axis: GridAxis, y_true: Array2<f64>) -> Self {
        debug_assert_eq!(y_true.dim(), (x2_axis.len(), x1_axis.len()));
        Self {
            x1_axis,
            x2_axis,
            y_true,
        }
    }

    pub fn x1_axis(&self) -> &GridAxis {
        &self.x1_axis
    }

    pub fn x2_axis(&self) -> &GridAxis {
        &self.x2_axis
    }

    /// Heights with rows indexed by `x2` and columns by `x1`.
    pub fn y_true(&self) -> ArrayView2<'_, f64> {
        self.y_true.view()
    }

    /// Height at column `i` (x1 index) and row `j` (x2 index).
    pub fn height(&self, i: usize, j: usize) -> Option<f64> {
        self.y_true.get([j, i]).copied()
    }

    /// The `y_true` matrix as nested rows, one per `x2` value.
    pub fn rows(&self) -> Vec<Vec<f64>> {
        self.y_true.rows().into_iter().map(|row| row.to_vec()).collect()
    }

    /// Smallest and largest height on the surface.
    pub fn height_bounds(&self) -> (f64, f64) {
        let min = self.y_true.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = self.y_true.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        (min, max)
    }
}

/// Everything one generator call returns.
#[derive(Debug, Clone, PartialEq)]
pub struct RegressionOutput {
    regime: NoiseRegime,
    scatter: ScatterDataset,
    surface: SurfaceDataset,
}

impl RegressionOutput {
    pub(crate) fn new(
        regime: NoiseRegime,
        scatter: ScatterDataset,
        surface: SurfaceDataset,
    ) -> Self {
        debug_assert_eq!(scatter.len(), surface.x1_axis.len() * surface.x2_axis.len());
        Self {
            regime,
            scatter,
            surface,
        }
    }

    /// Regime the noise was drawn under.
    pub fn regime(&self) -> NoiseRegime {
        self.regime
    }

    pub fn scatter(&self) -> &ScatterDataset {
        &self.scatter
    }

    pub fn surface(&self) -> &SurfaceDataset {
        &self.surface
    }

    /// Points per axis of the underlying grid.
    pub fn points_per_axis(&self) -> usize {
        self.surface.x1_axis.len()
    }

    /// Observed minus true value for every scatter point.
    pub fn residuals(&self) -> Array1<f64> {
        let n = self.points_per_axis();
        Array1::from_iter(
            self.scatter
                .y_observed
                .iter()
                .enumerate()
                .map(|(k, &y)| y - self.surface.y_true[[k / n, k % n]]),
        )
    }

    /// Largest absolute residual in each `x1` column of the grid.
    ///
    /// Under the heteroscedastic regime this grows with `x1`; under the
    /// homoscedastic regime it stays close to 15 across columns.
    pub fn residual_spread_by_x1(&self) -> Vec<f64> {
        let n = self.points_per_axis();
        let mut spread = vec![0.0_f64; n];
        for (k, r) in self.residuals().iter().enumerate() {
            let i = k % n;
            spread[i] = spread[i].max(r.abs());
        }
        spread
    }

    /// Smallest and largest value over both the observed points and the surface.
    pub fn y_bounds(&self) -> (f64, f64) {
        let (surface_min, surface_max) = self.surface.height_bounds();
        self.scatter
            .y_observed
            .iter()
            .fold((surface_min, surface_max), |(lo, hi), &y| (lo.min(y), hi.max(y)))
    }
}
