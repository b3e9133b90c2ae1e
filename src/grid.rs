//! Evenly spaced predictor axes.

use crate::error::{RegSurfaceError, Result};
use ndarray::{Array1, ArrayView1};

/// Reject grid parameters that would give an undefined or degenerate axis.
pub fn validate_grid(points_per_axis: usize, range: f64) -> Result<()> {
    if points_per_axis < 2 {
        return Err(RegSurfaceError::InvalidConfiguration(format!(
            "points_per_axis must be at least 2, got {}",
            points_per_axis
        )));
    }
    if points_per_axis.checked_mul(points_per_axis).is_none() {
        return Err(RegSurfaceError::InvalidConfiguration(format!(
            "points_per_axis {} gives a grid larger than usize",
            points_per_axis
        )));
    }
    if !range.is_finite() || range <= 0.0 {
        return Err(RegSurfaceError::InvalidConfiguration(format!(
            "range must be a positive finite number, got {}",
            range
        )));
    }
    Ok(())
}

/// Position of grid point `index` on an axis of `points` samples over `[0, range]`.
pub(crate) fn grid_coordinate(index: usize, points: usize, range: f64) -> f64 {
    (index as f64 / (points - 1) as f64) * range
}

/// An ordered set of `n` coordinates evenly spaced over `[0, range]`.
#[derive(Debug, Clone, PartialEq)]
pub struct GridAxis {
    values: Array1<f64>,
    range: f64,
}

impl GridAxis {
    /// Build an axis with `points` samples over `[0, range]`, both ends included.
    pub fn new(points: usize, range: f64) -> Result<Self> {
        validate_grid(points, range)?;
        let values = Array1::from_iter((0..points).map(|i| grid_coordinate(i, points, range)));
        Ok(Self { values, range })
    }

    pub fn values(&self) -> ArrayView1<'_, f64> {
        self.values.view()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Upper end of the axis.
    pub fn range(&self) -> f64 {
        self.range
    }

    /// Nominal distance between neighbouring samples, `range / (n - 1)`.
    pub fn spacing(&self) -> f64 {
        self.range / (self.len() - 1) as f64
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.values.to_vec()
    }
}
