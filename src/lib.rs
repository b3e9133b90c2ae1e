//! # regsurface
//!
//! Synthetic multiple-regression datasets for teaching the difference
//! between homoscedastic and heteroscedastic errors.
//!
//! Every dataset is built around the plane `y = 50 + 2.5 * x1 - 1.5 * x2`
//! sampled on a regular grid. The generator returns the noisy observations
//! as a flat point cloud together with the noise-free plane as a gridded
//! surface, ready to be drawn as a 3D scatter/surface chart.
//!
//! ## Features
//!
//! - `plotting` - Render charts to PNG or SVG with plotters
//! - `cli` - The `regsurface` command line tool
//!
//! ## Example
//!
//! ```
//! use regsurface::prelude::*;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//! let data = generate(NoiseRegime::Heteroscedastic, 20, 50.0, &mut rng).unwrap();
//!
//! assert_eq!(data.scatter().len(), 400);
//! assert_eq!(data.surface().y_true()[[0, 0]], 50.0);
//! ```

pub mod error;
pub mod export;
pub mod generator;
pub mod grid;
pub mod model;
pub mod noise;
#[cfg(feature = "plotting")]
pub mod plotting;
pub mod scene;
pub mod types;

pub mod prelude {
    //! Convenient re-exports of commonly used types.
    pub use crate::error::{RegSurfaceError, Result};
    pub use crate::export::SceneTraces;
    pub use crate::generator::{
        DEFAULT_POINTS_PER_AXIS, DEFAULT_RANGE, GeneratorConfig, RegimePair,
        RegressionSurfaceGenerator, generate, generate_regression_data,
    };
    pub use crate::grid::GridAxis;
    pub use crate::model::TruePlane;
    pub use crate::noise::NoiseRegime;
    pub use crate::scene::SceneSpec;
    pub use crate::types::{RegressionOutput, ScatterDataset, SurfaceDataset};

    #[cfg(feature = "plotting")]
    pub use crate::plotting::{ImageFormat, PlotConfig, plot_regression_surface, render_pair};
}
