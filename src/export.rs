//! Trace export for web charting front ends.
//!
//! Converts a [`RegressionOutput`] and its [`SceneSpec`] into the
//! `{x, y, z}` trace objects and layout that a browser 3D charting library
//! consumes: a `scatter3d` trace for the observed points, a `surface` trace
//! for the true plane and a layout carrying the title, axis titles and the
//! annotation. `x` is the first predictor, `y` the second and `z` the
//! response.

use crate::error::Result;
use crate::scene::SceneSpec;
use crate::types::RegressionOutput;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Serialize)]
pub struct MarkerJson {
    pub color: String,
    pub opacity: f64,
    pub size: u32,
}

/// Observed points as a `scatter3d` trace.
#[derive(Debug, Clone, Serialize)]
pub struct ScatterTrace {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
    pub mode: String,
    #[serde(rename = "type")]
    pub trace_type: String,
    pub name: String,
    pub marker: MarkerJson,
}

/// True plane as a `surface` trace; `z[j][i]` pairs with `y[j]` and `x[i]`.
#[derive(Debug, Clone, Serialize)]
pub struct SurfaceTrace {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<Vec<f64>>,
    #[serde(rename = "type")]
    pub trace_type: String,
    pub name: String,
    pub colorscale: String,
    pub opacity: f64,
    pub showscale: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct AxisTitle {
    pub title: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FontJson {
    pub color: String,
    pub size: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnnotationJson {
    pub showarrow: bool,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub text: String,
    pub font: FontJson,
    pub bgcolor: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SceneLayout {
    pub xaxis: AxisTitle,
    pub yaxis: AxisTitle,
    pub zaxis: AxisTitle,
    pub annotations: Vec<AnnotationJson>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Margin {
    pub l: u32,
    pub r: u32,
    pub b: u32,
    pub t: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct Layout {
    pub title: String,
    pub scene: SceneLayout,
    pub margin: Margin,
}

/// Everything needed to draw one chart in a browser.
#[derive(Debug, Clone, Serialize)]
pub struct SceneTraces {
    pub scatter: ScatterTrace,
    pub surface: SurfaceTrace,
    pub layout: Layout,
}

impl SceneTraces {
    pub fn from_output(output: &RegressionOutput, scene: &SceneSpec) -> Self {
        let scatter = ScatterTrace {
            x: output.scatter().x1().to_vec(),
            y: output.scatter().x2().to_vec(),
            z: output.scatter().y_observed().to_vec(),
            mode: "markers".to_string(),
            trace_type: "scatter3d".to_string(),
            name: scene.scatter_name.clone(),
            marker: MarkerJson {
                color: scene.marker.color.css(),
                opacity: scene.marker.opacity,
                size: scene.marker.size,
            },
        };

        let surface = SurfaceTrace {
            x: output.surface().x1_axis().to_vec(),
            y: output.surface().x2_axis().to_vec(),
            z: output.surface().rows(),
            trace_type: "surface".to_string(),
            name: scene.surface_name.clone(),
            colorscale: scene.surface.colorscale.clone(),
            opacity: scene.surface.opacity,
            showscale: scene.surface.show_scale,
        };

        let (ax, ay, az) = scene.annotation.anchor;
        let [x_title, y_title, z_title] = scene.axis_titles.clone();
        let layout = Layout {
            title: scene.title.clone(),
            scene: SceneLayout {
                xaxis: AxisTitle { title: x_title },
                yaxis: AxisTitle { title: y_title },
                zaxis: AxisTitle { title: z_title },
                annotations: vec![AnnotationJson {
                    showarrow: false,
                    x: ax,
                    y: ay,
                    z: az,
                    text: scene.annotation_html(),
                    font: FontJson {
                        color: scene.annotation.color.css(),
                        size: scene.annotation.font_size,
                    },
                    bgcolor: format!(
                        "rgba(255,255,255,{})",
                        scene.annotation.background_opacity
                    ),
                }],
            },
            margin: Margin {
                l: 0,
                r: 0,
                b: 0,
                t: 40,
            },
        };

        Self {
            scatter,
            surface,
            layout,
        }
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the traces as pretty-printed JSON.
    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        info!(path = %path.display(), "wrote chart traces");
        Ok(())
    }
}
