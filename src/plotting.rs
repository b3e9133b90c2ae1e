//! Rendering of regression surfaces.
//!
//! Each chart is a 3D cartesian plot holding the observed point cloud, the
//! noise-free plane drawn as shaded grid cells, axis titles and the
//! regime's annotation. Output goes to PNG or SVG depending on the file
//! extension.
//!
//! Requires the `plotting` feature to be enabled.

use crate::error::{RegSurfaceError, Result};
use crate::generator::RegimePair;
use crate::scene::{Rgb, SceneSpec};
use crate::types::RegressionOutput;
use plotters::coord::Shift;
use plotters::coord::cartesian::Cartesian3d;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use plotters::style::FontStyle;
use std::path::{Path, PathBuf};
use tracing::info;

/// Plot configuration options.
#[derive(Debug, Clone)]
pub struct PlotConfig {
    /// Width of the plot in pixels.
    pub width: u32,
    /// Height of the plot in pixels.
    pub height: u32,
    /// Replaces the scene title when set.
    pub title: Option<String>,
    /// Font size of the caption.
    pub font_size: u32,
    /// Rotation around the vertical axis, in radians.
    pub yaw: f64,
    /// Elevation of the camera, in radians.
    pub pitch: f64,
    /// Zoom factor of the projection.
    pub scale: f64,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            title: None,
            font_size: 20,
            yaw: 0.7,
            pitch: 0.25,
            scale: 0.85,
        }
    }
}

/// Raster or vector output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Svg,
}

impl ImageFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Svg => "svg",
        }
    }
}

// Stops of the red colour scale used for the true plane.
const REDS: [(f64, (u8, u8, u8)); 4] = [
    (0.0, (220, 220, 220)),
    (0.2, (245, 195, 157)),
    (0.4, (245, 160, 105)),
    (1.0, (178, 10, 28)),
];

/// Colour of the red scale at `t` in `[0, 1]`; values outside are clamped.
pub fn reds(t: f64) -> RGBColor {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    for pair in REDS.windows(2) {
        let (t0, c0) = pair[0];
        let (t1, c1) = pair[1];
        if t <= t1 {
            let w = (t - t0) / (t1 - t0);
            let lerp = |a: u8, b: u8| (a as f64 + w * (b as f64 - a as f64)).round() as u8;
            return RGBColor(lerp(c0.0, c1.0), lerp(c0.1, c1.1), lerp(c0.2, c1.2));
        }
    }
    let (_, last) = REDS[REDS.len() - 1];
    RGBColor(last.0, last.1, last.2)
}

fn to_rgb(color: Rgb) -> RGBColor {
    RGBColor(color.0, color.1, color.2)
}

fn plotting_error<E: std::fmt::Display>(e: E) -> RegSurfaceError {
    RegSurfaceError::PlottingError(e.to_string())
}

/// Plot one dataset as scatter plus surface.
///
/// # Arguments
/// * `output` - Generated dataset
/// * `scene` - Title, styles and annotation for the chart
/// * `path` - Output file; `.svg` selects SVG, anything else PNG
/// * `config` - Plot configuration
pub fn plot_regression_surface<P: AsRef<Path>>(
    output: &RegressionOutput,
    scene: &SceneSpec,
    path: P,
    config: &PlotConfig,
) -> Result<()> {
    let path = path.as_ref();
    if output.points_per_axis() < 2 {
        return Err(RegSurfaceError::InvalidConfiguration(
            "cannot plot a surface with fewer than 2 points per axis".to_string(),
        ));
    }

    let size = (config.width, config.height);
    let is_svg = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("svg"));

    if is_svg {
        let root = SVGBackend::new(path, size).into_drawing_area();
        draw_scene(&root, output, scene, config)?;
    } else {
        let root = BitMapBackend::new(path, size).into_drawing_area();
        draw_scene(&root, output, scene, config)?;
    }

    info!(regime = %output.regime(), path = %path.display(), "rendered chart");
    Ok(())
}

fn draw_scene<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    output: &RegressionOutput,
    scene: &SceneSpec,
    config: &PlotConfig,
) -> Result<()> {
    root.fill(&WHITE).map_err(plotting_error)?;

    let title = config.title.clone().unwrap_or_else(|| scene.title.clone());
    let surface = output.surface();
    let x1_max = surface.x1_axis().range();
    let x2_max = surface.x2_axis().range();

    // Plotters' vertical axis is y, so data (x1, x2, y) maps to (x1, y, x2).
    let (anchor_x1, anchor_x2, anchor_y) = scene.annotation.anchor;
    let (y_lo, y_hi) = output.y_bounds();
    let y_lo = y_lo.min(anchor_y);
    let y_hi = y_hi.max(anchor_y);
    let y_margin = ((y_hi - y_lo) * 0.05).max(1.0);

    let mut chart = ChartBuilder::on(root)
        .caption(&title, ("sans-serif", config.font_size).into_font())
        .margin(20)
        .build_cartesian_3d(0.0..x1_max, (y_lo - y_margin)..(y_hi + y_margin), 0.0..x2_max)
        .map_err(plotting_error)?;

    chart.with_projection(|mut pb| {
        pb.yaw = config.yaw;
        pb.pitch = config.pitch;
        pb.scale = config.scale;
        pb.into_matrix()
    });

    chart
        .configure_axes()
        .light_grid_style(BLACK.mix(0.15))
        .max_light_lines(3)
        .draw()
        .map_err(plotting_error)?;

    let axis_font = ("sans-serif", 14).into_font().color(&BLACK);
    let [x1_title, x2_title, y_title] = &scene.axis_titles;
    let y_floor = y_lo - y_margin;
    chart
        .draw_series([
            Text::new(x1_title.clone(), (x1_max * 1.08, y_floor, 0.0), axis_font.clone()),
            Text::new(x2_title.clone(), (0.0, y_floor, x2_max * 1.08), axis_font.clone()),
            Text::new(y_title.clone(), (0.0, y_hi + y_margin, 0.0), axis_font.clone()),
        ])
        .map_err(plotting_error)?;

    // True plane, one quad per grid cell shaded by mean height.
    let x1 = surface.x1_axis().to_vec();
    let x2 = surface.x2_axis().to_vec();
    let y_true = surface.y_true();
    let (h_lo, h_hi) = surface.height_bounds();
    let h_span = (h_hi - h_lo).max(f64::EPSILON);
    let n = x1.len();
    let opacity = scene.surface.opacity;

    chart
        .draw_series(
            (0..n - 1)
                .flat_map(|j| (0..n - 1).map(move |i| (i, j)))
                .map(|(i, j)| {
                    let corners = [
                        y_true[[j, i]],
                        y_true[[j, i + 1]],
                        y_true[[j + 1, i + 1]],
                        y_true[[j + 1, i]],
                    ];
                    let mean = corners.iter().sum::<f64>() / 4.0;
                    Polygon::new(
                        vec![
                            (x1[i], corners[0], x2[j]),
                            (x1[i + 1], corners[1], x2[j]),
                            (x1[i + 1], corners[2], x2[j + 1]),
                            (x1[i], corners[3], x2[j + 1]),
                        ],
                        reds((mean - h_lo) / h_span).mix(opacity).filled(),
                    )
                }),
        )
        .map_err(plotting_error)?
        .label(scene.surface_name.as_str())
        .legend(move |(x, y)| {
            Rectangle::new([(x, y - 5), (x + 15, y + 5)], reds(0.7).mix(opacity).filled())
        });

    let marker_color = to_rgb(scene.marker.color);
    let marker_style = marker_color.mix(scene.marker.opacity).filled();
    let marker_size = scene.marker.size as i32;

    chart
        .draw_series(
            output
                .scatter()
                .points()
                .map(|(x1, x2, y)| Circle::new((x1, y, x2), marker_size, marker_style)),
        )
        .map_err(plotting_error)?
        .label(scene.scatter_name.as_str())
        .legend(move |(x, y)| Circle::new((x + 7, y), marker_size + 1, marker_style));

    draw_annotation(&mut chart, scene, (anchor_x1, anchor_y, anchor_x2))?;

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(plotting_error)?;

    root.present().map_err(plotting_error)?;

    Ok(())
}

fn draw_annotation<DB: DrawingBackend>(
    chart: &mut ChartContext<'_, DB, Cartesian3d<RangedCoordf64, RangedCoordf64, RangedCoordf64>>,
    scene: &SceneSpec,
    anchor: (f64, f64, f64),
) -> Result<()> {
    let annotation = &scene.annotation;
    if annotation.lines.is_empty() {
        return Ok(());
    }

    let font_size = annotation.font_size as i32;
    let line_height = font_size + font_size / 3;
    let widest = annotation
        .lines
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0) as i32;
    let box_width = widest * font_size * 3 / 5 + 8;
    let box_height = line_height * annotation.lines.len() as i32 + 6;

    let background = WHITE.mix(annotation.background_opacity).filled();
    chart
        .draw_series(std::iter::once(
            EmptyElement::at(anchor)
                + Rectangle::new([(-4, -3), (box_width, box_height)], background),
        ))
        .map_err(plotting_error)?;

    let color = to_rgb(annotation.color);
    chart
        .draw_series(annotation.lines.iter().enumerate().map(|(k, line)| {
            let font = ("sans-serif", annotation.font_size).into_font();
            let font = if k == 0 {
                font.style(FontStyle::Bold)
            } else {
                font
            };
            EmptyElement::at(anchor)
                + Text::new(line.clone(), (0, k as i32 * line_height), font.color(&color))
        }))
        .map_err(plotting_error)?;

    Ok(())
}

/// Render both regimes of `pair` into `dir`, one file per regime named after it.
///
/// Returns the written paths in chart order.
pub fn render_pair<P: AsRef<Path>>(
    pair: &RegimePair,
    dir: P,
    format: ImageFormat,
    config: &PlotConfig,
) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let mut written = Vec::with_capacity(2);
    for output in pair.iter() {
        let scene = SceneSpec::for_regime(output.regime());
        let path = dir.join(format!("{}.{}", output.regime().name(), format.extension()));
        plot_regression_surface(output, &scene, &path, config)?;
        written.push(path);
    }
    Ok(written)
}
