//! Presentation settings for the two teaching charts.
//!
//! A [`SceneSpec`] carries everything a renderer needs besides the data:
//! the chart title, trace names and colours, and the annotation explaining
//! what the reader should see in the point cloud.

use crate::noise::NoiseRegime;
use serde::Serialize;

/// An sRGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLUE: Rgb = Rgb(0, 0, 255);
    pub const GREEN: Rgb = Rgb(0, 128, 0);
    pub const BLACK: Rgb = Rgb(0, 0, 0);

    /// CSS name or `rgb(r,g,b)` string.
    pub fn css(&self) -> String {
        match *self {
            Rgb::BLUE => "blue".to_string(),
            Rgb::GREEN => "green".to_string(),
            Rgb::BLACK => "black".to_string(),
            Rgb(r, g, b) => format!("rgb({},{},{})", r, g, b),
        }
    }
}

/// A text label pinned to a point in data space.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotation {
    /// Lines of text, top to bottom. The first line is emphasised.
    pub lines: Vec<String>,
    /// Anchor as `(x1, x2, y)`.
    pub anchor: (f64, f64, f64),
    pub font_size: u32,
    pub color: Rgb,
    /// Opacity of the white label background.
    pub background_opacity: f64,
}

/// Visual settings of the observed point cloud.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerStyle {
    pub color: Rgb,
    pub opacity: f64,
    pub size: u32,
}

/// Visual settings of the true plane.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurfaceStyle {
    /// Named colour scale of the surface, e.g. `"Reds"`.
    pub colorscale: String,
    pub opacity: f64,
    pub show_scale: bool,
}

/// Full description of one chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneSpec {
    pub regime: NoiseRegime,
    pub title: String,
    pub scatter_name: String,
    pub surface_name: String,
    pub axis_titles: [String; 3],
    pub marker: MarkerStyle,
    pub surface: SurfaceStyle,
    pub annotation: Annotation,
}

const SCATTER_NAME: &str = "Observed data (y)";
const SURFACE_NAME: &str = "True plane E[y|X]";
const MARKER_OPACITY: f64 = 0.6;
const MARKER_SIZE: u32 = 3;
const SURFACE_OPACITY: f64 = 0.7;

impl SceneSpec {
    /// The chart used to present data generated under `regime`.
    pub fn for_regime(regime: NoiseRegime) -> Self {
        let (title, marker_color, lines, anchor) = match regime {
            NoiseRegime::Homoscedastic => (
                "Chart 1: Homoscedasticity (Constant Variance)",
                Rgb::BLUE,
                vec!["Zero mean and constant variance", "Uniform cloud thickness."],
                (10.0, 40.0, 100.0),
            ),
            NoiseRegime::Heteroscedastic => (
                "Chart 2: Heteroscedasticity (Non-constant Variance)",
                Rgb::GREEN,
                vec![
                    "Heteroscedasticity!",
                    "The dispersion (variance)",
                    "grows with X1.",
                ],
                (40.0, 20.0, 200.0),
            ),
        };

        Self {
            regime,
            title: title.to_string(),
            scatter_name: SCATTER_NAME.to_string(),
            surface_name: SURFACE_NAME.to_string(),
            axis_titles: ["X1".to_string(), "X2".to_string(), "Y".to_string()],
            marker: MarkerStyle {
                color: marker_color,
                opacity: MARKER_OPACITY,
                size: MARKER_SIZE,
            },
            surface: SurfaceStyle {
                colorscale: "Reds".to_string(),
                opacity: SURFACE_OPACITY,
                show_scale: false,
            },
            annotation: Annotation {
                lines: lines.into_iter().map(str::to_string).collect(),
                anchor,
                font_size: 12,
                color: Rgb::BLACK,
                background_opacity: 0.7,
            },
        }
    }

    /// Annotation as a single HTML-ish string, first line in bold.
    pub fn annotation_html(&self) -> String {
        let mut lines = self.annotation.lines.iter();
        let mut html = match lines.next() {
            Some(first) => format!("<b>{}</b>", first),
            None => String::new(),
        };
        for line in lines {
            html.push_str("<br>");
            html.push_str(line);
        }
        html
    }
}
