use std::path::Path;

use crate::error::{FavgenError, FavgenResult};

/// An immutable piece of SVG markup, either loaded from a template file or
/// produced by [`crate::compose::compose`]. The pipeline never edits a loaded
/// document in place; it only reads fragments out of one and assembles new
/// documents from scratch.
#[derive(Clone, Debug)]
pub struct SvgDocument {
    markup: String,
}

impl SvgDocument {
    pub fn from_markup(markup: impl Into<String>) -> Self {
        Self {
            markup: markup.into(),
        }
    }

    /// Read a template from disk. A missing file maps to `SourceNotFound`;
    /// any other read failure maps to `Io`.
    pub fn load(path: &Path) -> FavgenResult<Self> {
        let markup = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                FavgenError::source_not_found(path.display().to_string())
            } else {
                FavgenError::io(format!("read '{}': {e}", path.display()))
            }
        })?;
        Ok(Self { markup })
    }

    pub fn markup(&self) -> &str {
        &self.markup
    }
}

#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct GradientStop {
    /// Offset along the gradient axis, in percent (0-100).
    pub offset: u32,
    pub color: String,
}

/// Low-opacity line grid spanning the canvas. Line counts are derived from
/// the canvas size: `floor(dim / cell) + 1` per axis, so both edges get a line.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct GridSpec {
    pub cell: u32,
    pub color: String,
    pub opacity: f64,
    pub stroke_width: f64,
}

/// How to neutralize a transform the embedded fragment already carries before
/// re-wrapping it in the spec's own placement transform.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum StripMode {
    /// Remove only this exact `transform` attribute value (the known
    /// centering placeholder baked into the logo template). Any other
    /// transform is left intact, which may misplace the embed if the source
    /// template changes unexpectedly.
    Exact(String),
    /// Remove whatever `transform` attribute the fragment's root group
    /// carries, regardless of its value.
    AnyRoot,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Placement {
    pub translate: (f64, f64),
    pub scale: f64,
    pub strip: StripMode,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct TextLabel {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size: f64,
    pub fill: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<f64>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct AccentRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: String,
    pub opacity: f64,
    pub rx: f64,
}

/// Parameter set for one composed output image. Created at call time by the
/// orchestrator; not persisted between runs.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct CompositionSpec {
    pub canvas: Canvas,
    pub gradient: Vec<GradientStop>,
    pub grid: GridSpec,
    pub placement: Placement,
    pub labels: Vec<TextLabel>,
    pub accents: Vec<AccentRect>,
}

impl CompositionSpec {
    pub fn validate(&self) -> FavgenResult<()> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(FavgenError::validation(
                "canvas width/height must be > 0",
            ));
        }
        if self.gradient.len() < 2 {
            return Err(FavgenError::validation(
                "gradient needs at least two stops",
            ));
        }
        for stop in &self.gradient {
            if stop.offset > 100 {
                return Err(FavgenError::validation(format!(
                    "gradient stop offset {} exceeds 100%",
                    stop.offset
                )));
            }
        }
        if self.grid.cell == 0 {
            return Err(FavgenError::validation("grid cell size must be > 0"));
        }
        if !(0.0..=1.0).contains(&self.grid.opacity) {
            return Err(FavgenError::validation("grid opacity must be in 0..=1"));
        }
        if self.placement.scale <= 0.0 {
            return Err(FavgenError::validation("placement scale must be > 0"));
        }
        Ok(())
    }

    /// The fixed social-preview recipe: dark diagonal gradient, faint accent
    /// grid, the logo artwork centered above two text lines, a bottom bar and
    /// corner marks. Geometry follows the canvas size; text comes from the
    /// caller.
    pub fn preview_card(canvas: Canvas, title: &str, url: &str) -> Self {
        let w = f64::from(canvas.width);
        let h = f64::from(canvas.height);
        let accent = "#d97757";

        Self {
            canvas,
            gradient: vec![
                GradientStop {
                    offset: 0,
                    color: "#0f1729".to_string(),
                },
                GradientStop {
                    offset: 100,
                    color: "#1e293b".to_string(),
                },
            ],
            grid: GridSpec {
                cell: 50,
                color: accent.to_string(),
                opacity: 0.03,
                stroke_width: 1.0,
            },
            placement: Placement {
                translate: (w / 2.0, 250.0),
                scale: 3.5,
                strip: StripMode::Exact("translate(64,64)".to_string()),
            },
            labels: vec![
                TextLabel {
                    text: title.to_string(),
                    x: w / 2.0,
                    y: 460.0,
                    font_size: 80.0,
                    fill: "white".to_string(),
                    font_weight: Some("bold".to_string()),
                    letter_spacing: Some(4.0),
                },
                TextLabel {
                    text: url.to_string(),
                    x: w / 2.0,
                    y: 530.0,
                    font_size: 22.0,
                    fill: accent.to_string(),
                    font_weight: None,
                    letter_spacing: None,
                },
            ],
            accents: vec![
                // bottom bar
                AccentRect {
                    x: 0.0,
                    y: h - 15.0,
                    width: w,
                    height: 15.0,
                    fill: accent.to_string(),
                    opacity: 0.8,
                    rx: 0.0,
                },
                // top-left corner mark
                AccentRect {
                    x: 40.0,
                    y: 40.0,
                    width: 60.0,
                    height: 3.0,
                    fill: accent.to_string(),
                    opacity: 0.3,
                    rx: 1.5,
                },
                AccentRect {
                    x: 40.0,
                    y: 40.0,
                    width: 3.0,
                    height: 60.0,
                    fill: accent.to_string(),
                    opacity: 0.3,
                    rx: 1.5,
                },
                // top-right corner mark
                AccentRect {
                    x: w - 100.0,
                    y: 40.0,
                    width: 60.0,
                    height: 3.0,
                    fill: accent.to_string(),
                    opacity: 0.3,
                    rx: 1.5,
                },
                AccentRect {
                    x: w - 43.0,
                    y: 40.0,
                    width: 3.0,
                    height: 60.0,
                    fill: accent.to_string(),
                    opacity: 0.3,
                    rx: 1.5,
                },
            ],
        }
    }
}
