//! Drawing-surface contract consumed by the layout engine.
//!
//! Coordinates are in canvas units with the origin at the top-left corner
//! and y growing downwards. Text is placed by its baseline.

use serde::{Deserialize, Serialize};

/// One segment of a [`Path`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "seg", rename_all = "kebab-case")]
pub enum PathSegment {
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
    /// Circular arc; angles in radians measured clockwise from +x
    /// (the y-down convention of an HTML canvas).
    Arc {
        cx: f64,
        cy: f64,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        anticlockwise: bool,
    },
    Close,
}

/// A path built from line and arc segments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Path {
    pub segments: Vec<PathSegment>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(mut self, x: f64, y: f64) -> Self {
        self.segments.push(PathSegment::MoveTo { x, y });
        self
    }

    pub fn line_to(mut self, x: f64, y: f64) -> Self {
        self.segments.push(PathSegment::LineTo { x, y });
        self
    }

    pub fn arc(
        mut self,
        cx: f64,
        cy: f64,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        anticlockwise: bool,
    ) -> Self {
        self.segments.push(PathSegment::Arc {
            cx,
            cy,
            radius,
            start_angle,
            end_angle,
            anticlockwise,
        });
        self
    }

    pub fn close(mut self) -> Self {
        self.segments.push(PathSegment::Close);
        self
    }

    /// Open polyline through `points`.
    pub fn polyline(points: &[(f64, f64)]) -> Self {
        let mut path = Self::new();
        for (i, &(x, y)) in points.iter().enumerate() {
            path = if i == 0 { path.move_to(x, y) } else { path.line_to(x, y) };
        }
        path
    }

    /// Full circle, suitable for filling.
    pub fn circle(cx: f64, cy: f64, radius: f64) -> Self {
        Self::new()
            .arc(cx, cy, radius, 0.0, std::f64::consts::TAU, false)
            .close()
    }
}

/// Text measurement for a font family at a given size.
pub trait TextMetrics {
    fn text_width(&self, text: &str, family: &str, size: f64) -> f64;
}

/// Deterministic width estimate from per-character advance classes.
///
/// Widths are linear in the font size, so measurements scale exactly with
/// the render scale.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproxMetrics;

impl ApproxMetrics {
    fn advance(c: char) -> f64 {
        match c {
            ' ' => 0.28,
            'A'..='Z' | '%' | '@' | '#' => 0.68,
            'a'..='z' | '0'..='9' => 0.52,
            c if c.is_ascii() => 0.33,
            _ => 0.6,
        }
    }
}

impl TextMetrics for ApproxMetrics {
    fn text_width(&self, text: &str, _family: &str, size: f64) -> f64 {
        text.chars().map(Self::advance).sum::<f64>() * size
    }
}

/// The active font of a surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    pub family: String,
    pub size: f64,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            family: super::constants::DEFAULT_TEXT_FONT.to_string(),
            size: 10.0,
        }
    }
}

/// Primitive drawing operations plus text measurement.
pub trait Surface {
    fn width(&self) -> f64;
    fn height(&self) -> f64;

    fn set_font(&mut self, family: &str, size: f64);
    fn set_fill_color(&mut self, color: &str);
    fn set_stroke_color(&mut self, color: &str);

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn stroke_path(&mut self, path: &Path, line_width: f64);
    fn fill_path(&mut self, path: &Path);
    /// Draw `text` in the active font with its baseline at `y`.
    fn fill_text(&mut self, text: &str, x: f64, y: f64);

    /// Width of `text` in the active font.
    fn measure_text(&self, text: &str) -> f64;
}
