//! SVG builder — accumulates SVG elements and produces the final string.

use std::f64::consts::{PI, TAU};

use super::surface::{ApproxMetrics, FontSpec, Path, PathSegment, Surface, TextMetrics};

// ═══════════════════════════════════════════════════════════════════════
// SvgBuilder
// ═══════════════════════════════════════════════════════════════════════

pub struct SvgBuilder<M = ApproxMetrics> {
    elements: Vec<String>,
    width: f64,
    height: f64,
    font: FontSpec,
    fill: String,
    stroke: String,
    metrics: M,
}

impl SvgBuilder<ApproxMetrics> {
    pub fn new(width: f64, height: f64) -> Self {
        Self::with_metrics(width, height, ApproxMetrics)
    }
}

impl<M: TextMetrics> SvgBuilder<M> {
    pub fn with_metrics(width: f64, height: f64, metrics: M) -> Self {
        Self {
            elements: Vec::new(),
            width,
            height,
            font: FontSpec::default(),
            fill: "#000000".to_string(),
            stroke: "#000000".to_string(),
            metrics,
        }
    }

    pub fn build(self) -> String {
        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {:.2} {:.2}" width="{:.2}" height="{:.2}">"#,
            self.width, self.height, self.width, self.height
        );
        svg.push('\n');
        for el in &self.elements {
            svg.push_str("  ");
            svg.push_str(el);
            svg.push('\n');
        }
        svg.push_str("</svg>\n");
        svg
    }
}

impl<M: TextMetrics> Surface for SvgBuilder<M> {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn set_font(&mut self, family: &str, size: f64) {
        self.font = FontSpec { family: family.to_string(), size };
    }

    fn set_fill_color(&mut self, color: &str) {
        self.fill = color.to_string();
    }

    fn set_stroke_color(&mut self, color: &str) {
        self.stroke = color.to_string();
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.elements.push(format!(
            r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}"/>"#,
            x, y, width, height, escape(&self.fill)
        ));
    }

    fn stroke_path(&mut self, path: &Path, line_width: f64) {
        self.elements.push(format!(
            r#"<path d="{}" fill="none" stroke="{}" stroke-width="{:.2}"/>"#,
            path_data(path),
            escape(&self.stroke),
            line_width
        ));
    }

    fn fill_path(&mut self, path: &Path) {
        self.elements.push(format!(
            r#"<path d="{}" fill="{}"/>"#,
            path_data(path),
            escape(&self.fill)
        ));
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        self.elements.push(format!(
            r#"<text x="{:.2}" y="{:.2}" font-family="{}" font-size="{:.2}" fill="{}">{}</text>"#,
            x,
            y,
            escape(&self.font.family),
            self.font.size,
            escape(&self.fill),
            escape(text)
        ));
    }

    fn measure_text(&self, text: &str) -> f64 {
        self.metrics.text_width(text, &self.font.family, self.font.size)
    }
}

/// Escape markup characters and drop characters XML 1.0 does not allow.
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\t' | '\n' | '\r' => out.push(c),
            c if c < ' ' || c == '\u{fffe}' || c == '\u{ffff}' => {}
            c => out.push(c),
        }
    }
    out
}

// ═══════════════════════════════════════════════════════════════════════
// Path → SVG `d` attribute
// ═══════════════════════════════════════════════════════════════════════

/// Convert a [`Path`] to SVG path data.
///
/// Arcs continue from the current point with a line (or start the subpath
/// with a move). Full circles become two half arcs, since a single SVG arc
/// cannot end where it starts.
pub(super) fn path_data(path: &Path) -> String {
    let mut d = String::new();
    let mut has_point = false;

    for segment in &path.segments {
        match *segment {
            PathSegment::MoveTo { x, y } => {
                d.push_str(&format!("M{:.2},{:.2} ", x, y));
                has_point = true;
            }
            PathSegment::LineTo { x, y } => {
                let cmd = if has_point { 'L' } else { 'M' };
                d.push_str(&format!("{}{:.2},{:.2} ", cmd, x, y));
                has_point = true;
            }
            PathSegment::Arc {
                cx,
                cy,
                radius,
                start_angle,
                end_angle,
                anticlockwise,
            } => {
                let point = |a: f64| (cx + radius * a.cos(), cy + radius * a.sin());
                let (sx, sy) = point(start_angle);
                let cmd = if has_point { 'L' } else { 'M' };
                d.push_str(&format!("{}{:.2},{:.2} ", cmd, sx, sy));
                has_point = true;

                let sweep_flag = if anticlockwise { 0 } else { 1 };
                let span = if anticlockwise {
                    start_angle - end_angle
                } else {
                    end_angle - start_angle
                };

                if span.abs() >= TAU {
                    let (mx, my) = point(start_angle + PI);
                    d.push_str(&format!(
                        "A{r:.2},{r:.2} 0 0 {f} {:.2},{:.2} A{r:.2},{r:.2} 0 0 {f} {:.2},{:.2} ",
                        mx,
                        my,
                        sx,
                        sy,
                        r = radius,
                        f = sweep_flag
                    ));
                } else {
                    let span = span.rem_euclid(TAU);
                    let large_arc = if span > PI { 1 } else { 0 };
                    let (ex, ey) = point(end_angle);
                    d.push_str(&format!(
                        "A{r:.2},{r:.2} 0 {} {} {:.2},{:.2} ",
                        large_arc,
                        sweep_flag,
                        ex,
                        ey,
                        r = radius
                    ));
                }
            }
            PathSegment::Close => d.push_str("Z "),
        }
    }

    d.trim_end().to_string()
}
