//! Command recorder — a [`Surface`] that keeps every primitive as a
//! serializable [`DrawCommand`] so a pass can be inspected, exported as JSON
//! or replayed onto another surface.

use serde::{Deserialize, Serialize};

use super::surface::{ApproxMetrics, FontSpec, Path, Surface, TextMetrics};

/// One recorded drawing primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "kebab-case")]
pub enum DrawCommand {
    SetFont { family: String, size: f64 },
    SetFillColor { color: String },
    SetStrokeColor { color: String },
    FillRect { x: f64, y: f64, width: f64, height: f64 },
    StrokePath { path: Path, line_width: f64 },
    FillPath { path: Path },
    FillText { text: String, x: f64, y: f64 },
}

impl DrawCommand {
    /// Issue this command on `surface`.
    pub fn replay<S: Surface + ?Sized>(&self, surface: &mut S) {
        match self {
            DrawCommand::SetFont { family, size } => surface.set_font(family, *size),
            DrawCommand::SetFillColor { color } => surface.set_fill_color(color),
            DrawCommand::SetStrokeColor { color } => surface.set_stroke_color(color),
            DrawCommand::FillRect { x, y, width, height } => {
                surface.fill_rect(*x, *y, *width, *height)
            }
            DrawCommand::StrokePath { path, line_width } => surface.stroke_path(path, *line_width),
            DrawCommand::FillPath { path } => surface.fill_path(path),
            DrawCommand::FillText { text, x, y } => surface.fill_text(text, *x, *y),
        }
    }
}

pub struct CommandRecorder<M = ApproxMetrics> {
    width: f64,
    height: f64,
    font: FontSpec,
    metrics: M,
    commands: Vec<DrawCommand>,
}

impl CommandRecorder<ApproxMetrics> {
    pub fn new(width: f64, height: f64) -> Self {
        Self::with_metrics(width, height, ApproxMetrics)
    }
}

impl<M: TextMetrics> CommandRecorder<M> {
    pub fn with_metrics(width: f64, height: f64, metrics: M) -> Self {
        Self {
            width,
            height,
            font: FontSpec::default(),
            metrics,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }

    /// Replay every recorded command, in order, onto `target`.
    pub fn replay<S: Surface + ?Sized>(&self, target: &mut S) {
        for command in &self.commands {
            command.replay(target);
        }
    }
}

impl<M: TextMetrics> Surface for CommandRecorder<M> {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn set_font(&mut self, family: &str, size: f64) {
        self.font = FontSpec { family: family.to_string(), size };
        self.commands.push(DrawCommand::SetFont { family: family.to_string(), size });
    }

    fn set_fill_color(&mut self, color: &str) {
        self.commands.push(DrawCommand::SetFillColor { color: color.to_string() });
    }

    fn set_stroke_color(&mut self, color: &str) {
        self.commands.push(DrawCommand::SetStrokeColor { color: color.to_string() });
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.commands.push(DrawCommand::FillRect { x, y, width, height });
    }

    fn stroke_path(&mut self, path: &Path, line_width: f64) {
        self.commands.push(DrawCommand::StrokePath { path: path.clone(), line_width });
    }

    fn fill_path(&mut self, path: &Path) {
        self.commands.push(DrawCommand::FillPath { path: path.clone() });
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        self.commands.push(DrawCommand::FillText { text: text.to_string(), x, y });
    }

    fn measure_text(&self, text: &str) -> f64 {
        self.metrics.text_width(text, &self.font.family, self.font.size)
    }
}
