//! Chart renderer — walks a chord chart line by line and draws it onto a
//! [`Surface`].
//!
//! All state of a pass lives in a [`RenderSession`] created for that pass,
//! so rendering the same text twice (at any scale) never shares style,
//! cursor or diagnostics.

mod barlines;
mod chords;
mod constants;
mod layout;
mod pragma;
mod recorder;
mod style;
mod surface;
mod svg_builder;
mod text;

use serde::{Deserialize, Serialize};

use crate::error::{ChrdError, Diagnostic, Result};
use crate::model::*;
use crate::tokenizer::{parse_document, split_directive};

pub(crate) use constants::DEFAULT_COMMENT_DELIM;
use constants::*;

pub use pragma::Pragma;
pub use recorder::{CommandRecorder, DrawCommand};
pub use style::{Flag, Length, StyleStack, StyleState};
pub use surface::{ApproxMetrics, FontSpec, Path, PathSegment, Surface, TextMetrics};
pub use svg_builder::SvgBuilder;

// ═══════════════════════════════════════════════════════════════════════
// Public API
// ═══════════════════════════════════════════════════════════════════════

/// Canvas size in user units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

impl PageSize {
    /// The default portrait page (ISO proportions) at `scale`.
    pub fn for_scale(scale: f64) -> Self {
        Self {
            width: DEFAULT_PAGE_WIDTH * scale,
            height: DEFAULT_PAGE_HEIGHT * scale,
        }
    }
}

/// Everything a pass produces besides the drawing itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderOutput {
    pub meta: DocumentMeta,
    /// Problems found in the document, ordered by source line
    pub diagnostics: Vec<Diagnostic>,
    pub lines: Vec<Line>,
    /// Vertical cursor after the last line
    pub cursor_y: f64,
}

/// Render chart `text` at `scale` onto `surface`.
///
/// The canvas size is taken from the surface. Problems inside the document
/// never stop the pass; they are returned as diagnostics.
pub fn render<S: Surface + ?Sized>(text: &str, scale: f64, surface: &mut S) -> Result<RenderOutput> {
    if !(scale.is_finite() && scale > 0.0) {
        return Err(ChrdError::InvalidScale(scale));
    }

    let (lines, mut diagnostics) = parse_document(text);
    let mut session = RenderSession::new(scale, surface.width(), surface.height());

    let background = document_background(&lines).unwrap_or(DEFAULT_BACKGROUND_COLOR);
    surface.set_fill_color(background);
    surface.fill_rect(0.0, 0.0, session.width, session.height);
    session.apply_colors(surface);

    for line in &lines {
        match &line.kind {
            LineKind::Comment => {}
            LineKind::Pragma => session.process_pragma(&line.text, line.number, surface),
            LineKind::Content(content) => session.draw_content_line(content, surface),
        }
    }

    let cursor_y = session.cursor_y;
    let meta = session.meta;
    diagnostics.extend(session.diagnostics);
    diagnostics.sort_by_key(Diagnostic::line);

    Ok(RenderOutput {
        meta,
        diagnostics,
        lines,
        cursor_y,
    })
}

/// The colour of the last `#background` pragma with an argument.
fn document_background(lines: &[Line]) -> Option<&str> {
    lines
        .iter()
        .filter(|line| line.kind == LineKind::Pragma)
        .filter_map(|line| match split_directive(&line.text) {
            ("background", arg) => arg.split_whitespace().next(),
            _ => None,
        })
        .last()
}

// ═══════════════════════════════════════════════════════════════════════
// RenderSession
// ═══════════════════════════════════════════════════════════════════════

/// Mutable state of one rendering pass.
pub struct RenderSession {
    scale: f64,
    width: f64,
    height: f64,
    style: StyleState,
    stack: StyleStack,
    /// Top of the next thing drawn
    cursor_y: f64,
    /// Set until `#start` or the first content line
    first_line: bool,
    meta: DocumentMeta,
    diagnostics: Vec<Diagnostic>,
}

impl RenderSession {
    pub fn new(scale: f64, width: f64, height: f64) -> Self {
        let style = StyleState::new(scale);
        Self {
            scale,
            width,
            height,
            cursor_y: style.margin_top,
            style,
            stack: StyleStack::new(),
            first_line: true,
            meta: DocumentMeta::default(),
            diagnostics: Vec::new(),
        }
    }

    pub fn style(&self) -> &StyleState {
        &self.style
    }

    pub fn cursor_y(&self) -> f64 {
        self.cursor_y
    }

    pub fn meta(&self) -> &DocumentMeta {
        &self.meta
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Number of styles saved by `#push` and not yet restored.
    pub fn saved_styles(&self) -> usize {
        self.stack.depth()
    }

    fn apply_colors<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.set_fill_color(&self.style.draw_color);
        surface.set_stroke_color(&self.style.draw_color);
    }
}
