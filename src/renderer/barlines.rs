//! Barline recipes and repeat-count labels.
//!
//! Every barline is built from filled rules and dots sized by the style, so
//! its geometry scales with the render scale.

use crate::model::{BarlineKind, RepeatCount};

use super::constants::*;
use super::style::StyleState;
use super::surface::{Path, Surface};

// ═══════════════════════════════════════════════════════════════════════
// Barlines
// ═══════════════════════════════════════════════════════════════════════

/// Draw a barline of `kind` ending at `x`, with its top at `y`.
///
/// Nothing is drawn when barlines are switched off. A repeat count is only
/// drawn for end-repeat and double-repeat kinds.
pub(super) fn render_barline<S: Surface + ?Sized>(
    surface: &mut S,
    st: &StyleState,
    kind: BarlineKind,
    repeat: Option<RepeatCount>,
    x: f64,
    y: f64,
) {
    if !st.draw_barlines {
        return;
    }

    let h = st.chord_size + st.barline_overhang;
    let bw = st.barline_width;
    let fbw = st.final_barline_width;
    let bs = st.barline_spacing;
    let bx = x - bw;
    let dots_gap = REPEAT_DOT_SPACING * bs;

    match kind {
        BarlineKind::Single => surface.fill_rect(bx, y, bw, h),
        BarlineKind::Double => {
            surface.fill_rect(bx - 2.0 * bw - bs, y, bw, h);
            surface.fill_rect(bx - bw, y, bw, h);
        }
        BarlineKind::StartRepeat => {
            surface.fill_rect(bx, y, fbw, h);
            surface.fill_rect(bx + fbw + bs, y, bw, h);
            render_repeat_dots(surface, st, bx + fbw + bw + dots_gap, y);
        }
        BarlineKind::EndRepeat => {
            surface.fill_rect(bx - fbw - bw - bs, y, bw, h);
            surface.fill_rect(bx - fbw, y, fbw, h);
            render_repeat_dots(surface, st, bx - fbw - bw - dots_gap, y);
        }
        BarlineKind::DoubleRepeat => {
            surface.fill_rect(bx - fbw - bw - bs, y, bw, h);
            surface.fill_rect(bx + bs, y, bw, h);
            surface.fill_rect(bx - fbw, y, fbw, h);
            render_repeat_dots(surface, st, bx - fbw - bw - dots_gap, y);
            render_repeat_dots(surface, st, bx + bw + dots_gap, y);
        }
        BarlineKind::Final => {
            surface.fill_rect(x - fbw - bw - bs, y, bw, h);
            surface.fill_rect(x - fbw, y, fbw, h);
        }
    }

    if kind.carries_repeat_count() {
        if let Some(count) = repeat {
            render_repeat_count(surface, st, count, x, y);
        }
    }
}

fn render_repeat_dots<S: Surface + ?Sized>(surface: &mut S, st: &StyleState, cx: f64, y: f64) {
    let top = y + st.repeat_dot_offset;
    for cy in [top + st.chord_size / 3.0, top + st.chord_size / 3.0 * 2.0] {
        surface.fill_path(&Path::circle(cx, cy, st.repeat_radius));
    }
}

/// `xN` or `Until cue`, placed left of the barline just above the system.
fn render_repeat_count<S: Surface + ?Sized>(
    surface: &mut S,
    st: &StyleState,
    count: RepeatCount,
    x: f64,
    y: f64,
) {
    let text = count.label();
    let shift = match count {
        RepeatCount::Times(_) => REPEAT_COUNT_SHIFT,
        RepeatCount::UntilCue => UNTIL_CUE_SHIFT,
    };

    surface.set_font(&st.text_font, st.repeat_num_size);
    let w = surface.measure_text(&text);
    surface.fill_text(&text, x - w * shift, y - st.repeat_num_offset);
}
