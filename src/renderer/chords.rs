//! Chord symbols, their modifier glyphs, and time signatures.

use std::f64::consts::PI;

use crate::glyph::ChordToken;
use crate::model::TimeSignature;

use super::constants::*;
use super::style::StyleState;
use super::surface::{Path, Surface};

// ═══════════════════════════════════════════════════════════════════════
// Chords
// ═══════════════════════════════════════════════════════════════════════

/// Draw a mapped chord at `x` on the system whose top is `y`.
///
/// The chord font must already be active; ring and pause glyphs are sized
/// from the measured chord string.
pub(super) fn render_chord<S: Surface + ?Sized>(
    surface: &mut S,
    st: &StyleState,
    scale: f64,
    token: &ChordToken,
    x: f64,
    y: f64,
) {
    surface.fill_text(&token.glyphs, x, y + st.chord_size);

    let m = token.modifiers;
    if m.push && m.choke {
        render_choke(surface, st, scale, x - CHOKE_BESIDE_PUSH * scale, y);
        render_push(surface, st, x + PUSH_BESIDE_CHOKE * scale, y);
    } else if m.push && m.pause {
        render_pause(surface, st, &token.glyphs, x, y - st.push_height);
        render_push(surface, st, x, y + PUSH_PAUSE_DROP * scale);
    } else {
        if m.push {
            render_push(surface, st, x, y);
        }
        if m.choke {
            render_choke(surface, st, scale, x, y);
        }
        if m.pause {
            render_pause(surface, st, &token.glyphs, x, y);
        }
    }

    if m.ring {
        render_ring(surface, st, &token.glyphs, x, y);
    }
}

/// Open chevron pointing right.
fn render_push<S: Surface + ?Sized>(surface: &mut S, st: &StyleState, x: f64, y: f64) {
    let top = y - st.chord_size + st.push_offset;
    let bot = top + st.push_height;
    let mid = (top + bot) / 2.0;
    let path = Path::polyline(&[(x, top), (x + st.push_width, mid), (x, bot)]);
    surface.stroke_path(&path, st.stroke_width);
}

/// Upward wedge.
fn render_choke<S: Surface + ?Sized>(surface: &mut S, st: &StyleState, scale: f64, x: f64, y: f64) {
    let left = x + CHOKE_INSET * scale;
    let right = x - CHOKE_INSET * scale + st.choke_width;
    let center = (left + right) / 2.0;
    let top = y - st.chord_size + st.choke_offset;
    let bot = top + st.choke_height;
    let path = Path::polyline(&[(left, bot), (center, top), (right, bot)]);
    surface.stroke_path(&path, st.stroke_width);
}

/// Diamond around the chord string.
fn render_ring<S: Surface + ?Sized>(surface: &mut S, st: &StyleState, glyphs: &str, x: f64, y: f64) {
    let w = surface.measure_text(glyphs);
    let left = x - st.ring_x_margin + st.ring_x_offset;
    let right = x + w + st.ring_x_margin + st.ring_x_offset;
    let top = y - st.ring_y_margin + st.ring_y_offset;
    let bottom = y + st.chord_size + st.ring_y_margin + st.ring_y_offset;
    let cx = (left + right) / 2.0;
    let cy = (top + bottom) / 2.0;
    let path = Path::polyline(&[(cx, top), (right, cy), (cx, bottom), (left, cy), (cx, top)]);
    surface.stroke_path(&path, st.stroke_width);
}

/// Fermata: an upper half circle with a dot, centred over the chord.
fn render_pause<S: Surface + ?Sized>(surface: &mut S, st: &StyleState, glyphs: &str, x: f64, y: f64) {
    let w = surface.measure_text(glyphs);
    let cx = x + w / 2.0;
    let cy = y + st.pause_y_offset;
    let arc = Path::new().arc(cx, cy, st.pause_line_radius, 0.0, PI, true);
    surface.stroke_path(&arc, st.stroke_width);
    surface.fill_path(&Path::circle(cx, cy, st.pause_dot_radius));
}

// ═══════════════════════════════════════════════════════════════════════
// Time signature
// ═══════════════════════════════════════════════════════════════════════

/// Stacked digits left of the bar starting at `x`. Leaves the small font
/// active.
pub(super) fn render_time_signature<S: Surface + ?Sized>(
    surface: &mut S,
    st: &StyleState,
    time: TimeSignature,
    x: f64,
    y: f64,
) {
    let size = st.chord_size / TIME_SIG_DIVISOR;
    let tx = x - st.barline_padding;
    surface.set_font(&st.chord_font, size);
    surface.fill_text(&time.numerator.to_string(), tx, y + size);
    surface.fill_text(&time.denominator.to_string(), tx, y + 2.0 * size);
}
