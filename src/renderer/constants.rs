//! Shared constants for the chart renderer (all in unscaled user units).

// ── Page ────────────────────────────────────────────────────────────
pub(crate) const DEFAULT_PAGE_WIDTH: f64 = 425.0;
pub(crate) const DEFAULT_PAGE_HEIGHT: f64 = DEFAULT_PAGE_WIDTH * std::f64::consts::SQRT_2;

// ── Fonts & colors ──────────────────────────────────────────────────
pub(crate) const DEFAULT_TEXT_FONT: &str = "Arial";
pub(crate) const DEFAULT_CHORD_FONT: &str = "ChordletType";
pub(crate) const DEFAULT_DRAW_COLOR: &str = "#000000";
pub(crate) const DEFAULT_BACKGROUND_COLOR: &str = "#ffffff";
pub(crate) const DEFAULT_COMMENT_DELIM: char = '!';

// ── Fixed offsets not exposed as pragmas ────────────────────────────
pub(super) const CHOKE_INSET: f64 = 1.0; // choke wedge inset from each side
pub(super) const CHOKE_BESIDE_PUSH: f64 = 1.0; // choke pulled left when paired with a push
pub(super) const PUSH_BESIDE_CHOKE: f64 = 8.0; // push drawn right of a choke
pub(super) const PUSH_PAUSE_DROP: f64 = 2.0; // push drawn below a pause
pub(super) const TIME_SIG_DIVISOR: f64 = 1.8; // time signature digits vs chord size
pub(super) const REPEAT_COUNT_SHIFT: f64 = 1.4; // "xN" offset in label widths
pub(super) const UNTIL_CUE_SHIFT: f64 = 1.2; // "Until cue" offset in label widths
pub(super) const REPEAT_DOT_SPACING: f64 = 3.0; // dot distance in barline spacings
