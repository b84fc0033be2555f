//! Style state — every parameter pragmas can change, plus the save/restore
//! stack used by `#push` / `#pop`.

use serde::{Deserialize, Serialize};

use super::constants::*;

/// A scaled length parameter of [`StyleState`], addressable by pragma.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Length {
    BarlinePadding,
    BarlineSpacing,
    BarlineWidth,
    FinalBarlineWidth,
    RepeatRadius,
    RepeatDotOffset,
    MarginTop,
    MarginRight,
    MarginBottom,
    MarginLeft,
    ChordSize,
    LabelSize,
    RepeatNumSize,
    TitleSize,
    SubtitleSize,
    AuthorSize,
    CopyrightSize,
    KeySize,
    KeyOffset,
    KeyPadding,
    KeyBoxWidth,
    TempoSize,
    TempoBreak,
    FirstLineOffset,
    SystemOffset,
    LabelOffset,
    RepeatNumOffset,
    BreakSize,
    StrokeWidth,
    PushOffset,
    PushWidth,
    PushHeight,
    RingXOffset,
    RingYOffset,
    RingXMargin,
    RingYMargin,
    ChokeOffset,
    ChokeWidth,
    ChokeHeight,
    PauseYOffset,
    PauseLineRadius,
    PauseDotRadius,
}

/// A boolean parameter of [`StyleState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Flag {
    DrawBarlines,
    KeyBox,
    LockCopyright,
    UseFinalBarline,
}

/// All configurable layout and appearance parameters.
///
/// Lengths are stored already multiplied by the render scale. The page
/// background and the comment delimiter are not part of the style: they are
/// resolved from the whole document before drawing (see `render` and
/// [`parse_document`](crate::tokenizer::parse_document)).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleState {
    // Barlines
    pub barline_padding: f64,
    pub barline_spacing: f64,
    pub barline_width: f64,
    pub final_barline_width: f64,
    /// Extra barline height beyond the chord size
    pub barline_overhang: f64,
    pub repeat_radius: f64,
    pub repeat_dot_offset: f64,

    // Margins
    pub margin_top: f64,
    pub margin_right: f64,
    pub margin_bottom: f64,
    pub margin_left: f64,

    // Text sizes
    pub chord_size: f64,
    pub label_size: f64,
    pub repeat_num_size: f64,
    pub title_size: f64,
    pub subtitle_size: f64,
    pub author_size: f64,
    pub copyright_size: f64,

    // Key box
    pub key_size: f64,
    pub key_offset: f64,
    pub key_padding: f64,
    pub key_box_width: f64,

    // Vertical rhythm
    pub tempo_size: f64,
    pub tempo_break: f64,
    pub first_line_offset: f64,
    pub system_offset: f64,
    pub label_offset: f64,
    pub repeat_num_offset: f64,
    pub break_size: f64,

    // Modifier glyphs
    pub stroke_width: f64,
    pub push_offset: f64,
    pub push_width: f64,
    pub push_height: f64,
    pub ring_x_offset: f64,
    pub ring_y_offset: f64,
    pub ring_x_margin: f64,
    pub ring_y_margin: f64,
    pub choke_offset: f64,
    pub choke_width: f64,
    pub choke_height: f64,
    pub pause_y_offset: f64,
    pub pause_line_radius: f64,
    pub pause_dot_radius: f64,

    // Flags
    pub draw_barlines: bool,
    pub key_box: bool,
    pub lock_copyright: bool,
    pub use_final_barline: bool,

    // Fonts and colors
    pub text_font: String,
    pub chord_font: String,
    pub draw_color: String,
}

impl StyleState {
    /// Default style with every length multiplied by `scale`.
    pub fn new(scale: f64) -> Self {
        Self {
            barline_padding: 8.0 * scale,
            barline_spacing: 1.0 * scale,
            barline_width: 1.0 * scale,
            final_barline_width: 2.0 * scale,
            barline_overhang: 2.0 * scale,
            repeat_radius: 1.0 * scale,
            repeat_dot_offset: 1.0 * scale,

            margin_top: 14.0 * scale,
            margin_right: 22.0 * scale,
            margin_bottom: 22.0 * scale,
            margin_left: 25.0 * scale,

            chord_size: 14.0 * scale,
            label_size: 12.0 * scale,
            repeat_num_size: 10.0 * scale,
            title_size: 20.0 * scale,
            subtitle_size: 14.0 * scale,
            author_size: 12.0 * scale,
            copyright_size: 8.0 * scale,

            key_size: 18.0 * scale,
            key_offset: 16.0 * scale,
            key_padding: 2.0 * scale,
            key_box_width: 1.0 * scale,

            tempo_size: 12.0 * scale,
            tempo_break: 6.0 * scale,
            first_line_offset: 4.0 * scale,
            system_offset: 14.0 * scale,
            label_offset: 10.0 * scale,
            repeat_num_offset: 1.5 * scale,
            break_size: 10.0 * scale,

            stroke_width: 1.0 * scale,
            push_offset: 8.0 * scale,
            push_width: 7.0 * scale,
            push_height: 6.0 * scale,
            ring_x_offset: 0.0,
            ring_y_offset: 2.0 * scale,
            ring_x_margin: 5.0 * scale,
            ring_y_margin: 4.0 * scale,
            choke_offset: 8.0 * scale,
            choke_width: 8.0 * scale,
            choke_height: 6.0 * scale,
            pause_y_offset: 0.0,
            pause_line_radius: 4.0 * scale,
            pause_dot_radius: 1.0 * scale,

            draw_barlines: true,
            key_box: true,
            lock_copyright: true,
            use_final_barline: true,

            text_font: DEFAULT_TEXT_FONT.to_string(),
            chord_font: DEFAULT_CHORD_FONT.to_string(),
            draw_color: DEFAULT_DRAW_COLOR.to_string(),
        }
    }

    pub fn length_mut(&mut self, which: Length) -> &mut f64 {
        match which {
            Length::BarlinePadding => &mut self.barline_padding,
            Length::BarlineSpacing => &mut self.barline_spacing,
            Length::BarlineWidth => &mut self.barline_width,
            Length::FinalBarlineWidth => &mut self.final_barline_width,
            Length::RepeatRadius => &mut self.repeat_radius,
            Length::RepeatDotOffset => &mut self.repeat_dot_offset,
            Length::MarginTop => &mut self.margin_top,
            Length::MarginRight => &mut self.margin_right,
            Length::MarginBottom => &mut self.margin_bottom,
            Length::MarginLeft => &mut self.margin_left,
            Length::ChordSize => &mut self.chord_size,
            Length::LabelSize => &mut self.label_size,
            Length::RepeatNumSize => &mut self.repeat_num_size,
            Length::TitleSize => &mut self.title_size,
            Length::SubtitleSize => &mut self.subtitle_size,
            Length::AuthorSize => &mut self.author_size,
            Length::CopyrightSize => &mut self.copyright_size,
            Length::KeySize => &mut self.key_size,
            Length::KeyOffset => &mut self.key_offset,
            Length::KeyPadding => &mut self.key_padding,
            Length::KeyBoxWidth => &mut self.key_box_width,
            Length::TempoSize => &mut self.tempo_size,
            Length::TempoBreak => &mut self.tempo_break,
            Length::FirstLineOffset => &mut self.first_line_offset,
            Length::SystemOffset => &mut self.system_offset,
            Length::LabelOffset => &mut self.label_offset,
            Length::RepeatNumOffset => &mut self.repeat_num_offset,
            Length::BreakSize => &mut self.break_size,
            Length::StrokeWidth => &mut self.stroke_width,
            Length::PushOffset => &mut self.push_offset,
            Length::PushWidth => &mut self.push_width,
            Length::PushHeight => &mut self.push_height,
            Length::RingXOffset => &mut self.ring_x_offset,
            Length::RingYOffset => &mut self.ring_y_offset,
            Length::RingXMargin => &mut self.ring_x_margin,
            Length::RingYMargin => &mut self.ring_y_margin,
            Length::ChokeOffset => &mut self.choke_offset,
            Length::ChokeWidth => &mut self.choke_width,
            Length::ChokeHeight => &mut self.choke_height,
            Length::PauseYOffset => &mut self.pause_y_offset,
            Length::PauseLineRadius => &mut self.pause_line_radius,
            Length::PauseDotRadius => &mut self.pause_dot_radius,
        }
    }

    pub fn flag_mut(&mut self, which: Flag) -> &mut bool {
        match which {
            Flag::DrawBarlines => &mut self.draw_barlines,
            Flag::KeyBox => &mut self.key_box,
            Flag::LockCopyright => &mut self.lock_copyright,
            Flag::UseFinalBarline => &mut self.use_final_barline,
        }
    }
}

impl Default for StyleState {
    fn default() -> Self {
        Self::new(1.0)
    }
}

/// Saved style snapshots. Append on push, remove from the end on pop.
#[derive(Debug, Clone, Default)]
pub struct StyleStack {
    saved: Vec<StyleState>,
}

impl StyleStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, state: &StyleState) {
        self.saved.push(state.clone());
    }

    /// The most recent snapshot, or `None` when nothing was pushed.
    pub fn pop(&mut self) -> Option<StyleState> {
        self.saved.pop()
    }

    pub fn depth(&self) -> usize {
        self.saved.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lengths_are_scaled() {
        let base = StyleState::new(1.0);
        let big = StyleState::new(2.5);
        assert_eq!(big.chord_size, base.chord_size * 2.5);
        assert_eq!(big.margin_left, base.margin_left * 2.5);
        assert_eq!(big.pause_dot_radius, 2.5);
        assert_eq!(big.text_font, base.text_font);
    }

    #[test]
    fn length_accessors_agree() {
        let mut style = StyleState::default();
        *style.length_mut(Length::SystemOffset) = 40.0;
        assert_eq!(style.system_offset, 40.0);
    }

    #[test]
    fn stack_restores_snapshots_in_reverse_order() {
        let mut stack = StyleStack::new();
        let mut style = StyleState::default();
        stack.push(&style);
        style.chord_size = 30.0;
        stack.push(&style);
        style.chord_size = 50.0;

        assert_eq!(stack.depth(), 2);
        assert_eq!(stack.pop().map(|s| s.chord_size), Some(30.0));
        assert_eq!(stack.pop().map(|s| s.chord_size), Some(14.0));
        assert!(stack.pop().is_none());
    }
}
