//! Pragma processor — the closed set of directives and their effect on a
//! [`RenderSession`].

use crate::error::{report, Diagnostic};
use crate::tokenizer::split_directive;

use super::style::{Flag, Length};
use super::surface::Surface;
use super::RenderSession;

/// Every directive the renderer understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pragma {
    Version,
    Push,
    Pop,
    Start,
    Break,
    Include,

    // Text placed immediately
    Title,
    Subtitle,
    Author,
    Copyright,
    Key,
    Tempo,
    Label,
    LabelAt,

    /// Scaled numeric style value
    Length(Length),
    /// Boolean style value
    Flag(Flag),

    TextFont,
    ChordFont,
    Color,
    Background,
    CommentDelim,
}

impl Pragma {
    /// Look up a directive by name (without the leading `#`).
    pub fn from_name(name: &str) -> Option<Self> {
        let pragma = match name {
            "version" => Pragma::Version,
            "push" => Pragma::Push,
            "pop" => Pragma::Pop,
            "start" => Pragma::Start,
            "break" => Pragma::Break,
            "include" => Pragma::Include,

            "title" => Pragma::Title,
            "subtitle" => Pragma::Subtitle,
            "author" => Pragma::Author,
            "copyright" => Pragma::Copyright,
            "key" => Pragma::Key,
            "tempo" => Pragma::Tempo,
            "label" => Pragma::Label,
            "label_at" => Pragma::LabelAt,

            "text_font" => Pragma::TextFont,
            "chord_font" => Pragma::ChordFont,
            "color" => Pragma::Color,
            "background" => Pragma::Background,
            "comment_delim" => Pragma::CommentDelim,

            "draw_barlines" => Pragma::Flag(Flag::DrawBarlines),
            "key_box" => Pragma::Flag(Flag::KeyBox),
            "lock_copyright" => Pragma::Flag(Flag::LockCopyright),
            "use_final_barline" => Pragma::Flag(Flag::UseFinalBarline),

            "barline_padding" => Pragma::Length(Length::BarlinePadding),
            "barline_spacing" => Pragma::Length(Length::BarlineSpacing),
            "barline_width" => Pragma::Length(Length::BarlineWidth),
            "final_barline_width" => Pragma::Length(Length::FinalBarlineWidth),
            "repeat_radius" => Pragma::Length(Length::RepeatRadius),
            "repeat_dot_offset" => Pragma::Length(Length::RepeatDotOffset),
            "margin_top" => Pragma::Length(Length::MarginTop),
            "margin_right" => Pragma::Length(Length::MarginRight),
            "margin_bottom" => Pragma::Length(Length::MarginBottom),
            "margin_left" => Pragma::Length(Length::MarginLeft),
            "chord_size" => Pragma::Length(Length::ChordSize),
            "label_size" => Pragma::Length(Length::LabelSize),
            "repeat_num_size" => Pragma::Length(Length::RepeatNumSize),
            "title_size" => Pragma::Length(Length::TitleSize),
            "subtitle_size" => Pragma::Length(Length::SubtitleSize),
            "author_size" => Pragma::Length(Length::AuthorSize),
            "copyright_size" => Pragma::Length(Length::CopyrightSize),
            "key_size" => Pragma::Length(Length::KeySize),
            "key_offset" => Pragma::Length(Length::KeyOffset),
            "key_padding" => Pragma::Length(Length::KeyPadding),
            "key_box_width" => Pragma::Length(Length::KeyBoxWidth),
            "tempo_size" => Pragma::Length(Length::TempoSize),
            "tempo_break" => Pragma::Length(Length::TempoBreak),
            "first_offset" => Pragma::Length(Length::FirstLineOffset),
            "system_offset" => Pragma::Length(Length::SystemOffset),
            "label_offset" => Pragma::Length(Length::LabelOffset),
            "repeat_num_offset" => Pragma::Length(Length::RepeatNumOffset),
            "break_size" => Pragma::Length(Length::BreakSize),
            "stroke_width" => Pragma::Length(Length::StrokeWidth),
            "push_offset" => Pragma::Length(Length::PushOffset),
            "push_width" => Pragma::Length(Length::PushWidth),
            "push_height" => Pragma::Length(Length::PushHeight),
            "ring_x_offset" => Pragma::Length(Length::RingXOffset),
            "ring_y_offset" => Pragma::Length(Length::RingYOffset),
            "ring_x_margin" => Pragma::Length(Length::RingXMargin),
            "ring_y_margin" => Pragma::Length(Length::RingYMargin),
            "choke_offset" => Pragma::Length(Length::ChokeOffset),
            "choke_width" => Pragma::Length(Length::ChokeWidth),
            "choke_height" => Pragma::Length(Length::ChokeHeight),
            "pause_y_offset" => Pragma::Length(Length::PauseYOffset),
            "pause_line_radius" => Pragma::Length(Length::PauseLineRadius),
            "pause_dot_radius" => Pragma::Length(Length::PauseDotRadius),

            _ => return None,
        };
        Some(pragma)
    }
}

fn first_word(arg: &str) -> Option<&str> {
    arg.split_whitespace().next()
}

impl RenderSession {
    /// Apply one pragma line (comment already stripped) to the session,
    /// drawing onto `surface` where the pragma places text.
    ///
    /// Unknown names are ignored. `line` is the 1-based source line used
    /// for diagnostics.
    pub fn process_pragma<S: Surface + ?Sized>(&mut self, text: &str, line: usize, surface: &mut S) {
        let (name, arg) = split_directive(text);
        let Some(pragma) = Pragma::from_name(name) else {
            log::debug!("line {line}: ignoring unknown pragma #{name}");
            return;
        };

        match pragma {
            Pragma::Version => {
                if !arg.is_empty() {
                    self.meta.version = Some(arg.to_string());
                }
            }
            Pragma::Push => self.stack.push(&self.style),
            Pragma::Pop => {
                if let Some(saved) = self.stack.pop() {
                    self.style = saved;
                }
                self.apply_colors(surface);
            }
            Pragma::Start => {
                self.first_line = false;
                self.cursor_y += self.style.first_line_offset;
            }
            Pragma::Break => self.cursor_y += self.style.break_size,
            Pragma::Include => report(
                &mut self.diagnostics,
                Diagnostic::IncludeNotImplemented {
                    line,
                    target: first_word(arg).map(str::to_string),
                },
            ),

            Pragma::Title => self.draw_title(arg, surface),
            Pragma::Subtitle => self.draw_subtitle(arg, surface),
            Pragma::Author => self.draw_author(arg, surface),
            Pragma::Copyright => self.draw_copyright(arg, surface),
            Pragma::Key => self.draw_key(arg, surface),
            Pragma::Tempo => match first_word(arg).map(str::parse::<u32>) {
                Some(Ok(bpm)) if bpm > 0 => self.draw_tempo(bpm, surface),
                _ => report(
                    &mut self.diagnostics,
                    Diagnostic::InvalidNumber {
                        line,
                        pragma: name.to_string(),
                        value: arg.to_string(),
                    },
                ),
            },
            Pragma::Label => self.draw_label(arg, surface),
            Pragma::LabelAt => self.draw_label_at(arg, surface),

            Pragma::Length(which) => self.set_length(which, name, arg, line),
            Pragma::Flag(which) => *self.style.flag_mut(which) = first_word(arg) != Some("false"),

            Pragma::TextFont => {
                if !arg.is_empty() {
                    self.style.text_font = arg.to_string();
                }
            }
            Pragma::ChordFont => {
                if !arg.is_empty() {
                    self.style.chord_font = arg.to_string();
                }
            }
            Pragma::Color => {
                if let Some(color) = first_word(arg) {
                    self.style.draw_color = color.to_string();
                    self.apply_colors(surface);
                }
            }
            // Both take effect before drawing: the background in the pre-scan
            // of `render`, the delimiter while `parse_document` strips lines.
            Pragma::Background | Pragma::CommentDelim => {}
        }
    }

    fn set_length(&mut self, which: Length, name: &str, arg: &str, line: usize) {
        let value = first_word(arg).unwrap_or("");
        match value.parse::<f64>().map(|v| v * self.scale) {
            Ok(scaled) if scaled.is_finite() => *self.style.length_mut(which) = scaled,
            _ => report(
                &mut self.diagnostics,
                Diagnostic::InvalidNumber {
                    line,
                    pragma: name.to_string(),
                    value: value.to_string(),
                },
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{CommandRecorder, DrawCommand, StyleState};
    use pretty_assertions::assert_eq;

    fn session(scale: f64) -> (RenderSession, CommandRecorder) {
        let rec = CommandRecorder::new(425.0 * scale, 600.0 * scale);
        (RenderSession::new(scale, rec.width(), rec.height()), rec)
    }

    #[test]
    fn names_resolve() {
        assert_eq!(Pragma::from_name("first_offset"), Some(Pragma::Length(Length::FirstLineOffset)));
        assert_eq!(Pragma::from_name("key_box"), Some(Pragma::Flag(Flag::KeyBox)));
        assert_eq!(Pragma::from_name("label_at"), Some(Pragma::LabelAt));
        assert_eq!(Pragma::from_name("first_line_offset"), None);
        assert_eq!(Pragma::from_name("Title"), None);
    }

    #[test]
    fn numeric_values_are_scaled() {
        let (mut s, mut rec) = session(2.0);
        s.process_pragma("#chord_size 20", 1, &mut rec);
        s.process_pragma("#repeat_num_offset 1.5", 2, &mut rec);
        assert_eq!(s.style().chord_size, 40.0);
        assert_eq!(s.style().repeat_num_offset, 3.0);
        assert!(s.diagnostics().is_empty());
    }

    #[test]
    fn bad_number_keeps_value() {
        let (mut s, mut rec) = session(1.0);
        s.process_pragma("#margin_left wide", 4, &mut rec);
        s.process_pragma("#margin_top", 5, &mut rec);
        assert_eq!(s.style(), &StyleState::new(1.0));
        assert_eq!(
            s.diagnostics()[0],
            Diagnostic::InvalidNumber { line: 4, pragma: "margin_left".into(), value: "wide".into() }
        );
        assert_eq!(s.diagnostics().len(), 2);
    }

    #[test]
    fn overflowing_scaled_value_is_rejected() {
        let (mut s, mut rec) = session(4.0);
        s.process_pragma("#chord_size 1e308", 9, &mut rec);
        s.process_pragma("#margin_left inf", 10, &mut rec);
        assert_eq!(s.style(), &StyleState::new(4.0));
        assert_eq!(
            s.diagnostics()[0],
            Diagnostic::InvalidNumber { line: 9, pragma: "chord_size".into(), value: "1e308".into() }
        );
        assert_eq!(s.diagnostics().len(), 2);
    }

    #[test]
    fn flags_are_false_only_for_literal_false() {
        let (mut s, mut rec) = session(1.0);
        s.process_pragma("#draw_barlines false", 1, &mut rec);
        s.process_pragma("#key_box no", 2, &mut rec);
        assert!(!s.style().draw_barlines);
        assert!(s.style().key_box);
        s.process_pragma("#draw_barlines", 3, &mut rec);
        assert!(s.style().draw_barlines);
    }

    #[test]
    fn push_pop_restores_style() {
        let (mut s, mut rec) = session(1.5);
        s.process_pragma("#chord_size 30", 1, &mut rec);
        let before = s.style().clone();
        s.process_pragma("#push", 2, &mut rec);
        s.process_pragma("#chord_size 10", 3, &mut rec);
        s.process_pragma("#text_font Times New Roman", 4, &mut rec);
        s.process_pragma("#use_final_barline false", 5, &mut rec);
        s.process_pragma("#pop", 6, &mut rec);
        assert_eq!(s.style(), &before);
    }

    #[test]
    fn unmatched_pop_is_noop() {
        let (mut s, mut rec) = session(1.0);
        s.process_pragma("#color #ff0000", 1, &mut rec);
        let before = s.style().clone();
        s.process_pragma("#pop", 2, &mut rec);
        assert_eq!(s.style(), &before);
        assert!(s.diagnostics().is_empty());
    }

    #[test]
    fn color_applies_immediately() {
        let (mut s, mut rec) = session(1.0);
        s.process_pragma("#color #336699", 1, &mut rec);
        assert_eq!(s.style().draw_color, "#336699");
        assert_eq!(
            rec.commands(),
            &[
                DrawCommand::SetFillColor { color: "#336699".into() },
                DrawCommand::SetStrokeColor { color: "#336699".into() },
            ]
        );
    }

    #[test]
    fn structural_pragmas_move_cursor() {
        let (mut s, mut rec) = session(1.0);
        let top = s.cursor_y();
        s.process_pragma("#start", 1, &mut rec);
        s.process_pragma("#break", 2, &mut rec);
        assert_eq!(s.cursor_y(), top + 4.0 + 10.0);
        assert!(rec.commands().is_empty());
    }

    #[test]
    fn include_and_unknown() {
        let (mut s, mut rec) = session(1.0);
        s.process_pragma("#include other.chrd", 3, &mut rec);
        s.process_pragma("#sparkle yes", 4, &mut rec);
        assert_eq!(
            s.diagnostics(),
            &[Diagnostic::IncludeNotImplemented { line: 3, target: Some("other.chrd".into()) }]
        );
        assert!(rec.commands().is_empty());
    }

    #[test]
    fn string_pragmas() {
        let (mut s, mut rec) = session(1.0);
        s.process_pragma("#comment_delim ;;", 1, &mut rec);
        s.process_pragma("#background #eeeeee", 2, &mut rec);
        s.process_pragma("#chord_font", 3, &mut rec);
        s.process_pragma("#version 0.0.1", 4, &mut rec);
        // resolved before the drawing pass, so the session style is untouched
        assert_eq!(s.style(), &StyleState::new(1.0));
        assert!(rec.commands().is_empty());
        assert_eq!(s.meta().version.as_deref(), Some("0.0.1"));
    }
}
