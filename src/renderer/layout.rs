//! Content-line layout: splits the printable width into bars and bars into
//! chord slots, then draws chords, time signatures and barlines.

use crate::model::{BarlineKind, ContentLine};

use super::barlines::render_barline;
use super::chords::{render_chord, render_time_signature};
use super::surface::Surface;
use super::RenderSession;

impl RenderSession {
    pub(super) fn draw_content_line<S: Surface + ?Sized>(&mut self, line: &ContentLine, surface: &mut S) {
        if self.first_line {
            self.cursor_y += self.style.first_line_offset;
            self.first_line = false;
        }

        let st = &self.style;
        let y = self.cursor_y;
        let bar_count = line.bars.len().max(1) as f64;
        let bar_width = (self.width - st.margin_left - st.margin_right) / bar_count;
        let mut x = st.margin_left;

        render_barline(surface, st, line.leading, None, x, y);

        let last = line.bars.len().saturating_sub(1);
        for (i, bar) in line.bars.iter().enumerate() {
            surface.set_font(&st.chord_font, st.chord_size);

            let tokens = bar.chord_tokens();
            if !tokens.is_empty() {
                let chord_width = (bar_width - 2.0 * st.barline_padding) / tokens.len() as f64;
                for (j, token) in tokens.iter().enumerate() {
                    let cx = x + st.barline_padding + j as f64 * chord_width;
                    render_chord(surface, st, self.scale, token, cx, y);
                }
            }

            if let Some(time) = bar.time {
                render_time_signature(surface, st, time, x, y);
            }

            x += bar_width;

            let kind = if line.is_last
                && i == last
                && st.use_final_barline
                && bar.barline == BarlineKind::Single
            {
                BarlineKind::Final
            } else {
                bar.barline
            };
            render_barline(surface, st, kind, bar.repeat, x, y);
        }

        self.cursor_y += self.style.chord_size + self.style.system_offset;
    }
}

#[cfg(test)]
mod tests {
    use crate::renderer::{CommandRecorder, DrawCommand, RenderSession, Surface};
    use crate::tokenizer::tokenize_line;

    fn draw(text: &str, is_last: bool) -> (RenderSession, Vec<DrawCommand>) {
        let mut rec = CommandRecorder::new(425.0, 600.0);
        let mut session = RenderSession::new(1.0, rec.width(), rec.height());
        let mut diagnostics = Vec::new();
        let line = tokenize_line(text, 1, is_last, &mut diagnostics);
        session.draw_content_line(&line, &mut rec);
        (session, rec.into_commands())
    }

    fn chord_positions(commands: &[DrawCommand]) -> Vec<(String, f64, f64)> {
        commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillText { text, x, y } => Some((text.clone(), *x, *y)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn bars_split_printable_width() {
        let (session, commands) = draw("| Am G | F C", false);
        // 425 - 25 - 22 = 378 split into two bars of 189
        // first line offset 4 below margin_top 14
        assert_eq!(
            chord_positions(&commands),
            vec![
                ("Am".to_string(), 33.0, 32.0),
                ("G".to_string(), 33.0 + 86.5, 32.0),
                ("F".to_string(), 33.0 + 189.0, 32.0),
                ("C".to_string(), 33.0 + 189.0 + 86.5, 32.0),
            ]
        );
        assert_eq!(session.cursor_y(), 18.0 + 14.0 + 14.0);
    }

    #[test]
    fn final_barline_on_last_line() {
        let rect_count = |cmds: &[DrawCommand]| {
            cmds.iter().filter(|c| matches!(c, DrawCommand::FillRect { .. })).count()
        };
        // leading single + trailing single
        let (_, commands) = draw("| C", false);
        assert_eq!(rect_count(&commands), 2);
        // trailing becomes thin + thick
        let (_, commands) = draw("| C", true);
        assert_eq!(rect_count(&commands), 3);
        assert!(commands.iter().any(|c| matches!(
            c,
            DrawCommand::FillRect { x, width, .. } if *x == 425.0 - 22.0 - 2.0 && *width == 2.0
        )));
    }

    #[test]
    fn first_line_offset_applies_once() {
        let mut rec = CommandRecorder::new(425.0, 600.0);
        let mut session = RenderSession::new(1.0, rec.width(), rec.height());
        let mut diagnostics = Vec::new();
        let line = tokenize_line("C", 1, false, &mut diagnostics);
        session.draw_content_line(&line, &mut rec);
        session.draw_content_line(&line, &mut rec);
        assert_eq!(session.cursor_y(), 14.0 + 4.0 + 2.0 * 28.0);
    }
}
