//! Text placed by pragmas: title block, key box, tempo and labels.

use crate::glyph::font;

use super::surface::{Path, Surface};
use super::RenderSession;

impl RenderSession {
    /// Draw `text` in the text font, horizontally centred on the page,
    /// with its top at `top`.
    fn text_centered<S: Surface + ?Sized>(&self, text: &str, size: f64, top: f64, surface: &mut S) {
        surface.set_font(&self.style.text_font, size);
        let w = surface.measure_text(text);
        surface.fill_text(text, self.width / 2.0 - w / 2.0, top + size);
    }

    pub(super) fn draw_title<S: Surface + ?Sized>(&mut self, text: &str, surface: &mut S) {
        if text.is_empty() {
            return;
        }
        self.meta.title = Some(match self.meta.title.take() {
            Some(previous) => format!("{previous} {text}"),
            None => text.to_string(),
        });
        let size = self.style.title_size;
        self.text_centered(text, size, self.cursor_y, surface);
        self.cursor_y += size;
    }

    pub(super) fn draw_subtitle<S: Surface + ?Sized>(&mut self, text: &str, surface: &mut S) {
        if text.is_empty() {
            return;
        }
        self.meta.subtitle = Some(text.to_string());
        let size = self.style.subtitle_size;
        self.text_centered(text, size, self.cursor_y, surface);
        self.cursor_y += size;
    }

    pub(super) fn draw_author<S: Surface + ?Sized>(&mut self, text: &str, surface: &mut S) {
        if text.is_empty() {
            return;
        }
        self.meta.author = Some(text.to_string());
        let size = self.style.author_size;
        surface.set_font(&self.style.text_font, size);
        let w = surface.measure_text(text);
        surface.fill_text(text, self.width - w - self.style.margin_right, self.cursor_y + size);
        self.cursor_y += size;
    }

    /// Locked copyright lines sit at the page bottom and do not move the cursor.
    pub(super) fn draw_copyright<S: Surface + ?Sized>(&mut self, text: &str, surface: &mut S) {
        if text.is_empty() {
            return;
        }
        self.meta.copyright = Some(text.to_string());
        let display = text.replace("(c)", "\u{a9}").replace("(C)", "\u{a9}");
        let size = self.style.copyright_size;
        if self.style.lock_copyright {
            let top = self.height - self.style.margin_bottom;
            self.text_centered(&display, size, top, surface);
        } else {
            self.text_centered(&display, size, self.cursor_y, surface);
            self.cursor_y += size;
        }
    }

    /// The key sits in the top-left corner and never advances the cursor.
    pub(super) fn draw_key<S: Surface + ?Sized>(&mut self, text: &str, surface: &mut S) {
        if text.is_empty() {
            return;
        }
        self.meta.key = Some(text.to_string());

        let st = &self.style;
        let display = text.replace('#', font::SHARP).replace('b', font::FLAT);
        let (x, y) = (st.key_offset, st.key_offset);
        surface.set_font(&st.chord_font, st.key_size);

        if st.key_box {
            let w = surface.measure_text(&display);
            let side = w.max(st.key_size) + 2.0 * st.key_padding;
            let frame = Path::new()
                .move_to(x, y)
                .line_to(x + side, y)
                .line_to(x + side, y + side)
                .line_to(x, y + side)
                .close();
            surface.stroke_path(&frame, st.key_box_width);
            surface.fill_text(
                &display,
                x + side / 2.0 - w / 2.0,
                y + side / 2.0 - st.key_size / 2.0 + st.key_size,
            );
        } else {
            surface.fill_text(&display, x + st.key_padding, y + st.key_padding + st.key_size);
        }
    }

    pub(super) fn draw_tempo<S: Surface + ?Sized>(&mut self, bpm: u32, surface: &mut S) {
        self.meta.tempo = Some(bpm);
        self.cursor_y += self.style.tempo_break;
        surface.set_font(&self.style.chord_font, self.style.tempo_size);
        surface.fill_text(
            &format!("{} = {bpm}", font::CROTCHET),
            self.style.margin_left,
            self.cursor_y,
        );
        self.cursor_y += self.style.tempo_break;
    }

    pub(super) fn draw_label<S: Surface + ?Sized>(&mut self, text: &str, surface: &mut S) {
        if text.is_empty() {
            return;
        }
        let size = self.style.label_size;
        surface.set_font(&self.style.text_font, size);
        surface.fill_text(text, self.style.margin_left, self.cursor_y + size);
        self.cursor_y += size + self.style.label_offset;
    }

    /// `#label_at <x> <y> <text…>` with unscaled coordinates.
    pub(super) fn draw_label_at<S: Surface + ?Sized>(&mut self, arg: &str, surface: &mut S) {
        let mut parts = arg.splitn(3, char::is_whitespace);
        let x = parts.next().and_then(|v| v.parse::<f64>().ok());
        let y = parts.next().and_then(|v| v.parse::<f64>().ok());
        let text = parts.next().map(str::trim).unwrap_or("");

        let (Some(x), Some(y)) = (x, y) else {
            return;
        };
        if x < 0.0 || y < 0.0 || text.is_empty() {
            return;
        }
        let size = self.style.label_size;
        surface.set_font(&self.style.text_font, size);
        surface.fill_text(text, x * self.scale, y * self.scale + size);
    }
}

#[cfg(test)]
mod tests {
    use crate::renderer::{CommandRecorder, DrawCommand, RenderSession, Surface};

    fn run(lines: &[&str]) -> (RenderSession, Vec<DrawCommand>) {
        let mut rec = CommandRecorder::new(400.0, 600.0);
        let mut session = RenderSession::new(1.0, rec.width(), rec.height());
        for (i, line) in lines.iter().enumerate() {
            session.process_pragma(line, i + 1, &mut rec);
        }
        (session, rec.into_commands())
    }

    fn texts(commands: &[DrawCommand]) -> Vec<(String, f64, f64)> {
        commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillText { text, x, y } => Some((text.clone(), *x, *y)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn titles_accumulate_and_advance() {
        let (session, commands) = run(&["#title Blue", "#title Moon"]);
        assert_eq!(session.meta().title.as_deref(), Some("Blue Moon"));
        // margin_top 14 + two title lines of 20
        assert_eq!(session.cursor_y(), 54.0);

        let drawn = texts(&commands);
        assert_eq!(drawn.len(), 2);
        assert_eq!(drawn[0].2, 34.0);
        assert_eq!(drawn[1].2, 54.0);
    }

    #[test]
    fn empty_title_draws_nothing() {
        let (session, commands) = run(&["#title", "#author   "]);
        assert!(commands.is_empty());
        assert_eq!(session.meta().title, None);
        assert_eq!(session.cursor_y(), 14.0);
    }

    #[test]
    fn author_is_right_justified() {
        let mut rec = CommandRecorder::new(400.0, 600.0);
        rec.set_font("Arial", 12.0);
        let w = rec.measure_text("J. Doe");

        let (_, commands) = run(&["#author J. Doe"]);
        let drawn = texts(&commands);
        assert!((drawn[0].1 - (400.0 - w - 22.0)).abs() < 1e-9);
    }

    #[test]
    fn locked_copyright_does_not_advance() {
        let (session, commands) = run(&["#copyright (c) 2024 Someone"]);
        assert_eq!(session.cursor_y(), 14.0);
        let drawn = texts(&commands);
        assert_eq!(drawn[0].0, "\u{a9} 2024 Someone");
        assert_eq!(drawn[0].2, 600.0 - 22.0 + 8.0);

        let (session, _) = run(&["#lock_copyright false", "#copyright (C) Me"]);
        assert_eq!(session.cursor_y(), 22.0);
    }

    #[test]
    fn key_box_and_plain_key() {
        let (session, commands) = run(&["#key Bb"]);
        assert_eq!(session.meta().key.as_deref(), Some("Bb"));
        assert_eq!(session.cursor_y(), 14.0);
        assert!(commands.iter().any(|c| matches!(c, DrawCommand::StrokePath { line_width, .. } if *line_width == 1.0)));
        assert_eq!(texts(&commands)[0].0, format!("B{}", crate::glyph::font::FLAT));

        let (_, commands) = run(&["#key_box false", "#key F#"]);
        assert!(!commands.iter().any(|c| matches!(c, DrawCommand::StrokePath { .. })));
        let drawn = texts(&commands);
        assert_eq!((drawn[0].1, drawn[0].2), (18.0, 36.0));
    }

    #[test]
    fn tempo_brackets_its_line() {
        let (session, commands) = run(&["#tempo 120"]);
        assert_eq!(session.meta().tempo, Some(120));
        assert_eq!(session.cursor_y(), 26.0);
        assert_eq!(texts(&commands), vec![("\u{2669} = 120".to_string(), 25.0, 20.0)]);

        let (session, commands) = run(&["#tempo fast"]);
        assert!(commands.is_empty());
        assert_eq!(session.diagnostics().len(), 1);
        assert_eq!(session.cursor_y(), 14.0);
    }

    #[test]
    fn labels() {
        let (session, commands) = run(&["#label Verse"]);
        assert_eq!(session.cursor_y(), 14.0 + 12.0 + 10.0);
        assert_eq!(texts(&commands), vec![("Verse".to_string(), 25.0, 26.0)]);

        let (session, commands) = run(&["#label_at 100 50 Coda here", "#label_at -1 5 no", "#label_at 5 5"]);
        assert_eq!(session.cursor_y(), 14.0);
        assert_eq!(texts(&commands), vec![("Coda here".to_string(), 100.0, 62.0)]);
    }
}
