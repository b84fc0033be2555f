//! Line classifier and bar tokenizer.
//!
//! Splits chart text into comment, pragma and content lines, and turns each
//! content line into a leading barline kind plus its bars.

use crate::error::{report, Diagnostic};
use crate::model::*;
use crate::renderer::DEFAULT_COMMENT_DELIM;

// ═══════════════════════════════════════════════════════════════════════
// Public API
// ═══════════════════════════════════════════════════════════════════════

/// Classify every non-blank line of `text` and tokenize the content lines.
///
/// Comment delimiters are tracked through `#comment_delim`, `#push` and
/// `#pop` so each line is stripped with the delimiter in effect at that point.
/// Only the last content line of the document is marked `is_last`.
pub fn parse_document(text: &str) -> (Vec<Line>, Vec<Diagnostic>) {
    let mut delims = DelimiterTracker::new();
    let mut classified = Vec::new();

    for (i, source) in text.lines().enumerate() {
        if source.trim().is_empty() {
            continue;
        }
        let stripped = strip_comment(source, delims.current);
        let class = if stripped.is_empty() {
            LineClass::Comment
        } else if stripped.starts_with('#') {
            delims.observe(&stripped);
            LineClass::Pragma
        } else {
            LineClass::Content
        };
        classified.push((i + 1, stripped, class));
    }

    let last_content = classified
        .iter()
        .rposition(|(_, _, class)| *class == LineClass::Content);

    let mut diagnostics = Vec::new();
    let mut lines = Vec::with_capacity(classified.len());
    for (idx, (number, text, class)) in classified.into_iter().enumerate() {
        let kind = match class {
            LineClass::Comment => LineKind::Comment,
            LineClass::Pragma => LineKind::Pragma,
            LineClass::Content => {
                let is_last = Some(idx) == last_content;
                LineKind::Content(tokenize_line(&text, number, is_last, &mut diagnostics))
            }
        };
        lines.push(Line { number, text, kind });
    }

    (lines, diagnostics)
}

/// Remove the trailing comment from `line` and trim it.
///
/// The first `delim` not preceded by a backslash starts the comment. Escaped
/// delimiters are kept without their backslash.
pub fn strip_comment(line: &str, delim: char) -> String {
    let mut out = String::with_capacity(line.len());
    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' && chars.peek() == Some(&delim) {
            out.push(delim);
            chars.next();
        } else if c == delim {
            break;
        } else {
            out.push(c);
        }
    }
    out.trim().to_string()
}

/// Tokenize one content line.
///
/// `line` is the 1-based source line number used for diagnostics.
pub fn tokenize_line(
    text: &str,
    line: usize,
    is_last: bool,
    diagnostics: &mut Vec<Diagnostic>,
) -> ContentLine {
    let mut scanner = BarScanner::new(line);
    for token in text.split_whitespace() {
        scanner.feed(token, diagnostics);
    }
    ContentLine {
        leading: scanner.leading,
        bars: scanner.bars,
        is_last,
    }
}

/// Split a pragma line into its name and the trimmed remainder.
pub(crate) fn split_directive(line: &str) -> (&str, &str) {
    let body = line.strip_prefix('#').unwrap_or(line);
    match body.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (body, ""),
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Line classification
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineClass {
    Comment,
    Pragma,
    Content,
}

/// Follows the comment delimiter through the pragmas that can change it.
struct DelimiterTracker {
    current: char,
    saved: Vec<char>,
}

impl DelimiterTracker {
    fn new() -> Self {
        Self {
            current: DEFAULT_COMMENT_DELIM,
            saved: Vec::new(),
        }
    }

    fn observe(&mut self, pragma: &str) {
        let (name, arg) = split_directive(pragma);
        match name {
            "comment_delim" => {
                if let Some(c) = arg.chars().next() {
                    self.current = c;
                }
            }
            "push" => self.saved.push(self.current),
            "pop" => {
                if let Some(c) = self.saved.pop() {
                    self.current = c;
                }
            }
            _ => {}
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Bar scanner
// ═══════════════════════════════════════════════════════════════════════

/// What an end-repeat token does after marking the bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AfterRepeat {
    Stay,
    Open,
    Close,
}

/// Recognise `:|`, `:||` and `:|\` with an optional count suffix.
fn split_end_repeat(token: &str) -> Option<(AfterRepeat, &str)> {
    if let Some(suffix) = token.strip_prefix(":||") {
        Some((AfterRepeat::Open, suffix))
    } else if let Some(suffix) = token.strip_prefix(":|\\") {
        Some((AfterRepeat::Close, suffix))
    } else {
        token
            .strip_prefix(":|")
            .map(|suffix| (AfterRepeat::Stay, suffix))
    }
}

fn parse_repeat_count(suffix: &str) -> Option<RepeatCount> {
    match suffix {
        "c" | "C" => Some(RepeatCount::UntilCue),
        _ => match suffix.parse::<u32>() {
            Ok(n) if n > 0 => Some(RepeatCount::Times(n)),
            _ => None,
        },
    }
}

/// Parse the part of a `T<num>/<den>` token after the `T`.
fn parse_time_signature(body: &str) -> Option<TimeSignature> {
    let (num, den) = body.split_once('/')?;
    let numerator = num.parse::<u32>().ok().filter(|&n| n > 0)?;
    let denominator = den.parse::<u32>().ok().filter(|&n| n > 0)?;
    Some(TimeSignature { numerator, denominator })
}

struct BarScanner {
    line: usize,
    leading: BarlineKind,
    bars: Vec<Bar>,
    /// Whether the next chord goes into the last bar
    in_bar: bool,
}

impl BarScanner {
    fn new(line: usize) -> Self {
        Self {
            line,
            leading: BarlineKind::Single,
            bars: Vec::new(),
            in_bar: false,
        }
    }

    fn open(&mut self) {
        self.bars.push(Bar::new());
        self.in_bar = true;
    }

    fn close(&mut self) {
        self.in_bar = false;
    }

    /// Rewrite the boundary at the current position: the last bar's trailing
    /// kind, or the line's leading kind before any bar exists.
    fn set_boundary(&mut self, f: impl FnOnce(BarlineKind) -> BarlineKind) {
        let kind = match self.bars.last_mut() {
            Some(bar) => &mut bar.barline,
            None => &mut self.leading,
        };
        *kind = f(*kind);
    }

    /// The bar a chord or time signature belongs to, opening one if needed.
    fn current_bar(&mut self) -> &mut Bar {
        if !self.in_bar {
            self.open();
        }
        let last = self.bars.len() - 1;
        &mut self.bars[last]
    }

    fn feed(&mut self, token: &str, diagnostics: &mut Vec<Diagnostic>) {
        match token {
            "|" => self.open(),
            "||" => {
                self.set_boundary(|_| BarlineKind::Double);
                self.open();
            }
            "|:" | "||:" => {
                self.set_boundary(BarlineKind::with_start_repeat);
                self.open();
            }
            "\\" => self.close(),
            "|\\" => {
                self.set_boundary(|_| BarlineKind::Double);
                self.close();
            }
            _ => {
                if let Some((after, suffix)) = split_end_repeat(token) {
                    self.end_repeat(token, suffix, diagnostics);
                    match after {
                        AfterRepeat::Stay => {}
                        AfterRepeat::Open => self.open(),
                        AfterRepeat::Close => self.close(),
                    }
                } else if let Some(body) = token.strip_prefix('T') {
                    match parse_time_signature(body) {
                        Some(time) => self.current_bar().time = Some(time),
                        None => log::debug!("line {}: ignoring time signature '{token}'", self.line),
                    }
                } else {
                    self.current_bar().chords.push(token.to_string());
                }
            }
        }
    }

    fn end_repeat(&mut self, token: &str, suffix: &str, diagnostics: &mut Vec<Diagnostic>) {
        let line = self.line;
        let Some(bar) = self.bars.last_mut() else {
            report(
                diagnostics,
                Diagnostic::InvalidToken { line, token: token.to_string() },
            );
            return;
        };

        bar.barline = bar.barline.with_end_repeat();
        if suffix.is_empty() {
            return;
        }
        match parse_repeat_count(suffix) {
            Some(count) => bar.repeat = Some(count),
            None => report(
                diagnostics,
                Diagnostic::InvalidRepeatCount { line, token: token.to_string() },
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tokenize(text: &str) -> (ContentLine, Vec<Diagnostic>) {
        let mut diagnostics = Vec::new();
        let line = tokenize_line(text, 1, false, &mut diagnostics);
        (line, diagnostics)
    }

    fn bar(chords: &[&str], barline: BarlineKind) -> Bar {
        Bar {
            chords: chords.iter().map(|c| c.to_string()).collect(),
            barline,
            ..Bar::default()
        }
    }

    #[test]
    fn two_bars_with_end_repeat() {
        let (line, diagnostics) = tokenize("| Am G | F C :|");
        assert!(diagnostics.is_empty());
        assert_eq!(line.leading, BarlineKind::Single);
        assert_eq!(
            line.bars,
            vec![
                bar(&["Am", "G"], BarlineKind::Single),
                bar(&["F", "C"], BarlineKind::EndRepeat),
            ]
        );
    }

    #[test]
    fn start_repeat_with_count() {
        let (line, _) = tokenize("|: C G :|2");
        assert_eq!(line.leading, BarlineKind::StartRepeat);
        assert_eq!(line.bars.len(), 1);
        assert_eq!(line.bars[0].chords, vec!["C", "G"]);
        assert_eq!(line.bars[0].barline, BarlineKind::EndRepeat);
        assert_eq!(line.bars[0].repeat, Some(RepeatCount::Times(2)));
    }

    #[test]
    fn implicit_bar_holds_all_chords() {
        let (line, _) = tokenize("C G Am F");
        assert_eq!(line.bars.len(), 1);
        assert_eq!(line.bars[0].chords.len(), 4);
    }

    #[test]
    fn until_cue_suffix() {
        let (line, _) = tokenize("| D :|c");
        assert_eq!(line.bars[0].repeat, Some(RepeatCount::UntilCue));
        let (line, _) = tokenize("| D :||C E");
        assert_eq!(line.bars[0].repeat, Some(RepeatCount::UntilCue));
        assert_eq!(line.bars[1].chords, vec!["E"]);
    }

    #[test]
    fn end_then_start_repeat_merges() {
        let (line, _) = tokenize("|: C :| |: D :|");
        assert_eq!(line.bars.len(), 2);
        assert_eq!(line.bars[0].barline, BarlineKind::DoubleRepeat);
        assert_eq!(line.bars[1].chords, vec!["D"]);
        assert_eq!(line.bars[1].barline, BarlineKind::EndRepeat);
    }

    #[test]
    fn plain_end_repeat_keeps_bar_open() {
        let (line, _) = tokenize("|: C :| D");
        assert_eq!(line.bars.len(), 1);
        assert_eq!(line.bars[0].chords, vec!["C", "D"]);
    }

    #[test]
    fn empty_bar_between_repeats_does_not_merge() {
        let (line, _) = tokenize("| C :|| |: D");
        assert_eq!(line.bars[0].barline, BarlineKind::EndRepeat);
        assert!(line.bars[1].chords.is_empty());
        assert_eq!(line.bars[1].barline, BarlineKind::StartRepeat);
        assert_eq!(line.bars[2].chords, vec!["D"]);
    }

    #[test]
    fn double_and_close_tokens() {
        let (line, _) = tokenize("|| C || D |\\ E");
        assert_eq!(line.leading, BarlineKind::Double);
        assert_eq!(line.bars.len(), 3);
        assert_eq!(line.bars[0].barline, BarlineKind::Double);
        assert_eq!(line.bars[1].barline, BarlineKind::Double);
        assert_eq!(line.bars[2].chords, vec!["E"]);
    }

    #[test]
    fn close_then_chord_opens_new_bar() {
        let (line, _) = tokenize("C \\ D :|\\ E");
        assert_eq!(line.bars.len(), 3);
        assert_eq!(line.bars[1].barline, BarlineKind::EndRepeat);
        assert_eq!(line.bars[2].chords, vec!["E"]);
    }

    #[test]
    fn end_repeat_without_bar_is_reported() {
        let (line, diagnostics) = tokenize(":| C");
        assert_eq!(
            diagnostics,
            vec![Diagnostic::InvalidToken { line: 1, token: ":|".into() }]
        );
        assert_eq!(line.leading, BarlineKind::Single);
        assert_eq!(line.bars, vec![bar(&["C"], BarlineKind::Single)]);
    }

    #[test]
    fn bad_repeat_count_keeps_kind() {
        let (line, diagnostics) = tokenize("| C :|x");
        assert_eq!(line.bars[0].barline, BarlineKind::EndRepeat);
        assert_eq!(line.bars[0].repeat, None);
        assert!(matches!(diagnostics[0], Diagnostic::InvalidRepeatCount { .. }));

        let (line, diagnostics) = tokenize("| C :|0");
        assert_eq!(line.bars[0].repeat, None);
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn time_signatures() {
        let (line, _) = tokenize("| T3/4 C | T6/8 D");
        assert_eq!(line.bars[0].time, Some(TimeSignature { numerator: 3, denominator: 4 }));
        assert_eq!(line.bars[1].time, Some(TimeSignature { numerator: 6, denominator: 8 }));

        let (line, _) = tokenize("T4/4 C G");
        assert_eq!(line.bars.len(), 1);
        assert_eq!(line.bars[0].chords, vec!["C", "G"]);

        let (line, _) = tokenize("| C T3/ D T/4 E");
        assert_eq!(line.bars[0].time, None);
        assert_eq!(line.bars[0].chords, vec!["C", "D", "E"]);
    }

    #[test]
    fn comment_stripping() {
        assert_eq!(strip_comment("| C G ! verse", '!'), "| C G");
        assert_eq!(strip_comment("  ! only a comment", '!'), "");
        assert_eq!(strip_comment(r"#title Wow\! Yes ! note", '!'), "#title Wow! Yes");
        assert_eq!(strip_comment("| C ; tail", ';'), "| C");
    }

    #[test]
    fn document_classification() {
        let text = "#title Demo\n\n! a comment\n| C | G\n#break\n| F ! tail\n";
        let (lines, diagnostics) = parse_document(text);
        assert!(diagnostics.is_empty());
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0].kind, LineKind::Pragma);
        assert_eq!(lines[1].kind, LineKind::Comment);
        assert_eq!(lines[1].number, 3);

        let content: Vec<&ContentLine> = lines
            .iter()
            .filter_map(|l| match &l.kind {
                LineKind::Content(c) => Some(c),
                _ => None,
            })
            .collect();
        assert_eq!(content.len(), 2);
        assert!(!content[0].is_last);
        assert!(content[1].is_last);
    }

    #[test]
    fn delimiter_changes_follow_push_and_pop() {
        let text = "#push\n#comment_delim ;\n| C ; x ! y\n#pop\n| D ; x ! y";
        let (lines, _) = parse_document(text);
        assert_eq!(lines[2].text, "| C");
        assert_eq!(lines[4].text, "| D ; x");
    }

    #[test]
    fn directive_split() {
        assert_eq!(split_directive("#title  My Song "), ("title", "My Song"));
        assert_eq!(split_directive("#start"), ("start", ""));
    }
}
