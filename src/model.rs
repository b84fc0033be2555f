//! Data model for a tokenized chord chart.
//!
//! These structures capture what the layout engine needs from each source
//! line: barline kinds, bars with their chords, repeat counts and time
//! signatures, plus the document metadata collected from pragmas.

use serde::{Deserialize, Serialize};

use crate::glyph::{map_chord, ChordToken};

/// Visual and semantic classification of a measure boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BarlineKind {
    #[default]
    Single,
    Double,
    StartRepeat,
    EndRepeat,
    DoubleRepeat,
    Final,
}

impl BarlineKind {
    /// Whether a repeat count may be drawn next to this barline.
    pub fn carries_repeat_count(self) -> bool {
        matches!(self, BarlineKind::EndRepeat | BarlineKind::DoubleRepeat)
    }

    /// Kind after an end-repeat marker lands on this boundary.
    pub(crate) fn with_end_repeat(self) -> Self {
        match self {
            BarlineKind::StartRepeat | BarlineKind::DoubleRepeat => BarlineKind::DoubleRepeat,
            _ => BarlineKind::EndRepeat,
        }
    }

    /// Kind after a start-repeat marker lands on this boundary.
    pub(crate) fn with_start_repeat(self) -> Self {
        match self {
            BarlineKind::EndRepeat | BarlineKind::DoubleRepeat => BarlineKind::DoubleRepeat,
            _ => BarlineKind::StartRepeat,
        }
    }
}

/// How many times a repeated section is played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RepeatCount {
    /// Play the section this many times (always ≥ 1).
    Times(u32),
    /// Repeat until cued out.
    UntilCue,
}

impl RepeatCount {
    /// Label drawn beside the repeat barline.
    pub fn label(self) -> String {
        match self {
            RepeatCount::Times(n) => format!("x{n}"),
            RepeatCount::UntilCue => "Until cue".to_string(),
        }
    }
}

/// Time signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSignature {
    /// Numerator (e.g., 3 in 3/4)
    pub numerator: u32,
    /// Denominator (e.g., 4 in 3/4)
    pub denominator: u32,
}

/// A single bar of a content line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Raw chord mnemonics, in order
    pub chords: Vec<String>,
    /// Barline drawn after the bar
    pub barline: BarlineKind,
    /// Repeat count; only set alongside an end-repeat or double-repeat barline
    pub repeat: Option<RepeatCount>,
    /// Time signature shown at the start of the bar
    pub time: Option<TimeSignature>,
}

impl Bar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Glyph-map every chord of the bar.
    pub fn chord_tokens(&self) -> Vec<ChordToken> {
        self.chords.iter().map(|c| map_chord(c)).collect()
    }
}

/// A tokenized content line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentLine {
    /// Barline drawn before the first bar
    pub leading: BarlineKind,
    pub bars: Vec<Bar>,
    /// Whether this is the last content line of the document
    pub is_last: bool,
}

/// Classification of one non-blank source line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum LineKind {
    Comment,
    Pragma,
    Content(ContentLine),
}

/// A non-blank source line after comment stripping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    /// 1-based line number in the source text
    pub number: usize,
    /// Text with the trailing comment removed and whitespace trimmed
    pub text: String,
    pub kind: LineKind,
}

/// Document-level metadata gathered from pragmas during a pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentMeta {
    /// Markup version from `#version`
    pub version: Option<String>,
    /// Title; repeated `#title` lines are joined with a space
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub author: Option<String>,
    pub copyright: Option<String>,
    /// Key as written (e.g. "Bb")
    pub key: Option<String>,
    /// Tempo in beats per minute
    pub tempo: Option<u32>,
}

impl DocumentMeta {
    /// File name for an exported chart, derived from the title.
    ///
    /// Whitespace becomes `_`, alphanumerics are lower-cased and everything
    /// else is dropped. Falls back to `chrd_output`.
    pub fn file_name(&self, extension: &str) -> String {
        let mut stem = String::new();
        for c in self.title.as_deref().unwrap_or("").chars() {
            if c.is_whitespace() {
                stem.push('_');
            } else if c.is_alphanumeric() {
                stem.extend(c.to_lowercase());
            }
        }
        if stem.is_empty() {
            stem.push_str("chrd_output");
        }
        format!("{stem}{extension}")
    }
}
