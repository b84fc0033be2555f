//! Chord glyph mapper — turns a raw chord mnemonic into the display string
//! used with the ChordletType font, plus its modifier flags.
//!
//! Mapping never fails: anything the tables do not recognise is passed
//! through verbatim, so unsupported spellings simply render literally.

use serde::{Deserialize, Serialize};

/// Code points of the special characters in the ChordletType font.
pub mod font {
    pub const SHARP: &str = "\u{e10c}";
    pub const FLAT: &str = "\u{e10d}";
    pub const NATURAL: &str = "\u{e10e}";
    pub const ELEVEN: &str = "\u{e182}";
    pub const THIRTEEN: &str = "\u{e183}";
    pub const DIM: &str = "\u{e184}";
    pub const SUS: &str = "\u{e185}";
    pub const AUG: &str = "\u{e186}";
    pub const SUPER_DIM0: &str = "\u{e187}";
    pub const SUPER_FLAT: &str = "\u{e188}";
    pub const SUPER_SHARP: &str = "\u{e189}";
    pub const MAJ7: &str = "\u{e18a}";
    pub const MIN7: &str = "-";
    pub const ADD: &str = "\u{e18b}";
    pub const ADD11: &str = "\u{e18c}";
    pub const SUS4: &str = "\u{e18d}";
    pub const HALF_DIM: &str = "\u{e18f}";
    pub const SUPER5: &str = "\u{e195}";
    pub const SUPER6: &str = "\u{e196}";
    pub const SUPER7: &str = "\u{e197}";
    pub const SUPER9: &str = "\u{e199}";
    pub const SIMILE: &str = "\u{2673}";
    pub const SIMILE2: &str = "\u{2674}";
    pub const SIMILE3: &str = "\u{2675}";
    pub const CROTCHET: &str = "\u{2669}";
    pub const CROTCHET_REST: &str = "\u{1d13d}";
}

// ═══════════════════════════════════════════════════════════════════════
// Modifiers
// ═══════════════════════════════════════════════════════════════════════

pub const PUSH_MARKER: char = '>';
pub const RING_MARKER: char = 'R';
pub const CHOKE_MARKER: char = 'K';
pub const PAUSE_MARKER: char = 'P';

/// Per-chord articulation flags, each drawn as an auxiliary glyph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    /// Anticipation tick (`>`)
    pub push: bool,
    /// Let-ring diamond (`R`)
    pub ring: bool,
    /// Choke wedge (`K`)
    pub choke: bool,
    /// Pause / fermata (`P`)
    pub pause: bool,
}

impl Modifiers {
    /// Set the flag for a marker character. Returns false for any other char.
    fn mark(&mut self, c: char) -> bool {
        match c {
            PUSH_MARKER => self.push = true,
            RING_MARKER => self.ring = true,
            CHOKE_MARKER => self.choke = true,
            PAUSE_MARKER => self.pause = true,
            _ => return false,
        }
        true
    }

    pub fn is_empty(&self) -> bool {
        !(self.push || self.ring || self.choke || self.pause)
    }
}

/// A chord mnemonic after glyph mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChordToken {
    /// Mnemonic as written in the chart
    pub raw: String,
    /// Display string with font glyphs substituted
    pub glyphs: String,
    pub modifiers: Modifiers,
}

// ═══════════════════════════════════════════════════════════════════════
// Substitution rules
// ═══════════════════════════════════════════════════════════════════════

/// One entry of the substitution table.
struct GlyphRule {
    pattern: &'static str,
    /// The rule does not fire when the pattern is immediately followed by this.
    unless_followed_by: Option<char>,
    glyph: &'static str,
}

impl GlyphRule {
    const fn new(pattern: &'static str, glyph: &'static str) -> Self {
        Self { pattern, unless_followed_by: None, glyph }
    }

    const fn unless(self, next: char) -> Self {
        GlyphRule {
            pattern: self.pattern,
            unless_followed_by: Some(next),
            glyph: self.glyph,
        }
    }

    fn matches(&self, rest: &str) -> bool {
        let Some(after) = rest.strip_prefix(self.pattern) else {
            return false;
        };
        match self.unless_followed_by {
            Some(next) => !after.starts_with(next),
            None => true,
        }
    }
}

/// Precedence order. Where one pattern contains another at the same start
/// position, the longer one comes first.
const RULES: &[GlyphRule] = &[
    GlyphRule::new("n", font::NATURAL),
    GlyphRule::new("11", font::ELEVEN),
    GlyphRule::new("13", font::THIRTEEN),
    GlyphRule::new("dim", font::DIM),
    GlyphRule::new("o", font::SUPER_DIM0),
    GlyphRule::new("s", font::SUS).unless('4'),
    GlyphRule::new("s4", font::SUS4),
    GlyphRule::new("+", font::AUG),
    GlyphRule::new("^", font::MAJ7),
    GlyphRule::new("-", font::MIN7),
    GlyphRule::new("add11", font::ADD11),
    GlyphRule::new("add", font::ADD),
    GlyphRule::new("@", font::HALF_DIM),
    GlyphRule::new("5", font::SUPER5),
    GlyphRule::new("6", font::SUPER6),
    GlyphRule::new("7", font::SUPER7),
    GlyphRule::new("9", font::SUPER9),
    GlyphRule::new("%%%", font::SIMILE3),
    GlyphRule::new("%%", font::SIMILE2),
    GlyphRule::new("%", font::SIMILE),
    GlyphRule::new("S", font::CROTCHET_REST),
];

// ═══════════════════════════════════════════════════════════════════════
// Mapping
// ═══════════════════════════════════════════════════════════════════════

/// Map a raw chord mnemonic to its display glyphs and modifier flags.
///
/// The first `b`/`#` becomes a full-size accidental, later ones become
/// superscript accidentals until a `/` starts the bass note. Each table rule
/// fires at most once per chord.
pub fn map_chord(raw: &str) -> ChordToken {
    let mut modifiers = Modifiers::default();
    let text: String = raw.chars().filter(|&c| !modifiers.mark(c)).collect();

    let mut glyphs = String::with_capacity(text.len() * 3);
    let mut fired = vec![false; RULES.len()];
    let mut has_accidental = false;
    let mut pos = 0;

    while let Some(c) = text[pos..].chars().next() {
        match c {
            'b' | '#' => {
                let glyph = match (c, has_accidental) {
                    ('b', false) => font::FLAT,
                    ('b', true) => font::SUPER_FLAT,
                    (_, false) => font::SHARP,
                    (_, true) => font::SUPER_SHARP,
                };
                has_accidental = true;
                glyphs.push_str(glyph);
                pos += 1;
                continue;
            }
            '/' => {
                has_accidental = false;
                glyphs.push('/');
                pos += 1;
                continue;
            }
            _ => {}
        }

        let rest = &text[pos..];
        let rule = RULES
            .iter()
            .enumerate()
            .find(|(i, rule)| !fired[*i] && rule.matches(rest));

        match rule {
            Some((i, rule)) => {
                fired[i] = true;
                glyphs.push_str(rule.glyph);
                pos += rule.pattern.len();
            }
            None => {
                glyphs.push(c);
                pos += c.len_utf8();
            }
        }
    }

    ChordToken {
        raw: raw.to_string(),
        glyphs,
        modifiers,
    }
}
