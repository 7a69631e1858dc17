//! Inline substitutions applied to ordinary (non-code) Markdown text.
//!
//! | Zim export          | Obsidian            |
//! |---------------------|---------------------|
//! | `[note] `           | `\[note] `          |
//! | `☐ task`            | `- [ ] task`        |
//! | `* ☑ task`          | `- [x] task`        |
//! | `☒` / `▷` / `◁`     | `- [c]` / `- [>]` / `- [<]` |
//! | `__marked__`        | `==marked==`        |
//! | `@tag`              | `#tag`              |

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

/// Zim checkbox glyphs and their Obsidian task markers.
pub const CHECKBOXES: &[(char, &str)] = &[
    ('☐', "[ ]"),
    ('☑', "[x]"),
    ('☒', "[c]"),
    ('▷', "[>]"),
    ('◁', "[<]"),
];

// A bracket pair followed by whitespace is not link syntax and must not be read as such.
static UNESCAPED_BRACKET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\[.*?\]\s)").expect("valid bracket regex"));
static DOUBLE_ESCAPED_BRACKET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\\\(\[.*?\]\s)").expect("valid escaped bracket regex"));
static HIGHLIGHT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"__(.+?)__").expect("valid highlight regex"));
static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"\B@(\S)").expect("valid tag regex"));
static CHECKBOX_PATTERNS: Lazy<Vec<(Regex, String)>> = Lazy::new(|| {
    CHECKBOXES
        .iter()
        .map(|(glyph, marker)| {
            let pattern = format!(r"(\* )*{}", regex::escape(&glyph.to_string()));
            let regex = Regex::new(&pattern).expect("valid checkbox regex");
            (regex, format!("- {marker}"))
        })
        .collect()
});

/// Inline conversion rules for a chunk of text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InlineRules {
    /// Keep `@word` as is instead of turning it into an Obsidian tag.
    pub preserve_at: bool,
}

impl InlineRules {
    pub fn new(preserve_at: bool) -> Self {
        Self { preserve_at }
    }

    /// Converts one chunk of text. The chunk must not contain inline code.
    pub fn convert(&self, text: &str) -> String {
        let escaped = UNESCAPED_BRACKET.replace_all(text, r"\${1}");
        let mut text = DOUBLE_ESCAPED_BRACKET
            .replace_all(&escaped, r"\${1}")
            .into_owned();

        for (pattern, marker) in CHECKBOX_PATTERNS.iter() {
            if pattern.is_match(&text) {
                debug!("Converting checkbox to '{marker}'");
                text = pattern.replace_all(&text, marker.as_str()).into_owned();
            }
        }

        text = HIGHLIGHT.replace_all(&text, "==${1}==").into_owned();

        if !self.preserve_at && TAG.is_match(&text) {
            debug!("Converting tags");
            text = TAG.replace_all(&text, "#${1}").into_owned();
        }

        text
    }
}
