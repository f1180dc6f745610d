//! Content normalisation pipeline applied to section bodies.
//!
//! Every stage is idempotent, so normalising already-normalised content
//! returns it unchanged.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use unicode_normalization::UnicodeNormalization;

static TRAILING_WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)[ \t]+$").expect("valid trailing whitespace regex"));

static BLANK_LINE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n{3,}").expect("valid newline regex"));

/// A glued sentence boundary, or a link target or bare URL left untouched.
static GLUED_SENTENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\]\([^)]*\)|https?://\S+)|\.(\p{Lu})").expect("valid sentence regex")
});

static INNER_SPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\S)[ \t]{2,}").expect("valid space regex"));

const LIGATURES: [(&str, &str); 7] = [
    ("\u{FB00}", "ff"),
    ("\u{FB01}", "fi"),
    ("\u{FB02}", "fl"),
    ("\u{FB03}", "ffi"),
    ("\u{FB04}", "ffl"),
    ("\u{FB05}", "st"),
    ("\u{FB06}", "st"),
];

/// Cleanup preset levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CleanupPreset {
    /// Minimal cleanup: blank-line collapsing and trimming only
    Minimal,
    /// Standard cleanup: blank lines, sentence spacing and inner whitespace
    #[default]
    Standard,
    /// Aggressive cleanup: standard plus Unicode NFC and glyph repair
    Aggressive,
}

/// Options for content cleanup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupOptions {
    /// Normalize Unicode to NFC form
    pub normalize_unicode: bool,

    /// Fix ligatures (fi, fl, etc.)
    pub fix_ligatures: bool,

    /// Remove Unicode replacement character (U+FFFD)
    pub remove_replacement_char: bool,

    /// Strip whitespace at the end of every line
    pub strip_trailing_whitespace: bool,

    /// Collapse 3+ consecutive newlines to exactly 2
    pub collapse_blank_lines: bool,

    /// Insert a space between a period and a glued uppercase letter
    pub fix_sentence_spacing: bool,

    /// Collapse runs of 2+ spaces/tabs after text to one space
    pub collapse_inner_whitespace: bool,
}

impl CleanupOptions {
    /// Create options from a preset.
    pub fn from_preset(preset: CleanupPreset) -> Self {
        match preset {
            CleanupPreset::Minimal => Self::minimal(),
            CleanupPreset::Standard => Self::standard(),
            CleanupPreset::Aggressive => Self::aggressive(),
        }
    }

    /// Minimal cleanup options.
    pub fn minimal() -> Self {
        Self {
            normalize_unicode: false,
            fix_ligatures: false,
            remove_replacement_char: false,
            strip_trailing_whitespace: false,
            collapse_blank_lines: true,
            fix_sentence_spacing: false,
            collapse_inner_whitespace: false,
        }
    }

    /// Standard cleanup options.
    pub fn standard() -> Self {
        Self {
            strip_trailing_whitespace: true,
            fix_sentence_spacing: true,
            collapse_inner_whitespace: true,
            ..Self::minimal()
        }
    }

    /// Aggressive cleanup options.
    pub fn aggressive() -> Self {
        Self {
            normalize_unicode: true,
            fix_ligatures: true,
            remove_replacement_char: true,
            ..Self::standard()
        }
    }
}

impl Default for CleanupOptions {
    fn default() -> Self {
        Self::standard()
    }
}

/// Text cleanup pipeline.
#[derive(Debug, Clone, Default)]
pub struct CleanupPipeline {
    options: CleanupOptions,
}

impl CleanupPipeline {
    /// Create a new cleanup pipeline with the given options.
    pub fn new(options: CleanupOptions) -> Self {
        Self { options }
    }

    /// Create a pipeline from a preset.
    pub fn from_preset(preset: CleanupPreset) -> Self {
        Self::new(CleanupOptions::from_preset(preset))
    }

    /// Process text through the cleanup pipeline.
    pub fn process(&self, text: &str) -> String {
        let mut result = text.replace("\r\n", "\n");

        // Stage 1: character-level repair
        if self.options.normalize_unicode {
            result = result.nfc().collect();
        }
        if self.options.fix_ligatures {
            for (ligature, replacement) in LIGATURES {
                result = result.replace(ligature, replacement);
            }
        }
        if self.options.remove_replacement_char {
            result = result.replace('\u{FFFD}', "");
        }

        // Stage 2: line structure
        if self.options.strip_trailing_whitespace {
            result = TRAILING_WHITESPACE.replace_all(&result, "").into_owned();
        }
        if self.options.collapse_blank_lines {
            result = BLANK_LINE_RUN.replace_all(&result, "\n\n").into_owned();
        }

        // Stage 3: inline spacing
        if self.options.fix_sentence_spacing {
            result = GLUED_SENTENCE
                .replace_all(&result, |caps: &Captures| match caps.get(1) {
                    Some(url) => url.as_str().to_string(),
                    None => format!(". {}", &caps[2]),
                })
                .into_owned();
        }
        if self.options.collapse_inner_whitespace {
            // Leading indentation is left alone so nested list prefixes survive.
            result = INNER_SPACE_RUN.replace_all(&result, "${1} ").into_owned();
        }

        trim_blank_edges(&result).to_string()
    }
}

/// Drop leading blank lines and trailing whitespace, keeping the
/// indentation of the first content line.
fn trim_blank_edges(text: &str) -> &str {
    let content = text.trim_start();
    if content.is_empty() {
        return "";
    }
    let leading = &text[..text.len() - content.len()];
    let start = leading.rfind('\n').map_or(0, |i| i + 1);
    text[start..].trim_end()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standard(text: &str) -> String {
        CleanupPipeline::default().process(text)
    }

    #[test]
    fn test_collapse_blank_lines() {
        assert_eq!(standard("a\n\n\n\nb"), "a\n\nb");
        assert_eq!(standard("a\n\nb"), "a\n\nb");
    }

    #[test]
    fn test_sentence_spacing() {
        assert_eq!(standard("End.Start"), "End. Start");
        assert_eq!(standard("version 1.2"), "version 1.2");
        assert_eq!(standard("e.g. lower.case"), "e.g. lower.case");
    }

    #[test]
    fn test_sentence_spacing_skips_urls() {
        assert_eq!(
            standard("[x](https://a.io/Docs.Html) said.Then"),
            "[x](https://a.io/Docs.Html) said. Then"
        );
        assert_eq!(standard("see https://a.io/Read.Me now"), "see https://a.io/Read.Me now");
    }

    #[test]
    fn test_collapse_inner_whitespace() {
        assert_eq!(standard("a   b\t\tc"), "a b c");
        assert_eq!(standard("- top\n    - nested"), "- top\n    - nested");
    }

    #[test]
    fn test_trims_edges() {
        assert_eq!(standard("\n\nbody  \n\n"), "body");
        assert_eq!(standard("  \n\t\n"), "");
    }

    #[test]
    fn test_first_line_keeps_indent() {
        assert_eq!(standard("\n      - x\n      - y\n"), "      - x\n      - y");
        assert_eq!(standard("  \n    - deep"), "    - deep");
    }

    #[test]
    fn test_whitespace_only_lines_collapse() {
        assert_eq!(standard("a\n  \n \n\nb"), "a\n\nb");
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "Intro.Next   line\n\n\n\n| a | b |\n| --- | --- |\n",
            "  - item\n    - nested  item.End",
            "Tabs\t\tand  spaces .A",
            "\n    - first.Item [a](http://x.io/A.B)",
        ];
        for sample in samples {
            let once = standard(sample);
            assert_eq!(standard(&once), once, "not idempotent for {:?}", sample);
        }
    }

    #[test]
    fn test_minimal_keeps_spacing() {
        let pipeline = CleanupPipeline::from_preset(CleanupPreset::Minimal);
        assert_eq!(pipeline.process("a  b.C\n\n\n"), "a  b.C");
    }

    #[test]
    fn test_aggressive_repairs_glyphs() {
        let pipeline = CleanupPipeline::from_preset(CleanupPreset::Aggressive);
        assert_eq!(pipeline.process("\u{FB01}ne\u{FFFD}"), "fine");
        assert_eq!(pipeline.process("e\u{0301}"), "\u{00E9}");
    }
}
