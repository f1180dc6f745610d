//! Paragraph classification by heading level and named style.

use crate::model::Paragraph;

/// What a paragraph contributes to segmentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParagraphKind {
    /// A heading at the given level (1-6)
    Heading(u8),
    /// Body text
    Body,
}

impl ParagraphKind {
    /// Heading level, or `None` for body text.
    pub fn heading_level(self) -> Option<u8> {
        match self {
            ParagraphKind::Heading(level) => Some(level),
            ParagraphKind::Body => None,
        }
    }
}

/// Classify a paragraph.
///
/// An explicit `heading_level` in `1..` wins (clamped to 6, `0` means body).
/// Otherwise the named style decides: `HEADING_1`..`HEADING_6`, `TITLE`
/// (level 1) and `SUBTITLE` (level 2) are headings, everything else is body.
pub fn classify(paragraph: &Paragraph) -> ParagraphKind {
    if let Some(level) = paragraph.style.heading_level {
        return if level == 0 {
            ParagraphKind::Body
        } else {
            ParagraphKind::Heading(level.min(6))
        };
    }

    paragraph
        .style
        .named_style
        .as_deref()
        .and_then(heading_level_for_style)
        .map_or(ParagraphKind::Body, ParagraphKind::Heading)
}

/// Map a named style to a heading level.
pub fn heading_level_for_style(name: &str) -> Option<u8> {
    let name = name.trim().to_ascii_uppercase();
    match name.as_str() {
        "TITLE" => Some(1),
        "SUBTITLE" => Some(2),
        _ => name
            .strip_prefix("HEADING_")
            .and_then(|n| n.parse::<u8>().ok())
            .filter(|level| (1..=6).contains(level)),
    }
}
