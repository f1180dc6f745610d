//! Export format detection for degraded (text) acquisition.
//!
//! When structured access is unavailable the document is fetched as an
//! export string. Sources may hand back HTML even when plain text was asked
//! for, so the payload is sniffed before it is turned into paragraphs.

use crate::model::Document;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static BLOCK_BREAK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)<\s*(br\s*/?|/p|/div|/li|/h[1-6]|/tr|/table|/title)\s*>")
        .expect("valid block tag regex")
});

static DROPPED_ELEMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<\s*(script|style|head)\b[^>]*>.*?<\s*/\s*(script|style|head)\s*>")
        .expect("valid dropped element regex")
});

static ANY_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));

/// HTML sniffing looks at no more than this many leading characters.
const SNIFF_LEN: usize = 512;

/// Format of a degraded export payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    /// Plain text, one paragraph per line
    #[default]
    PlainText,
    /// HTML markup
    Html,
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::PlainText => f.write_str("text/plain"),
            ExportFormat::Html => f.write_str("text/html"),
        }
    }
}

/// Detect the format of an export payload from its leading markup.
///
/// # Example
/// ```
/// use unsection::detect::{detect_export_format, ExportFormat};
///
/// assert_eq!(detect_export_format("<!DOCTYPE html><p>x</p>"), ExportFormat::Html);
/// assert_eq!(detect_export_format("just text"), ExportFormat::PlainText);
/// ```
pub fn detect_export_format(raw: &str) -> ExportFormat {
    let head: String = raw
        .trim_start_matches('\u{FEFF}')
        .trim_start()
        .chars()
        .take(SNIFF_LEN)
        .collect::<String>()
        .to_ascii_lowercase();

    let is_html = head.starts_with("<!doctype html")
        || head.starts_with("<html")
        || (head.starts_with('<') && (head.contains("<body") || head.contains("<p")));

    if is_html {
        ExportFormat::Html
    } else {
        ExportFormat::PlainText
    }
}

/// Reduce an HTML export to plain text lines.
pub fn html_to_text(html: &str) -> String {
    let text = DROPPED_ELEMENT.replace_all(html, "");
    let text = BLOCK_BREAK.replace_all(&text, "\n");
    let text = ANY_TAG.replace_all(&text, "");
    decode_entities(&text)
}

/// Build the degraded document model from an export payload.
///
/// The result has exactly one synthetic, untitled sub-document and no
/// heading-derived structure.
pub fn document_from_export(title: &str, raw: &str) -> Document {
    let text = match detect_export_format(raw) {
        ExportFormat::Html => html_to_text(raw),
        ExportFormat::PlainText => raw.to_string(),
    };
    Document::from_plain_text(title, &text)
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Block, DocumentContent};

    #[test]
    fn test_detect_html() {
        assert_eq!(detect_export_format("<!DOCTYPE html>"), ExportFormat::Html);
        assert_eq!(detect_export_format("  <HTML><body>"), ExportFormat::Html);
        assert_eq!(detect_export_format("<p>para</p>"), ExportFormat::Html);
        assert_eq!(detect_export_format("\u{FEFF}<html>"), ExportFormat::Html);
    }

    #[test]
    fn test_detect_plain_text() {
        assert_eq!(detect_export_format(""), ExportFormat::PlainText);
        assert_eq!(detect_export_format("a < b"), ExportFormat::PlainText);
        assert_eq!(detect_export_format("<not markup"), ExportFormat::PlainText);
    }

    #[test]
    fn test_html_to_text() {
        let html = "<html><head><title>T</title><style>p{}</style></head>\
                    <body><h1>Head</h1><p>One &amp; two</p><p>Three<br/>Four</p></body></html>";
        let text = html_to_text(html);
        let lines: Vec<_> = text.lines().filter(|l| !l.trim().is_empty()).collect();
        assert_eq!(lines, vec!["Head", "One & two", "Three", "Four"]);
    }

    #[test]
    fn test_document_from_export() {
        let doc = document_from_export("Notes", "<p>A</p><p>B</p>");
        let DocumentContent::SingleBody(body) = &doc.content else {
            panic!("expected single body");
        };
        assert_eq!(body.body.len(), 2);
        assert!(matches!(&body.body[0], Block::Paragraph(p) if p.plain_text() == "A"));
    }

    #[test]
    fn test_format_display() {
        assert_eq!(ExportFormat::Html.to_string(), "text/html");
    }
}
