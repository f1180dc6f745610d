//! Paragraph and text-level types.

use serde::{Deserialize, Serialize};

/// A paragraph of text content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Text runs in the paragraph
    #[serde(default)]
    pub runs: Vec<TextRun>,

    /// Paragraph style
    #[serde(default)]
    pub style: ParagraphStyle,
}

impl Paragraph {
    /// Create a new empty paragraph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a paragraph with plain text.
    pub fn with_text(text: impl Into<String>) -> Self {
        let mut p = Self::new();
        p.add_text(text);
        p
    }

    /// Create a heading paragraph.
    pub fn heading(text: impl Into<String>, level: u8) -> Self {
        let mut p = Self::with_text(text);
        p.style.heading_level = Some(level.clamp(1, 6));
        p
    }

    /// Create a paragraph carrying a named style (e.g. `HEADING_2`).
    pub fn styled(text: impl Into<String>, named_style: impl Into<String>) -> Self {
        let mut p = Self::with_text(text);
        p.style.named_style = Some(named_style.into());
        p
    }

    /// Create a list item paragraph.
    pub fn list_item(text: impl Into<String>, list_info: ListInfo) -> Self {
        let mut p = Self::with_text(text);
        p.style.list_info = Some(list_info);
        p
    }

    /// Add plain text to the paragraph.
    pub fn add_text(&mut self, text: impl Into<String>) {
        self.runs.push(TextRun::new(text));
    }

    /// Add a styled text run.
    pub fn add_run(&mut self, run: TextRun) {
        self.runs.push(run);
    }

    /// Builder form of [`Paragraph::add_run`].
    pub fn with_run(mut self, run: TextRun) -> Self {
        self.add_run(run);
        self
    }

    /// Get plain text content of the paragraph.
    pub fn plain_text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }

    /// Check if the paragraph is empty.
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty() || self.plain_text().trim().is_empty()
    }

    /// Check if this is a list item.
    pub fn is_list_item(&self) -> bool {
        self.style.list_info.is_some()
    }
}

/// A run of text with consistent styling.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    /// The text content
    pub text: String,

    /// Text styling
    #[serde(default)]
    pub style: TextStyle,
}

impl TextRun {
    /// Create a new text run with default style.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: TextStyle::default(),
        }
    }

    /// Create a text run with an explicit style.
    pub fn styled(text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    /// Create a bold text run.
    pub fn bold(text: impl Into<String>) -> Self {
        Self::styled(
            text,
            TextStyle {
                bold: true,
                ..Default::default()
            },
        )
    }

    /// Create an italic text run.
    pub fn italic(text: impl Into<String>) -> Self {
        Self::styled(
            text,
            TextStyle {
                italic: true,
                ..Default::default()
            },
        )
    }

    /// Create a hyperlink run.
    pub fn link(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self::styled(
            text,
            TextStyle {
                link_url: Some(url.into()),
                ..Default::default()
            },
        )
    }

    /// Check if this run is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Text styling properties.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextStyle {
    /// Bold text
    pub bold: bool,

    /// Italic text
    pub italic: bool,

    /// Underlined text
    pub underline: bool,

    /// Strikethrough text
    pub strikethrough: bool,

    /// Hyperlink target
    pub link_url: Option<String>,
}

impl TextStyle {
    /// Check if any styling is applied.
    pub fn has_styling(&self) -> bool {
        self.bold || self.italic || self.underline || self.strikethrough || self.link().is_some()
    }

    /// The link target, ignoring empty URLs.
    pub fn link(&self) -> Option<&str> {
        self.link_url.as_deref().filter(|url| !url.trim().is_empty())
    }
}

/// Paragraph styling properties.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParagraphStyle {
    /// Heading level (1-6), `0` or `None` for a normal paragraph
    pub heading_level: Option<u8>,

    /// Named style from the source editor (`HEADING_1`, `TITLE`, `NORMAL_TEXT`, ...)
    pub named_style: Option<String>,

    /// List information if this is a list item
    pub list_info: Option<ListInfo>,
}

/// Information about a list item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListInfo {
    /// Numbered list when true, bulleted otherwise
    pub ordered: bool,

    /// Nesting level (0 = top level)
    #[serde(default)]
    pub nesting_level: u8,
}

impl ListInfo {
    /// Create a new bulleted list item.
    pub fn bullet(nesting_level: u8) -> Self {
        Self {
            ordered: false,
            nesting_level,
        }
    }

    /// Create a new numbered list item.
    pub fn numbered(nesting_level: u8) -> Self {
        Self {
            ordered: true,
            nesting_level,
        }
    }
}
