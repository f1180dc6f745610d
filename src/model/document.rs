//! Document-level types.

use super::{Block, Paragraph, SubDocument};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A fetched document: a title plus either a single body or a list of tabs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Document metadata (title, id, revision)
    #[serde(default)]
    pub metadata: Metadata,

    /// Body content
    pub content: DocumentContent,
}

impl Document {
    /// Create a new empty single-body document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a single-body document.
    pub fn single(title: impl Into<String>, body: SubDocument) -> Self {
        Self {
            metadata: Metadata::titled(title),
            content: DocumentContent::SingleBody(body),
        }
    }

    /// Create a tabbed document.
    pub fn tabbed(title: impl Into<String>, tabs: Vec<SubDocument>) -> Self {
        Self {
            metadata: Metadata::titled(title),
            content: DocumentContent::Tabbed(tabs),
        }
    }

    /// Build the degraded form of a document: one synthetic, untitled
    /// sub-document holding every non-blank line as a body paragraph.
    ///
    /// No heading structure is derived from the text.
    pub fn from_plain_text(title: impl Into<String>, text: &str) -> Self {
        let body = text
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.trim().is_empty())
            .map(|line| Block::Paragraph(Paragraph::with_text(line)))
            .collect();
        Self::single(title, SubDocument::with_body(body))
    }

    /// The document title if it has visible text.
    pub fn title(&self) -> Option<&str> {
        self.metadata
            .title
            .as_deref()
            .map(str::trim)
            .filter(|title| !title.is_empty())
    }

    /// Top-level sub-documents, or `None` for the single-body form.
    ///
    /// An empty tab list is treated as the single-body form.
    pub fn tabs(&self) -> Option<&[SubDocument]> {
        match &self.content {
            DocumentContent::Tabbed(tabs) if !tabs.is_empty() => Some(tabs),
            _ => None,
        }
    }

    /// Total number of sub-documents, including nested ones.
    pub fn subdocument_count(&self) -> usize {
        fn count(subs: &[SubDocument]) -> usize {
            subs.iter().map(|sub| 1 + count(&sub.children)).sum()
        }
        match &self.content {
            DocumentContent::SingleBody(body) => 1 + count(&body.children),
            DocumentContent::Tabbed(tabs) => count(tabs),
        }
    }

    /// Check if the document has no blocks anywhere.
    pub fn is_empty(&self) -> bool {
        fn all_empty(subs: &[SubDocument]) -> bool {
            subs.iter()
                .all(|sub| sub.is_empty() && all_empty(&sub.children))
        }
        match &self.content {
            DocumentContent::SingleBody(body) => body.is_empty() && all_empty(&body.children),
            DocumentContent::Tabbed(tabs) => all_empty(tabs),
        }
    }
}

/// Shape of a document body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum DocumentContent {
    /// A document without tabs
    SingleBody(SubDocument),

    /// A document with ordered top-level tabs
    Tabbed(Vec<SubDocument>),
}

impl Default for DocumentContent {
    fn default() -> Self {
        DocumentContent::SingleBody(SubDocument::default())
    }
}

/// Document metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metadata {
    /// Source identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Document title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Revision the document was fetched at
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revision_id: Option<String>,

    /// Last modification date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<DateTime<Utc>>,
}

impl Metadata {
    /// Create metadata with a title.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    /// Convert metadata to YAML frontmatter format.
    pub fn to_yaml_frontmatter(&self) -> String {
        let mut lines = vec!["---".to_string()];

        if let Some(ref title) = self.title {
            lines.push(format!("title: \"{}\"", escape_yaml(title)));
        }
        if let Some(ref id) = self.id {
            lines.push(format!("document_id: \"{}\"", escape_yaml(id)));
        }
        if let Some(ref revision) = self.revision_id {
            lines.push(format!("revision: \"{}\"", escape_yaml(revision)));
        }
        if let Some(ref modified) = self.modified {
            lines.push(format!("modified: {}", modified.to_rfc3339()));
        }

        lines.push("---".to_string());
        lines.push(String::new());

        lines.join("\n")
    }
}

/// Escape special characters for YAML strings.
pub(crate) fn escape_yaml(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}
