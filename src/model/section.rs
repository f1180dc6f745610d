//! Segmentation output types: sections, rendered units and output files.

use serde::{Deserialize, Serialize};

/// A titled span of content bounded by heading elements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Heading text (formatted)
    pub title: String,

    /// Markdown body accumulated under the heading
    pub content: String,

    /// Heading level (1-6)
    pub level: u8,

    /// Label of the sub-document the section came from
    pub parent_label: String,

    /// Name of the originating document in batch runs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_document_name: Option<String>,
}

impl Section {
    /// Create a section with empty content.
    pub fn new(title: impl Into<String>, level: u8, parent_label: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: String::new(),
            level,
            parent_label: parent_label.into(),
            source_document_name: None,
        }
    }

    /// Set the content and return self.
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Set the source document name and return self.
    pub fn with_source(mut self, name: impl Into<String>) -> Self {
        self.source_document_name = Some(name.into());
        self
    }

    /// Check whether the content trims to nothing.
    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }
}

/// The Markdown-rendered form of a [`Section`].
///
/// `body` always ends with exactly one newline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedUnit {
    /// Section title
    pub title: String,

    /// Rendered Markdown (heading line, blank line, content)
    pub body: String,

    /// Name of the originating document in batch runs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_document_name: Option<String>,
}

/// A named artifact ready for packaging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputFile {
    /// File name, including the `.md` extension
    pub name: String,

    /// File content
    pub content: String,
}

impl OutputFile {
    /// Create an output file.
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Get content length in bytes.
    pub fn content_len(&self) -> usize {
        self.content.len()
    }
}
