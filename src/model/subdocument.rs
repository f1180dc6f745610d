//! Sub-document (tab) level types.

use super::{Paragraph, Table};
use serde::{Deserialize, Serialize};

/// A named, independently walkable body of blocks.
///
/// Multi-part documents call these "tabs". A sub-document may carry nested
/// child sub-documents, which are walked after their parent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubDocument {
    /// Source identifier of the tab, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Human-readable title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Content blocks in document order
    #[serde(default)]
    pub body: Vec<Block>,

    /// Nested sub-documents
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SubDocument>,
}

impl SubDocument {
    /// Create an untitled, empty sub-document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty sub-document with a title.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Create an untitled sub-document from blocks.
    pub fn with_body(body: Vec<Block>) -> Self {
        Self {
            body,
            ..Self::default()
        }
    }

    /// Add a block to the body.
    pub fn add_block(&mut self, block: Block) {
        self.body.push(block);
    }

    /// Add a paragraph to the body.
    pub fn add_paragraph(&mut self, paragraph: Paragraph) {
        self.body.push(Block::Paragraph(paragraph));
    }

    /// Add a table to the body.
    pub fn add_table(&mut self, table: Table) {
        self.body.push(Block::Table(table));
    }

    /// Add a nested sub-document.
    pub fn add_child(&mut self, child: SubDocument) {
        self.children.push(child);
    }

    /// Builder form of [`SubDocument::add_paragraph`].
    pub fn paragraph(mut self, paragraph: Paragraph) -> Self {
        self.add_paragraph(paragraph);
        self
    }

    /// Builder form of [`SubDocument::add_table`].
    pub fn table(mut self, table: Table) -> Self {
        self.add_table(table);
        self
    }

    /// Builder form of [`SubDocument::add_child`].
    pub fn child(mut self, child: SubDocument) -> Self {
        self.add_child(child);
        self
    }

    /// The title if it has visible text.
    pub fn label(&self) -> Option<&str> {
        self.title
            .as_deref()
            .map(str::trim)
            .filter(|title| !title.is_empty())
    }

    /// Check if the body has no blocks.
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Get plain text content of the body (children excluded).
    pub fn plain_text(&self) -> String {
        self.body
            .iter()
            .map(|block| match block {
                Block::Paragraph(p) => p.plain_text(),
                Block::Table(t) => t
                    .rows
                    .iter()
                    .map(|row| {
                        row.cells
                            .iter()
                            .map(|c| c.plain_text())
                            .collect::<Vec<_>>()
                            .join("\t")
                    })
                    .collect::<Vec<_>>()
                    .join("\n"),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A block-level element of a sub-document body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// A paragraph of text
    Paragraph(Paragraph),

    /// A table
    Table(Table),
}

impl Block {
    /// Check if this block is a paragraph.
    pub fn is_paragraph(&self) -> bool {
        matches!(self, Block::Paragraph(_))
    }

    /// Check if this block is a table.
    pub fn is_table(&self) -> bool {
        matches!(self, Block::Table(_))
    }
}

impl From<Paragraph> for Block {
    fn from(paragraph: Paragraph) -> Self {
        Block::Paragraph(paragraph)
    }
}

impl From<Table> for Block {
    fn from(table: Table) -> Self {
        Block::Table(table)
    }
}
