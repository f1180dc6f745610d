//! Conversion statistics.

use serde::{Deserialize, Serialize};

use crate::model::{Block, Document, DocumentContent, Section, SubDocument};
use crate::segment::{classify, flatten_subdocuments, ParagraphKind};

/// Statistics collected during conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionStats {
    /// Documents converted successfully
    pub document_count: u32,

    /// Documents that could not be acquired
    pub failed_document_count: u32,

    /// Sub-documents walked, nested ones included
    pub subdocument_count: u32,

    /// Sections produced
    pub section_count: u32,

    /// Heading paragraphs seen
    pub heading_count: u32,

    /// Body paragraphs seen (list items excluded)
    pub paragraph_count: u32,

    /// List item paragraphs seen
    pub list_item_count: u32,

    /// Tables seen
    pub table_count: u32,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: u32,

    /// Character count (excluding whitespace)
    pub char_count: u32,
}

impl ConversionStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count the blocks of one document.
    pub fn from_document(document: &Document) -> Self {
        let mut stats = Self {
            document_count: 1,
            ..Self::default()
        };

        let subs: Vec<&SubDocument> = match &document.content {
            DocumentContent::SingleBody(body) => std::iter::once(body)
                .chain(flatten_subdocuments(&body.children))
                .collect(),
            DocumentContent::Tabbed(tabs) => flatten_subdocuments(tabs),
        };
        stats.subdocument_count = subs.len() as u32;

        for block in subs.iter().flat_map(|sub| sub.body.iter()) {
            match block {
                Block::Table(_) => stats.table_count += 1,
                Block::Paragraph(p) if p.is_empty() => {}
                Block::Paragraph(p) => match classify(p) {
                    ParagraphKind::Heading(_) => stats.heading_count += 1,
                    ParagraphKind::Body if p.is_list_item() => stats.list_item_count += 1,
                    ParagraphKind::Body => stats.paragraph_count += 1,
                },
            }
        }

        stats
    }

    /// Count sections and the words in them.
    pub fn count_sections(&mut self, sections: &[Section]) {
        self.section_count += sections.len() as u32;
        for section in sections {
            self.count_text(&section.content);
        }
    }

    /// Add word and character counts from text.
    pub fn count_text(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count() as u32;
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count() as u32;
    }

    /// Record a document that failed.
    pub fn add_failed_document(&mut self) {
        self.failed_document_count += 1;
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &ConversionStats) {
        self.document_count += other.document_count;
        self.failed_document_count += other.failed_document_count;
        self.subdocument_count += other.subdocument_count;
        self.section_count += other.section_count;
        self.heading_count += other.heading_count;
        self.paragraph_count += other.paragraph_count;
        self.list_item_count += other.list_item_count;
        self.table_count += other.table_count;
        self.word_count += other.word_count;
        self.char_count += other.char_count;
    }
}
