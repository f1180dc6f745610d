//! Document model types.
//!
//! This module defines the intermediate representation that bridges
//! acquisition and rendering: the nested document tree on the input side
//! and the flat section list on the output side. Every shape here is
//! serializable so it can cross component boundaries as JSON.

mod document;
mod paragraph;
mod section;
mod subdocument;
mod table;

pub(crate) use document::escape_yaml;
pub use document::{Document, DocumentContent, Metadata};
pub use paragraph::{ListInfo, Paragraph, ParagraphStyle, TextRun, TextStyle};
pub use section::{OutputFile, RenderedUnit, Section};
pub use subdocument::{Block, SubDocument};
pub use table::{Table, TableCell, TableRow};
