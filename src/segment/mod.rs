//! Section segmentation: paragraph classification, heading-driven cuts and
//! flattening of the sub-document tree.

mod classify;
mod flatten;
mod segmenter;

pub use classify::{classify, heading_level_for_style, ParagraphKind};
pub use flatten::{
    flatten_subdocuments, is_placeholder_title, segment_document, Flattener, DOCUMENT_CONTENT,
    UNTITLED_DOCUMENT,
};
pub use segmenter::{segment_blocks, Segmenter};
