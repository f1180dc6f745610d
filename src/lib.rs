//! # unsection
//!
//! Document structuring and Markdown rendering engine.
//!
//! This library takes a hierarchical document (tabs, nested sub-documents,
//! paragraphs of formatted runs, lists and tables), cuts it into titled
//! sections at heading boundaries, and renders every section as a
//! standalone Markdown file.
//!
//! ## Quick Start
//!
//! ```
//! use unsection::{Document, Paragraph, SubDocument};
//!
//! fn main() -> unsection::Result<()> {
//!     let doc = Document::single(
//!         "Handbook",
//!         SubDocument::new()
//!             .paragraph(Paragraph::with_text("Welcome."))
//!             .paragraph(Paragraph::heading("Setup", 1))
//!             .paragraph(Paragraph::with_text("Install the tools.")),
//!     );
//!
//!     let result = unsection::convert_document(&doc)?;
//!     for file in &result.output.files {
//!         println!("{} ({} bytes)", file.name, file.content_len());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Heading segmentation**: explicit levels and named styles (`TITLE`,
//!   `SUBTITLE`, `HEADING_1`..`HEADING_6`)
//! - **Inline formatting**: bold, italic, underline, strikethrough and links
//! - **Lists and tables**: nested list indentation, pipe tables
//! - **Acquisition fallback**: rich tree with request variants, or a
//!   degraded plain-text/HTML export
//! - **Batch mode**: per-document failure isolation and document-prefixed
//!   file names
//! - **Parallel processing**: uses Rayon to render sections
//! - **Cleanup pipeline**: whitespace and Unicode normalisation

pub mod acquire;
pub mod convert;
pub mod detect;
pub mod error;
pub mod model;
pub mod output;
pub mod render;
pub mod segment;

// Re-export commonly used types
pub use acquire::{
    AcquireConfig, Acquired, AcquisitionSelector, BatchProgress, CollectionLister, DocumentRef,
    DocumentSource, FallbackChain, Fidelity, RequestVariant,
};
pub use convert::{ConversionStats, ConvertOptions, ConvertResult};
pub use detect::{detect_export_format, ExportFormat};
pub use error::{AcquireError, AcquireErrorKind, Error, Result};
pub use model::{
    Block, Document, DocumentContent, ListInfo, Metadata, OutputFile, Paragraph, ParagraphStyle,
    RenderedUnit, Section, SubDocument, Table, TableCell, TableRow, TextRun, TextStyle,
};
pub use output::{slugify, NamingMode, OutputSet};
pub use render::{CleanupOptions, CleanupPreset, JsonFormat, RenderOptions};
pub use segment::segment_document;

/// Segment a document and render every section with default options.
///
/// # Example
///
/// ```
/// use unsection::{to_markdown_units, Document, Paragraph, SubDocument};
///
/// let doc = Document::single("Notes", SubDocument::new().paragraph(Paragraph::with_text("hi")));
/// let units = to_markdown_units(&doc).unwrap();
/// assert_eq!(units[0].body, "# Notes\n\nhi\n");
/// ```
pub fn to_markdown_units(document: &Document) -> Result<Vec<RenderedUnit>> {
    let options = RenderOptions::default();
    let sections = segment::Flattener::new(options.clone()).flatten(document, None);
    if sections.is_empty() {
        return Err(Error::NoContent);
    }
    Ok(convert::render_sections(&sections, &options))
}

/// Convert a document with default options.
pub fn convert_document(document: &Document) -> Result<ConvertResult> {
    convert::convert_document(document, &ConvertOptions::default())
}

/// Convert a raw plain-text or HTML export with default options.
///
/// The result has no heading structure: one section holding every line.
///
/// # Example
///
/// ```
/// let result = unsection::convert_plain_text("Minutes", "Attendees\nDecisions").unwrap();
/// assert_eq!(result.section_count(), 1);
/// assert_eq!(result.output.files[0].name, "minutes.md");
/// ```
pub fn convert_plain_text(title: &str, raw: &str) -> Result<ConvertResult> {
    let document = detect::document_from_export(title, raw);
    convert::convert_document(&document, &ConvertOptions::default())
}

/// Builder for converting documents.
///
/// # Example
///
/// ```
/// use unsection::{CleanupPreset, Document, Paragraph, SubDocument, Unsection};
///
/// let doc = Document::single("Plan", SubDocument::new().paragraph(Paragraph::with_text("Ship it")));
/// let result = Unsection::new()
///     .with_frontmatter()
///     .with_cleanup(CleanupPreset::Aggressive)
///     .batch_naming()
///     .convert(&doc)?;
///
/// assert_eq!(result.output.files[0].name, "plan--plan.md");
/// # Ok::<(), unsection::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Unsection {
    options: ConvertOptions,
}

impl Unsection {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable YAML frontmatter in output files.
    pub fn with_frontmatter(mut self) -> Self {
        self.options.render = self.options.render.with_frontmatter(true);
        self
    }

    /// Enable or disable the provenance footer.
    pub fn with_footer(mut self, include: bool) -> Self {
        self.options.render = self.options.render.with_footer(include);
        self
    }

    /// Set cleanup preset.
    pub fn with_cleanup(mut self, preset: CleanupPreset) -> Self {
        self.options = self.options.with_cleanup(preset);
        self
    }

    /// Limit the rendered heading depth.
    pub fn with_max_heading(mut self, level: u8) -> Self {
        self.options.render = self.options.render.with_max_heading(level);
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.options = self.options.sequential();
        self
    }

    /// Name files `<document>--<title>.md`.
    pub fn batch_naming(mut self) -> Self {
        self.options = self.options.with_naming(NamingMode::Batch);
        self
    }

    /// The accumulated options.
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Convert an in-memory document.
    pub fn convert(&self, document: &Document) -> Result<ConvertResult> {
        convert::convert_document(document, &self.options)
    }

    /// Convert a raw plain-text or HTML export.
    pub fn convert_text(&self, title: &str, raw: &str) -> Result<ConvertResult> {
        let document = detect::document_from_export(title, raw);
        convert::convert_document(&document, &self.options)
    }

    /// Acquire one document through a selector and convert it.
    pub fn convert_acquired(
        &self,
        selector: &AcquisitionSelector,
        reference: &DocumentRef,
    ) -> Result<ConvertResult> {
        convert::convert_acquired(selector, reference, &self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> Document {
        Document::tabbed(
            "Guide",
            vec![SubDocument::titled("Install")
                .paragraph(Paragraph::heading("Linux", 2))
                .paragraph(Paragraph::with_text("apt install it"))],
        )
    }

    #[test]
    fn test_builder_default() {
        let builder = Unsection::default();
        assert!(!builder.options().render.include_frontmatter);
        assert!(builder.options().render.parallel);
        assert_eq!(builder.options().naming, NamingMode::Single);
    }

    #[test]
    fn test_builder_chained() {
        let builder = Unsection::new()
            .with_frontmatter()
            .with_footer(false)
            .with_cleanup(CleanupPreset::Minimal)
            .with_max_heading(3)
            .sequential()
            .batch_naming();

        let render = &builder.options().render;
        assert!(render.include_frontmatter);
        assert!(!render.include_footer);
        assert!(!render.parallel);
        assert_eq!(render.max_heading_level, 3);
        assert_eq!(builder.options().naming, NamingMode::Batch);
    }

    #[test]
    fn test_convert_document_helper() {
        let result = convert_document(&doc()).unwrap();
        assert_eq!(result.section_count(), 1);
        assert_eq!(result.sections[0].parent_label, "Install");
        assert_eq!(result.output.files[0].name, "linux.md");
    }

    #[test]
    fn test_to_markdown_units_empty() {
        assert!(matches!(
            to_markdown_units(&Document::new()),
            Err(Error::NoContent)
        ));
    }

    #[test]
    fn test_convert_plain_text_html() {
        let result = convert_plain_text("Page", "<html><body><h1>Big</h1><p>text</p></body></html>").unwrap();
        assert_eq!(result.section_count(), 1);
        assert_eq!(result.sections[0].title, "Page");
        assert_eq!(result.sections[0].content, "Big\ntext\n");
    }

    #[test]
    fn test_builder_convert_text() {
        let result = Unsection::new()
            .with_footer(false)
            .convert_text("Memo", "one\n\n\ntwo")
            .unwrap();
        assert_eq!(result.output.files[0].content, "# Memo\n\none\ntwo\n");
    }

    #[test]
    fn test_segment_document_reexport() {
        assert_eq!(segment_document(&doc()).len(), 1);
    }
}
