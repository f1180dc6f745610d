//! Conversion pipeline: document → sections → rendered units → output files.
//!
//! # Example
//!
//! ```
//! use unsection::convert::{convert_document, ConvertOptions};
//! use unsection::{Document, Paragraph, SubDocument};
//!
//! fn main() -> unsection::Result<()> {
//!     let doc = Document::single(
//!         "Guide",
//!         SubDocument::new()
//!             .paragraph(Paragraph::heading("Setup", 1))
//!             .paragraph(Paragraph::with_text("Install it.")),
//!     );
//!
//!     let result = convert_document(&doc, &ConvertOptions::default())?;
//!     assert_eq!(result.output.files[0].name, "setup.md");
//!     Ok(())
//! }
//! ```

mod stats;

pub use stats::ConversionStats;

use rayon::prelude::*;

use crate::acquire::{
    AcquisitionSelector, BatchProgress, CollectionLister, DocumentRef, Fidelity,
};
use crate::error::{Error, Result};
use crate::model::{Document, RenderedUnit, Section};
use crate::output::{package, NamingMode, OutputSet};
use crate::render::{CleanupPreset, PageRenderer, RenderOptions};
use crate::segment::Flattener;

/// Options for document conversion.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Rendering options (including the parallel flag)
    pub render: RenderOptions,

    /// Output file naming
    pub naming: NamingMode,
}

impl ConvertOptions {
    /// Create new conversion options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set rendering options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render = options;
        self
    }

    /// Set the naming mode.
    pub fn with_naming(mut self, naming: NamingMode) -> Self {
        self.naming = naming;
        self
    }

    /// Set the cleanup preset.
    pub fn with_cleanup(mut self, preset: CleanupPreset) -> Self {
        self.render = self.render.with_cleanup_preset(preset);
        self
    }

    /// Render sections on the current thread only.
    pub fn sequential(mut self) -> Self {
        self.render = self.render.sequential();
        self
    }
}

/// Result of a conversion.
#[derive(Debug, Clone)]
pub struct ConvertResult {
    /// Sections in document order
    pub sections: Vec<Section>,

    /// One rendered unit per section, same order
    pub units: Vec<RenderedUnit>,

    /// Named output files
    pub output: OutputSet,

    /// Conversion statistics
    pub stats: ConversionStats,

    /// Acquisition path, when the document was acquired by this crate
    pub fidelity: Option<Fidelity>,
}

impl ConvertResult {
    /// Number of sections.
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Concatenate all unit bodies, separated by blank lines.
    pub fn to_markdown(&self) -> String {
        self.units
            .iter()
            .map(|unit| unit.body.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Render sections into units, in input order.
pub fn render_sections(sections: &[Section], options: &RenderOptions) -> Vec<RenderedUnit> {
    let renderer = PageRenderer::new(options.clone());
    if options.parallel {
        sections.par_iter().map(|s| renderer.render(s)).collect()
    } else {
        sections.iter().map(|s| renderer.render(s)).collect()
    }
}

/// Convert an in-memory document.
///
/// Returns [`Error::NoContent`] when the document yields no sections.
pub fn convert_document(document: &Document, options: &ConvertOptions) -> Result<ConvertResult> {
    let source = match options.naming {
        NamingMode::Batch => document.title(),
        NamingMode::Single => None,
    };

    let sections = Flattener::new(options.render.clone()).flatten(document, source);
    if sections.is_empty() {
        return Err(Error::NoContent);
    }

    let mut stats = ConversionStats::from_document(document);
    stats.count_sections(&sections);

    Ok(finish(sections, stats, options.naming, &options.render))
}

/// Acquire one document through the selector and convert it.
pub fn convert_acquired(
    selector: &AcquisitionSelector,
    reference: &DocumentRef,
    options: &ConvertOptions,
) -> Result<ConvertResult> {
    let acquired = selector.acquire(reference)?;
    let mut result = convert_document(&acquired.document, options)?;
    result.fidelity = Some(acquired.fidelity);
    Ok(result)
}

/// Acquire every member of a collection and convert them together.
///
/// Files are always named in batch mode. Failed members appear as error
/// sections; the call fails only when no member produced content.
pub fn convert_batch(
    selector: &AcquisitionSelector,
    lister: &dyn CollectionLister,
    collection: &str,
    options: &ConvertOptions,
    progress: &dyn BatchProgress,
) -> Result<ConvertResult> {
    let outcome = selector.acquire_batch(lister, collection, progress)?;

    let mut stats = ConversionStats::new();
    for member in &outcome.members {
        match &member.result {
            Ok(document) => stats.merge(&ConversionStats::from_document(document)),
            Err(_) => stats.add_failed_document(),
        }
    }

    let sections = outcome.into_sections(&Flattener::new(options.render.clone()))?;
    stats.count_sections(&sections);

    let mut result = finish(sections, stats, NamingMode::Batch, &options.render);
    result.fidelity = Some(Fidelity::Rich);
    Ok(result)
}

fn finish(
    sections: Vec<Section>,
    stats: ConversionStats,
    naming: NamingMode,
    render: &RenderOptions,
) -> ConvertResult {
    let units = render_sections(&sections, render);
    let output = package(&units, naming, render);

    log::info!(
        "Converted {} sections into {} files",
        sections.len(),
        output.len()
    );

    ConvertResult {
        sections,
        units,
        output,
        stats,
        fidelity: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Paragraph, SubDocument};

    fn guide() -> Document {
        Document::single(
            "Guide",
            SubDocument::new()
                .paragraph(Paragraph::with_text("Intro"))
                .paragraph(Paragraph::heading("Setup", 1))
                .paragraph(Paragraph::with_text("Install it.")),
        )
    }

    #[test]
    fn test_convert_options_builder() {
        let options = ConvertOptions::new()
            .with_naming(NamingMode::Batch)
            .with_cleanup(CleanupPreset::Aggressive)
            .sequential();

        assert_eq!(options.naming, NamingMode::Batch);
        assert!(!options.render.parallel);
        assert!(options.render.cleanup.normalize_unicode);
    }

    #[test]
    fn test_convert_document() {
        let result = convert_document(&guide(), &ConvertOptions::default()).unwrap();

        assert_eq!(result.section_count(), 2);
        assert_eq!(result.units.len(), 2);
        assert_eq!(result.units[1].body, "# Setup\n\nInstall it.\n");
        let names: Vec<_> = result.output.files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["guide.md", "setup.md"]);
        assert_eq!(result.stats.section_count, 2);
        assert_eq!(result.stats.heading_count, 1);
        assert!(result.fidelity.is_none());
    }

    #[test]
    fn test_batch_naming_uses_document_title() {
        let options = ConvertOptions::new().with_naming(NamingMode::Batch);
        let result = convert_document(&guide(), &options).unwrap();
        assert_eq!(result.output.files[1].name, "guide--setup.md");
    }

    #[test]
    fn test_empty_document_has_no_content() {
        let result = convert_document(&Document::new(), &ConvertOptions::default());
        assert!(matches!(result, Err(Error::NoContent)));
    }

    #[test]
    fn test_parallel_and_sequential_agree() {
        let sections: Vec<_> = (0..50)
            .map(|i| Section::new(format!("S{}", i), 2, "Tab").with_content(format!("body {}\n", i)))
            .collect();

        let parallel = render_sections(&sections, &RenderOptions::default());
        let sequential = render_sections(&sections, &RenderOptions::default().sequential());
        assert_eq!(parallel, sequential);
        assert_eq!(parallel[7].title, "S7");
    }

    #[test]
    fn test_to_markdown() {
        let result = convert_document(&guide(), &ConvertOptions::default()).unwrap();
        assert_eq!(result.to_markdown(), "# Guide\n\nIntro\n\n# Setup\n\nInstall it.\n");
    }
}
