//! Page rendering: turns a [`Section`] into a [`RenderedUnit`].

use crate::error::{Error, Result};
use crate::model::{RenderedUnit, Section};

use super::{CleanupPipeline, RenderOptions};

/// Render a section with default options.
pub fn render_section(section: &Section) -> RenderedUnit {
    PageRenderer::default().render(section)
}

/// Renders sections into Markdown units.
#[derive(Debug, Clone, Default)]
pub struct PageRenderer {
    options: RenderOptions,
    pipeline: CleanupPipeline,
}

impl PageRenderer {
    /// Create a page renderer.
    pub fn new(options: RenderOptions) -> Self {
        let pipeline = CleanupPipeline::new(options.cleanup.clone());
        Self { options, pipeline }
    }

    /// Render a section, degrading to a minimal unit on failure.
    ///
    /// Never fails: one bad section must not abort a whole conversion.
    pub fn render(&self, section: &Section) -> RenderedUnit {
        match self.try_render(section) {
            Ok(unit) => unit,
            Err(e) => {
                log::warn!("Falling back to minimal render for '{}': {}", section.title, e);
                minimal_unit(section)
            }
        }
    }

    /// Render a section, reporting failures.
    pub fn try_render(&self, section: &Section) -> Result<RenderedUnit> {
        if section.level == 0 {
            return Err(Error::Render(format!(
                "section '{}' has heading level 0",
                section.title
            )));
        }
        if section.title.contains('\n') {
            return Err(Error::Render(format!(
                "section title spans multiple lines: {:?}",
                section.title
            )));
        }

        let level = section.level.min(self.options.max_heading_level).min(6);
        let mut body = "#".repeat(level as usize);
        body.push(' ');
        body.push_str(section.title.trim());

        let content = self.pipeline.process(&section.content);
        if !content.is_empty() {
            body.push_str("\n\n");
            body.push_str(&content);
        }
        body.push('\n');

        Ok(RenderedUnit {
            title: section.title.clone(),
            body,
            source_document_name: section.source_document_name.clone(),
        })
    }
}

fn minimal_unit(section: &Section) -> RenderedUnit {
    let mut body = format!("# {}\n\n{}", section.title, section.content);
    let trimmed = body.trim_end().len();
    body.truncate(trimmed);
    body.push('\n');

    RenderedUnit {
        title: section.title.clone(),
        body,
        source_document_name: section.source_document_name.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_heading_and_content() {
        let section = Section::new("Setup", 2, "Tab").with_content("Step one\n");
        let unit = render_section(&section);
        assert_eq!(unit.body, "## Setup\n\nStep one\n");
        assert_eq!(unit.title, "Setup");
    }

    #[test]
    fn test_level_capped_at_six() {
        let section = Section::new("Deep", 9, "Tab").with_content("x");
        assert!(render_section(&section).body.starts_with("###### Deep\n"));
    }

    #[test]
    fn test_max_heading_option() {
        let renderer = PageRenderer::new(RenderOptions::new().with_max_heading(2));
        let section = Section::new("Deep", 5, "Tab").with_content("x");
        assert!(renderer.render(&section).body.starts_with("## Deep\n"));
    }

    #[test]
    fn test_single_trailing_newline() {
        let section = Section::new("T", 1, "Tab").with_content("body\n\n\n\n");
        let unit = render_section(&section);
        assert!(unit.body.ends_with("body\n"));
        assert!(!unit.body.ends_with("\n\n"));
    }

    #[test]
    fn test_empty_content() {
        let unit = render_section(&Section::new("Only", 1, "Tab"));
        assert_eq!(unit.body, "# Only\n");
    }

    #[test]
    fn test_level_zero_degrades() {
        let section = Section::new("Broken", 0, "Tab").with_content("raw  text\n\n");
        let renderer = PageRenderer::default();
        assert!(renderer.try_render(&section).is_err());

        let unit = renderer.render(&section);
        assert_eq!(unit.body, "# Broken\n\nraw  text\n");
    }

    #[test]
    fn test_render_is_pure() {
        let section = Section::new("A", 1, "Tab")
            .with_content("One.Two   three\n\n\n\nfour")
            .with_source("Doc");
        let renderer = PageRenderer::default();
        assert_eq!(renderer.render(&section), renderer.render(&section));
        assert_eq!(
            renderer.render(&section).body,
            "# A\n\nOne. Two three\n\nfour\n"
        );
    }
}
