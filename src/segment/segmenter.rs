//! Heading-driven segmentation of one sub-document body.

use crate::model::{Block, Paragraph, Section, Table};
use crate::render::{MarkdownRenderer, RenderOptions};

use super::classify::{classify, ParagraphKind};

/// Segment a body with default render options.
pub fn segment_blocks(blocks: &[Block], parent_label: &str) -> Vec<Section> {
    Segmenter::default().segment(blocks, parent_label)
}

/// Splits a body into sections at every heading.
#[derive(Debug, Clone, Default)]
pub struct Segmenter {
    renderer: MarkdownRenderer,
}

impl Segmenter {
    /// Create a segmenter using the given render options for inline content.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            renderer: MarkdownRenderer::new(options),
        }
    }

    /// Walk the blocks left to right and return the emitted sections.
    ///
    /// Content before the first heading lands in a default section titled
    /// after `parent_label`. Sections whose content trims to nothing are
    /// dropped, except for the single fallback emitted when content was seen
    /// but nothing else survived.
    pub fn segment(&self, blocks: &[Block], parent_label: &str) -> Vec<Section> {
        let state = blocks
            .iter()
            .fold(SegmentState::default(), |state, block| match block {
                Block::Paragraph(p) => self.step_paragraph(state, p, parent_label),
                Block::Table(t) => self.step_table(state, t, parent_label),
            });

        let sections = state.finish(parent_label);
        log::debug!(
            "Segmented '{}': {} blocks -> {} sections",
            parent_label,
            blocks.len(),
            sections.len()
        );
        sections
    }

    fn step_paragraph(
        &self,
        state: SegmentState,
        paragraph: &Paragraph,
        parent_label: &str,
    ) -> SegmentState {
        let text = self.renderer.format_paragraph(paragraph);
        if text.trim().is_empty() {
            return state;
        }

        match classify(paragraph) {
            ParagraphKind::Heading(level) => state.start_section(text.trim(), level, parent_label),
            ParagraphKind::Body => state.append(&format!("{}\n", text), parent_label),
        }
    }

    fn step_table(&self, state: SegmentState, table: &Table, parent_label: &str) -> SegmentState {
        let rendered = self.renderer.render_table(table);
        state.append(&format!("{}\n\n", rendered), parent_label)
    }
}

/// Fold accumulator for [`Segmenter::segment`].
#[derive(Debug, Default)]
struct SegmentState {
    sections: Vec<Section>,
    current: Option<Section>,
    seen: String,
    saw_content: bool,
}

impl SegmentState {
    fn start_section(mut self, title: &str, level: u8, parent_label: &str) -> Self {
        self.flush();
        self.current = Some(Section::new(title, level, parent_label));
        self
    }

    fn append(mut self, text: &str, parent_label: &str) -> Self {
        self.seen.push_str(text);
        self.saw_content = true;
        self.current
            .get_or_insert_with(|| Section::new(parent_label, 1, parent_label))
            .content
            .push_str(text);
        self
    }

    fn flush(&mut self) {
        if let Some(section) = self.current.take() {
            if !section.is_blank() {
                self.sections.push(section);
            }
        }
    }

    fn finish(mut self, parent_label: &str) -> Vec<Section> {
        self.flush();
        if self.sections.is_empty() && self.saw_content {
            self.sections
                .push(Section::new(parent_label, 1, parent_label).with_content(self.seen));
        }
        self.sections
    }
}
