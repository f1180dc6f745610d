//! Inline and block Markdown rendering: runs, list prefixes and tables.

use crate::model::{ListInfo, Paragraph, Table, TextRun, TextStyle};

use super::RenderOptions;

/// Deepest list nesting rendered; deeper items are indented at this depth.
pub const MAX_LIST_NESTING: usize = 16;

/// Render a single text run with default options.
///
/// Wraps are applied innermost first: strikethrough, underline, bold,
/// italic, then the link as the outermost wrap.
pub fn format_run(run: &TextRun) -> String {
    MarkdownRenderer::default().format_run(run)
}

/// Line prefix for a list item with the default two-space indent.
pub fn list_prefix(list_info: Option<&ListInfo>) -> String {
    MarkdownRenderer::default().list_prefix(list_info)
}

/// Render a table as a pipe table.
pub fn render_table(table: &Table) -> String {
    MarkdownRenderer::default().render_table(table)
}

/// Render a paragraph (list prefix plus formatted runs) with default options.
pub fn format_paragraph(paragraph: &Paragraph) -> String {
    MarkdownRenderer::default().format_paragraph(paragraph)
}

/// Markdown renderer for inline content and tables.
#[derive(Debug, Clone, Default)]
pub struct MarkdownRenderer {
    options: RenderOptions,
}

impl MarkdownRenderer {
    /// Create a new Markdown renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render options in use.
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render a paragraph: list prefix followed by each formatted run.
    pub fn format_paragraph(&self, paragraph: &Paragraph) -> String {
        let mut output = self.list_prefix(paragraph.style.list_info.as_ref());
        for run in &paragraph.runs {
            output.push_str(&self.format_run(run));
        }
        output
    }

    /// Render one text run.
    pub fn format_run(&self, run: &TextRun) -> String {
        if run.text.is_empty() {
            return String::new();
        }

        // Markers hug the visible text; surrounding whitespace stays outside.
        let core = run.text.trim();
        if core.is_empty() {
            return run.text.clone();
        }
        let start = run.text.len() - run.text.trim_start().len();
        let leading = &run.text[..start];
        let trailing = &run.text[start + core.len()..];

        let text = if self.options.escape_special_chars {
            escape_markdown(core)
        } else {
            core.to_string()
        };

        let mut output = String::with_capacity(run.text.len() + 16);
        output.push_str(leading);
        output.push_str(&apply_text_style(&text, &run.style));
        output.push_str(trailing);
        output
    }

    /// Line prefix for a list item, or an empty string for non-list paragraphs.
    ///
    /// Ordered items always render as `1.`; the source data carries no
    /// sequence numbers.
    pub fn list_prefix(&self, list_info: Option<&ListInfo>) -> String {
        let Some(info) = list_info else {
            return String::new();
        };

        let depth = (info.nesting_level as usize).min(MAX_LIST_NESTING);
        let mut prefix = self.options.list_indent.repeat(depth);
        prefix.push_str(if info.ordered { "1. " } else { "- " });
        prefix
    }

    /// Render a table as a Markdown pipe table.
    ///
    /// Cells hold plain text only, with `|` escaped as `\|`. A separator
    /// row follows the first row.
    pub fn render_table(&self, table: &Table) -> String {
        if table.is_empty() {
            return String::new();
        }

        let mut output = String::new();
        for (i, row) in table.rows.iter().enumerate() {
            output.push('|');
            for cell in &row.cells {
                output.push(' ');
                output.push_str(&escape_cell(&cell.plain_text()));
                output.push_str(" |");
            }
            output.push('\n');

            if i == 0 {
                output.push('|');
                for _ in 0..table.column_count() {
                    output.push_str(" --- |");
                }
                output.push('\n');
            }
        }

        output.trim_end_matches('\n').to_string()
    }
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

fn apply_text_style(text: &str, style: &TextStyle) -> String {
    let mut result = text.to_string();

    // Innermost first
    if style.strikethrough {
        result = format!("~~{}~~", result);
    }
    if style.underline {
        result = format!("<u>{}</u>", result);
    }
    if style.bold {
        result = format!("**{}**", result);
    }
    if style.italic {
        result = format!("*{}*", result);
    }
    if let Some(url) = style.link() {
        result = format!("[{}]({})", result, url);
    }

    result
}

/// Escape special Markdown characters.
/// Only escape characters that could be misinterpreted as Markdown syntax.
fn escape_markdown(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '`' | '*' | '_' | '[' | ']' | '|' => {
                result.push('\\');
                result.push(c);
            }
            _ => result.push(c),
        }
    }
    result
}
