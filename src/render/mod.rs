//! Rendering module: inline Markdown, tables, content cleanup and pages.

mod cleanup;
mod json;
mod markdown;
mod options;
mod page;

pub use cleanup::{CleanupOptions, CleanupPipeline, CleanupPreset};
pub use json::{to_json, JsonFormat};
pub use markdown::{
    format_paragraph, format_run, list_prefix, render_table, MarkdownRenderer, MAX_LIST_NESTING,
};
pub use options::RenderOptions;
pub use page::{render_section, PageRenderer};
