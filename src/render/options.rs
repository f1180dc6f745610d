//! Rendering options and configuration.

use super::{CleanupOptions, CleanupPreset};

/// Options for rendering sections.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Maximum heading level (1-6)
    pub max_heading_level: u8,

    /// Include YAML frontmatter in output files
    pub include_frontmatter: bool,

    /// Append the provenance footer to output files
    pub include_footer: bool,

    /// Indentation unit per list nesting level
    pub list_indent: String,

    /// Escape special Markdown characters in run text
    pub escape_special_chars: bool,

    /// Content normalisation options
    pub cleanup: CleanupOptions,

    /// Render independent sections in parallel
    pub parallel: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum heading level.
    pub fn with_max_heading(mut self, level: u8) -> Self {
        self.max_heading_level = level.clamp(1, 6);
        self
    }

    /// Enable or disable frontmatter.
    pub fn with_frontmatter(mut self, include: bool) -> Self {
        self.include_frontmatter = include;
        self
    }

    /// Enable or disable the provenance footer.
    pub fn with_footer(mut self, include: bool) -> Self {
        self.include_footer = include;
        self
    }

    /// Enable or disable Markdown escaping of run text.
    pub fn with_escaping(mut self, escape: bool) -> Self {
        self.escape_special_chars = escape;
        self
    }

    /// Set cleanup options.
    pub fn with_cleanup(mut self, cleanup: CleanupOptions) -> Self {
        self.cleanup = cleanup;
        self
    }

    /// Set cleanup preset.
    pub fn with_cleanup_preset(mut self, preset: CleanupPreset) -> Self {
        self.cleanup = CleanupOptions::from_preset(preset);
        self
    }

    /// Enable or disable parallel rendering.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel rendering.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            max_heading_level: 6,
            include_frontmatter: false,
            include_footer: true,
            list_indent: "  ".to_string(),
            escape_special_chars: false,
            cleanup: CleanupOptions::default(),
            parallel: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_options_builder() {
        let options = RenderOptions::new()
            .with_frontmatter(true)
            .with_max_heading(9)
            .with_cleanup_preset(CleanupPreset::Minimal)
            .sequential();

        assert!(options.include_frontmatter);
        assert_eq!(options.max_heading_level, 6);
        assert!(!options.cleanup.fix_sentence_spacing);
        assert!(!options.parallel);
    }

    #[test]
    fn test_render_options_defaults() {
        let options = RenderOptions::default();
        assert_eq!(options.list_indent, "  ");
        assert!(options.include_footer);
        assert!(!options.escape_special_chars);
        assert!(options.parallel);
    }
}
