//! Acquisition configuration.

use crate::detect::ExportFormat;
use serde::{Deserialize, Serialize};

/// One way of requesting the structured document tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestVariant {
    /// Name used in logs
    pub name: String,

    /// Ask the source to include tab bodies
    pub include_tabs_content: bool,

    /// Field mask, `None` for the source's default fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<String>,
}

impl RequestVariant {
    /// Create a variant with default fields.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            include_tabs_content: false,
            fields: None,
        }
    }

    /// The most specific request: tab bodies and every field.
    pub fn extended() -> Self {
        Self {
            name: "extended".to_string(),
            include_tabs_content: true,
            fields: Some("*".to_string()),
        }
    }

    /// The plain request with the source's default fields.
    pub fn default_fields() -> Self {
        Self::new("default")
    }

    /// Set whether tab bodies are requested.
    pub fn with_tabs_content(mut self, include: bool) -> Self {
        self.include_tabs_content = include;
        self
    }

    /// Set the field mask.
    pub fn with_fields(mut self, fields: impl Into<String>) -> Self {
        self.fields = Some(fields.into());
        self
    }
}

/// Configuration for [`AcquisitionSelector`](super::AcquisitionSelector).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcquireConfig {
    /// Whether the caller is authorised for the structured (rich) path
    pub rich_access: bool,

    /// Rich request variants, most specific first
    pub request_variants: Vec<RequestVariant>,

    /// Format requested on the degraded path
    pub export_format: ExportFormat,

    /// Fall back to the lower-level listing request when the primary fails
    pub listing_fallback: bool,
}

impl Default for AcquireConfig {
    fn default() -> Self {
        Self {
            rich_access: true,
            request_variants: vec![RequestVariant::extended(), RequestVariant::default_fields()],
            export_format: ExportFormat::PlainText,
            listing_fallback: true,
        }
    }
}

impl AcquireConfig {
    /// Create the default configuration (rich access, two variants).
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration for callers without rich access.
    pub fn degraded() -> Self {
        Self::default().with_rich_access(false)
    }

    /// Set the rich-access capability flag.
    pub fn with_rich_access(mut self, rich: bool) -> Self {
        self.rich_access = rich;
        self
    }

    /// Replace the request variants.
    pub fn with_variants(mut self, variants: Vec<RequestVariant>) -> Self {
        self.request_variants = variants;
        self
    }

    /// Set the export format for the degraded path.
    pub fn with_export_format(mut self, format: ExportFormat) -> Self {
        self.export_format = format;
        self
    }

    /// Enable or disable the lower-level listing fallback.
    pub fn with_listing_fallback(mut self, enabled: bool) -> Self {
        self.listing_fallback = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_variants_order() {
        let config = AcquireConfig::default();
        let names: Vec<_> = config.request_variants.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["extended", "default"]);
        assert!(config.rich_access);
        assert!(config.listing_fallback);
    }

    #[test]
    fn test_builder() {
        let config = AcquireConfig::degraded()
            .with_export_format(ExportFormat::Html)
            .with_listing_fallback(false)
            .with_variants(vec![RequestVariant::new("only").with_fields("title,body")]);
        assert!(!config.rich_access);
        assert_eq!(config.export_format, ExportFormat::Html);
        assert_eq!(config.request_variants[0].fields.as_deref(), Some("title,body"));
    }
}
