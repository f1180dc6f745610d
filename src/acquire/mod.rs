//! Document acquisition with fidelity degradation.
//!
//! The library never talks to the network itself. Callers implement
//! [`DocumentSource`] and [`CollectionLister`] over whatever transport they
//! own, and the [`AcquisitionSelector`] decides which strategy to use:
//!
//! * **Rich path**: the structured [`Document`] tree, requested through
//!   each configured [`RequestVariant`] in turn.
//! * **Degraded path**: a plain-text or HTML export turned into a single
//!   untitled sub-document without headings.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use unsection::acquire::{
//!     AcquireConfig, AcquisitionSelector, DocumentRef, DocumentSource, Fidelity, RequestVariant,
//! };
//! use unsection::{AcquireError, Document, ExportFormat};
//!
//! struct Offline;
//!
//! impl DocumentSource for Offline {
//!     fn fetch_document(&self, _: &str, _: &RequestVariant) -> Result<Document, AcquireError> {
//!         Err(AcquireError::forbidden("not signed in"))
//!     }
//!
//!     fn fetch_export(&self, _: &str, _: ExportFormat) -> Result<String, AcquireError> {
//!         Ok("first line\nsecond line".to_string())
//!     }
//! }
//!
//! let selector = AcquisitionSelector::new(Arc::new(Offline), AcquireConfig::degraded());
//! let acquired = selector.acquire(&DocumentRef::new("doc-1", "Notes")).unwrap();
//! assert_eq!(acquired.fidelity, Fidelity::Degraded);
//! ```

mod batch;
mod chain;
mod config;
mod selector;

pub use batch::{BatchOutcome, BatchProgress, MemberOutcome, NoProgress, ERROR_TITLE_PREFIX};
pub use chain::FallbackChain;
pub use config::{AcquireConfig, RequestVariant};
pub use selector::{Acquired, AcquisitionSelector, Fidelity};

use crate::detect::ExportFormat;
use crate::error::AcquireError;
use crate::model::Document;
use serde::{Deserialize, Serialize};

/// Identifier and display name of a member document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentRef {
    /// Source-specific identifier
    pub id: String,

    /// Human-readable name
    pub name: String,
}

impl DocumentRef {
    /// Create a new reference.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// The name if it has visible text, else the id.
    pub fn display_name(&self) -> &str {
        let name = self.name.trim();
        if name.is_empty() {
            &self.id
        } else {
            name
        }
    }
}

/// Fetches documents by identifier.
///
/// Implementations own the transport (including retries and credentials).
pub trait DocumentSource: Send + Sync {
    /// Fetch the structured document tree using one request variant.
    fn fetch_document(
        &self,
        id: &str,
        variant: &RequestVariant,
    ) -> std::result::Result<Document, AcquireError>;

    /// Fetch a raw export of the document.
    ///
    /// The payload may be in a different format than requested; it is
    /// sniffed before use.
    fn fetch_export(&self, id: &str, format: ExportFormat)
        -> std::result::Result<String, AcquireError>;
}

/// Lists the member documents of a collection, in collection order.
pub trait CollectionLister: Send + Sync {
    /// The primary listing mechanism.
    fn list_members(&self, collection: &str) -> std::result::Result<Vec<DocumentRef>, AcquireError>;

    /// A lower-level listing request used when the primary one fails.
    fn list_members_raw(
        &self,
        collection: &str,
    ) -> std::result::Result<Vec<DocumentRef>, AcquireError>;
}
