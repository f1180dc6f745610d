//! Error types for unsection library.
//!
//! Two kinds of failure are kept apart:
//!
//! * [`AcquireError`] is raised by collaborators (document sources and
//!   collection listers) and carries a coarse [`AcquireErrorKind`] so the
//!   acquisition layer can decide whether to try the next strategy.
//!
//! * [`Error`] is what the library returns to callers. An `AcquireError`
//!   whose kind is [`AcquireErrorKind::FeatureNotProvisioned`] always
//!   converts into the dedicated [`Error::FeatureNotProvisioned`] variant so
//!   callers can show a specific remediation message.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;
use thiserror::Error;

/// Result type alias for unsection operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while acquiring, segmenting or packaging documents.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error serializing or deserializing interchange shapes.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A document source or collection lister failed.
    #[error("Acquisition failed: {0}")]
    Acquisition(AcquireError),

    /// The remote capability required for this operation is not enabled.
    #[error("Feature not provisioned: {0}")]
    FeatureNotProvisioned(String),

    /// The caller violated a precondition (e.g. batch mode without rich access).
    #[error("Policy violation: {0}")]
    PolicyViolation(String),

    /// The document produced no sections at all.
    #[error("No content found in document")]
    NoContent,

    /// Every member of a batch failed or was empty.
    #[error("All {total} documents failed or were empty. First error: {first_error}")]
    AllDocumentsFailed {
        /// Number of requested documents
        total: usize,
        /// Message of the first failure, if any
        first_error: String,
    },

    /// Error during rendering of a section.
    #[error("Rendering error: {0}")]
    Render(String),

    /// The document tree is structurally invalid.
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Message suitable for showing to an end user.
    ///
    /// Feature-not-provisioned failures get a remediation hint instead of the
    /// raw collaborator message.
    pub fn user_message(&self) -> String {
        match self {
            Error::FeatureNotProvisioned(detail) => format!(
                "This feature is not enabled for your account ({}). \
                 Ask an administrator to enable API access for this document collection, \
                 or export documents one at a time.",
                detail
            ),
            Error::NoContent => "No content found in the document.".to_string(),
            other => other.to_string(),
        }
    }

    /// Check whether this error is the dedicated feature-not-provisioned condition.
    pub fn is_feature_not_provisioned(&self) -> bool {
        matches!(self, Error::FeatureNotProvisioned(_))
    }
}

impl From<AcquireError> for Error {
    fn from(err: AcquireError) -> Self {
        match err.kind {
            AcquireErrorKind::FeatureNotProvisioned => Error::FeatureNotProvisioned(err.message),
            _ => Error::Acquisition(err),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// Failure classes reported by document sources and collection listers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AcquireErrorKind {
    /// Network or other transient failure
    Transient,
    /// The document or collection does not exist
    NotFound,
    /// The caller may not read the document or collection
    Forbidden,
    /// A required remote capability is not enabled for the caller
    FeatureNotProvisioned,
    /// The response could not be understood
    Malformed,
}

impl fmt::Display for AcquireErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AcquireErrorKind::Transient => "transient failure",
            AcquireErrorKind::NotFound => "not found",
            AcquireErrorKind::Forbidden => "forbidden",
            AcquireErrorKind::FeatureNotProvisioned => "feature not provisioned",
            AcquireErrorKind::Malformed => "malformed response",
        };
        f.write_str(name)
    }
}

/// An error raised by an acquisition collaborator.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{kind}: {message}")]
pub struct AcquireError {
    /// Failure class
    pub kind: AcquireErrorKind,
    /// Collaborator message
    pub message: String,
}

impl AcquireError {
    /// Create a new acquisition error.
    pub fn new(kind: AcquireErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Transient/network failure.
    pub fn transient(message: impl Into<String>) -> Self {
        Self::new(AcquireErrorKind::Transient, message)
    }

    /// Not-found failure.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(AcquireErrorKind::NotFound, message)
    }

    /// Permission failure.
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(AcquireErrorKind::Forbidden, message)
    }

    /// Feature-not-provisioned failure.
    pub fn not_provisioned(message: impl Into<String>) -> Self {
        Self::new(AcquireErrorKind::FeatureNotProvisioned, message)
    }

    /// Malformed-response failure.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(AcquireErrorKind::Malformed, message)
    }

    /// Check whether this is the feature-not-provisioned signature.
    pub fn is_not_provisioned(&self) -> bool {
        self.kind == AcquireErrorKind::FeatureNotProvisioned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::NoContent;
        assert_eq!(err.to_string(), "No content found in document");

        let err = Error::AllDocumentsFailed {
            total: 3,
            first_error: "boom".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "All 3 documents failed or were empty. First error: boom"
        );
    }

    #[test]
    fn test_acquire_error_display() {
        let err = AcquireError::not_found("doc-2");
        assert_eq!(err.to_string(), "not found: doc-2");
    }

    #[test]
    fn test_not_provisioned_maps_to_dedicated_variant() {
        let err: Error = AcquireError::not_provisioned("drive api disabled").into();
        assert!(err.is_feature_not_provisioned());
        assert!(err.user_message().contains("not enabled"));

        let err: Error = AcquireError::transient("timeout").into();
        assert!(matches!(err, Error::Acquisition(_)));
        assert_eq!(err.user_message(), "Acquisition failed: transient failure: timeout");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
