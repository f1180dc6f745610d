//! Batch outcomes and progress reporting.

use super::DocumentRef;
use crate::error::{Error, Result};
use crate::model::{Document, Section};
use crate::segment::Flattener;

/// Title prefix of the synthetic section recorded for a failed member.
pub const ERROR_TITLE_PREFIX: &str = "Error: ";

/// Receives events while a batch is acquired.
///
/// Every method has a no-op default so implementations only override what
/// they display. Member numbers are 1-based.
pub trait BatchProgress {
    /// Called once the member list is known.
    fn on_batch_start(&self, total: usize) {
        let _ = total;
    }

    /// Called before a member is fetched.
    fn on_member_start(&self, index: usize, total: usize, name: &str) {
        let _ = (index, total, name);
    }

    /// Called after a member was fetched.
    fn on_member_complete(&self, index: usize, total: usize, name: &str) {
        let _ = (index, total, name);
    }

    /// Called when a member failed.
    fn on_member_error(&self, index: usize, total: usize, name: &str, error: &str) {
        let _ = (index, total, name, error);
    }

    /// Called after the last member.
    fn on_batch_complete(&self, total: usize, succeeded: usize) {
        let _ = (total, succeeded);
    }
}

/// Progress sink that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl BatchProgress for NoProgress {}

/// Result of acquiring one member document.
#[derive(Debug)]
pub struct MemberOutcome {
    /// The member that was requested
    pub reference: DocumentRef,
    /// The fetched document or the failure
    pub result: Result<Document>,
}

impl MemberOutcome {
    /// Segment the member, or build its error section.
    pub fn to_sections(&self, flattener: &Flattener) -> Vec<Section> {
        let name = self.reference.display_name();
        match &self.result {
            Ok(document) => flattener.flatten(document, Some(name)),
            Err(err) => vec![error_section(name, err)],
        }
    }

    /// Check whether the member failed.
    pub fn is_failure(&self) -> bool {
        self.result.is_err()
    }
}

/// Synthetic section standing in for a member that could not be acquired.
fn error_section(name: &str, err: &Error) -> Section {
    Section::new(format!("{}{}", ERROR_TITLE_PREFIX, name), 1, name)
        .with_content(format!(
            "This document could not be converted.\n\n{}\n",
            err.user_message()
        ))
        .with_source(name)
}

/// Outcome of a whole batch, one entry per listed member.
#[derive(Debug)]
pub struct BatchOutcome {
    /// Collection identifier
    pub collection: String,
    /// Per-member outcomes in listing order
    pub members: Vec<MemberOutcome>,
}

impl BatchOutcome {
    /// Create a new outcome.
    pub fn new(collection: impl Into<String>, members: Vec<MemberOutcome>) -> Self {
        Self {
            collection: collection.into(),
            members,
        }
    }

    /// Number of members fetched successfully.
    pub fn succeeded(&self) -> usize {
        self.members.iter().filter(|m| !m.is_failure()).count()
    }

    /// Number of members that failed.
    pub fn failed(&self) -> usize {
        self.members.len() - self.succeeded()
    }

    /// Flatten every member into one section list: listing order, then
    /// section order within each member.
    ///
    /// Failed members contribute an error section. The call only fails when
    /// no member produced any content.
    pub fn into_sections(self, flattener: &Flattener) -> Result<Vec<Section>> {
        if self.members.is_empty() {
            return Err(Error::NoContent);
        }

        let mut sections = Vec::new();
        let mut with_content = 0;
        for member in &self.members {
            let produced = member.to_sections(flattener);
            if !member.is_failure() && !produced.is_empty() {
                with_content += 1;
            }
            sections.extend(produced);
        }

        if with_content == 0 {
            let first_error = self
                .members
                .iter()
                .find_map(|m| m.result.as_ref().err())
                .map(|e| e.to_string())
                .unwrap_or_else(|| "every document was empty".to_string());
            return Err(Error::AllDocumentsFailed {
                total: self.members.len(),
                first_error,
            });
        }

        Ok(sections)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AcquireError;
    use crate::model::{Paragraph, SubDocument};

    fn ok(name: &str, text: &str) -> MemberOutcome {
        MemberOutcome {
            reference: DocumentRef::new(name.to_lowercase(), name),
            result: Ok(Document::single(
                name,
                SubDocument::new().paragraph(Paragraph::with_text(text)),
            )),
        }
    }

    fn failed(name: &str) -> MemberOutcome {
        MemberOutcome {
            reference: DocumentRef::new(name.to_lowercase(), name),
            result: Err(AcquireError::not_found("gone").into()),
        }
    }

    #[test]
    fn test_failures_are_isolated() {
        let outcome = BatchOutcome::new("c", vec![ok("One", "a"), failed("Two"), ok("Three", "c")]);
        assert_eq!(outcome.succeeded(), 2);
        assert_eq!(outcome.failed(), 1);

        let sections = outcome.into_sections(&Flattener::default()).unwrap();
        let titles: Vec<_> = sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["One", "Error: Two", "Three"]);
        assert!(sections[1].content.contains("not found"));
        assert_eq!(sections[1].source_document_name.as_deref(), Some("Two"));
    }

    #[test]
    fn test_all_failed() {
        let outcome = BatchOutcome::new("c", vec![failed("A"), failed("B")]);
        match outcome.into_sections(&Flattener::default()) {
            Err(Error::AllDocumentsFailed { total, first_error }) => {
                assert_eq!(total, 2);
                assert!(first_error.contains("gone"));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_all_empty() {
        let empty = MemberOutcome {
            reference: DocumentRef::new("e", "Empty"),
            result: Ok(Document::new()),
        };
        let result = BatchOutcome::new("c", vec![empty]).into_sections(&Flattener::default());
        assert!(matches!(result, Err(Error::AllDocumentsFailed { total: 1, .. })));
    }

    #[test]
    fn test_no_members() {
        let result = BatchOutcome::new("c", vec![]).into_sections(&Flattener::default());
        assert!(matches!(result, Err(Error::NoContent)));
    }
}
