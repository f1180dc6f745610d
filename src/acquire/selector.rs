//! Strategy selection between the rich and degraded paths.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::batch::{BatchOutcome, BatchProgress, MemberOutcome};
use super::{AcquireConfig, CollectionLister, DocumentRef, DocumentSource, FallbackChain};
use crate::detect::document_from_export;
use crate::error::{AcquireError, Error, Result};
use crate::model::Document;

/// Which path produced a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fidelity {
    /// Structured tree with headings, tabs and tables
    Rich,
    /// Plain export with one untitled sub-document
    Degraded,
}

/// A document together with the path that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Acquired {
    /// The document model
    pub document: Document,
    /// Producing path
    pub fidelity: Fidelity,
}

/// Chooses between the rich and degraded acquisition paths.
///
/// All behaviour is driven by the [`AcquireConfig`] passed at construction.
pub struct AcquisitionSelector {
    source: Arc<dyn DocumentSource>,
    config: AcquireConfig,
}

impl AcquisitionSelector {
    /// Create a selector over a document source.
    pub fn new(source: Arc<dyn DocumentSource>, config: AcquireConfig) -> Self {
        Self { source, config }
    }

    /// The active configuration.
    pub fn config(&self) -> &AcquireConfig {
        &self.config
    }

    /// Acquire one document.
    ///
    /// With rich access, every request variant is tried in order and the
    /// call fails once all of them have failed. The degraded export is only
    /// used when rich access is off; a rich failure never falls through to it.
    pub fn acquire(&self, reference: &DocumentRef) -> Result<Acquired> {
        if self.config.rich_access {
            self.acquire_rich(reference)
        } else {
            self.acquire_degraded(reference)
        }
    }

    fn acquire_rich(&self, reference: &DocumentRef) -> Result<Acquired> {
        let source = self.source.as_ref();
        let chain = self
            .config
            .request_variants
            .iter()
            .fold(FallbackChain::<str, Document>::new(), |chain, variant| {
                chain.then(variant.name.clone(), move |id: &str| {
                    source.fetch_document(id, variant)
                })
            });

        let mut document = chain.run(&reference.id)?;
        if document.title().is_none() {
            document.metadata.title = Some(reference.display_name().to_string());
        }

        log::debug!("Acquired '{}' via rich path", reference.display_name());
        Ok(Acquired {
            document,
            fidelity: Fidelity::Rich,
        })
    }

    fn acquire_degraded(&self, reference: &DocumentRef) -> Result<Acquired> {
        let raw = self
            .source
            .fetch_export(&reference.id, self.config.export_format)?;
        let document = document_from_export(reference.display_name(), &raw);

        log::debug!(
            "Acquired '{}' via degraded path ({} bytes)",
            reference.display_name(),
            raw.len()
        );
        Ok(Acquired {
            document,
            fidelity: Fidelity::Degraded,
        })
    }

    /// List the members of a collection.
    ///
    /// The primary listing is tried first, then (if enabled) the lower-level
    /// request. A feature-not-provisioned failure stops the chain and
    /// surfaces as [`Error::FeatureNotProvisioned`].
    pub fn list_members(
        &self,
        lister: &dyn CollectionLister,
        collection: &str,
    ) -> Result<Vec<DocumentRef>> {
        let mut chain = FallbackChain::<str, Vec<DocumentRef>>::new()
            .then("primary listing", |c: &str| lister.list_members(c));
        if self.config.listing_fallback {
            chain = chain.then("lower-level listing", |c: &str| lister.list_members_raw(c));
        }
        chain.run_until(collection, AcquireError::is_not_provisioned)
    }

    /// Acquire every member of a collection, in listing order.
    ///
    /// Requires rich access; without it a policy violation is returned before
    /// anything is fetched. Member failures are recorded in the outcome
    /// instead of aborting the batch.
    pub fn acquire_batch(
        &self,
        lister: &dyn CollectionLister,
        collection: &str,
        progress: &dyn BatchProgress,
    ) -> Result<BatchOutcome> {
        if !self.config.rich_access {
            return Err(Error::PolicyViolation(
                "batch acquisition requires rich access".to_string(),
            ));
        }

        let members = self.list_members(lister, collection)?;
        let total = members.len();
        log::info!("Acquiring {} documents from '{}'", total, collection);
        progress.on_batch_start(total);

        let outcomes: Vec<MemberOutcome> = members
            .into_iter()
            .enumerate()
            .map(|(index, reference)| {
                progress.on_member_start(index + 1, total, reference.display_name());
                let result = self.acquire(&reference).map(|acquired| acquired.document);
                match &result {
                    Ok(_) => progress.on_member_complete(index + 1, total, reference.display_name()),
                    Err(err) => {
                        log::warn!("Failed to acquire '{}': {}", reference.display_name(), err);
                        progress.on_member_error(
                            index + 1,
                            total,
                            reference.display_name(),
                            &err.to_string(),
                        );
                    }
                }
                MemberOutcome { reference, result }
            })
            .collect();

        let outcome = BatchOutcome::new(collection, outcomes);
        progress.on_batch_complete(total, outcome.succeeded());
        Ok(outcome)
    }
}

impl std::fmt::Debug for AcquisitionSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AcquisitionSelector")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::acquire::{NoProgress, RequestVariant};
    use crate::detect::ExportFormat;
    use crate::model::{Paragraph, SubDocument};
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        fail_variants: Vec<&'static str>,
        calls: Mutex<Vec<String>>,
    }

    impl DocumentSource for Recorder {
        fn fetch_document(
            &self,
            id: &str,
            variant: &RequestVariant,
        ) -> std::result::Result<Document, AcquireError> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("doc:{}:{}", id, variant.name));
            if self.fail_variants.contains(&variant.name.as_str()) {
                return Err(AcquireError::malformed("bad schema"));
            }
            Ok(Document::tabbed(
                "",
                vec![SubDocument::titled("Tab").paragraph(Paragraph::with_text(variant.name.clone()))],
            ))
        }

        fn fetch_export(
            &self,
            id: &str,
            _format: ExportFormat,
        ) -> std::result::Result<String, AcquireError> {
            self.calls.lock().unwrap().push(format!("export:{}", id));
            Ok("line one\nline two".to_string())
        }
    }

    fn selector(source: Arc<Recorder>, config: AcquireConfig) -> AcquisitionSelector {
        AcquisitionSelector::new(source, config)
    }

    #[test]
    fn test_rich_variant_fallback() {
        let source = Arc::new(Recorder {
            fail_variants: vec!["extended"],
            ..Recorder::default()
        });
        let acquired = selector(source.clone(), AcquireConfig::default())
            .acquire(&DocumentRef::new("d1", "Plan"))
            .unwrap();

        assert_eq!(acquired.fidelity, Fidelity::Rich);
        assert_eq!(acquired.document.title(), Some("Plan"));
        assert_eq!(
            *source.calls.lock().unwrap(),
            vec!["doc:d1:extended", "doc:d1:default"]
        );
    }

    #[test]
    fn test_rich_failure_never_uses_export() {
        let source = Arc::new(Recorder {
            fail_variants: vec!["extended", "default"],
            ..Recorder::default()
        });
        let result = selector(source.clone(), AcquireConfig::default())
            .acquire(&DocumentRef::new("d1", "Plan"));

        assert!(matches!(result, Err(Error::Acquisition(_))));
        assert!(source
            .calls
            .lock()
            .unwrap()
            .iter()
            .all(|call| call.starts_with("doc:")));
    }

    #[test]
    fn test_degraded_path() {
        let source = Arc::new(Recorder::default());
        let acquired = selector(source.clone(), AcquireConfig::degraded())
            .acquire(&DocumentRef::new("d1", "Plan"))
            .unwrap();

        assert_eq!(acquired.fidelity, Fidelity::Degraded);
        assert_eq!(acquired.document.subdocument_count(), 1);
        assert_eq!(*source.calls.lock().unwrap(), vec!["export:d1"]);
    }

    struct NoLister;

    impl CollectionLister for NoLister {
        fn list_members(&self, _: &str) -> std::result::Result<Vec<DocumentRef>, AcquireError> {
            panic!("listing must not be attempted");
        }

        fn list_members_raw(&self, _: &str) -> std::result::Result<Vec<DocumentRef>, AcquireError> {
            panic!("listing must not be attempted");
        }
    }

    #[test]
    fn test_batch_requires_rich_access() {
        let result = selector(Arc::new(Recorder::default()), AcquireConfig::degraded())
            .acquire_batch(&NoLister, "folder", &NoProgress);
        assert!(matches!(result, Err(Error::PolicyViolation(_))));
    }
}
