//! File-backed document source and collection lister.
//!
//! A collection is a directory. Member documents are JSON files holding the
//! serialized [`Document`] model; degraded exports are plain-text or HTML
//! files. Identifiers are paths relative to the source root.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use unsection::{AcquireError, CollectionLister, Document, DocumentRef, DocumentSource, ExportFormat, RequestVariant};

/// Manifest listing the members of a collection in order.
pub const MANIFEST_FILE: &str = "index.json";

/// Reads documents from a directory tree.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

#[derive(Deserialize)]
struct ManifestEntry {
    id: String,
    #[serde(default)]
    name: Option<String>,
}

impl DirectorySource {
    /// Create a source rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create a source for a single file, returning it with the file's id.
    pub fn for_file(path: &Path) -> (Self, String) {
        let root = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        let id = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        (Self::new(root), id)
    }

    fn read(&self, id: &str) -> Result<String, AcquireError> {
        let path = self.root.join(id);
        fs::read_to_string(&path).map_err(|e| io_error(&path, e))
    }
}

fn io_error(path: &Path, err: io::Error) -> AcquireError {
    let message = format!("{}: {}", path.display(), err);
    match err.kind() {
        io::ErrorKind::NotFound => AcquireError::not_found(message),
        io::ErrorKind::PermissionDenied => AcquireError::forbidden(message),
        _ => AcquireError::transient(message),
    }
}

fn join_id(collection: &str, id: &str) -> String {
    match collection.trim_matches('/') {
        "" | "." => id.to_string(),
        dir => format!("{}/{}", dir, id),
    }
}

impl DocumentSource for DirectorySource {
    fn fetch_document(&self, id: &str, variant: &RequestVariant) -> Result<Document, AcquireError> {
        log::debug!("Reading '{}' ({} request)", id, variant.name);
        let raw = self.read(id)?;
        serde_json::from_str(&raw)
            .map_err(|e| AcquireError::malformed(format!("{}: {}", id, e)))
    }

    fn fetch_export(&self, id: &str, format: ExportFormat) -> Result<String, AcquireError> {
        log::debug!("Reading '{}' as {}", id, format);
        self.read(id)
    }
}

impl CollectionLister for DirectorySource {
    fn list_members(&self, collection: &str) -> Result<Vec<DocumentRef>, AcquireError> {
        let manifest = self.read(&join_id(collection, MANIFEST_FILE))?;
        let entries: Vec<ManifestEntry> = serde_json::from_str(&manifest)
            .map_err(|e| AcquireError::malformed(format!("{}: {}", MANIFEST_FILE, e)))?;

        Ok(entries
            .into_iter()
            .map(|entry| {
                let name = entry.name.unwrap_or_else(|| file_stem(&entry.id));
                DocumentRef::new(join_id(collection, &entry.id), name)
            })
            .collect())
    }

    fn list_members_raw(&self, collection: &str) -> Result<Vec<DocumentRef>, AcquireError> {
        let dir = self.root.join(collection);
        let entries = fs::read_dir(&dir).map_err(|e| io_error(&dir, e))?;

        let mut names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .filter(|name| name.ends_with(".json") && name != MANIFEST_FILE)
            .collect();
        names.sort();

        Ok(names
            .into_iter()
            .map(|name| DocumentRef::new(join_id(collection, &name), file_stem(&name)))
            .collect())
    }
}

fn file_stem(id: &str) -> String {
    Path::new(id)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| id.to_string())
}
