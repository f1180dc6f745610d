//! Grouping and naming of rendered units into output files.
//!
//! Two modes are supported:
//!
//! * [`NamingMode::Single`]: one file per unit, named `<title-slug>.md`.
//! * [`NamingMode::Batch`]: units grouped by source document, named
//!   `<document-slug>--<title-slug>.md`.
//!
//! Names that collide are kept as-is and listed in
//! [`OutputSet::collisions`].

mod naming;

pub use naming::{batch_file_name, single_file_name, slugify, UNNAMED_SOURCE, UNTITLED_SLUG};

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{escape_yaml, OutputFile, RenderedUnit};
use crate::render::RenderOptions;

const FOOTER_RULE: &str = "\n---\n\n";

/// How output files are named.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamingMode {
    /// One document, files named by section title
    #[default]
    Single,
    /// Many documents, files prefixed with the document name
    Batch,
}

/// The packaged output of a conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSet {
    /// Files in unit order (grouped by document in batch mode)
    pub files: Vec<OutputFile>,

    /// File names produced more than once
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub collisions: Vec<String>,
}

impl OutputSet {
    /// Number of files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if no files were produced.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Check whether any file name repeats.
    pub fn has_collisions(&self) -> bool {
        !self.collisions.is_empty()
    }

    /// Look up a file by name (first match).
    pub fn get(&self, name: &str) -> Option<&OutputFile> {
        self.files.iter().find(|f| f.name == name)
    }

    /// Write every file into `dir`, creating it if needed.
    ///
    /// Colliding names are written in order, so the last one wins.
    /// Returns the written paths.
    pub fn write_to(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(dir)?;
        let mut written = Vec::with_capacity(self.files.len());
        for file in &self.files {
            let path = dir.join(&file.name);
            fs::write(&path, &file.content)?;
            written.push(path);
        }
        log::debug!("Wrote {} files to {}", written.len(), dir.display());
        Ok(written)
    }
}

/// Package rendered units into named files.
pub fn package(units: &[RenderedUnit], mode: NamingMode, options: &RenderOptions) -> OutputSet {
    let files: Vec<OutputFile> = match mode {
        NamingMode::Single => units
            .iter()
            .filter_map(|unit| {
                let name = single_file_name(&unit.title)?;
                Some(OutputFile::new(name, file_content(unit, None, options)))
            })
            .collect(),
        NamingMode::Batch => group_by_source(units)
            .into_iter()
            .flat_map(|(source, group)| {
                group.into_iter().filter_map(move |unit| {
                    let name = batch_file_name(source, &unit.title)?;
                    Some(OutputFile::new(name, file_content(unit, Some(source), options)))
                })
            })
            .collect(),
    };

    let dropped = units.len() - files.len();
    if dropped > 0 {
        log::debug!("Dropped {} units with blank titles", dropped);
    }

    let collisions = find_collisions(&files);
    if !collisions.is_empty() {
        log::warn!(
            "{} output file names collide: {}",
            collisions.len(),
            collisions.join(", ")
        );
    }

    OutputSet { files, collisions }
}

/// Group units by source document, in order of first appearance.
fn group_by_source(units: &[RenderedUnit]) -> Vec<(&str, Vec<&RenderedUnit>)> {
    let mut groups: Vec<(&str, Vec<&RenderedUnit>)> = Vec::new();
    for unit in units {
        let source = unit
            .source_document_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(UNNAMED_SOURCE);
        match groups.iter_mut().find(|(name, _)| *name == source) {
            Some((_, group)) => group.push(unit),
            None => groups.push((source, vec![unit])),
        }
    }
    groups
}

fn file_content(unit: &RenderedUnit, source: Option<&str>, options: &RenderOptions) -> String {
    let mut content = String::new();

    if options.include_frontmatter {
        content.push_str("---\n");
        content.push_str(&format!("title: \"{}\"\n", escape_yaml(&unit.title)));
        if let Some(source) = source {
            content.push_str(&format!("source: \"{}\"\n", escape_yaml(source)));
        }
        content.push_str("---\n\n");
    }

    content.push_str(&unit.body);

    if options.include_footer {
        content.push_str(FOOTER_RULE);
        match source {
            Some(source) => content.push_str(&format!(
                "*Converted by unsection from \"{}\".*\n",
                source
            )),
            None => content.push_str("*Converted by unsection.*\n"),
        }
    }

    content
}

fn find_collisions(files: &[OutputFile]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    files
        .iter()
        .filter(|f| !seen.insert(f.name.as_str()) && reported.insert(f.name.as_str()))
        .map(|f| f.name.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(title: &str, source: Option<&str>) -> RenderedUnit {
        RenderedUnit {
            title: title.to_string(),
            body: format!("# {}\n\nbody\n", title),
            source_document_name: source.map(str::to_string),
        }
    }

    #[test]
    fn test_single_mode() {
        let units = vec![unit("Setup", None), unit("  ", None), unit("Details", None)];
        let set = package(&units, NamingMode::Single, &RenderOptions::default());

        let names: Vec<_> = set.files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["setup.md", "details.md"]);
        assert!(set.files[0].content.starts_with("# Setup\n\nbody\n"));
        assert!(set.files[0].content.ends_with("*Converted by unsection.*\n"));
        assert!(!set.has_collisions());
    }

    #[test]
    fn test_batch_mode_groups_by_first_appearance() {
        let units = vec![
            unit("Intro", Some("Beta")),
            unit("Intro", Some("Alpha")),
            unit("Outro", Some("Beta")),
            unit("Loose", None),
        ];
        let set = package(&units, NamingMode::Batch, &RenderOptions::default());

        let names: Vec<_> = set.files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "beta--intro.md",
                "beta--outro.md",
                "alpha--intro.md",
                "untitled-document--loose.md"
            ]
        );
        assert!(set.files[0].content.contains("from \"Beta\""));
    }

    #[test]
    fn test_collisions_reported_not_renamed() {
        let units = vec![unit("Notes!", None), unit("Notes?", None), unit("notes", None)];
        let set = package(&units, NamingMode::Single, &RenderOptions::default());

        assert_eq!(set.len(), 3);
        assert!(set.files.iter().all(|f| f.name == "notes.md"));
        assert_eq!(set.collisions, vec!["notes.md"]);
    }

    #[test]
    fn test_frontmatter_and_no_footer() {
        let options = RenderOptions::default()
            .with_frontmatter(true)
            .with_footer(false);
        let set = package(&[unit("Say \"hi\"", Some("Doc"))], NamingMode::Batch, &options);

        let content = &set.files[0].content;
        assert!(content.starts_with("---\ntitle: \"Say \\\"hi\\\"\"\nsource: \"Doc\"\n---\n\n"));
        assert!(content.ends_with("body\n"));
        assert!(!content.contains("Converted by"));
    }

    #[test]
    fn test_get() {
        let set = package(&[unit("Setup", None)], NamingMode::Single, &RenderOptions::default());
        assert!(set.get("setup.md").is_some());
        assert!(set.get("missing.md").is_none());
    }
}
