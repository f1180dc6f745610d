//! Flattening of the sub-document tree into one ordered section list.

use crate::model::{Document, DocumentContent, Section, SubDocument};
use crate::render::RenderOptions;

use super::Segmenter;

/// Label used when neither the document nor the sub-document has a title.
pub const UNTITLED_DOCUMENT: &str = "Untitled Document";

/// Title given to a lone placeholder-titled section when nothing better is known.
pub const DOCUMENT_CONTENT: &str = "Document Content";

/// Flatten a document with default render options.
pub fn segment_document(document: &Document) -> Vec<Section> {
    Flattener::default().flatten(document, None)
}

/// Collect a sub-document forest in document order: each node, then its
/// descendants.
pub fn flatten_subdocuments(subs: &[SubDocument]) -> Vec<&SubDocument> {
    fn descend<'a>(subs: &'a [SubDocument], acc: &mut Vec<&'a SubDocument>) {
        for sub in subs {
            acc.push(sub);
            descend(&sub.children, acc);
        }
    }

    let mut acc = Vec::new();
    descend(subs, &mut acc);
    acc
}

/// Check whether a title is an internal placeholder rather than a real name.
pub fn is_placeholder_title(title: &str) -> bool {
    let title = title.trim();
    title.is_empty()
        || title == UNTITLED_DOCUMENT
        || title
            .strip_prefix("Section ")
            .is_some_and(|n| !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()))
}

/// Walks a document's sub-documents and concatenates their sections.
#[derive(Debug, Clone, Default)]
pub struct Flattener {
    segmenter: Segmenter,
}

impl Flattener {
    /// Create a flattener using the given render options for inline content.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            segmenter: Segmenter::new(options),
        }
    }

    /// Segment every sub-document of `document` in order.
    ///
    /// `source_name` is stamped on every section and takes priority when a
    /// lone section only carries a placeholder title.
    pub fn flatten(&self, document: &Document, source_name: Option<&str>) -> Vec<Section> {
        let doc_label = document.title().unwrap_or(UNTITLED_DOCUMENT);

        let mut sections = match &document.content {
            DocumentContent::Tabbed(tabs) if !tabs.is_empty() => {
                let subs = flatten_subdocuments(tabs);
                let lone = subs.len() == 1;
                subs.iter()
                    .enumerate()
                    .flat_map(|(i, sub)| {
                        let label = match sub.label() {
                            Some(title) => title.to_string(),
                            None if lone => doc_label.to_string(),
                            None => format!("Section {}", i + 1),
                        };
                        self.segmenter.segment(&sub.body, &label)
                    })
                    .collect::<Vec<_>>()
            }
            DocumentContent::Tabbed(_) => Vec::new(),
            DocumentContent::SingleBody(body) => {
                let mut sections = self.segmenter.segment(&body.body, doc_label);
                // Nested children of a single body are walked after it.
                for (i, sub) in flatten_subdocuments(&body.children).iter().enumerate() {
                    let label = sub
                        .label()
                        .map(str::to_string)
                        .unwrap_or_else(|| format!("Section {}", i + 2));
                    sections.extend(self.segmenter.segment(&sub.body, &label));
                }
                sections
            }
        };

        if let [only] = sections.as_mut_slice() {
            if is_placeholder_title(&only.title) {
                let specific = source_name
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .or(document.title())
                    .unwrap_or(DOCUMENT_CONTENT);
                log::debug!("Relabelling lone section '{}' as '{}'", only.title, specific);
                only.title = specific.to_string();
            }
        }

        if let Some(name) = source_name {
            for section in &mut sections {
                section.source_document_name = Some(name.to_string());
            }
        }

        sections
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Paragraph;

    fn tab(title: Option<&str>, text: &str) -> SubDocument {
        let sub = match title {
            Some(t) => SubDocument::titled(t),
            None => SubDocument::new(),
        };
        sub.paragraph(Paragraph::with_text(text))
    }

    #[test]
    fn test_flatten_order() {
        let tabs = vec![
            SubDocument::titled("A")
                .child(SubDocument::titled("A.1").child(SubDocument::titled("A.1.a")))
                .child(SubDocument::titled("A.2")),
            SubDocument::titled("B"),
        ];
        let titles: Vec<_> = flatten_subdocuments(&tabs)
            .iter()
            .map(|s| s.label().unwrap_or_default())
            .collect();
        assert_eq!(titles, vec!["A", "A.1", "A.1.a", "A.2", "B"]);
    }

    #[test]
    fn test_placeholder_titles() {
        assert!(is_placeholder_title("Section 3"));
        assert!(is_placeholder_title(UNTITLED_DOCUMENT));
        assert!(is_placeholder_title("  "));
        assert!(!is_placeholder_title("Section Notes"));
        assert!(!is_placeholder_title("Section "));
        assert!(!is_placeholder_title("Setup"));
    }

    #[test]
    fn test_untitled_tabs_get_ordinal_labels() {
        let doc = Document::tabbed(
            "Doc",
            vec![tab(None, "first"), tab(Some("Named"), "second"), tab(None, "third")],
        );
        let sections = segment_document(&doc);
        let labels: Vec<_> = sections.iter().map(|s| s.parent_label.as_str()).collect();
        assert_eq!(labels, vec!["Section 1", "Named", "Section 3"]);
    }

    #[test]
    fn test_lone_untitled_tab_uses_document_title() {
        let doc = Document::tabbed("Handbook", vec![tab(None, "text")]);
        let sections = segment_document(&doc);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "Handbook");
        assert_eq!(sections[0].parent_label, "Handbook");
    }

    #[test]
    fn test_lone_placeholder_section_relabelled() {
        let doc = Document::tabbed("Doc", vec![SubDocument::titled("Empty"), tab(None, "text")]);
        let sections = Flattener::default().flatten(&doc, Some("Quarterly Plan"));
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "Quarterly Plan");
        assert_eq!(sections[0].parent_label, "Section 2");
        assert_eq!(sections[0].source_document_name.as_deref(), Some("Quarterly Plan"));

        let sections = segment_document(&doc);
        assert_eq!(sections[0].title, "Doc");
    }

    #[test]
    fn test_untitled_single_body() {
        let doc = Document {
            content: DocumentContent::SingleBody(SubDocument::new().paragraph(Paragraph::with_text("x"))),
            ..Document::default()
        };
        let sections = segment_document(&doc);
        assert_eq!(sections[0].parent_label, UNTITLED_DOCUMENT);
        assert_eq!(sections[0].title, DOCUMENT_CONTENT);
    }

    #[test]
    fn test_single_body_children_follow_body() {
        let body = tab(None, "root").child(tab(Some("Appendix"), "extra"));
        let doc = Document::single("Doc", body);
        let sections = segment_document(&doc);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].parent_label, "Doc");
        assert_eq!(sections[1].title, "Appendix");
    }

    #[test]
    fn test_empty_document() {
        assert!(segment_document(&Document::new()).is_empty());
        assert!(segment_document(&Document::tabbed("Doc", vec![])).is_empty());
    }
}
