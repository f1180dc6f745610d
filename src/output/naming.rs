//! File naming from titles.

/// Slug used when a visible title has no slug-able characters.
pub const UNTITLED_SLUG: &str = "untitled";

/// Default source name for units without one in batch mode.
pub const UNNAMED_SOURCE: &str = "Untitled Document";

/// Turn a title into a file-name fragment.
///
/// Lowercases, drops every character that is not alphanumeric, `-` or
/// whitespace, collapses whitespace runs to one `-` and trims `-` from both
/// ends.
///
/// # Example
/// ```
/// use unsection::output::slugify;
///
/// assert_eq!(slugify("Setup & Install: Step 2"), "setup-install-step-2");
/// ```
pub fn slugify(title: &str) -> String {
    let kept: String = title
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '-' || c.is_whitespace())
        .collect();

    kept.split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .trim_matches('-')
        .to_string()
}

/// Slug for a title that is known to be visible.
fn slug_or_untitled(title: &str) -> String {
    let slug = slugify(title);
    if slug.is_empty() {
        UNTITLED_SLUG.to_string()
    } else {
        slug
    }
}

/// File name for a unit in single-document mode, `None` for blank titles.
pub fn single_file_name(title: &str) -> Option<String> {
    if title.trim().is_empty() {
        return None;
    }
    Some(format!("{}.md", slug_or_untitled(title)))
}

/// File name for a unit in batch mode, `None` for blank titles.
pub fn batch_file_name(document_name: &str, title: &str) -> Option<String> {
    if title.trim().is_empty() {
        return None;
    }
    let prefix = if document_name.trim().is_empty() {
        slug_or_untitled(UNNAMED_SOURCE)
    } else {
        slug_or_untitled(document_name)
    };
    Some(format!("{}--{}.md", prefix, slug_or_untitled(title)))
}
