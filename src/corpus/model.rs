use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raised by `Corpus::upsert` when a required field is empty.
///
/// Integrity problems that span records (dangling dependencies, cycles,
/// duplicate slugs) are not errors; they are reported by `stemma check`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("title must not be empty")]
    EmptyTitle,
    #[error("category must not be empty")]
    EmptyCategory,
}

/// One cataloged text.
///
/// `id` is the identity used everywhere internally; `slug` exists only for
/// addressing (CLI arguments, the shareable view string) and is best-effort
/// unique. A record depends on at most one other record, so the corpus forms
/// a forest of lineages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRecord {
    pub id: String,
    pub slug: String,
    pub title: String,
    /// Primary classification; grouping key and layout column.
    pub category: String,
    /// Secondary classification; filtering and display only.
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub universe: Option<String>,
    /// The `id` of the record this one depends on. May dangle; lineage
    /// resolution treats a dangling reference as "no parent."
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depends_on: Option<String>,
    /// Body paragraphs with inline emphasis markers (see `corpus::markup`).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub paragraphs: Vec<String>,
}

impl TextRecord {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        category: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        let title = title.into();
        Self {
            id: id.into(),
            slug: slugify(&title),
            title,
            category: category.into(),
            role: role.into(),
            universe: None,
            depends_on: None,
            paragraphs: Vec::new(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if self.category.trim().is_empty() {
            return Err(ValidationError::EmptyCategory);
        }
        Ok(())
    }
}

/// Derive a URL-safe slug from a title.
///
/// Lowercases, collapses every run of characters outside `a-z0-9` into one
/// `-`, and trims leading/trailing `-`. A title with nothing usable left
/// falls back to `untitled`.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;
    for c in title.to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }
    if slug.is_empty() {
        return "untitled".to_string();
    }
    slug
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
