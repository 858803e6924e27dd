//! Catalog data types and response normalization
//!
//! The catalog API is inconsistent about shapes: descriptions arrive as a
//! plain string or `{"value": ...}`, publishers as a string or an array,
//! subjects as strings or `{"name": ...}` objects. The raw types here
//! absorb those unions; the normalized [`Book`] and [`BookSummary`] are
//! what the rest of the crate sees.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// Slugs
// ============================================================================

/// Decode a book slug into a catalog resource path.
///
/// `works-OL45804W` becomes `/works/OL45804W`, `books-OL7353617M` becomes
/// `/books/OL7353617M`. Anything else (missing separator, unknown prefix)
/// is rejected.
pub fn decode_slug(slug: &str) -> Option<String> {
    let (kind, rest) = slug.split_once('-')?;
    if rest.is_empty() {
        return None;
    }
    if kind != "works" && kind != "books" {
        return None;
    }
    Some(format!("/{kind}/{rest}"))
}

/// Turn a catalog resource path into a URL-safe slug.
///
/// `/works/OL45804W` becomes `works-OL45804W`. A bare edition id (no
/// leading slash) is treated as an edition key.
pub fn path_to_slug(path: &str) -> String {
    if let Some(stripped) = path.strip_prefix('/') {
        stripped.replace('/', "-")
    } else {
        format!("books-{path}")
    }
}

// ============================================================================
// Raw response shapes
// ============================================================================

/// A string that may arrive wrapped in `{"value": ...}`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum TextOrValue {
    Text(String),
    Wrapped { value: String },
    // Anything else (numbers, nested objects without value) is dropped
    Other(serde_json::Value),
}

impl TextOrValue {
    pub(crate) fn into_text(self) -> Option<String> {
        match self {
            Self::Text(s) => Some(s),
            Self::Wrapped { value } => Some(value),
            Self::Other(_) => None,
        }
    }
}

/// A value that may arrive as one item or an array of items
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    pub(crate) fn into_vec(self) -> Vec<T> {
        match self {
            Self::One(item) => vec![item],
            Self::Many(items) => items,
        }
    }
}

/// A subject, as a bare string or a `{"name": ...}` object
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum SubjectEntry {
    Name(String),
    Object { name: String },
    Other(serde_json::Value),
}

impl SubjectEntry {
    fn into_name(self) -> Option<String> {
        match self {
            Self::Name(name) | Self::Object { name } => Some(name),
            Self::Other(_) => None,
        }
    }
}

/// Reference to another catalog resource
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct KeyRef {
    pub key: String,
}

/// An author entry on a work (`{"author": {"key": ...}}`) or an edition
/// (`{"key": ...}`)
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawAuthorEntry {
    #[serde(default)]
    pub author: Option<KeyRef>,
    #[serde(default)]
    pub key: Option<String>,
}

impl RawAuthorEntry {
    pub(crate) fn author_key(&self) -> Option<&str> {
        self.author
            .as_ref()
            .map(|a| a.key.as_str())
            .or(self.key.as_deref())
    }
}

/// Creation stamp carrying an ISO datetime in `value`
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CreatedStamp {
    pub value: String,
}

/// Raw work/edition detail document
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct RawDetails {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub description: Option<TextOrValue>,
    #[serde(default)]
    pub subjects: Vec<SubjectEntry>,
    pub first_publish_date: Option<String>,
    pub publish_date: Option<String>,
    pub created: Option<CreatedStamp>,
    pub number_of_pages: Option<u64>,
    pub pagination: Option<String>,
    #[serde(default)]
    pub covers: Vec<i64>,
    #[serde(default)]
    pub authors: Vec<RawAuthorEntry>,
    pub publishers: Option<OneOrMany<String>>,
    pub publish_places: Option<OneOrMany<String>>,
    pub series: Option<OneOrMany<String>>,
    #[serde(default)]
    pub languages: Vec<KeyRef>,
    #[serde(default)]
    pub isbn_10: Vec<String>,
    #[serde(default)]
    pub isbn_13: Vec<String>,
    pub first_sentence: Option<TextOrValue>,
    pub notes: Option<TextOrValue>,
    pub copyright_date: Option<String>,
    pub physical_format: Option<String>,
    pub physical_dimensions: Option<String>,
    pub weight: Option<String>,
    pub edition_name: Option<String>,
    pub lccn: Option<OneOrMany<String>>,
    pub oclc_numbers: Option<OneOrMany<String>>,
    pub dewey_decimal_class: Option<OneOrMany<String>>,
    pub by_statement: Option<String>,
    pub key: Option<String>,
}

/// Raw author document
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawAuthor {
    pub name: Option<String>,
}

/// Raw subject listing (`/subjects/{name}.json`)
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawSubjectPage {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub works: Vec<RawSubjectWork>,
}

/// One work inside a subject listing
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawSubjectWork {
    pub key: Option<String>,
    pub title: Option<String>,
    pub cover_id: Option<i64>,
    #[serde(default)]
    pub authors: Vec<RawSubjectAuthor>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawSubjectAuthor {
    pub key: Option<String>,
    pub name: Option<String>,
}

/// Raw search response (`/search.json`)
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawSearchPage {
    #[serde(rename = "numFound", default)]
    pub num_found: u64,
    #[serde(default)]
    pub docs: Vec<RawSearchDoc>,
}

/// One document inside a search response
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawSearchDoc {
    pub key: Option<String>,
    pub cover_edition_key: Option<String>,
    #[serde(default)]
    pub edition_key: Vec<String>,
    pub cover_i: Option<i64>,
    pub title: Option<String>,
    #[serde(default)]
    pub author_name: Vec<String>,
}

impl RawSearchDoc {
    /// Pick the best available key for this document, preferring the work
    /// key, then the cover edition, then the first edition.
    pub(crate) fn best_key(&self) -> Option<String> {
        self.key
            .clone()
            .or_else(|| self.cover_edition_key.clone())
            .or_else(|| self.edition_key.first().cloned())
    }
}

// ============================================================================
// Normalized types
// ============================================================================

/// An author attached to a book
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorRef {
    /// Catalog resource key, when known (e.g. `/authors/OL23919A`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Display name
    pub name: String,
}

/// A lightweight book card for listings and search results
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookSummary {
    /// Catalog key (e.g. `/works/OL45804W`)
    pub key: String,
    /// URL-safe slug addressing the detail endpoint
    pub slug: String,
    /// Title
    pub title: String,
    /// Cover image id, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_id: Option<i64>,
    /// Resolved cover image URL
    pub cover_url: String,
    /// Authors
    pub authors: Vec<AuthorRef>,
}

/// A subject browse result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectPage {
    /// Subject name as reported by the catalog
    pub subject: String,
    /// Works filed under the subject
    pub works: Vec<BookSummary>,
}

/// A search result page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchPage {
    /// Total matches reported by the catalog
    pub num_found: u64,
    /// Mapped result cards
    pub books: Vec<BookSummary>,
}

/// Fully normalized book detail
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    pub description: String,
    pub subjects: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_publish: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_pages: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_id: Option<i64>,
    pub cover_url: String,
    pub authors: Vec<AuthorRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publish_date: Option<String>,
    pub publishers: Vec<String>,
    pub publish_places: Vec<String>,
    pub series: Vec<String>,
    /// Human-readable language names
    pub languages: Vec<String>,
    pub isbn_10: Vec<String>,
    pub isbn_13: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_sentence: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copyright_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub physical_format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub physical_dimensions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edition_name: Option<String>,
    pub lccn: Vec<String>,
    pub oclc_numbers: Vec<String>,
    pub dewey_decimal_class: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub by_statement: Option<String>,
    /// Catalog resource key
    pub key: String,
    /// Link back to the catalog's own page for this resource
    pub catalog_url: String,
}

// ============================================================================
// Normalization helpers
// ============================================================================

/// Subjects shown on a detail page are capped
pub(crate) const MAX_SUBJECTS: usize = 12;

/// Language code table: catalog three- and two-letter codes to names.
/// Unknown codes fall back to the uppercased code.
static LANGUAGE_NAMES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("eng", "English"),
        ("en", "English"),
        ("ind", "Indonesian"),
        ("ina", "Indonesian"),
        ("id", "Indonesian"),
        ("msa", "Malay"),
        ("spa", "Spanish"),
        ("es", "Spanish"),
        ("fra", "French"),
        ("fre", "French"),
        ("fr", "French"),
        ("deu", "German"),
        ("ger", "German"),
        ("de", "German"),
        ("ita", "Italian"),
        ("it", "Italian"),
        ("por", "Portuguese"),
        ("pt", "Portuguese"),
        ("nld", "Dutch"),
        ("dut", "Dutch"),
        ("nl", "Dutch"),
        ("rus", "Russian"),
        ("ru", "Russian"),
        ("jpn", "Japanese"),
        ("ja", "Japanese"),
        ("kor", "Korean"),
        ("ko", "Korean"),
        ("zho", "Chinese"),
        ("chi", "Chinese"),
        ("zh", "Chinese"),
        ("hin", "Hindi"),
        ("hi", "Hindi"),
        ("ara", "Arabic"),
        ("ar", "Arabic"),
        ("tur", "Turkish"),
        ("tr", "Turkish"),
        ("vie", "Vietnamese"),
        ("vi", "Vietnamese"),
        ("tha", "Thai"),
        ("th", "Thai"),
    ])
});

/// Map a catalog language code to a display name
pub(crate) fn language_name(code: &str) -> String {
    let lower = code.to_lowercase();
    match LANGUAGE_NAMES.get(lower.as_str()) {
        Some(name) => (*name).to_string(),
        None => code.to_uppercase(),
    }
}

/// Extract the trailing code from a language key like `/languages/eng`
pub(crate) fn language_code_from_key(key: &str) -> Option<&str> {
    key.rsplit('/').next().filter(|code| !code.is_empty())
}

/// Normalize a list of subject entries, dropping unusable shapes
pub(crate) fn normalize_subjects(entries: Vec<SubjectEntry>) -> Vec<String> {
    entries
        .into_iter()
        .filter_map(SubjectEntry::into_name)
        .take(MAX_SUBJECTS)
        .collect()
}
