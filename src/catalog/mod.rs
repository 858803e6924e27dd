//! Catalog service client
//!
//! Typed access to the external book-metadata API: subject browsing,
//! full-text search, slug-addressed book detail with author resolution,
//! and normalization of the catalog's untidy response shapes.

mod client;
mod types;

pub use client::{
    CatalogClient, CatalogConfig, DEFAULT_BROWSE_LIMIT, DEFAULT_SEARCH_LIMIT, DEFAULT_SUBJECT,
};
pub use types::{
    decode_slug, path_to_slug, AuthorRef, Book, BookSummary, SearchPage, SubjectPage,
};

#[cfg(test)]
mod tests;
