// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # bookrack
//!
//! Backend for a book-discovery application: browse and search a
//! third-party catalog, view book detail, register/log in, and comment
//! on books.
//!
//! ## Features
//!
//! - **Resilient catalog access**: bounded retries, per-attempt timeout
//!   cancellation, linear backoff, retry only on transient failures
//! - **Typed catalog client**: subject browse, search, slug-addressed
//!   detail with concurrent author resolution
//! - **Accounts & sessions**: bcrypt password hashes, HS256 session
//!   tokens, explicit identity passing
//! - **Comments**: public listing, authenticated posting, author-only
//!   deletion
//! - **JSON-file store**: atomic writes, in-memory mode for tests
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        cli (axum API)                       │
//! │  /api/books   /api/search   /api/auth/*   /api/comments     │
//! └──────────┬──────────────────────┬───────────────┬───────────┘
//!            │                      │               │
//! ┌──────────┴──────────┐  ┌────────┴──────┐  ┌─────┴─────────┐
//! │       catalog       │  │     auth      │  │   comments    │
//! │  browse/search/show │  │ register/login│  │ list/post/del │
//! └──────────┬──────────┘  └────────┬──────┘  └─────┬─────────┘
//!            │                      │               │
//! ┌──────────┴──────────┐  ┌────────┴───────────────┴──────────┐
//! │    http (fetcher)   │  │              store                │
//! │ retry/timeout/backoff│ │   users + comments, JSON file     │
//! └─────────────────────┘  └───────────────────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)] // TODO: Add docs before 1.0 release

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Resilient HTTP fetch
pub mod http;

/// Catalog service client
pub mod catalog;

/// Persistent store for accounts and comments
pub mod store;

/// Accounts and sessions
pub mod auth;

/// Comment operations
pub mod comments;

/// Application configuration
pub mod config;

/// Command-line interface and HTTP server
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::AppConfig;
pub use error::{Error, Result};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
