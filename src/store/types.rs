//! Store document types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A registered user account.
///
/// `password_hash` is a bcrypt hash; the plaintext password is never
/// stored and the hash never crosses the store/auth boundary outward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Account id (UUID v4)
    pub id: String,
    /// Display name
    pub name: String,
    /// Email address (unique, compared case-insensitively)
    pub email: String,
    /// bcrypt password hash
    pub password_hash: String,
    /// Registration time
    pub created_at: DateTime<Utc>,
}

/// A comment posted on a book
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Comment id (UUID v4)
    pub id: String,
    /// Catalog key of the commented book
    pub book_id: String,
    /// Id of the posting user
    pub user_id: String,
    /// Comment body, trimmed
    pub content: String,
    /// Posting time
    pub created_at: DateTime<Utc>,
}

/// The whole persisted document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreData {
    /// User accounts by id
    #[serde(default)]
    pub users: HashMap<String, User>,
    /// Comments by id
    #[serde(default)]
    pub comments: HashMap<String, Comment>,
}

impl StoreData {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }
}
