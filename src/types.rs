//! Common types used throughout bookrack
//!
//! This module contains shared type definitions, type aliases,
//! and utility types used across multiple modules.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// Generic key-value map with string keys and values
pub type StringMap = HashMap<String, String>;

// ============================================================================
// Public User Projection
// ============================================================================

/// The public projection of a user account.
///
/// This is the only user shape that crosses module boundaries or goes out
/// on the wire; the password hash never leaves the store/auth layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicUser {
    /// Account id
    pub id: String,
    /// Display name
    pub name: String,
    /// Email address
    pub email: String,
}

// ============================================================================
// Session User
// ============================================================================

/// The authenticated identity resolved from a session token.
///
/// Operations that require (or may use) a logged-in user take this
/// explicitly, or `Option<&SessionUser>` when anonymity is allowed. There
/// is no ambient session lookup anywhere in the crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    /// Account id
    pub id: String,
    /// Display name
    pub name: String,
    /// Email address
    pub email: String,
}

impl From<SessionUser> for PublicUser {
    fn from(user: SessionUser) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

// ============================================================================
// Utilities
// ============================================================================

/// Extension trait for Option<String> to handle empty strings
pub trait OptionStringExt {
    /// Returns None if the string is empty
    fn none_if_empty(self) -> Option<String>;
}

impl OptionStringExt for Option<String> {
    fn none_if_empty(self) -> Option<String> {
        self.filter(|s| !s.is_empty())
    }
}

impl OptionStringExt for String {
    fn none_if_empty(self) -> Option<String> {
        if self.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}
