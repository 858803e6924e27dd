//! Request and claim types for accounts and sessions

use serde::{Deserialize, Serialize};

/// Payload for account registration
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Email address
    #[serde(default)]
    pub email: String,
    /// Plaintext password (hashed before storage)
    #[serde(default)]
    pub password: String,
}

/// Payload for login
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    /// Email address
    #[serde(default)]
    pub email: String,
    /// Plaintext password
    #[serde(default)]
    pub password: String,
}

/// Claims carried in a session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Account id
    pub sub: String,
    /// Display name
    pub name: String,
    /// Email address
    pub email: String,
    /// Issued-at (unix seconds)
    pub iat: i64,
    /// Expiry (unix seconds)
    pub exp: i64,
}
