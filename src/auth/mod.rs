//! Accounts and sessions
//!
//! Registration, login, and session token handling. A session resolves to
//! an explicit [`SessionUser`](crate::types::SessionUser) that callers pass
//! into every operation needing an identity; nothing in the crate looks up
//! "the current user" ambiently.

mod service;
mod types;

pub use service::{login, register, Authenticator, BCRYPT_COST};
pub use types::{LoginRequest, RegisterRequest, SessionClaims};
