//! Registration, login, and session tokens

use super::types::{LoginRequest, RegisterRequest, SessionClaims};
use crate::error::{Error, Result};
use crate::store::{Store, User};
use crate::types::{PublicUser, SessionUser};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;
use uuid::Uuid;

/// bcrypt work factor for password hashes
pub const BCRYPT_COST: u32 = 10;

/// Minimum accepted password length
const MIN_PASSWORD_LEN: usize = 6;

/// Loose email shape check; real validation happens when mail is sent
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex"));

/// Issues and verifies session tokens (HS256)
pub struct Authenticator {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_secs: u64,
}

impl Authenticator {
    /// Create an authenticator from a shared secret and token lifetime
    pub fn new(secret: &str, ttl_secs: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl_secs,
        }
    }

    /// Issue a session token for a user
    pub fn issue_token(&self, user: &User) -> Result<String> {
        let now = Utc::now().timestamp();
        let claims = SessionClaims {
            sub: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            iat: now,
            exp: now + self.ttl_secs as i64,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| Error::session(format!("Failed to sign session token: {e}")))
    }

    /// Verify a session token and return the identity it carries
    pub fn verify_token(&self, token: &str) -> Result<SessionUser> {
        let data = decode::<SessionClaims>(token, &self.decoding_key, &Validation::default())
            .map_err(|_| Error::Unauthorized)?;

        Ok(SessionUser {
            id: data.claims.sub,
            name: data.claims.name,
            email: data.claims.email,
        })
    }

    /// Resolve the identity carried by an `Authorization` header value.
    ///
    /// Absent header, wrong scheme, or an invalid/expired token all
    /// resolve to `None`: anonymity, not an error. Callers pass the
    /// result into the operations that need it.
    pub fn session_from_header(&self, header: Option<&str>) -> Option<SessionUser> {
        let token = header?.strip_prefix("Bearer ")?.trim();
        if token.is_empty() {
            return None;
        }
        self.verify_token(token).ok()
    }
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator")
            .field("ttl_secs", &self.ttl_secs)
            .finish_non_exhaustive()
    }
}

/// Register a new account.
///
/// Validates the payload, enforces email uniqueness (case-insensitive),
/// hashes the password, and stores the account. Returns the public
/// projection only.
pub async fn register(store: &Store, req: RegisterRequest) -> Result<PublicUser> {
    let name = req.name.trim();
    let email = req.email.trim();
    let password = req.password.as_str();

    if name.is_empty() || email.is_empty() || password.is_empty() {
        return Err(Error::validation("name, email, and password are required"));
    }
    if !EMAIL_RE.is_match(email) {
        return Err(Error::validation("email address is not valid"));
    }
    if password.len() < MIN_PASSWORD_LEN {
        return Err(Error::validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }

    if store.find_user_by_email(email).await.is_some() {
        return Err(Error::EmailTaken);
    }

    let password_hash = bcrypt::hash(password, BCRYPT_COST)
        .map_err(|e| Error::session(format!("Failed to hash password: {e}")))?;

    let user = User {
        id: Uuid::new_v4().to_string(),
        name: name.to_string(),
        email: email.to_string(),
        password_hash,
        created_at: Utc::now(),
    };

    store.insert_user(user.clone()).await?;
    debug!("registered account {}", user.id);

    Ok(PublicUser {
        id: user.id,
        name: user.name,
        email: user.email,
    })
}

/// Log in with email and password, returning a session token and the user.
///
/// Unknown email and wrong password are indistinguishable to the caller.
pub async fn login(
    store: &Store,
    auth: &Authenticator,
    req: &LoginRequest,
) -> Result<(String, PublicUser)> {
    let email = req.email.trim();
    if email.is_empty() || req.password.is_empty() {
        return Err(Error::validation("email and password are required"));
    }

    let user = store
        .find_user_by_email(email)
        .await
        .ok_or(Error::InvalidCredentials)?;

    let verified = bcrypt::verify(&req.password, &user.password_hash).unwrap_or(false);
    if !verified {
        return Err(Error::InvalidCredentials);
    }

    let token = auth.issue_token(&user)?;

    Ok((
        token,
        PublicUser {
            id: user.id,
            name: user.name,
            email: user.email,
        },
    ))
}
