//! HTTP server exposing the book-discovery API

use axum::{
    extract::{Path, Query, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::auth::{self, Authenticator, LoginRequest, RegisterRequest};
use crate::catalog::{CatalogClient, DEFAULT_BROWSE_LIMIT, DEFAULT_SEARCH_LIMIT, DEFAULT_SUBJECT};
use crate::comments;
use crate::config::AppConfig;
use crate::error::{Error, Result};
use crate::store::Store;
use crate::types::SessionUser;

/// App state shared across handlers
#[derive(Clone)]
pub struct AppState {
    catalog: Arc<CatalogClient>,
    store: Store,
    auth: Arc<Authenticator>,
}

impl AppState {
    /// Assemble the application state from configuration
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let store = match &config.store.path {
            Some(path) => Store::from_file(path)?,
            None => Store::in_memory(),
        };

        Ok(Self {
            catalog: Arc::new(CatalogClient::new(config.catalog_config())),
            store,
            auth: Arc::new(Authenticator::new(
                &config.session.secret,
                config.session.ttl_secs,
            )),
        })
    }

    /// Resolve the caller's identity from the Authorization header.
    ///
    /// The result is passed explicitly into every operation that needs
    /// it; handlers never look the session up again mid-operation.
    fn session(&self, headers: &HeaderMap) -> Option<SessionUser> {
        let header = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok());
        self.auth.session_from_header(header)
    }
}

/// Response wrapper
#[derive(Debug, Serialize)]
struct ApiResponse<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn error(msg: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            error: Some(msg.into()),
        }
    }
}

/// Map a domain error to an HTTP response.
///
/// Catalog trouble is always presented as a generic try-again message;
/// partial data is never returned.
fn error_response(err: &Error) -> axum::response::Response {
    let (status, message) = match err {
        Error::Validation { message } => (StatusCode::BAD_REQUEST, message.clone()),
        Error::EmailTaken => (StatusCode::BAD_REQUEST, err.to_string()),
        Error::InvalidCredentials => (StatusCode::UNAUTHORIZED, err.to_string()),
        Error::Unauthorized => (StatusCode::UNAUTHORIZED, "You must be logged in".to_string()),
        Error::Forbidden { message } => (StatusCode::FORBIDDEN, message.clone()),
        Error::NotFound { .. } => (StatusCode::NOT_FOUND, err.to_string()),
        Error::InvalidSlug { .. } | Error::Status { status: 404 } => {
            (StatusCode::NOT_FOUND, "Book not found".to_string())
        }
        Error::Status { .. } | Error::Timeout { .. } | Error::Http(_) => {
            error!("catalog request failed: {err}");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                "Catalog unavailable, try again later".to_string(),
            )
        }
        _ => {
            error!("internal error: {err}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            )
        }
    };

    (status, Json(ApiResponse::<()>::error(message))).into_response()
}

/// Build the API router
pub fn build_router(state: AppState) -> Router {
    // Allow all origins; this API serves a public browser frontend
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/api/books", get(browse_books))
        .route("/api/books/:slug", get(book_detail))
        .route("/api/search", get(search_books))
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/session", get(session))
        .route("/api/comments", get(list_comments).post(post_comment))
        .route("/api/comments/:id", delete(delete_comment))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Start the HTTP server
pub async fn serve(config: AppConfig, port: u16) -> Result<()> {
    let state = AppState::from_config(&config)?;
    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting HTTP server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| Error::config(format!("Failed to bind to port {port}: {e}")))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| Error::config(format!("Server error: {e}")))?;

    Ok(())
}

/// Health check endpoint
async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

// ============================================================================
// Catalog routes
// ============================================================================

#[derive(Debug, Deserialize)]
struct BrowseParams {
    subject: Option<String>,
    limit: Option<u32>,
}

/// List works filed under a subject (defaults to the landing subject)
async fn browse_books(
    State(state): State<Arc<AppState>>,
    Query(params): Query<BrowseParams>,
) -> impl IntoResponse {
    let subject = params.subject.as_deref().unwrap_or(DEFAULT_SUBJECT);
    let limit = params.limit.unwrap_or(DEFAULT_BROWSE_LIMIT);

    match state.catalog.browse_subject(subject, limit).await {
        Ok(page) => (StatusCode::OK, Json(ApiResponse::success(page))).into_response(),
        Err(e) => error_response(&e),
    }
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    q: Option<String>,
    limit: Option<u32>,
}

/// Full-text catalog search
async fn search_books(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> impl IntoResponse {
    let Some(query) = params.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) else {
        return error_response(&Error::validation("query parameter 'q' is required"));
    };
    let limit = params.limit.unwrap_or(DEFAULT_SEARCH_LIMIT);

    match state.catalog.search(query, limit).await {
        Ok(page) => (StatusCode::OK, Json(ApiResponse::success(page))).into_response(),
        Err(e) => error_response(&e),
    }
}

/// Book detail by slug
async fn book_detail(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> impl IntoResponse {
    match state.catalog.book_detail(&slug).await {
        Ok(book) => (StatusCode::OK, Json(ApiResponse::success(book))).into_response(),
        Err(e) => error_response(&e),
    }
}

// ============================================================================
// Auth routes
// ============================================================================

/// Register a new account
async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> impl IntoResponse {
    match auth::register(&state.store, req).await {
        Ok(user) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(json!({
                "message": "Registration successful",
                "user": user
            }))),
        )
            .into_response(),
        Err(e) => error_response(&e),
    }
}

/// Log in and receive a session token
async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> impl IntoResponse {
    match auth::login(&state.store, &state.auth, &req).await {
        Ok((token, user)) => (
            StatusCode::OK,
            Json(ApiResponse::success(json!({
                "token": token,
                "user": user
            }))),
        )
            .into_response(),
        Err(e) => error_response(&e),
    }
}

/// Resolve the current session, if any
async fn session(State(state): State<Arc<AppState>>, headers: HeaderMap) -> impl IntoResponse {
    let user = state.session(&headers);
    (
        StatusCode::OK,
        Json(ApiResponse::success(json!({ "user": user }))),
    )
        .into_response()
}

// ============================================================================
// Comment routes
// ============================================================================

#[derive(Debug, Deserialize)]
struct CommentListParams {
    book_id: Option<String>,
}

/// List comments for a book
async fn list_comments(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CommentListParams>,
) -> impl IntoResponse {
    let Some(book_id) = params.book_id else {
        return error_response(&Error::validation("query parameter 'book_id' is required"));
    };

    match comments::list(&state.store, &book_id).await {
        Ok(list) => (StatusCode::OK, Json(ApiResponse::success(list))).into_response(),
        Err(e) => error_response(&e),
    }
}

#[derive(Debug, Deserialize)]
struct PostCommentRequest {
    #[serde(default)]
    book_id: String,
    #[serde(default)]
    content: String,
}

/// Post a comment (requires a session)
async fn post_comment(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<PostCommentRequest>,
) -> impl IntoResponse {
    let Some(user) = state.session(&headers) else {
        return error_response(&Error::Unauthorized);
    };

    match comments::post(&state.store, &user, &req.book_id, &req.content).await {
        Ok(comment) => (StatusCode::CREATED, Json(ApiResponse::success(comment))).into_response(),
        Err(e) => error_response(&e),
    }
}

/// Delete a comment (author only)
async fn delete_comment(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let Some(user) = state.session(&headers) else {
        return error_response(&Error::Unauthorized);
    };

    match comments::delete(&state.store, &user, &id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse::success(json!({ "message": "Comment deleted" }))),
        )
            .into_response(),
        Err(e) => error_response(&e),
    }
}
