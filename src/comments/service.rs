//! Comment service implementation

use crate::error::{Error, Result};
use crate::store::{Comment, Store};
use crate::types::{PublicUser, SessionUser};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

/// A comment joined with its author's public profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentView {
    /// Comment id
    pub id: String,
    /// Catalog key of the commented book
    pub book_id: String,
    /// Comment body
    pub content: String,
    /// Posting time
    pub created_at: DateTime<Utc>,
    /// Author profile
    pub user: PublicUser,
}

/// List all comments for a book, newest first.
///
/// Public: no identity required. A comment whose author account has been
/// deleted keeps its text under an anonymous placeholder author.
pub async fn list(store: &Store, book_id: &str) -> Result<Vec<CommentView>> {
    let book_id = book_id.trim();
    if book_id.is_empty() {
        return Err(Error::validation("book_id is required"));
    }

    let comments = store.comments_for_book(book_id).await;

    let mut views = Vec::with_capacity(comments.len());
    for comment in comments {
        let user = match store.get_user(&comment.user_id).await {
            Some(user) => PublicUser {
                id: user.id,
                name: user.name,
                email: user.email,
            },
            None => PublicUser {
                id: comment.user_id.clone(),
                name: "Anonymous".to_string(),
                email: String::new(),
            },
        };
        views.push(CommentView {
            id: comment.id,
            book_id: comment.book_id,
            content: comment.content,
            created_at: comment.created_at,
            user,
        });
    }

    Ok(views)
}

/// Post a comment on a book as the given user
pub async fn post(
    store: &Store,
    user: &SessionUser,
    book_id: &str,
    content: &str,
) -> Result<CommentView> {
    let book_id = book_id.trim();
    let content = content.trim();

    if book_id.is_empty() {
        return Err(Error::validation("book_id is required"));
    }
    if content.is_empty() {
        return Err(Error::validation("comment must not be empty"));
    }

    let comment = Comment {
        id: Uuid::new_v4().to_string(),
        book_id: book_id.to_string(),
        user_id: user.id.clone(),
        content: content.to_string(),
        created_at: Utc::now(),
    };

    store.insert_comment(comment.clone()).await?;
    debug!("user {} commented on {}", user.id, book_id);

    Ok(CommentView {
        id: comment.id,
        book_id: comment.book_id,
        content: comment.content,
        created_at: comment.created_at,
        user: PublicUser {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
        },
    })
}

/// Delete a comment as the given user.
///
/// Only the comment's author may delete it.
pub async fn delete(store: &Store, user: &SessionUser, comment_id: &str) -> Result<()> {
    let comment = store
        .get_comment(comment_id)
        .await
        .ok_or_else(|| Error::not_found("Comment"))?;

    if comment.user_id != user.id {
        return Err(Error::forbidden("only the author may delete a comment"));
    }

    store.delete_comment(comment_id).await?;
    debug!("user {} deleted comment {}", user.id, comment_id);

    Ok(())
}
