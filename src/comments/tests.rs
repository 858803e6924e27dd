//! Tests for comment operations

use super::*;
use crate::error::Error;
use crate::store::{Store, User};
use crate::types::SessionUser;
use chrono::Utc;
use pretty_assertions::assert_eq;

async fn store_with_user(id: &str, name: &str) -> Store {
    let store = Store::in_memory();
    store
        .insert_user(User {
            id: id.to_string(),
            name: name.to_string(),
            email: format!("{id}@example.com"),
            password_hash: String::new(),
            created_at: Utc::now(),
        })
        .await
        .unwrap();
    store
}

fn session(id: &str, name: &str) -> SessionUser {
    SessionUser {
        id: id.to_string(),
        name: name.to_string(),
        email: format!("{id}@example.com"),
    }
}

#[tokio::test]
async fn test_post_and_list() {
    let store = store_with_user("u1", "Alice").await;
    let alice = session("u1", "Alice");

    let posted = post(&store, &alice, "/works/OL1W", "  Loved it.  ")
        .await
        .unwrap();
    assert_eq!(posted.content, "Loved it.");
    assert_eq!(posted.user.name, "Alice");

    let comments = list(&store, "/works/OL1W").await.unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].id, posted.id);
    assert_eq!(comments[0].user.email, "u1@example.com");
}

#[tokio::test]
async fn test_post_rejects_blank_content() {
    let store = store_with_user("u1", "Alice").await;
    let alice = session("u1", "Alice");

    let result = post(&store, &alice, "/works/OL1W", "   ").await;
    assert!(matches!(result, Err(Error::Validation { .. })));

    let result = post(&store, &alice, "", "Nice").await;
    assert!(matches!(result, Err(Error::Validation { .. })));
}

#[tokio::test]
async fn test_list_requires_book_id() {
    let store = Store::in_memory();
    let result = list(&store, "  ").await;
    assert!(matches!(result, Err(Error::Validation { .. })));
}

#[tokio::test]
async fn test_list_newest_first() {
    let store = store_with_user("u1", "Alice").await;
    let alice = session("u1", "Alice");

    let first = post(&store, &alice, "/works/OL1W", "first").await.unwrap();
    let second = post(&store, &alice, "/works/OL1W", "second").await.unwrap();

    let comments = list(&store, "/works/OL1W").await.unwrap();
    assert_eq!(comments.len(), 2);
    // Insertion order breaks the tie when timestamps collide, so just
    // check both are present and ordering is non-increasing by time
    assert!(comments[0].created_at >= comments[1].created_at);
    let ids: Vec<&str> = comments.iter().map(|c| c.id.as_str()).collect();
    assert!(ids.contains(&first.id.as_str()));
    assert!(ids.contains(&second.id.as_str()));
}

#[tokio::test]
async fn test_list_with_deleted_author() {
    let store = store_with_user("u1", "Alice").await;
    let alice = session("u1", "Alice");

    post(&store, &alice, "/works/OL1W", "orphaned soon")
        .await
        .unwrap();
    store.delete_user("u1").await.unwrap();

    let comments = list(&store, "/works/OL1W").await.unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].user.name, "Anonymous");
    assert_eq!(comments[0].user.email, "");
}

#[tokio::test]
async fn test_delete_by_author() {
    let store = store_with_user("u1", "Alice").await;
    let alice = session("u1", "Alice");

    let posted = post(&store, &alice, "/works/OL1W", "temp").await.unwrap();
    delete(&store, &alice, &posted.id).await.unwrap();

    assert!(list(&store, "/works/OL1W").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_rejects_non_author() {
    let store = store_with_user("u1", "Alice").await;
    let alice = session("u1", "Alice");
    let bob = session("u2", "Bob");

    let posted = post(&store, &alice, "/works/OL1W", "mine").await.unwrap();

    let result = delete(&store, &bob, &posted.id).await;
    assert!(matches!(result, Err(Error::Forbidden { .. })));

    // Still there
    assert_eq!(list(&store, "/works/OL1W").await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_delete_missing_comment() {
    let store = store_with_user("u1", "Alice").await;
    let alice = session("u1", "Alice");

    let result = delete(&store, &alice, "no-such-id").await;
    assert!(matches!(result, Err(Error::NotFound { .. })));
}
