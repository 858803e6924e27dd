//! Tests for the store module

use super::*;
use chrono::{Duration as ChronoDuration, Utc};
use pretty_assertions::assert_eq;

fn sample_user(id: &str, email: &str) -> User {
    User {
        id: id.to_string(),
        name: "Alice".to_string(),
        email: email.to_string(),
        password_hash: "$2b$10$hash".to_string(),
        created_at: Utc::now(),
    }
}

fn sample_comment(id: &str, book_id: &str, user_id: &str) -> Comment {
    Comment {
        id: id.to_string(),
        book_id: book_id.to_string(),
        user_id: user_id.to_string(),
        content: "Great read".to_string(),
        created_at: Utc::now(),
    }
}

#[tokio::test]
async fn test_user_round_trip() {
    let store = Store::in_memory();

    store
        .insert_user(sample_user("u1", "alice@example.com"))
        .await
        .unwrap();

    let user = store.get_user("u1").await.unwrap();
    assert_eq!(user.email, "alice@example.com");

    assert!(store.get_user("missing").await.is_none());

    assert!(store.delete_user("u1").await.unwrap());
    assert!(!store.delete_user("u1").await.unwrap());
    assert!(store.get_user("u1").await.is_none());
}

#[tokio::test]
async fn test_find_user_by_email_case_insensitive() {
    let store = Store::in_memory();
    store
        .insert_user(sample_user("u1", "Alice@Example.com"))
        .await
        .unwrap();

    let found = store.find_user_by_email("alice@example.com").await;
    assert_eq!(found.map(|u| u.id), Some("u1".to_string()));

    let found = store.find_user_by_email(" ALICE@EXAMPLE.COM ").await;
    assert!(found.is_some());

    assert!(store.find_user_by_email("bob@example.com").await.is_none());
}

#[tokio::test]
async fn test_comment_round_trip() {
    let store = Store::in_memory();

    store
        .insert_comment(sample_comment("c1", "/works/OL1W", "u1"))
        .await
        .unwrap();

    let comment = store.get_comment("c1").await.unwrap();
    assert_eq!(comment.book_id, "/works/OL1W");

    assert!(store.delete_comment("c1").await.unwrap());
    assert!(!store.delete_comment("c1").await.unwrap());
}

#[tokio::test]
async fn test_comments_for_book_sorted_newest_first() {
    let store = Store::in_memory();

    let now = Utc::now();
    for (id, offset) in [("c1", 0), ("c2", 60), ("c3", 30)] {
        let mut comment = sample_comment(id, "/works/OL1W", "u1");
        comment.created_at = now + ChronoDuration::seconds(offset);
        store.insert_comment(comment).await.unwrap();
    }

    // A comment on another book stays out of the listing
    store
        .insert_comment(sample_comment("other", "/works/OL2W", "u1"))
        .await
        .unwrap();

    let comments = store.comments_for_book("/works/OL1W").await;
    let ids: Vec<&str> = comments.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["c2", "c3", "c1"]);
}

#[tokio::test]
async fn test_file_persistence_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");

    {
        let store = Store::from_file(&path).unwrap();
        assert!(!store.is_in_memory());
        store
            .insert_user(sample_user("u1", "alice@example.com"))
            .await
            .unwrap();
        store
            .insert_comment(sample_comment("c1", "/works/OL1W", "u1"))
            .await
            .unwrap();
    }

    // Reload from disk
    let store = Store::from_file(&path).unwrap();
    assert!(store.get_user("u1").await.is_some());
    assert!(store.get_comment("c1").await.is_some());

    // No stray temp file after atomic save
    assert!(!path.with_extension("tmp").exists());
}

#[tokio::test]
async fn test_from_file_missing_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.json");

    let store = Store::from_file(&path).unwrap();
    assert!(store.get_user("anyone").await.is_none());
}

#[tokio::test]
async fn test_from_file_rejects_garbage() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");
    std::fs::write(&path, "not json").unwrap();

    assert!(Store::from_file(&path).is_err());
}

#[tokio::test]
async fn test_in_memory_save_is_noop() {
    let store = Store::in_memory();
    assert!(store.is_in_memory());
    store.save().await.unwrap();
}

#[tokio::test]
async fn test_clone_shares_data() {
    let store = Store::in_memory();
    let clone = store.clone();

    store
        .insert_user(sample_user("u1", "alice@example.com"))
        .await
        .unwrap();

    assert!(clone.get_user("u1").await.is_some());
}
