//! Store implementation
//!
//! Provides file-based persistence with atomic writes.

use super::types::{Comment, StoreData, User};
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Durable storage for users and comments
#[derive(Debug)]
pub struct Store {
    /// Path to the store file (empty = in-memory)
    path: PathBuf,
    /// Current document (cached)
    data: Arc<RwLock<StoreData>>,
    /// Whether to save after every mutation
    auto_save: bool,
}

impl Store {
    /// Create an in-memory store (no file persistence)
    pub fn in_memory() -> Self {
        Self {
            path: PathBuf::new(),
            data: Arc::new(RwLock::new(StoreData::new())),
            auto_save: false,
        }
    }

    /// Create a store backed by a file, loading existing data if present
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let data = if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| Error::store(format!("Failed to read store file: {e}")))?;
            serde_json::from_str(&contents)
                .map_err(|e| Error::store(format!("Failed to parse store file: {e}")))?
        } else {
            StoreData::new()
        };

        Ok(Self {
            path,
            data: Arc::new(RwLock::new(data)),
            auto_save: true,
        })
    }

    /// Save the current document to the store file
    pub async fn save(&self) -> Result<()> {
        if self.path.as_os_str().is_empty() {
            return Ok(()); // In-memory mode
        }

        let data = self.data.read().await;
        let contents = serde_json::to_string_pretty(&*data)
            .map_err(|e| Error::store(format!("Failed to serialize store: {e}")))?;
        drop(data);

        // Write to temp file first, then rename for atomicity
        let temp_path = self.path.with_extension("tmp");
        tokio::fs::write(&temp_path, &contents)
            .await
            .map_err(|e| Error::store(format!("Failed to write store file: {e}")))?;

        tokio::fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| Error::store(format!("Failed to rename store file: {e}")))?;

        Ok(())
    }

    /// Check if using in-memory mode
    pub fn is_in_memory(&self) -> bool {
        self.path.as_os_str().is_empty()
    }

    /// Get the store file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    // ========================================================================
    // Users
    // ========================================================================

    /// Insert a user account
    pub async fn insert_user(&self, user: User) -> Result<()> {
        {
            let mut data = self.data.write().await;
            data.users.insert(user.id.clone(), user);
        }

        if self.auto_save {
            self.save().await?;
        }

        Ok(())
    }

    /// Look up a user by id
    pub async fn get_user(&self, id: &str) -> Option<User> {
        let data = self.data.read().await;
        data.users.get(id).cloned()
    }

    /// Look up a user by email, compared case-insensitively
    pub async fn find_user_by_email(&self, email: &str) -> Option<User> {
        let needle = email.trim().to_lowercase();
        let data = self.data.read().await;
        data.users
            .values()
            .find(|user| user.email.to_lowercase() == needle)
            .cloned()
    }

    /// Delete a user by id, returning whether it existed
    pub async fn delete_user(&self, id: &str) -> Result<bool> {
        let existed = {
            let mut data = self.data.write().await;
            data.users.remove(id).is_some()
        };

        if existed && self.auto_save {
            self.save().await?;
        }

        Ok(existed)
    }

    // ========================================================================
    // Comments
    // ========================================================================

    /// Insert a comment
    pub async fn insert_comment(&self, comment: Comment) -> Result<()> {
        {
            let mut data = self.data.write().await;
            data.comments.insert(comment.id.clone(), comment);
        }

        if self.auto_save {
            self.save().await?;
        }

        Ok(())
    }

    /// Look up a comment by id
    pub async fn get_comment(&self, id: &str) -> Option<Comment> {
        let data = self.data.read().await;
        data.comments.get(id).cloned()
    }

    /// Delete a comment by id, returning whether it existed
    pub async fn delete_comment(&self, id: &str) -> Result<bool> {
        let existed = {
            let mut data = self.data.write().await;
            data.comments.remove(id).is_some()
        };

        if existed && self.auto_save {
            self.save().await?;
        }

        Ok(existed)
    }

    /// All comments for a book, newest first
    pub async fn comments_for_book(&self, book_id: &str) -> Vec<Comment> {
        let data = self.data.read().await;
        let mut comments: Vec<Comment> = data
            .comments
            .values()
            .filter(|comment| comment.book_id == book_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        comments
    }
}

impl Clone for Store {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            data: Arc::clone(&self.data),
            auto_save: self.auto_save,
        }
    }
}
