//! Comment operations
//!
//! Listing is public; posting and deleting require an explicit
//! authenticated identity. Deleting is restricted to the comment's author.

mod service;

pub use service::{delete, list, post, CommentView};

#[cfg(test)]
mod tests;
