//! Driven port for the placeholder REST data source.
//!
//! Feed, dashboard, navigation and authentication read users, posts and
//! comments through this port; the reqwest adapter lives in
//! `outbound::placeholder`.

use async_trait::async_trait;

use crate::domain::{Comment, Post, PostId, User};

use super::define_port_error;

define_port_error! {
    /// Errors raised while reading placeholder data.
    pub enum PlaceholderSourceError {
        /// Network transport failed before a response arrived.
        Transport { message: String } =>
            "placeholder transport failed: {message}",
        /// The request exceeded its timeout.
        Timeout { message: String } =>
            "placeholder request timed out: {message}",
        /// The API answered with a non-success status.
        Status { status: u16, message: String } =>
            "placeholder API returned status {status}: {message}",
        /// The response body could not be decoded.
        Decode { message: String } =>
            "placeholder response decode failed: {message}",
    }
}

/// Port for reading placeholder entities.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlaceholderSource: Send + Sync {
    /// Every user.
    async fn users(&self) -> Result<Vec<User>, PlaceholderSourceError>;

    /// Every post.
    async fn posts(&self) -> Result<Vec<Post>, PlaceholderSourceError>;

    /// Comments on `post`, or every comment when `post` is `None`.
    async fn comments(&self, post: Option<PostId>) -> Result<Vec<Comment>, PlaceholderSourceError>;
}

/// In-memory source serving fixed records.
#[derive(Debug, Default, Clone)]
pub struct FixturePlaceholderSource {
    users: Vec<User>,
    posts: Vec<Post>,
    comments: Vec<Comment>,
}

impl FixturePlaceholderSource {
    /// Build a source over the given records.
    #[must_use]
    pub fn new(users: Vec<User>, posts: Vec<Post>, comments: Vec<Comment>) -> Self {
        Self {
            users,
            posts,
            comments,
        }
    }
}

#[async_trait]
impl PlaceholderSource for FixturePlaceholderSource {
    async fn users(&self) -> Result<Vec<User>, PlaceholderSourceError> {
        Ok(self.users.clone())
    }

    async fn posts(&self) -> Result<Vec<Post>, PlaceholderSourceError> {
        Ok(self.posts.clone())
    }

    async fn comments(&self, post: Option<PostId>) -> Result<Vec<Comment>, PlaceholderSourceError> {
        Ok(self
            .comments
            .iter()
            .filter(|comment| post.is_none_or(|id| comment.post_id == id))
            .cloned()
            .collect())
    }
}
