//! Trait seam between application services and the remote content API.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::articles::Article;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("content API transport failure: {0}")]
    Transport(String),
    #[error("content API returned status {status}")]
    UpstreamStatus { status: u16 },
    #[error("failed to decode content API response: {0}")]
    Decode(String),
}

impl RepoError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }
}

/// The slice of the content API this front-end consumes.
#[async_trait]
pub trait ContentRepo: Send + Sync {
    /// `GET /getData?title=…`. `Ok(None)` when no article exists under the
    /// given title.
    async fn fetch_article(&self, title: &str) -> Result<Option<Article>, RepoError>;

    /// `GET /getAllData`. The API returns articles oldest-first.
    async fn fetch_all_articles(&self) -> Result<Vec<Article>, RepoError>;

    /// `POST /addSub` with the subscriber address; returns the
    /// application-level status code carried in the reply body.
    async fn add_subscriber(&self, email: &str) -> Result<u16, RepoError>;
}
