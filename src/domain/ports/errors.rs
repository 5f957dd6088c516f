use thiserror::Error;

/// Errors surfaced by repository implementations.
///
/// "Not found" is a distinguishable sentinel, separate from backend
/// failures, so services can translate it into their entity-specific
/// `NotFound` condition instead of an internal error.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,

    #[error("{0}")]
    Backend(String),
}

impl RepositoryError {
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend(message.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}

/// Errors surfaced by cache store implementations.
///
/// Only `delete`/`clear` report failures, and callers log rather than
/// propagate them: cache invalidation failure must never fail the write
/// that triggered it.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("{0}")]
    Backend(String),
}

impl CacheError {
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend(message.into())
    }
}
