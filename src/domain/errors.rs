//! Domain errors for the portal service layer.

use thiserror::Error;

use crate::domain::validation::Violations;

/// Service-level errors surfaced to API callers.
///
/// Transport-specific status-code mapping is the caller's concern; this
/// taxonomy only distinguishes the conditions the service layer can detect.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    #[error("{entity} already exists: {key}")]
    AlreadyExists { entity: &'static str, key: String },

    #[error("validation failed: {0}")]
    Validation(Violations),

    #[error("malformed metadata: {0}")]
    MalformedMetadata(String),

    #[error("invalid GitHub source URL: {0}")]
    InvalidGitHubUrl(String),

    /// Unexpected repository, cache, or collaborator failure, wrapped with
    /// an operation-describing context. The underlying cause is preserved
    /// for diagnostics via `source()`.
    #[error("{context}")]
    Internal {
        context: String,
        #[source]
        source: anyhow::Error,
    },
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    pub fn not_found(entity: &'static str, key: impl ToString) -> Self {
        Self::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    pub fn already_exists(entity: &'static str, key: impl ToString) -> Self {
        Self::AlreadyExists {
            entity,
            key: key.to_string(),
        }
    }

    pub fn internal(
        context: impl Into<String>,
        source: impl Into<anyhow::Error>,
    ) -> Self {
        Self::Internal {
            context: context.into(),
            source: source.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::AlreadyExists { .. })
    }
}

impl From<Violations> for ServiceError {
    fn from(violations: Violations) -> Self {
        Self::Validation(violations)
    }
}
