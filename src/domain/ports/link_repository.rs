use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::models::Link;
use crate::domain::ports::errors::RepositoryError;

/// Read-only port for links.
///
/// Links are owned elsewhere; this core only embeds them in team and
/// user responses.
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Links owned by a team or user.
    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Link>, RepositoryError>;
}
