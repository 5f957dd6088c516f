use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::models::Group;
use crate::domain::ports::errors::RepositoryError;

/// Read-only port for groups, used to resolve a team's organization.
#[async_trait]
pub trait GroupRepository: Send + Sync {
    async fn get_by_id(&self, id: Uuid) -> Result<Group, RepositoryError>;
}
