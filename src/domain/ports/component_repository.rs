use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::models::Component;
use crate::domain::ports::errors::RepositoryError;

/// Repository port for component persistence.
#[async_trait]
pub trait ComponentRepository: Send + Sync {
    async fn create(&self, component: &Component) -> Result<(), RepositoryError>;

    async fn get_by_id(&self, id: Uuid) -> Result<Component, RepositoryError>;

    async fn update(&self, component: &Component) -> Result<(), RepositoryError>;

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;

    async fn list(
        &self,
        query: Option<&str>,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Component>, i64), RepositoryError>;

    /// List the components owned by a team.
    async fn list_by_owner(
        &self,
        owner_id: Uuid,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Component>, i64), RepositoryError>;
}
