use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::models::Team;
use crate::domain::ports::errors::RepositoryError;

/// Repository port for team persistence.
///
/// The repository is unaware of the technical-team listing filter; that
/// rule lives at the service boundary.
#[async_trait]
pub trait TeamRepository: Send + Sync {
    async fn create(&self, team: &Team) -> Result<(), RepositoryError>;

    async fn get_by_id(&self, id: Uuid) -> Result<Team, RepositoryError>;

    async fn get_by_name(&self, name: &str) -> Result<Team, RepositoryError>;

    async fn update(&self, team: &Team) -> Result<(), RepositoryError>;

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;

    async fn list(
        &self,
        query: Option<&str>,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Team>, i64), RepositoryError>;
}
