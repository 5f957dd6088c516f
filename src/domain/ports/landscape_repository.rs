use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::models::Landscape;
use crate::domain::ports::errors::RepositoryError;

/// Repository port for landscape persistence.
#[async_trait]
pub trait LandscapeRepository: Send + Sync {
    async fn create(&self, landscape: &Landscape) -> Result<(), RepositoryError>;

    async fn get_by_id(&self, id: Uuid) -> Result<Landscape, RepositoryError>;

    async fn get_by_name(&self, name: &str) -> Result<Landscape, RepositoryError>;

    async fn update(&self, landscape: &Landscape) -> Result<(), RepositoryError>;

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;

    /// List landscapes matching an optional free-text query, returning
    /// the page rows and the total match count.
    async fn list(
        &self,
        query: Option<&str>,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Landscape>, i64), RepositoryError>;
}
