use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::models::Plugin;
use crate::domain::ports::errors::RepositoryError;

/// Repository port for plugin persistence.
#[async_trait]
pub trait PluginRepository: Send + Sync {
    async fn create(&self, plugin: &Plugin) -> Result<(), RepositoryError>;

    async fn get_by_id(&self, id: Uuid) -> Result<Plugin, RepositoryError>;

    async fn get_by_name(&self, name: &str) -> Result<Plugin, RepositoryError>;

    async fn update(&self, plugin: &Plugin) -> Result<(), RepositoryError>;

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;

    async fn list(
        &self,
        query: Option<&str>,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Plugin>, i64), RepositoryError>;
}
