use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::models::User;
use crate::domain::ports::errors::RepositoryError;

/// Repository port for user persistence.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &User) -> Result<(), RepositoryError>;

    async fn get_by_id(&self, id: Uuid) -> Result<User, RepositoryError>;

    /// Look up by the external identity string.
    async fn get_by_user_id(&self, user_id: &str) -> Result<User, RepositoryError>;

    /// Look up by email; backs the uniqueness check.
    async fn get_by_email(&self, email: &str) -> Result<User, RepositoryError>;

    async fn update(&self, user: &User) -> Result<(), RepositoryError>;

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;

    async fn list(
        &self,
        query: Option<&str>,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<User>, i64), RepositoryError>;
}
