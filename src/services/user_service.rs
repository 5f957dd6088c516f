//! User service implementing business logic, favorites, and subscriptions.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::cache::{CacheKey, ReadThroughCache};
use crate::domain::errors::{ServiceError, ServiceResult};
use crate::domain::metadata;
use crate::domain::models::page::DEFAULT_PAGE_SIZE;
use crate::domain::models::user::{FAVORITES_KEY, SUBSCRIBED_KEY};
use crate::domain::models::{
    CreateUserRequest, Page, PageRequest, UpdateUserRequest, User, UserResponse,
};
use crate::domain::ports::{CacheStore, RepositoryError, UserRepository};

const ENTITY: &str = "user";

const RECORD_TTL: Duration = Duration::from_secs(300);
const LISTING_TTL: Duration = Duration::from_secs(60);

pub struct UserService<R: UserRepository> {
    repo: Arc<R>,
    cache: ReadThroughCache,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self {
            repo,
            cache: ReadThroughCache::disabled(),
        }
    }

    /// Attach a cache store.
    pub fn with_cache(mut self, store: Arc<dyn CacheStore>) -> Self {
        self.cache = ReadThroughCache::new(store);
        self
    }

    pub async fn create(&self, request: CreateUserRequest) -> ServiceResult<UserResponse> {
        request.validate()?;
        self.ensure_email_free(&request.email, None).await?;

        let user = User::new(request);
        self.repo.create(&user).await.map_err(|err| {
            ServiceError::internal(format!("creating user {}", user.user_id), err)
        })?;

        info!(user = %user.user_id, id = %user.id, "created user");
        self.invalidate(&user).await;
        Ok(user.view())
    }

    pub async fn get_by_id(&self, id: Uuid) -> ServiceResult<UserResponse> {
        let key = CacheKey::by_id(ENTITY, id);
        let user = self
            .cache
            .get_or_fetch(&key, RECORD_TTL, move || self.load_by_id(id))
            .await?;
        Ok(user.view())
    }

    /// Look up by the external identity string.
    pub async fn get_by_user_id(&self, user_id: &str) -> ServiceResult<UserResponse> {
        let key = CacheKey::by_ref(ENTITY, user_id);
        let user = self
            .cache
            .get_or_fetch(&key, RECORD_TTL, move || async move {
                match self.repo.get_by_user_id(user_id).await {
                    Ok(user) => Ok(user),
                    Err(RepositoryError::NotFound) => {
                        Err(ServiceError::not_found(ENTITY, user_id))
                    }
                    Err(err) => {
                        Err(ServiceError::internal(format!("loading user {user_id}"), err))
                    }
                }
            })
            .await?;
        Ok(user.view())
    }

    pub async fn list(
        &self,
        query: Option<&str>,
        page: PageRequest,
    ) -> ServiceResult<Page<UserResponse>> {
        let page = page.clamp(DEFAULT_PAGE_SIZE);
        let discriminator = format!("q={}", query.unwrap_or_default());
        let key = CacheKey::listing(ENTITY, &page, &[&discriminator]);

        let records: Page<User> = self
            .cache
            .get_or_fetch(&key, LISTING_TTL, move || async move {
                match self.repo.list(query, page.offset(), page.page_size).await {
                    Ok((rows, total)) => Ok(Page::new(rows, total, &page)),
                    Err(err) => Err(ServiceError::internal("listing users", err)),
                }
            })
            .await?;

        Ok(records.map(|user| user.view()))
    }

    /// Partial update. The metadata patch is merged into the stored bag,
    /// preserving unrelated keys such as favorites.
    pub async fn update(&self, id: Uuid, request: UpdateUserRequest) -> ServiceResult<UserResponse> {
        request.validate()?;
        let mut user = self.load_by_id(id).await?;

        if let Some(email) = &request.email {
            if *email != user.email {
                self.ensure_email_free(email, Some(id)).await?;
            }
        }

        if let Some(team_id) = request.team_id {
            user.team_id = Some(team_id);
        }
        if let Some(name) = request.name {
            user.name = name;
        }
        if let Some(email) = request.email {
            user.email = email;
        }
        if let Some(patch) = request.metadata {
            user.metadata = Some(metadata::merge(user.metadata.as_ref(), &patch)?);
        }
        user.updated_at = Utc::now();

        self.repo.update(&user).await.map_err(|err| {
            ServiceError::internal(format!("updating user {}", user.user_id), err)
        })?;

        self.invalidate(&user).await;
        Ok(user.view())
    }

    pub async fn delete(&self, id: Uuid) -> ServiceResult<()> {
        let user = self.load_by_id(id).await?;

        match self.repo.delete(id).await {
            Ok(()) => {}
            Err(RepositoryError::NotFound) => return Err(ServiceError::not_found(ENTITY, id)),
            Err(err) => {
                return Err(ServiceError::internal(
                    format!("deleting user {}", user.user_id),
                    err,
                ));
            }
        }

        info!(user = %user.user_id, id = %id, "deleted user");
        self.invalidate(&user).await;
        Ok(())
    }

    /// Add a link to the user's favorites. Idempotent: favoriting an
    /// already-favorited link is a no-op.
    pub async fn add_favorite(&self, id: Uuid, link_id: Uuid) -> ServiceResult<UserResponse> {
        self.update_list(id, FAVORITES_KEY, ListOp::Add, link_id).await
    }

    /// Remove a link from the user's favorites. Total and idempotent:
    /// removing a non-member succeeds and changes nothing.
    pub async fn remove_favorite(&self, id: Uuid, link_id: Uuid) -> ServiceResult<UserResponse> {
        self.update_list(id, FAVORITES_KEY, ListOp::Remove, link_id)
            .await
    }

    /// Subscribe the user to a plugin.
    pub async fn subscribe(&self, id: Uuid, plugin_id: Uuid) -> ServiceResult<UserResponse> {
        self.update_list(id, SUBSCRIBED_KEY, ListOp::Add, plugin_id)
            .await
    }

    /// Unsubscribe the user from a plugin.
    pub async fn unsubscribe(&self, id: Uuid, plugin_id: Uuid) -> ServiceResult<UserResponse> {
        self.update_list(id, SUBSCRIBED_KEY, ListOp::Remove, plugin_id)
            .await
    }

    /// Whether the external identity is flagged as a portal admin.
    /// Unknown users are not admins.
    pub async fn is_portal_admin(&self, user_id: &str) -> ServiceResult<bool> {
        match self.get_by_user_id(user_id).await {
            Ok(user) => Ok(user.portal_admin),
            Err(ServiceError::NotFound { .. }) => Ok(false),
            Err(err) => Err(err),
        }
    }

    async fn update_list(
        &self,
        id: Uuid,
        list_key: &str,
        op: ListOp,
        value: Uuid,
    ) -> ServiceResult<UserResponse> {
        let mut user = self.load_by_id(id).await?;
        let value = value.to_string();

        let bag = user.metadata.as_ref();
        let updated = match op {
            ListOp::Add => metadata::list_add(bag, list_key, &value)?,
            ListOp::Remove => metadata::list_remove(bag, list_key, &value)?,
        };
        user.metadata = Some(updated);
        user.updated_at = Utc::now();

        self.repo.update(&user).await.map_err(|err| {
            ServiceError::internal(
                format!("updating {list_key} of user {}", user.user_id),
                err,
            )
        })?;

        self.invalidate(&user).await;
        Ok(user.view())
    }

    async fn load_by_id(&self, id: Uuid) -> ServiceResult<User> {
        match self.repo.get_by_id(id).await {
            Ok(user) => Ok(user),
            Err(RepositoryError::NotFound) => Err(ServiceError::not_found(ENTITY, id)),
            Err(err) => Err(ServiceError::internal(format!("loading user {id}"), err)),
        }
    }

    async fn ensure_email_free(&self, email: &str, exclude: Option<Uuid>) -> ServiceResult<()> {
        match self.repo.get_by_email(email).await {
            Ok(existing) if Some(existing.id) != exclude => {
                Err(ServiceError::already_exists(ENTITY, email))
            }
            Ok(_) => Ok(()),
            Err(RepositoryError::NotFound) => Ok(()),
            Err(err) => Err(ServiceError::internal(
                format!("checking user email {email}"),
                err,
            )),
        }
    }

    async fn invalidate(&self, user: &User) {
        self.cache
            .invalidate(&[
                CacheKey::by_id(ENTITY, user.id),
                CacheKey::by_ref(ENTITY, &user.user_id),
            ])
            .await;
        self.cache.invalidate_all().await;
    }
}

#[derive(Clone, Copy)]
enum ListOp {
    Add,
    Remove,
}
