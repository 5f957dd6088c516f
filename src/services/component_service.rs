//! Component service implementing business logic.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;
use uuid::Uuid;

use crate::cache::{CacheKey, ReadThroughCache};
use crate::domain::errors::{ServiceError, ServiceResult};
use crate::domain::metadata;
use crate::domain::models::page::DEFAULT_PAGE_SIZE;
use crate::domain::models::{
    Component, ComponentResponse, CreateComponentRequest, Page, PageRequest,
    UpdateComponentRequest,
};
use crate::domain::ports::{CacheStore, ComponentRepository, RepositoryError};

const ENTITY: &str = "component";

const RECORD_TTL: Duration = Duration::from_secs(300);
const LISTING_TTL: Duration = Duration::from_secs(60);

pub struct ComponentService<R: ComponentRepository> {
    repo: Arc<R>,
    cache: ReadThroughCache,
}

impl<R: ComponentRepository> ComponentService<R> {
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

    pub async fn create(
        &self,
        request: CreateComponentRequest,
    ) -> ServiceResult<ComponentResponse> {
        request.validate()?;

        let component = Component::new(request);
        self.repo.create(&component).await.map_err(|err| {
            ServiceError::internal(format!("creating component {}", component.name), err)
        })?;

        info!(component = %component.name, id = %component.id, "created component");
        self.invalidate(&component).await;
        Ok(component.view())
    }

    pub async fn get_by_id(&self, id: Uuid) -> ServiceResult<ComponentResponse> {
        let key = CacheKey::by_id(ENTITY, id);
        let component = self
            .cache
            .get_or_fetch(&key, RECORD_TTL, move || self.load_by_id(id))
            .await?;
        Ok(component.view())
    }

    pub async fn list(
        &self,
        query: Option<&str>,
        page: PageRequest,
    ) -> ServiceResult<Page<ComponentResponse>> {
        let page = page.clamp(DEFAULT_PAGE_SIZE);
        let discriminator = format!("q={}", query.unwrap_or_default());
        let key = CacheKey::listing(ENTITY, &page, &[&discriminator]);

        let records: Page<Component> = self
            .cache
            .get_or_fetch(&key, LISTING_TTL, move || async move {
                match self.repo.list(query, page.offset(), page.page_size).await {
                    Ok((rows, total)) => Ok(Page::new(rows, total, &page)),
                    Err(err) => Err(ServiceError::internal("listing components", err)),
                }
            })
            .await?;

        Ok(records.map(|component| component.view()))
    }

    /// Components owned by a team. The clamped page size defaults come
    /// from the caller, because the team-component listing uses a larger
    /// default than other listings.
    pub async fn list_by_owner(
        &self,
        owner_id: Uuid,
        page: PageRequest,
    ) -> ServiceResult<Page<ComponentResponse>> {
        let discriminator = format!("owner={owner_id}");
        let key = CacheKey::listing(ENTITY, &page, &[&discriminator]);

        let records: Page<Component> = self
            .cache
            .get_or_fetch(&key, LISTING_TTL, move || async move {
                match self
                    .repo
                    .list_by_owner(owner_id, page.offset(), page.page_size)
                    .await
                {
                    Ok((rows, total)) => Ok(Page::new(rows, total, &page)),
                    Err(err) => Err(ServiceError::internal(
                        format!("listing components of team {owner_id}"),
                        err,
                    )),
                }
            })
            .await?;

        Ok(records.map(|component| component.view()))
    }

    /// Partial update. The metadata patch is merged into the stored bag.
    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateComponentRequest,
    ) -> ServiceResult<ComponentResponse> {
        request.validate()?;
        let mut component = self.load_by_id(id).await?;

        if let Some(project_id) = request.project_id {
            component.project_id = project_id;
        }
        if let Some(name) = request.name {
            component.name = name;
        }
        if let Some(patch) = request.metadata {
            component.metadata = Some(metadata::merge(component.metadata.as_ref(), &patch)?);
        }
        component.updated_at = chrono::Utc::now();

        self.repo.update(&component).await.map_err(|err| {
            ServiceError::internal(format!("updating component {}", component.name), err)
        })?;

        self.invalidate(&component).await;
        Ok(component.view())
    }

    pub async fn delete(&self, id: Uuid) -> ServiceResult<()> {
        let component = self.load_by_id(id).await?;

        match self.repo.delete(id).await {
            Ok(()) => {}
            Err(RepositoryError::NotFound) => return Err(ServiceError::not_found(ENTITY, id)),
            Err(err) => {
                return Err(ServiceError::internal(
                    format!("deleting component {}", component.name),
                    err,
                ));
            }
        }

        info!(component = %component.name, id = %id, "deleted component");
        self.invalidate(&component).await;
        Ok(())
    }

    async fn load_by_id(&self, id: Uuid) -> ServiceResult<Component> {
        match self.repo.get_by_id(id).await {
            Ok(component) => Ok(component),
            Err(RepositoryError::NotFound) => Err(ServiceError::not_found(ENTITY, id)),
            Err(err) => Err(ServiceError::internal(
                format!("loading component {id}"),
                err,
            )),
        }
    }

    async fn invalidate(&self, component: &Component) {
        self.cache
            .invalidate(&[CacheKey::by_id(ENTITY, component.id)])
            .await;
        self.cache.invalidate_all().await;
    }
}
