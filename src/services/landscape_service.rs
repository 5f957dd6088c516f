//! Landscape service implementing business logic.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};
use uuid::Uuid;

use crate::cache::{CacheKey, ReadThroughCache};
use crate::domain::errors::{ServiceError, ServiceResult};
use crate::domain::models::page::DEFAULT_PAGE_SIZE;
use crate::domain::models::{
    CreateLandscapeRequest, Landscape, LandscapeSummary, Page, PageRequest,
    UpdateLandscapeRequest,
};
use crate::domain::ports::{CacheStore, LandscapeRepository, RepositoryError};

const ENTITY: &str = "landscape";

/// TTL for single-record reads.
const RECORD_TTL: Duration = Duration::from_secs(300);

/// TTL for listing reads; shorter because listings go stale faster.
const LISTING_TTL: Duration = Duration::from_secs(60);

pub struct LandscapeService<R: LandscapeRepository> {
    repo: Arc<R>,
    cache: ReadThroughCache,
}

impl<R: LandscapeRepository> LandscapeService<R> {
    /// Create a service without a caching backend; every read loads.
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

    pub async fn create(&self, request: CreateLandscapeRequest) -> ServiceResult<Landscape> {
        request.validate()?;
        self.ensure_name_free(&request.name, None).await?;

        let landscape = Landscape::new(request);
        self.repo.create(&landscape).await.map_err(|err| {
            ServiceError::internal(format!("creating landscape {}", landscape.name), err)
        })?;

        info!(landscape = %landscape.name, id = %landscape.id, "created landscape");
        self.invalidate(&landscape, None).await;
        Ok(landscape)
    }

    pub async fn get_by_id(&self, id: Uuid) -> ServiceResult<Landscape> {
        let key = CacheKey::by_id(ENTITY, id);
        self.cache
            .get_or_fetch(&key, RECORD_TTL, move || self.load_by_id(id))
            .await
    }

    pub async fn get_by_name(&self, name: &str) -> ServiceResult<Landscape> {
        let key = CacheKey::by_name(ENTITY, name);
        self.cache
            .get_or_fetch(&key, RECORD_TTL, move || async move {
                match self.repo.get_by_name(name).await {
                    Ok(landscape) => Ok(landscape),
                    Err(RepositoryError::NotFound) => {
                        Err(ServiceError::not_found(ENTITY, name))
                    }
                    Err(err) => Err(ServiceError::internal(
                        format!("loading landscape {name}"),
                        err,
                    )),
                }
            })
            .await
    }

    /// Paginated listing projected to the minimal view.
    pub async fn list(
        &self,
        query: Option<&str>,
        page: PageRequest,
    ) -> ServiceResult<Page<LandscapeSummary>> {
        let page = page.clamp(DEFAULT_PAGE_SIZE);
        let discriminator = format!("q={}", query.unwrap_or_default());
        let key = CacheKey::listing(ENTITY, &page, &[&discriminator]);

        let records: Page<Landscape> = self
            .cache
            .get_or_fetch(&key, LISTING_TTL, move || async move {
                match self.repo.list(query, page.offset(), page.page_size).await {
                    Ok((rows, total)) => Ok(Page::new(rows, total, &page)),
                    Err(err) => Err(ServiceError::internal("listing landscapes", err)),
                }
            })
            .await?;

        Ok(records.map(|landscape| landscape.summary()))
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateLandscapeRequest,
    ) -> ServiceResult<Landscape> {
        request.validate()?;
        let current = self.load_by_id(id).await?;

        if let Some(name) = &request.name {
            if *name != current.name {
                self.ensure_name_free(name, Some(id)).await?;
            }
        }

        let mut updated = current.clone();
        request.apply(&mut updated);

        self.repo.update(&updated).await.map_err(|err| {
            ServiceError::internal(format!("updating landscape {}", current.name), err)
        })?;

        self.invalidate(&current, Some(&updated.name)).await;
        Ok(updated)
    }

    pub async fn delete(&self, id: Uuid) -> ServiceResult<()> {
        let landscape = self.load_by_id(id).await?;

        match self.repo.delete(id).await {
            Ok(()) => {}
            Err(RepositoryError::NotFound) => {
                return Err(ServiceError::not_found(ENTITY, id));
            }
            Err(err) => {
                return Err(ServiceError::internal(
                    format!("deleting landscape {}", landscape.name),
                    err,
                ));
            }
        }

        info!(landscape = %landscape.name, id = %id, "deleted landscape");
        self.invalidate(&landscape, None).await;
        Ok(())
    }

    /// Landscape status used to be mutable; the operation is retained as
    /// a no-op for backward API compatibility.
    pub async fn set_status(&self, id: Uuid, status: &str) -> ServiceResult<()> {
        let landscape = self.load_by_id(id).await?;
        debug!(landscape = %landscape.name, status, "ignoring landscape status change");
        self.invalidate(&landscape, None).await;
        Ok(())
    }

    async fn load_by_id(&self, id: Uuid) -> ServiceResult<Landscape> {
        match self.repo.get_by_id(id).await {
            Ok(landscape) => Ok(landscape),
            Err(RepositoryError::NotFound) => Err(ServiceError::not_found(ENTITY, id)),
            Err(err) => Err(ServiceError::internal(
                format!("loading landscape {id}"),
                err,
            )),
        }
    }

    async fn ensure_name_free(&self, name: &str, exclude: Option<Uuid>) -> ServiceResult<()> {
        match self.repo.get_by_name(name).await {
            Ok(existing) if Some(existing.id) != exclude => {
                Err(ServiceError::already_exists(ENTITY, name))
            }
            Ok(_) => Ok(()),
            Err(RepositoryError::NotFound) => Ok(()),
            Err(err) => Err(ServiceError::internal(
                format!("checking landscape name {name}"),
                err,
            )),
        }
    }

    /// Invalidate the record's by-id and by-name entries, plus the new
    /// name after a rename. Listing keys cannot be enumerated through the
    /// byte-store contract, so listings are cleared wholesale.
    async fn invalidate(&self, landscape: &Landscape, renamed_to: Option<&str>) {
        let mut keys = vec![
            CacheKey::by_id(ENTITY, landscape.id),
            CacheKey::by_name(ENTITY, &landscape.name),
        ];
        if let Some(name) = renamed_to {
            if name != landscape.name {
                keys.push(CacheKey::by_name(ENTITY, name));
            }
        }
        self.cache.invalidate(&keys).await;
        self.cache.invalidate_all().await;
    }
}
