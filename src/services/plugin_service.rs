//! Plugin service implementing business logic and UI-content resolution.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;
use uuid::Uuid;

use crate::cache::{CacheKey, ReadThroughCache};
use crate::domain::errors::{ServiceError, ServiceResult};
use crate::domain::models::page::DEFAULT_PAGE_SIZE;
use crate::domain::models::{
    CreatePluginRequest, Page, PageRequest, Plugin, SourceLocation, UpdatePluginRequest,
};
use crate::domain::ports::{CacheStore, ContentProvider, PluginRepository, RepositoryError};

const ENTITY: &str = "plugin";

const RECORD_TTL: Duration = Duration::from_secs(300);
const LISTING_TTL: Duration = Duration::from_secs(60);

pub struct PluginService<R: PluginRepository> {
    repo: Arc<R>,
    content: Arc<dyn ContentProvider>,
    cache: ReadThroughCache,
}

impl<R: PluginRepository> PluginService<R> {
    pub fn new(repo: Arc<R>, content: Arc<dyn ContentProvider>) -> Self {
        Self {
            repo,
            content,
            cache: ReadThroughCache::disabled(),
        }
    }

    /// Attach a cache store.
    pub fn with_cache(mut self, store: Arc<dyn CacheStore>) -> Self {
        self.cache = ReadThroughCache::new(store);
        self
    }

    pub async fn create(&self, request: CreatePluginRequest) -> ServiceResult<Plugin> {
        request.validate()?;
        self.ensure_name_free(&request.name, None).await?;

        let plugin = Plugin::new(request);
        self.repo.create(&plugin).await.map_err(|err| {
            ServiceError::internal(format!("creating plugin {}", plugin.name), err)
        })?;

        info!(plugin = %plugin.name, id = %plugin.id, "created plugin");
        self.invalidate(&plugin, None).await;
        Ok(plugin)
    }

    pub async fn get_by_id(&self, id: Uuid) -> ServiceResult<Plugin> {
        let key = CacheKey::by_id(ENTITY, id);
        self.cache
            .get_or_fetch(&key, RECORD_TTL, move || self.load_by_id(id))
            .await
    }

    pub async fn get_by_name(&self, name: &str) -> ServiceResult<Plugin> {
        let key = CacheKey::by_name(ENTITY, name);
        self.cache
            .get_or_fetch(&key, RECORD_TTL, move || async move {
                match self.repo.get_by_name(name).await {
                    Ok(plugin) => Ok(plugin),
                    Err(RepositoryError::NotFound) => Err(ServiceError::not_found(ENTITY, name)),
                    Err(err) => {
                        Err(ServiceError::internal(format!("loading plugin {name}"), err))
                    }
                }
            })
            .await
    }

    pub async fn list(
        &self,
        query: Option<&str>,
        page: PageRequest,
    ) -> ServiceResult<Page<Plugin>> {
        let page = page.clamp(DEFAULT_PAGE_SIZE);
        let discriminator = format!("q={}", query.unwrap_or_default());
        let key = CacheKey::listing(ENTITY, &page, &[&discriminator]);

        self.cache
            .get_or_fetch(&key, LISTING_TTL, move || async move {
                match self.repo.list(query, page.offset(), page.page_size).await {
                    Ok((rows, total)) => Ok(Page::new(rows, total, &page)),
                    Err(err) => Err(ServiceError::internal("listing plugins", err)),
                }
            })
            .await
    }

    pub async fn update(&self, id: Uuid, request: UpdatePluginRequest) -> ServiceResult<Plugin> {
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
            ServiceError::internal(format!("updating plugin {}", current.name), err)
        })?;

        self.invalidate(&current, Some(&updated.name)).await;
        Ok(updated)
    }

    pub async fn delete(&self, id: Uuid) -> ServiceResult<()> {
        let plugin = self.load_by_id(id).await?;

        match self.repo.delete(id).await {
            Ok(()) => {}
            Err(RepositoryError::NotFound) => return Err(ServiceError::not_found(ENTITY, id)),
            Err(err) => {
                return Err(ServiceError::internal(
                    format!("deleting plugin {}", plugin.name),
                    err,
                ));
            }
        }

        info!(plugin = %plugin.name, id = %id, "deleted plugin");
        self.invalidate(&plugin, None).await;
        Ok(())
    }

    /// Resolve the plugin's React component source through the content
    /// provider.
    ///
    /// The source URL is decomposed into `owner/repo/blob/ref/path`;
    /// anything that does not match that shape on a github host fails
    /// with `InvalidGitHubUrl` before any network call. Dropping the
    /// returned future cancels the fetch.
    pub async fn ui_content(&self, id: Uuid) -> ServiceResult<String> {
        let plugin = self.get_by_id(id).await?;
        let location = SourceLocation::parse(&plugin.source_url)?;

        self.content
            .fetch(
                &location.owner,
                &location.repo,
                &location.path,
                &location.reference,
            )
            .await
            .map_err(|err| {
                ServiceError::internal(
                    format!("fetching UI content for plugin {}", plugin.name),
                    err,
                )
            })
    }

    async fn load_by_id(&self, id: Uuid) -> ServiceResult<Plugin> {
        match self.repo.get_by_id(id).await {
            Ok(plugin) => Ok(plugin),
            Err(RepositoryError::NotFound) => Err(ServiceError::not_found(ENTITY, id)),
            Err(err) => Err(ServiceError::internal(format!("loading plugin {id}"), err)),
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
                format!("checking plugin name {name}"),
                err,
            )),
        }
    }

    async fn invalidate(&self, plugin: &Plugin, renamed_to: Option<&str>) {
        let mut keys = vec![
            CacheKey::by_id(ENTITY, plugin.id),
            CacheKey::by_name(ENTITY, &plugin.name),
        ];
        if let Some(name) = renamed_to {
            if name != plugin.name {
                keys.push(CacheKey::by_name(ENTITY, name));
            }
        }
        self.cache.invalidate(&keys).await;
        self.cache.invalidate_all().await;
    }
}
