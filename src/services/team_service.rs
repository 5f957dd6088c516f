//! Team service implementing business logic.
//!
//! Teams compose the most cross-entity behavior in the portal: every
//! response resolves the owning organization through the team's group,
//! embeds the team's links with per-viewer favorite marking, and every
//! listing hides the reserved technical team.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::cache::{CacheKey, ReadThroughCache};
use crate::domain::errors::{ServiceError, ServiceResult};
use crate::domain::metadata;
use crate::domain::models::page::DEFAULT_PAGE_SIZE;
use crate::domain::models::{
    ComponentResponse, CreateTeamRequest, LinkView, Page, PageRequest, Team, TeamResponse,
    UpdateTeamRequest,
};
use crate::domain::ports::{
    CacheStore, ComponentRepository, GroupRepository, LinkRepository, RepositoryError,
    TeamRepository, UserRepository,
};
use crate::services::component_service::ComponentService;

const ENTITY: &str = "team";

const RECORD_TTL: Duration = Duration::from_secs(300);
const LISTING_TTL: Duration = Duration::from_secs(60);

/// Team-component listings default to a larger page than other listings.
const TEAM_COMPONENT_PAGE_SIZE: i64 = 100;

pub struct TeamService<T, G, L, C, U>
where
    T: TeamRepository,
    G: GroupRepository,
    L: LinkRepository,
    C: ComponentRepository,
    U: UserRepository,
{
    repo: Arc<T>,
    groups: Arc<G>,
    links: Arc<L>,
    components: ComponentService<C>,
    users: Arc<U>,
    cache: ReadThroughCache,
}

impl<T, G, L, C, U> TeamService<T, G, L, C, U>
where
    T: TeamRepository,
    G: GroupRepository,
    L: LinkRepository,
    C: ComponentRepository,
    U: UserRepository,
{
    pub fn new(
        repo: Arc<T>,
        groups: Arc<G>,
        links: Arc<L>,
        components: Arc<C>,
        users: Arc<U>,
    ) -> Self {
        Self {
            repo,
            groups,
            links,
            components: ComponentService::new(components),
            users,
            cache: ReadThroughCache::disabled(),
        }
    }

    /// Attach a cache store. The store is shared with the embedded
    /// component listing.
    pub fn with_cache(mut self, store: Arc<dyn CacheStore>) -> Self {
        self.cache = ReadThroughCache::new(Arc::clone(&store));
        self.components = self.components.with_cache(store);
        self
    }

    pub async fn create(&self, request: CreateTeamRequest) -> ServiceResult<TeamResponse> {
        request.validate()?;

        let team = Team::new(request);
        self.repo
            .create(&team)
            .await
            .map_err(|err| ServiceError::internal(format!("creating team {}", team.name), err))?;

        info!(team = %team.name, id = %team.id, "created team");
        self.invalidate(&team, None).await;
        self.respond(team, None).await
    }

    pub async fn get_by_id(&self, id: Uuid, viewer: Option<&str>) -> ServiceResult<TeamResponse> {
        let key = CacheKey::by_id(ENTITY, id);
        let team = self
            .cache
            .get_or_fetch(&key, RECORD_TTL, move || self.load_by_id(id))
            .await?;
        self.respond(team, viewer).await
    }

    pub async fn get_by_name(
        &self,
        name: &str,
        viewer: Option<&str>,
    ) -> ServiceResult<TeamResponse> {
        let key = CacheKey::by_name(ENTITY, name);
        let team = self
            .cache
            .get_or_fetch(&key, RECORD_TTL, move || async move {
                match self.repo.get_by_name(name).await {
                    Ok(team) => Ok(team),
                    Err(RepositoryError::NotFound) => Err(ServiceError::not_found(ENTITY, name)),
                    Err(err) => {
                        Err(ServiceError::internal(format!("loading team {name}"), err))
                    }
                }
            })
            .await?;
        self.respond(team, viewer).await
    }

    /// Paginated listing. The reserved technical team is filtered out and
    /// the reported total adjusted by the number of filtered rows; the
    /// repository query is unaware of the rule.
    pub async fn list(
        &self,
        query: Option<&str>,
        page: PageRequest,
        viewer: Option<&str>,
    ) -> ServiceResult<Page<TeamResponse>> {
        let page = page.clamp(DEFAULT_PAGE_SIZE);
        let discriminator = format!("q={}", query.unwrap_or_default());
        let key = CacheKey::listing(ENTITY, &page, &[&discriminator]);

        let records: Page<Team> = self
            .cache
            .get_or_fetch(&key, LISTING_TTL, move || async move {
                match self.repo.list(query, page.offset(), page.page_size).await {
                    Ok((rows, total)) => Ok(Page::new(rows, total, &page)),
                    Err(err) => Err(ServiceError::internal("listing teams", err)),
                }
            })
            .await?;

        let before = records.items.len();
        let teams: Vec<Team> = records
            .items
            .into_iter()
            .filter(|team| !team.is_technical())
            .collect();
        let filtered = (before - teams.len()) as i64;

        let mut items = Vec::with_capacity(teams.len());
        for team in teams {
            items.push(self.respond(team, viewer).await?);
        }

        Ok(Page {
            items,
            total: records.total - filtered,
            page: records.page,
            page_size: records.page_size,
        })
    }

    /// Partial update. A present metadata bag is merged into the stored
    /// one; unrelated keys survive.
    pub async fn update(&self, id: Uuid, request: UpdateTeamRequest) -> ServiceResult<TeamResponse> {
        request.validate()?;
        let current = self.load_by_id(id).await?;
        let mut team = current.clone();

        if let Some(group_id) = request.group_id {
            team.group_id = group_id;
        }
        if let Some(name) = request.name {
            team.name = name;
        }
        if let Some(description) = request.description {
            team.description = Some(description);
        }
        if let Some(patch) = request.metadata {
            team.metadata = Some(metadata::merge(team.metadata.as_ref(), &patch)?);
        }
        team.updated_at = Utc::now();

        self.repo
            .update(&team)
            .await
            .map_err(|err| ServiceError::internal(format!("updating team {}", current.name), err))?;

        self.invalidate(&current, Some(&team.name)).await;
        self.respond(team, None).await
    }

    pub async fn delete(&self, id: Uuid) -> ServiceResult<()> {
        let team = self.load_by_id(id).await?;

        match self.repo.delete(id).await {
            Ok(()) => {}
            Err(RepositoryError::NotFound) => return Err(ServiceError::not_found(ENTITY, id)),
            Err(err) => {
                return Err(ServiceError::internal(
                    format!("deleting team {}", team.name),
                    err,
                ));
            }
        }

        info!(team = %team.name, id = %id, "deleted team");
        self.invalidate(&team, None).await;
        Ok(())
    }

    /// Components owned by the team, defaulting to the larger
    /// team-component page size.
    pub async fn components(
        &self,
        team_id: Uuid,
        page: PageRequest,
    ) -> ServiceResult<Page<ComponentResponse>> {
        // Resolve the team first so an unknown id surfaces as team
        // NotFound rather than an empty component page.
        let team = self.load_by_id(team_id).await?;
        let page = page.clamp(TEAM_COMPONENT_PAGE_SIZE);
        debug!(team = %team.name, page = page.page, "listing team components");
        self.components.list_by_owner(team_id, page).await
    }

    /// Build the wire view: the organization join is required and fails
    /// the operation; link and viewer lookups are optional enrichments
    /// that degrade to an unmarked, link-less response.
    async fn respond(&self, team: Team, viewer: Option<&str>) -> ServiceResult<TeamResponse> {
        let group = match self.groups.get_by_id(team.group_id).await {
            Ok(group) => group,
            Err(RepositoryError::NotFound) => {
                return Err(ServiceError::not_found("group", team.group_id));
            }
            Err(err) => {
                return Err(ServiceError::internal(
                    format!("resolving group of team {}", team.name),
                    err,
                ));
            }
        };

        let links = match self.links.list_by_owner(team.id).await {
            Ok(links) => links,
            Err(error) => {
                warn!(team = %team.name, %error, "skipping link enrichment");
                Vec::new()
            }
        };

        let favorites = match viewer {
            Some(viewer_id) => match self.users.get_by_user_id(viewer_id).await {
                Ok(user) => user.favorites(),
                // Unknown or unreadable viewer: links stay unmarked.
                Err(_) => Vec::new(),
            },
            None => Vec::new(),
        };

        Ok(TeamResponse {
            id: team.id,
            group_id: team.group_id,
            organization_id: group.organization_id,
            name: team.name,
            description: team.description,
            links: links
                .into_iter()
                .map(|link| LinkView::marked(link, &favorites))
                .collect(),
            metadata: team.metadata,
        })
    }

    async fn load_by_id(&self, id: Uuid) -> ServiceResult<Team> {
        match self.repo.get_by_id(id).await {
            Ok(team) => Ok(team),
            Err(RepositoryError::NotFound) => Err(ServiceError::not_found(ENTITY, id)),
            Err(err) => Err(ServiceError::internal(format!("loading team {id}"), err)),
        }
    }

    async fn invalidate(&self, team: &Team, renamed_to: Option<&str>) {
        let mut keys = vec![
            CacheKey::by_id(ENTITY, team.id),
            CacheKey::by_name(ENTITY, &team.name),
        ];
        if let Some(name) = renamed_to {
            if name != team.name {
                keys.push(CacheKey::by_name(ENTITY, name));
            }
        }
        self.cache.invalidate(&keys).await;
        self.cache.invalidate_all().await;
    }
}
