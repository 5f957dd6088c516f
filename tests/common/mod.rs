//! In-memory fakes and fixtures shared by the service tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use portal_core::domain::models::{
    Component, CreateComponentRequest, CreateLandscapeRequest, CreatePluginRequest,
    CreateTeamRequest, CreateUserRequest, Group, Landscape, Link, Plugin, Team, User,
};
use portal_core::domain::ports::{
    ComponentRepository, ContentProvider, GroupRepository, LandscapeRepository, LinkRepository,
    PluginRepository, RepositoryError, TeamRepository, UserRepository,
};

fn page_slice<T: Clone>(mut rows: Vec<T>, offset: i64, limit: i64) -> (Vec<T>, i64) {
    let total = rows.len() as i64;
    let rows = rows
        .drain(..)
        .skip(offset.max(0) as usize)
        .take(limit.max(0) as usize)
        .collect();
    (rows, total)
}

fn matches(query: Option<&str>, haystacks: &[&str]) -> bool {
    match query {
        Some(q) => haystacks.iter().any(|h| h.contains(q)),
        None => true,
    }
}

// ---------------------------------------------------------------------------
// Landscapes

#[derive(Default)]
pub struct InMemoryLandscapeRepository {
    rows: Mutex<HashMap<Uuid, Landscape>>,
    /// Number of by-id loads, for cache-behavior assertions.
    pub get_calls: AtomicUsize,
}

impl InMemoryLandscapeRepository {
    pub async fn len(&self) -> usize {
        self.rows.lock().await.len()
    }
}

#[async_trait]
impl LandscapeRepository for InMemoryLandscapeRepository {
    async fn create(&self, landscape: &Landscape) -> Result<(), RepositoryError> {
        self.rows.lock().await.insert(landscape.id, landscape.clone());
        Ok(())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Landscape, RepositoryError> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        self.rows
            .lock()
            .await
            .get(&id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn get_by_name(&self, name: &str) -> Result<Landscape, RepositoryError> {
        self.rows
            .lock()
            .await
            .values()
            .find(|l| l.name == name)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn update(&self, landscape: &Landscape) -> Result<(), RepositoryError> {
        let mut rows = self.rows.lock().await;
        if !rows.contains_key(&landscape.id) {
            return Err(RepositoryError::NotFound);
        }
        rows.insert(landscape.id, landscape.clone());
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        self.rows
            .lock()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }

    async fn list(
        &self,
        query: Option<&str>,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Landscape>, i64), RepositoryError> {
        let mut rows: Vec<Landscape> = self
            .rows
            .lock()
            .await
            .values()
            .filter(|l| matches(query, &[&l.name, &l.title]))
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(page_slice(rows, offset, limit))
    }
}

// ---------------------------------------------------------------------------
// Plugins

#[derive(Default)]
pub struct InMemoryPluginRepository {
    rows: Mutex<HashMap<Uuid, Plugin>>,
}

impl InMemoryPluginRepository {
    pub async fn len(&self) -> usize {
        self.rows.lock().await.len()
    }
}

#[async_trait]
impl PluginRepository for InMemoryPluginRepository {
    async fn create(&self, plugin: &Plugin) -> Result<(), RepositoryError> {
        self.rows.lock().await.insert(plugin.id, plugin.clone());
        Ok(())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Plugin, RepositoryError> {
        self.rows
            .lock()
            .await
            .get(&id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn get_by_name(&self, name: &str) -> Result<Plugin, RepositoryError> {
        self.rows
            .lock()
            .await
            .values()
            .find(|p| p.name == name)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn update(&self, plugin: &Plugin) -> Result<(), RepositoryError> {
        let mut rows = self.rows.lock().await;
        if !rows.contains_key(&plugin.id) {
            return Err(RepositoryError::NotFound);
        }
        rows.insert(plugin.id, plugin.clone());
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        self.rows
            .lock()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }

    async fn list(
        &self,
        query: Option<&str>,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Plugin>, i64), RepositoryError> {
        let mut rows: Vec<Plugin> = self
            .rows
            .lock()
            .await
            .values()
            .filter(|p| matches(query, &[&p.name, &p.title]))
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(page_slice(rows, offset, limit))
    }
}

// ---------------------------------------------------------------------------
// Teams

#[derive(Default)]
pub struct InMemoryTeamRepository {
    rows: Mutex<HashMap<Uuid, Team>>,
}

#[async_trait]
impl TeamRepository for InMemoryTeamRepository {
    async fn create(&self, team: &Team) -> Result<(), RepositoryError> {
        self.rows.lock().await.insert(team.id, team.clone());
        Ok(())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Team, RepositoryError> {
        self.rows
            .lock()
            .await
            .get(&id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn get_by_name(&self, name: &str) -> Result<Team, RepositoryError> {
        self.rows
            .lock()
            .await
            .values()
            .find(|t| t.name == name)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn update(&self, team: &Team) -> Result<(), RepositoryError> {
        let mut rows = self.rows.lock().await;
        if !rows.contains_key(&team.id) {
            return Err(RepositoryError::NotFound);
        }
        rows.insert(team.id, team.clone());
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        self.rows
            .lock()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }

    async fn list(
        &self,
        query: Option<&str>,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Team>, i64), RepositoryError> {
        let mut rows: Vec<Team> = self
            .rows
            .lock()
            .await
            .values()
            .filter(|t| matches(query, &[&t.name]))
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(page_slice(rows, offset, limit))
    }
}

// ---------------------------------------------------------------------------
// Components

#[derive(Default)]
pub struct InMemoryComponentRepository {
    rows: Mutex<HashMap<Uuid, Component>>,
}

impl InMemoryComponentRepository {
    pub async fn get(&self, id: Uuid) -> Option<Component> {
        self.rows.lock().await.get(&id).cloned()
    }
}

#[async_trait]
impl ComponentRepository for InMemoryComponentRepository {
    async fn create(&self, component: &Component) -> Result<(), RepositoryError> {
        self.rows.lock().await.insert(component.id, component.clone());
        Ok(())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Component, RepositoryError> {
        self.rows
            .lock()
            .await
            .get(&id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn update(&self, component: &Component) -> Result<(), RepositoryError> {
        let mut rows = self.rows.lock().await;
        if !rows.contains_key(&component.id) {
            return Err(RepositoryError::NotFound);
        }
        rows.insert(component.id, component.clone());
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        self.rows
            .lock()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }

    async fn list(
        &self,
        query: Option<&str>,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Component>, i64), RepositoryError> {
        let mut rows: Vec<Component> = self
            .rows
            .lock()
            .await
            .values()
            .filter(|c| matches(query, &[&c.name]))
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(page_slice(rows, offset, limit))
    }

    async fn list_by_owner(
        &self,
        owner_id: Uuid,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Component>, i64), RepositoryError> {
        let mut rows: Vec<Component> = self
            .rows
            .lock()
            .await
            .values()
            .filter(|c| c.owner_id == owner_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(page_slice(rows, offset, limit))
    }
}

// ---------------------------------------------------------------------------
// Users

#[derive(Default)]
pub struct InMemoryUserRepository {
    rows: Mutex<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub async fn len(&self) -> usize {
        self.rows.lock().await.len()
    }

    /// Seed a user row directly, bypassing the service. Used to plant
    /// legacy-shaped metadata.
    pub async fn seed(&self, user: User) {
        self.rows.lock().await.insert(user.id, user);
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &User) -> Result<(), RepositoryError> {
        self.rows.lock().await.insert(user.id, user.clone());
        Ok(())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<User, RepositoryError> {
        self.rows
            .lock()
            .await
            .get(&id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn get_by_user_id(&self, user_id: &str) -> Result<User, RepositoryError> {
        self.rows
            .lock()
            .await
            .values()
            .find(|u| u.user_id == user_id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn get_by_email(&self, email: &str) -> Result<User, RepositoryError> {
        self.rows
            .lock()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn update(&self, user: &User) -> Result<(), RepositoryError> {
        let mut rows = self.rows.lock().await;
        if !rows.contains_key(&user.id) {
            return Err(RepositoryError::NotFound);
        }
        rows.insert(user.id, user.clone());
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        self.rows
            .lock()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }

    async fn list(
        &self,
        query: Option<&str>,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<User>, i64), RepositoryError> {
        let mut rows: Vec<User> = self
            .rows
            .lock()
            .await
            .values()
            .filter(|u| matches(query, &[&u.name, &u.email]))
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.user_id.cmp(&b.user_id));
        Ok(page_slice(rows, offset, limit))
    }
}

// ---------------------------------------------------------------------------
// Links and groups (consumed, never owned)

#[derive(Default)]
pub struct InMemoryLinkRepository {
    rows: Mutex<Vec<Link>>,
    /// When set, every lookup fails; exercises the degrade path.
    pub fail: AtomicBool,
}

impl InMemoryLinkRepository {
    pub async fn seed(&self, link: Link) {
        self.rows.lock().await.push(link);
    }
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Link>, RepositoryError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(RepositoryError::backend("link store unavailable"));
        }
        Ok(self
            .rows
            .lock()
            .await
            .iter()
            .filter(|l| l.owner_id == owner_id)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct InMemoryGroupRepository {
    rows: Mutex<HashMap<Uuid, Group>>,
}

impl InMemoryGroupRepository {
    pub async fn seed(&self, group: Group) {
        self.rows.lock().await.insert(group.id, group);
    }
}

#[async_trait]
impl GroupRepository for InMemoryGroupRepository {
    async fn get_by_id(&self, id: Uuid) -> Result<Group, RepositoryError> {
        self.rows
            .lock()
            .await
            .get(&id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }
}

// ---------------------------------------------------------------------------
// Content provider stub

#[derive(Default)]
pub struct StubContentProvider {
    /// Body returned on success; `None` makes every fetch fail.
    pub body: Option<String>,
    /// Records (owner, repo, path, reference) of every call.
    pub calls: Mutex<Vec<(String, String, String, String)>>,
}

impl StubContentProvider {
    pub fn returning(body: &str) -> Self {
        Self {
            body: Some(body.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ContentProvider for StubContentProvider {
    async fn fetch(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        reference: &str,
    ) -> anyhow::Result<String> {
        self.calls.lock().await.push((
            owner.to_string(),
            repo.to_string(),
            path.to_string(),
            reference.to_string(),
        ));
        match &self.body {
            Some(body) => Ok(body.clone()),
            None => Err(anyhow::anyhow!("content host unreachable")),
        }
    }
}

// ---------------------------------------------------------------------------
// Fixtures

pub fn landscape_request(name: &str) -> CreateLandscapeRequest {
    CreateLandscapeRequest {
        name: name.to_string(),
        title: format!("Landscape {name}"),
        description: None,
        project_id: "P1".to_string(),
        domain: "eu.example.com".to_string(),
        environment: "production".to_string(),
        metadata: None,
    }
}

pub fn plugin_request(name: &str) -> CreatePluginRequest {
    CreatePluginRequest {
        name: name.to_string(),
        title: format!("Plugin {name}"),
        description: None,
        source_url: "https://github.com/acme/widgets/blob/main/src/App.tsx".to_string(),
        backend_url: None,
    }
}

pub fn team_request(name: &str, group_id: Uuid) -> CreateTeamRequest {
    CreateTeamRequest {
        group_id,
        name: name.to_string(),
        description: None,
        metadata: None,
    }
}

pub fn component_request(name: &str, owner_id: Uuid) -> CreateComponentRequest {
    CreateComponentRequest {
        owner_id,
        project_id: "P1".to_string(),
        name: name.to_string(),
        metadata: None,
    }
}

pub fn user_request(user_id: &str, email: &str) -> CreateUserRequest {
    CreateUserRequest {
        user_id: user_id.to_string(),
        team_id: None,
        name: format!("User {user_id}"),
        email: email.to_string(),
        metadata: None,
    }
}
