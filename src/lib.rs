//! Portal Core - Developer Portal Service Layer
//!
//! Portal Core implements the business logic of a developer-portal backend:
//! CRUD services over landscapes, plugins, teams, components, and users,
//! fronted by request validation, a generic read-through cache, and
//! repository ports.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Entity models, metadata semantics, and port traits
//! - **Cache Layer** (`cache`): Typed read-through wrapper over a byte-oriented store
//! - **Service Layer** (`services`): One service per entity, composing validation,
//!   uniqueness checks, caching, and response projection
//! - **Adapters** (`adapters`): Bundled implementations of selected ports
//!   (in-memory cache store, GitHub content client)
//!
//! Persistence stays behind the repository ports; callers wire in their own
//! implementations. Caching is optional: services default to the no-op store,
//! so a cache backend is an optimization, never a correctness dependency.
//!
//! # Example
//!
//! ```ignore
//! use portal_core::services::LandscapeService;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let service = LandscapeService::new(Arc::new(my_repository));
//!     let landscape = service.get_by_name("prod-eu").await?;
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cache;
pub mod domain;
pub mod services;

// Re-export commonly used types for convenience
pub use cache::{CacheKey, ReadThroughCache};
pub use domain::errors::{ServiceError, ServiceResult};
pub use domain::models::{
    Component, Group, Landscape, Link, Page, PageRequest, Plugin, SourceLocation, Team, User,
};
pub use domain::ports::{
    CacheStore, ComponentRepository, ContentProvider, GroupRepository, LandscapeRepository,
    LinkRepository, NullCacheStore, PluginRepository, RepositoryError, TeamRepository,
    UserRepository,
};
pub use services::{
    ComponentService, LandscapeService, PluginService, TeamService, UserService,
};
