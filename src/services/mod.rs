//! Entity services: business logic between transport and repositories.
//!
//! Each service composes a repository port, request validation, and the
//! read-through cache. Validation runs first and short-circuits with no
//! repository or cache interaction; writes invalidate the affected cache
//! entries after the repository call succeeds.

pub mod component_service;
pub mod landscape_service;
pub mod plugin_service;
pub mod team_service;
pub mod user_service;

pub use component_service::ComponentService;
pub use landscape_service::LandscapeService;
pub use plugin_service::PluginService;
pub use team_service::TeamService;
pub use user_service::UserService;
