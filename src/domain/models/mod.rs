//! Domain models: entity records, request/response shapes, pagination.

pub mod component;
pub mod group;
pub mod landscape;
pub mod link;
pub mod page;
pub mod plugin;
pub mod team;
pub mod user;

pub use component::{
    Component, ComponentResponse, CreateComponentRequest, UpdateComponentRequest,
};
pub use group::Group;
pub use landscape::{
    CreateLandscapeRequest, Landscape, LandscapeSummary, UpdateLandscapeRequest,
};
pub use link::{Link, LinkView};
pub use page::{Page, PageRequest, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
pub use plugin::{CreatePluginRequest, Plugin, SourceLocation, UpdatePluginRequest};
pub use team::{CreateTeamRequest, Team, TeamResponse, UpdateTeamRequest, TECHNICAL_TEAM_NAME};
pub use user::{CreateUserRequest, UpdateUserRequest, User, UserResponse};
