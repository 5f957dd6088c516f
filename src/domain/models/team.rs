//! Team domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::domain::models::link::LinkView;
use crate::domain::validation::Violations;

/// Reserved technical team used for internal bookkeeping. Excluded from
/// every user-facing listing; kept as an exact-name match for
/// compatibility with previously persisted data.
pub const TECHNICAL_TEAM_NAME: &str = "team-developer-portal-technical";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: Uuid,
    /// Group membership; the group transitively resolves to an
    /// organization.
    pub group_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    /// Merged (not replaced) on partial updates.
    pub metadata: Option<Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Team {
    pub fn new(request: CreateTeamRequest) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            group_id: request.group_id,
            name: request.name,
            description: request.description,
            metadata: request.metadata,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_technical(&self) -> bool {
        self.name == TECHNICAL_TEAM_NAME
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTeamRequest {
    pub group_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub metadata: Option<Value>,
}

impl CreateTeamRequest {
    pub fn validate(&self) -> Result<(), Violations> {
        let mut v = Violations::new();
        v.require("name", &self.name);
        v.length("name", &self.name, 2, 64);
        v.finish()
    }
}

/// Partial update. A present metadata bag is merged into the stored one,
/// key by key; it never replaces unrelated keys.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTeamRequest {
    pub group_id: Option<Uuid>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub metadata: Option<Value>,
}

impl UpdateTeamRequest {
    pub fn validate(&self) -> Result<(), Violations> {
        let mut v = Violations::new();
        if let Some(name) = &self.name {
            v.require("name", name);
            v.length("name", name, 2, 64);
        }
        v.finish()
    }
}

/// Full team view with the organization resolved through the group and
/// the team's links marked against the viewer's favorites.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamResponse {
    pub id: Uuid,
    pub group_id: Uuid,
    pub organization_id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub links: Vec<LinkView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}
