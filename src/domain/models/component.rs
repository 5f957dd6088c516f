//! Component domain model.
//!
//! A component is a deployable service or library owned by a team. Several
//! read-only projections are derived from its metadata bag: the QoS class,
//! a Sonar dashboard URL built from the `sonar-project-id` key, the GitHub
//! repository URL, and the central-service/library/health flags.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::domain::metadata;
use crate::domain::validation::Violations;

/// Base of the Sonar dashboard URL derived from `sonar-project-id`.
const SONAR_DASHBOARD_BASE: &str = "https://sonar.tools.example.com/dashboard?id=";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub id: Uuid,
    /// Owning team.
    pub owner_id: Uuid,
    pub project_id: String,
    pub name: String,
    pub metadata: Option<Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Component {
    pub fn new(request: CreateComponentRequest) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            owner_id: request.owner_id,
            project_id: request.project_id,
            name: request.name,
            metadata: request.metadata,
            created_at: now,
            updated_at: now,
        }
    }

    /// Project the wire view, deriving the read-only fields from
    /// metadata. Missing or mis-typed keys read as absent.
    pub fn view(&self) -> ComponentResponse {
        let meta = self.metadata.as_ref();
        ComponentResponse {
            id: self.id,
            owner_id: self.owner_id,
            project_id: self.project_id.clone(),
            name: self.name.clone(),
            qos: metadata::string_value(meta, "qos"),
            sonar_url: metadata::string_value(meta, "sonar-project-id")
                .map(|project| format!("{SONAR_DASHBOARD_BASE}{project}")),
            github_url: metadata::string_value(meta, "github-url"),
            central_service: metadata::flag(meta, "is-central-service"),
            library: metadata::flag(meta, "is-library"),
            health_check: metadata::flag(meta, "health-check"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateComponentRequest {
    pub owner_id: Uuid,
    pub project_id: String,
    pub name: String,
    pub metadata: Option<Value>,
}

impl CreateComponentRequest {
    pub fn validate(&self) -> Result<(), Violations> {
        let mut v = Violations::new();
        v.require("name", &self.name);
        v.length("name", &self.name, 2, 128);
        v.require("project_id", &self.project_id);
        v.finish()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateComponentRequest {
    pub project_id: Option<String>,
    pub name: Option<String>,
    pub metadata: Option<Value>,
}

impl UpdateComponentRequest {
    pub fn validate(&self) -> Result<(), Violations> {
        let mut v = Violations::new();
        if let Some(name) = &self.name {
            v.require("name", name);
            v.length("name", name, 2, 128);
        }
        v.finish()
    }
}

/// Wire view with metadata-derived read-only projections. Optional URLs
/// are omitted when the backing metadata key is absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentResponse {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub project_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qos: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sonar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    pub central_service: bool,
    pub library: bool,
    pub health_check: bool,
}
