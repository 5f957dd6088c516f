//! Landscape domain model.
//!
//! A landscape is a deployment environment (e.g. `prod-eu`) owned by a
//! project. Its metadata bag carries a fixed set of well-known optional
//! keys used to enrich the minimal list view: tool URLs (`auditlog`,
//! `cam`, `cockpit`, `concourse`, `dynatrace`, `grafana`, `kibana`), the
//! landscape `type`, and the `is-central-region` flag.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::domain::metadata;
use crate::domain::validation::Violations;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Landscape {
    pub id: Uuid,
    /// Globally unique landscape name.
    pub name: String,
    pub title: String,
    pub description: Option<String>,
    /// Owning project; referential integrity is enforced by the
    /// repository collaborator at write time.
    pub project_id: String,
    pub domain: String,
    pub environment: String,
    pub metadata: Option<Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Landscape {
    pub fn new(request: CreateLandscapeRequest) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: request.name,
            title: request.title,
            description: request.description,
            project_id: request.project_id,
            domain: request.domain,
            environment: request.environment,
            metadata: request.metadata,
            created_at: now,
            updated_at: now,
        }
    }

    /// Project the minimal list view, reading the well-known metadata
    /// keys defensively.
    pub fn summary(&self) -> LandscapeSummary {
        let meta = self.metadata.as_ref();
        LandscapeSummary {
            id: self.id,
            name: self.name.clone(),
            title: self.title.clone(),
            auditlog: metadata::string_value(meta, "auditlog"),
            cam: metadata::string_value(meta, "cam"),
            cockpit: metadata::string_value(meta, "cockpit"),
            concourse: metadata::string_value(meta, "concourse"),
            dynatrace: metadata::string_value(meta, "dynatrace"),
            grafana: metadata::string_value(meta, "grafana"),
            kibana: metadata::string_value(meta, "kibana"),
            landscape_type: metadata::string_value(meta, "type"),
            is_central_region: metadata::bool_value(meta, "is-central-region"),
        }
    }
}

/// Request to create a landscape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLandscapeRequest {
    pub name: String,
    pub title: String,
    pub description: Option<String>,
    pub project_id: String,
    pub domain: String,
    pub environment: String,
    pub metadata: Option<Value>,
}

impl CreateLandscapeRequest {
    pub fn validate(&self) -> Result<(), Violations> {
        let mut v = Violations::new();
        v.require("name", &self.name);
        v.length("name", &self.name, 2, 64);
        v.require("title", &self.title);
        v.length("title", &self.title, 1, 255);
        v.require("project_id", &self.project_id);
        v.require("domain", &self.domain);
        v.require("environment", &self.environment);
        v.finish()
    }
}

/// Partial update; absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateLandscapeRequest {
    pub name: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub project_id: Option<String>,
    pub domain: Option<String>,
    pub environment: Option<String>,
    pub metadata: Option<Value>,
}

impl UpdateLandscapeRequest {
    pub fn validate(&self) -> Result<(), Violations> {
        let mut v = Violations::new();
        if let Some(name) = &self.name {
            v.require("name", name);
            v.length("name", name, 2, 64);
        }
        if let Some(title) = &self.title {
            v.require("title", title);
            v.length("title", title, 1, 255);
        }
        v.finish()
    }

    /// Apply the present fields to `landscape`. Metadata is replaced, not
    /// merged; merge semantics are reserved for team and user bags.
    pub fn apply(self, landscape: &mut Landscape) {
        if let Some(name) = self.name {
            landscape.name = name;
        }
        if let Some(title) = self.title {
            landscape.title = title;
        }
        if let Some(description) = self.description {
            landscape.description = Some(description);
        }
        if let Some(project_id) = self.project_id {
            landscape.project_id = project_id;
        }
        if let Some(domain) = self.domain {
            landscape.domain = domain;
        }
        if let Some(environment) = self.environment {
            landscape.environment = environment;
        }
        if let Some(metadata) = self.metadata {
            landscape.metadata = Some(metadata);
        }
        landscape.updated_at = Utc::now();
    }
}

/// Minimal listing view. Each metadata-sourced field is omitted entirely
/// when absent or empty, never emitted as null or an empty string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandscapeSummary {
    pub id: Uuid,
    pub name: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auditlog: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cam: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cockpit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concourse: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dynatrace: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grafana: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kibana: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub landscape_type: Option<String>,
    #[serde(rename = "is-central-region", skip_serializing_if = "Option::is_none")]
    pub is_central_region: Option<bool>,
}
