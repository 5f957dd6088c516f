//! Plugin domain model.
//!
//! A plugin extends the portal UI with a React component hosted in a
//! GitHub repository, plus an optional backend it talks to. The source
//! reference is stored as a full blob URL and decomposed into
//! `owner/repo/blob/ref/path` when the UI content is resolved.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use crate::domain::errors::{ServiceError, ServiceResult};
use crate::domain::validation::Violations;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plugin {
    pub id: Uuid,
    /// Unique plugin name.
    pub name: String,
    pub title: String,
    pub description: Option<String>,
    /// Blob URL of the React component source.
    pub source_url: String,
    pub backend_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Plugin {
    pub fn new(request: CreatePluginRequest) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: request.name,
            title: request.title,
            description: request.description,
            source_url: request.source_url,
            backend_url: request.backend_url,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A parsed plugin source reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    pub owner: String,
    pub repo: String,
    pub reference: String,
    pub path: String,
}

impl SourceLocation {
    /// Parse a source URL of the shape
    /// `https://<host>/<owner>/<repo>/blob/<ref>/<path...>`.
    ///
    /// The host must contain the substring "github"; anything else fails
    /// with `InvalidGitHubUrl`.
    pub fn parse(source: &str) -> ServiceResult<Self> {
        let invalid = || ServiceError::InvalidGitHubUrl(source.to_string());

        let url = Url::parse(source).map_err(|_| invalid())?;
        let host = url.host_str().ok_or_else(invalid)?;
        if !host.contains("github") {
            return Err(invalid());
        }

        let segments: Vec<&str> = url
            .path_segments()
            .map(|segments| segments.filter(|s| !s.is_empty()).collect())
            .unwrap_or_default();

        match segments.as_slice() {
            [owner, repo, "blob", reference, path @ ..] if !path.is_empty() => Ok(Self {
                owner: (*owner).to_string(),
                repo: (*repo).to_string(),
                reference: (*reference).to_string(),
                path: path.join("/"),
            }),
            _ => Err(invalid()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePluginRequest {
    pub name: String,
    pub title: String,
    pub description: Option<String>,
    pub source_url: String,
    pub backend_url: Option<String>,
}

impl CreatePluginRequest {
    pub fn validate(&self) -> Result<(), Violations> {
        let mut v = Violations::new();
        v.require("name", &self.name);
        v.length("name", &self.name, 2, 64);
        v.require("title", &self.title);
        v.require("source_url", &self.source_url);
        v.url("source_url", &self.source_url);
        if let Some(backend_url) = &self.backend_url {
            v.url("backend_url", backend_url);
        }
        v.finish()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePluginRequest {
    pub name: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub source_url: Option<String>,
    pub backend_url: Option<String>,
}

impl UpdatePluginRequest {
    pub fn validate(&self) -> Result<(), Violations> {
        let mut v = Violations::new();
        if let Some(name) = &self.name {
            v.require("name", name);
            v.length("name", name, 2, 64);
        }
        if let Some(source_url) = &self.source_url {
            v.require("source_url", source_url);
            v.url("source_url", source_url);
        }
        if let Some(backend_url) = &self.backend_url {
            v.url("backend_url", backend_url);
        }
        v.finish()
    }

    pub fn apply(self, plugin: &mut Plugin) {
        if let Some(name) = self.name {
            plugin.name = name;
        }
        if let Some(title) = self.title {
            plugin.title = title;
        }
        if let Some(description) = self.description {
            plugin.description = Some(description);
        }
        if let Some(source_url) = self.source_url {
            plugin.source_url = source_url;
        }
        if let Some(backend_url) = self.backend_url {
            plugin.backend_url = Some(backend_url);
        }
        plugin.updated_at = Utc::now();
    }
}
