//! GitHub contents-API client.
//!
//! Implements the [`ContentProvider`] port against the GitHub REST API
//! v3 `contents` endpoint, requesting the raw media type so the file
//! body comes back without base64 envelope.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;

use crate::domain::ports::ContentProvider;

/// Base URL for the GitHub REST API v3.
const GITHUB_API_BASE: &str = "https://api.github.com";

/// Media type returning the raw file body.
const RAW_CONTENT_ACCEPT: &str = "application/vnd.github.raw";

/// HTTP client fetching plugin source files from GitHub.
#[derive(Debug, Clone)]
pub struct GitHubContentClient {
    http: Client,
    api_base: String,
    /// Personal access token; anonymous requests work for public
    /// repositories but are rate-limited aggressively.
    token: Option<String>,
}

impl GitHubContentClient {
    pub fn new(token: Option<String>) -> Self {
        Self {
            http: Client::new(),
            api_base: GITHUB_API_BASE.to_string(),
            token,
        }
    }

    /// Create a client by reading the `GITHUB_TOKEN` environment
    /// variable, falling back to anonymous access when unset.
    pub fn from_env() -> Self {
        let token = std::env::var("GITHUB_TOKEN")
            .ok()
            .filter(|token| !token.is_empty());
        Self::new(token)
    }

    /// Override the API base URL. Used to point at a GitHub Enterprise
    /// installation or a test server.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }
}

#[async_trait]
impl ContentProvider for GitHubContentClient {
    async fn fetch(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        reference: &str,
    ) -> Result<String> {
        let url = format!(
            "{}/repos/{owner}/{repo}/contents/{path}",
            self.api_base
        );

        let mut request = self
            .http
            .get(&url)
            .query(&[("ref", reference)])
            .header("Accept", RAW_CONTENT_ACCEPT)
            .header("User-Agent", "portal-core");

        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("requesting {owner}/{repo}/{path}@{reference}"))?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!(
                "GitHub returned {status} for {owner}/{repo}/{path}@{reference}"
            ));
        }

        response
            .text()
            .await
            .with_context(|| format!("reading body of {owner}/{repo}/{path}@{reference}"))
    }
}
