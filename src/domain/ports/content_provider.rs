//! Content provider port for plugin UI sources.

use anyhow::Result;
use async_trait::async_trait;

/// Fetches file content from a source-code host.
///
/// Used by the plugin service to resolve a plugin's React component
/// source after decomposing its blob URL. The call is the one
/// cancellable operation in this core: dropping the returned future
/// aborts the underlying request.
#[async_trait]
pub trait ContentProvider: Send + Sync {
    /// Return the raw file content at `path` in `owner/repo` at `reference`.
    async fn fetch(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        reference: &str,
    ) -> Result<String>;
}
