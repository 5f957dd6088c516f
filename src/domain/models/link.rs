//! Link domain model.
//!
//! Links are owned by teams or users and only consumed by this core:
//! other entities' responses embed them, with per-viewer favorite
//! marking layered on top.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub id: Uuid,
    /// Owning team or user.
    pub owner_id: Uuid,
    pub url: String,
    pub title: String,
    pub description: Option<String>,
}

/// Link as embedded in another entity's response. `favorite` reflects the
/// viewing user's metadata and defaults to unmarked for unknown viewers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkView {
    pub id: Uuid,
    pub url: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub favorite: bool,
}

impl LinkView {
    /// Project a link, marking it against the viewer's favorite set.
    pub fn marked(link: Link, favorites: &[String]) -> Self {
        let favorite = favorites.iter().any(|id| id == &link.id.to_string());
        Self {
            id: link.id,
            url: link.url,
            title: link.title,
            description: link.description,
            favorite,
        }
    }
}
