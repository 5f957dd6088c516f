//! User domain model.
//!
//! Users carry both a relational UUID and the external identity string
//! used by the portal frontend. The metadata bag holds three well-known
//! attributes: `favorites` (link ids), `subscribed` (plugin ids), and the
//! `portal_admin` flag. The two lists are de-duplicated string sets and
//! tolerate the historical mixed-type array encoding.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::domain::metadata;
use crate::domain::validation::Violations;

/// Metadata key holding favorited link ids.
pub const FAVORITES_KEY: &str = "favorites";

/// Metadata key holding subscribed plugin ids.
pub const SUBSCRIBED_KEY: &str = "subscribed";

/// Metadata key marking portal administrators.
pub const PORTAL_ADMIN_KEY: &str = "portal_admin";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    /// External identity string (login id), distinct from the relational key.
    pub user_id: String,
    pub team_id: Option<Uuid>,
    pub name: String,
    /// Unique across users; checked at create/update time.
    pub email: String,
    pub metadata: Option<Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(request: CreateUserRequest) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id: request.user_id,
            team_id: request.team_id,
            name: request.name,
            email: request.email,
            metadata: request.metadata,
            created_at: now,
            updated_at: now,
        }
    }

    /// Favorited link ids, normalized to an ordered string set.
    pub fn favorites(&self) -> Vec<String> {
        metadata::string_list(self.metadata.as_ref(), FAVORITES_KEY)
    }

    /// Subscribed plugin ids, normalized to an ordered string set.
    pub fn subscriptions(&self) -> Vec<String> {
        metadata::string_list(self.metadata.as_ref(), SUBSCRIBED_KEY)
    }

    pub fn is_portal_admin(&self) -> bool {
        metadata::flag(self.metadata.as_ref(), PORTAL_ADMIN_KEY)
    }

    pub fn view(&self) -> UserResponse {
        UserResponse {
            id: self.id,
            user_id: self.user_id.clone(),
            team_id: self.team_id,
            name: self.name.clone(),
            email: self.email.clone(),
            favorites: self.favorites(),
            subscribed: self.subscriptions(),
            portal_admin: self.is_portal_admin(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub user_id: String,
    pub team_id: Option<Uuid>,
    pub name: String,
    pub email: String,
    pub metadata: Option<Value>,
}

impl CreateUserRequest {
    pub fn validate(&self) -> Result<(), Violations> {
        let mut v = Violations::new();
        v.require("user_id", &self.user_id);
        v.require("name", &self.name);
        v.require("email", &self.email);
        v.email("email", &self.email);
        v.finish()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    pub team_id: Option<Uuid>,
    pub name: Option<String>,
    pub email: Option<String>,
    /// Merged into the stored bag, key by key.
    pub metadata: Option<Value>,
}

impl UpdateUserRequest {
    pub fn validate(&self) -> Result<(), Violations> {
        let mut v = Violations::new();
        if let Some(name) = &self.name {
            v.require("name", name);
        }
        if let Some(email) = &self.email {
            v.require("email", email);
            v.email("email", email);
        }
        v.finish()
    }
}

/// Wire view with the metadata-derived attributes lifted out of the bag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_id: Option<Uuid>,
    pub name: String,
    pub email: String,
    pub favorites: Vec<String>,
    pub subscribed: Vec<String>,
    pub portal_admin: bool,
}
