//! Group domain model.
//!
//! Groups are consumed, never owned: teams belong to a group, and the
//! group carries the organization reference that team responses resolve.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: Uuid,
    pub name: String,
    pub organization_id: Uuid,
}
