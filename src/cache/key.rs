//! Deterministic cache-key construction.
//!
//! Keys are built from a fixed prefix plus the operation's discriminating
//! parameters, so distinct logical queries never collide and identical
//! queries always do.

use std::fmt;

use uuid::Uuid;

use crate::domain::models::PageRequest;

/// Namespace prefix shared by every key this crate writes.
const KEY_PREFIX: &str = "portal";

/// A fully-formed cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Key for a single record addressed by id.
    pub fn by_id(entity: &str, id: Uuid) -> Self {
        Self(format!("{KEY_PREFIX}:{entity}:id:{id}"))
    }

    /// Key for a single record addressed by its unique name.
    pub fn by_name(entity: &str, name: &str) -> Self {
        Self(format!("{KEY_PREFIX}:{entity}:name:{name}"))
    }

    /// Key for a single record addressed by an external identity string.
    pub fn by_ref(entity: &str, reference: &str) -> Self {
        Self(format!("{KEY_PREFIX}:{entity}:ref:{reference}"))
    }

    /// Key for a paginated listing. `discriminators` carry whatever else
    /// distinguishes the query (free-text filter, owner id).
    pub fn listing(entity: &str, page: &PageRequest, discriminators: &[&str]) -> Self {
        let mut key = format!(
            "{KEY_PREFIX}:{entity}:list:{}:{}",
            page.page, page.page_size
        );
        for discriminator in discriminators {
            key.push(':');
            key.push_str(discriminator);
        }
        Self(key)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
