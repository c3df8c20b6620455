//! Session handle.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use uuid::Uuid;

/// Handle to a request's session.
///
/// Cloning is cheap; all clones share the same attribute store. Two handles
/// compare equal when they refer to the same session id.
#[derive(Clone)]
pub struct Session {
    id: Uuid,
    attributes: Arc<RwLock<HashMap<String, serde_json::Value>>>,
}

impl Session {
    /// Creates an empty session with a fresh UUID v7 id.
    #[must_use]
    pub fn new() -> Self {
        Self::with_id(Uuid::now_v7())
    }

    /// Creates an empty session with the given id.
    #[must_use]
    pub fn with_id(id: Uuid) -> Self {
        Self {
            id,
            attributes: Arc::default(),
        }
    }

    /// Returns the session id.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Returns a copy of an attribute.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<serde_json::Value> {
        self.attributes.read().get(name).cloned()
    }

    /// Stores an attribute, returning the previous value.
    pub fn insert(
        &self,
        name: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Option<serde_json::Value> {
        self.attributes.write().insert(name.into(), value.into())
    }

    /// Removes an attribute.
    pub fn remove(&self, name: &str) -> Option<serde_json::Value> {
        self.attributes.write().remove(name)
    }

    /// Returns the number of attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.attributes.read().len()
    }

    /// Returns `true` if the session holds no attributes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attributes.read().is_empty()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Session {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("attribute_count", &self.len())
            .finish()
    }
}
