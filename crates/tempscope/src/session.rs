//! Per-session memoization of resource handles

use std::any::Any;
use std::fmt;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use uuid::Uuid;

use crate::error::{Error, Result};

/// Private handle cache for one logical session.
///
/// The host creates one `Session` per unit of interaction and threads it
/// through [`Provider::acquire_in`](crate::Provider::acquire_in). Entries
/// are clones of the first handle created for a cache key, so repeated
/// requests for an equivalent resource observe a single path. Dropping
/// (or clearing) the session releases the cached clones; the underlying
/// storage disappears once the consumers' clones are gone too. Sessions
/// are never shared with each other.
pub struct Session {
    id: Uuid,
    cache: DashMap<String, Box<dyn Any + Send + Sync>>,
}

impl Session {
    /// Start a new, empty session.
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            cache: DashMap::new(),
        }
    }

    /// Unique identifier of this session.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Number of cached handles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Whether the session has cached anything yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Release all cached handle clones.
    ///
    /// Resources whose consumers still hold clones survive until those
    /// are dropped as well.
    pub fn clear(&self) {
        self.cache.clear();
    }

    /// Return the cached handle for `key`, or run `create` and cache a
    /// clone of its result.
    ///
    /// The entry guard keeps the key's shard locked for the duration of
    /// `create`, so two concurrent acquisitions of one key cannot both
    /// manufacture a resource. A failed `create` caches nothing; the next
    /// acquisition retries.
    pub(crate) fn get_or_try_insert<H, F>(&self, key: &str, create: F) -> Result<H>
    where
        H: Clone + Send + Sync + 'static,
        F: FnOnce() -> Result<H>,
    {
        match self.cache.entry(key.to_string()) {
            Entry::Occupied(entry) => {
                let handle = entry.get().downcast_ref::<H>().cloned().ok_or_else(|| {
                    Error::configuration(format!(
                        "session cache entry '{key}' holds a different handle type"
                    ))
                })?;
                tracing::debug!(session_id = %self.id, key, "Reusing cached temp resource");
                Ok(handle)
            }
            Entry::Vacant(entry) => {
                let handle = create()?;
                entry.insert(Box::new(handle.clone()));
                Ok(handle)
            }
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("cached", &self.cache.len())
            .finish()
    }
}
