//! Room Membership
//!
//! Tracks which clients currently belong to a single room.

use std::collections::HashSet;

use super::ClientId;

/// Set of clients in one room.
///
/// Mutated only under the registry's coordination lock. `snapshot`
/// returns an owned copy so fan-out can keep iterating after the lock
/// is released while membership changes concurrently.
#[derive(Debug, Default)]
pub struct ClientIdSet {
    inner: HashSet<ClientId>,
}

impl ClientIdSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a client; idempotent.
    pub fn add(&mut self, id: ClientId) {
        self.inner.insert(id);
    }

    /// Remove a client if present; no-op otherwise.
    pub fn remove(&mut self, id: &ClientId) {
        self.inner.remove(id);
    }

    pub fn contains(&self, id: &ClientId) -> bool {
        self.inner.contains(id)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Copy of the current members, in unspecified order.
    pub fn snapshot(&self) -> Vec<ClientId> {
        self.inner.iter().copied().collect()
    }
}
