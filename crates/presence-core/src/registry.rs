//! Authoritative in-memory store of live cursors.
//!
//! Lookups that miss are not errors here: a move or disconnect racing
//! with teardown simply does nothing.

use std::collections::BTreeMap;

use crate::connection::ConnectionId;
use crate::cursor::CursorState;
use crate::identity::Identity;

/// Full registry contents at one moment, ordered by connection id.
pub type Snapshot = BTreeMap<ConnectionId, CursorState>;

/// Map from connection id to cursor state.
#[derive(Debug, Default)]
pub struct PresenceRegistry {
    cursors: BTreeMap<ConnectionId, CursorState>,
}

impl PresenceRegistry {
    pub fn new() -> Self {
        PresenceRegistry::default()
    }

    /// Create the entry for `conn_id` at `(0, 0)`, inactive.
    ///
    /// An existing entry for the same id is overwritten.
    pub fn add(&mut self, conn_id: ConnectionId, identity: Identity) -> CursorState {
        let cursor = CursorState::new(identity);
        self.cursors.insert(conn_id, cursor.clone());
        cursor
    }

    /// Move an existing cursor. No-op if `conn_id` is absent.
    pub fn update(&mut self, conn_id: &ConnectionId, x: f64, y: f64, active: Option<bool>) {
        if let Some(cursor) = self.cursors.get_mut(conn_id) {
            cursor.x = x;
            cursor.y = y;
            cursor.active = active;
        }
    }

    /// Delete the entry and hand back its identity so the name can be
    /// released.
    pub fn remove(&mut self, conn_id: &ConnectionId) -> Option<Identity> {
        self.cursors.remove(conn_id).map(|c| c.identity)
    }

    /// Copy of the complete current state.
    pub fn snapshot(&self) -> Snapshot {
        self.cursors.clone()
    }

    pub fn get(&self, conn_id: &ConnectionId) -> Option<&CursorState> {
        self.cursors.get(conn_id)
    }

    pub fn contains(&self, conn_id: &ConnectionId) -> bool {
        self.cursors.contains_key(conn_id)
    }

    pub fn len(&self) -> usize {
        self.cursors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cursors.is_empty()
    }
}
