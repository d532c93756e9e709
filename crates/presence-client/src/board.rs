// crates/presence-client/src/board.rs

use std::collections::BTreeMap;

use presence_core::{AssignedDetails, ConnectionId, OutputMessage, Snapshot};

/// A peer cursor as seen by this client.
#[derive(Debug, Clone, PartialEq)]
pub struct Cursor {
    pub id: ConnectionId,
    pub name: String,
    pub color: String,
    pub x: f64,
    pub y: f64,
    pub active: Option<bool>,
}

/// Local copy of the server's cursor map plus our own identity.
#[derive(Debug, Default)]
pub struct CursorBoard {
    details: Option<AssignedDetails>,
    cursors: BTreeMap<ConnectionId, Cursor>,
}

impl CursorBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a server message.
    pub fn apply(&mut self, msg: OutputMessage) {
        match msg {
            OutputMessage::AssignedDetails(details) => self.on_assigned_details(details),
            OutputMessage::UpdateCursors(snapshot) => self.on_update_cursors(snapshot),
        }
    }

    pub fn on_assigned_details(&mut self, details: AssignedDetails) {
        self.details = Some(details);
    }

    /// Replace the whole map; the server always sends full snapshots.
    pub fn on_update_cursors(&mut self, snapshot: Snapshot) {
        self.cursors = snapshot
            .into_iter()
            .map(|(id, state)| {
                let cursor = Cursor {
                    id: id.clone(),
                    name: state.identity.name,
                    color: state.identity.color,
                    x: state.x,
                    y: state.y,
                    active: state.active,
                };
                (id, cursor)
            })
            .collect();
    }

    /// Moves are only worth sending once the server has assigned us.
    pub fn can_send(&self) -> bool {
        self.details.is_some()
    }

    pub fn own_id(&self) -> Option<&ConnectionId> {
        self.details.as_ref().map(|d| &d.id)
    }

    pub fn get(&self, id: &ConnectionId) -> Option<&Cursor> {
        self.cursors.get(id)
    }

    pub fn cursors(&self) -> impl Iterator<Item = &Cursor> {
        self.cursors.values()
    }

    /// Every cursor except our own.
    pub fn others(&self) -> impl Iterator<Item = &Cursor> {
        let own = self.own_id().cloned();
        self.cursors
            .values()
            .filter(move |c| Some(&c.id) != own.as_ref())
    }

    pub fn len(&self) -> usize {
        self.cursors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cursors.is_empty()
    }
}
