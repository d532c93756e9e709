//! Message types used by the presence core.
//!
//! These are **transport-agnostic** logical messages:
//! - [`InputMessage`]: what a client sends.
//! - [`OutputMessage`]: what the hub emits.
//!
//! Note: the JSON encoders live in the `presence-protocol` crate;
//! this module is purely logical.

use crate::connection::ConnectionId;
use crate::registry::Snapshot;

/// A request from a connected client.
#[derive(Debug, Clone, PartialEq)]
pub enum InputMessage {
    /// The local pointer moved.
    CursorMove(CursorMove),
}

/// An event produced by the hub for one or all connections.
#[derive(Debug, Clone, PartialEq)]
pub enum OutputMessage {
    /// Private identity notice, sent once to a new connection.
    AssignedDetails(AssignedDetails),

    /// Full registry snapshot, sent to everyone after each change.
    UpdateCursors(Snapshot),
}

/// Pointer position reported by a client.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorMove {
    pub x: f64,
    pub y: f64,
    pub active: Option<bool>,
}

impl CursorMove {
    pub fn new(x: f64, y: f64) -> Self {
        CursorMove { x, y, active: None }
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }
}

/// Identity handed to a connection when it joins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignedDetails {
    pub id: ConnectionId,
    pub name: String,
    pub color: String,
}

impl OutputMessage {
    pub fn assigned_details(id: ConnectionId, name: String, color: String) -> Self {
        OutputMessage::AssignedDetails(AssignedDetails { id, name, color })
    }
}
