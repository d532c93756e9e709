//! Per-connection cursor state.

use crate::identity::Identity;

/// Live cursor of one connection.
///
/// `active` is `None` when the client's last move did not say whether
/// the pointer is active; new entries start at `Some(false)`.
#[derive(Debug, Clone, PartialEq)]
pub struct CursorState {
    pub identity: Identity,
    pub x: f64,
    pub y: f64,
    pub active: Option<bool>,
}

impl CursorState {
    /// Fresh cursor at the origin, inactive.
    pub fn new(identity: Identity) -> Self {
        CursorState {
            identity,
            x: 0.0,
            y: 0.0,
            active: Some(false),
        }
    }

    pub fn name(&self) -> &str {
        &self.identity.name
    }
}
