//! Connection lifecycle and broadcast routing.
//!
//! [`PresenceHub`] ties the allocator and the registry together and
//! turns connection events into outbound messages:
//! - `Connected`    => private `AssignedDetails`, then a full snapshot to all.
//! - `CursorMove`   => registry update, then a full snapshot to all.
//! - `Disconnected` => registry removal + name release, then a full
//!   snapshot to everyone still connected.
//!
//! The hub is synchronous and owns all presence state. The server runs
//! exactly one of these inside a single task, which is what serializes
//! concurrent connects, moves and disconnects.

use std::collections::HashMap;

use crate::allocator::IdentityAllocator;
use crate::connection::ConnectionId;
use crate::messages::{CursorMove, InputMessage, OutputMessage};
use crate::registry::{PresenceRegistry, Snapshot};

/// Lifecycle of a single connection.
///
/// `Connecting` only exists while the identity is being allocated;
/// ids the hub no longer tracks report `Disconnected`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConnectionState {
    Connecting,
    Active,
    Disconnected,
}

/// Something that happened on the transport.
#[derive(Debug, Clone, PartialEq)]
pub enum HubEvent {
    Connected(ConnectionId),
    Message(ConnectionId, InputMessage),
    Disconnected(ConnectionId),
}

impl HubEvent {
    pub fn cursor_move(conn_id: ConnectionId, mv: CursorMove) -> Self {
        HubEvent::Message(conn_id, InputMessage::CursorMove(mv))
    }
}

/// Where an output message should go.
#[derive(Debug, Clone, PartialEq)]
pub enum Outbound {
    /// Only to this connection.
    Direct(ConnectionId, OutputMessage),

    /// To every connection that is currently active.
    Broadcast(OutputMessage),
}

/// Presence state machine for all connections.
#[derive(Debug)]
pub struct PresenceHub {
    allocator: IdentityAllocator,
    registry: PresenceRegistry,
    states: HashMap<ConnectionId, ConnectionState>,
}

impl PresenceHub {
    pub fn new(allocator: IdentityAllocator) -> Self {
        PresenceHub {
            allocator,
            registry: PresenceRegistry::new(),
            states: HashMap::new(),
        }
    }

    /// Apply one transport event and return the messages to deliver,
    /// in delivery order.
    pub fn process_event(&mut self, event: HubEvent) -> Vec<Outbound> {
        match event {
            HubEvent::Connected(id) => self.process_connect(id),
            HubEvent::Message(id, InputMessage::CursorMove(mv)) => self.process_cursor_move(id, mv),
            HubEvent::Disconnected(id) => self.process_disconnect(id),
        }
    }

    // -------------------------------------------------------------------------
    // Internal handlers
    // -------------------------------------------------------------------------

    fn process_connect(&mut self, id: ConnectionId) -> Vec<Outbound> {
        if self.states.contains_key(&id) {
            // Already live; a second identity would leak a name.
            return Vec::new();
        }

        self.states.insert(id.clone(), ConnectionState::Connecting);

        let identity = self.allocator.allocate();
        let details = OutputMessage::assigned_details(
            id.clone(),
            identity.name.clone(),
            identity.color.clone(),
        );
        self.registry.add(id.clone(), identity);
        self.states.insert(id.clone(), ConnectionState::Active);

        vec![Outbound::Direct(id, details), self.broadcast_snapshot()]
    }

    fn process_cursor_move(&mut self, id: ConnectionId, mv: CursorMove) -> Vec<Outbound> {
        if self.connection_state(&id) != ConnectionState::Active {
            return Vec::new();
        }

        self.registry.update(&id, mv.x, mv.y, mv.active);
        vec![self.broadcast_snapshot()]
    }

    fn process_disconnect(&mut self, id: ConnectionId) -> Vec<Outbound> {
        if self.states.remove(&id).is_none() {
            return Vec::new();
        }

        if let Some(identity) = self.registry.remove(&id) {
            self.allocator.release_name(&identity.name);
        }

        vec![self.broadcast_snapshot()]
    }

    fn broadcast_snapshot(&self) -> Outbound {
        Outbound::Broadcast(OutputMessage::UpdateCursors(self.registry.snapshot()))
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn connection_state(&self, id: &ConnectionId) -> ConnectionState {
        self.states
            .get(id)
            .copied()
            .unwrap_or(ConnectionState::Disconnected)
    }

    pub fn snapshot(&self) -> Snapshot {
        self.registry.snapshot()
    }

    pub fn allocator(&self) -> &IdentityAllocator {
        &self.allocator
    }

    /// Number of active connections.
    pub fn num_connections(&self) -> usize {
        self.registry.len()
    }
}

impl Default for PresenceHub {
    fn default() -> Self {
        PresenceHub::new(IdentityAllocator::new())
    }
}
