//! Shared types for the presence server.
//!
//! This module defines:
//! - channel aliases between connection tasks and the hub loop
//! - `HubRequest`: messages flowing from connections to the hub
//! - `ConnectionSettings`: per-connection heartbeat and buffering limits

use std::collections::HashMap;
use std::time::Duration;

use axum::extract::ws::Utf8Bytes;
use presence_core::{ConnectionId, InputMessage};
use tokio::sync::mpsc;

/// Encoded frames from the hub to a given connection.
///
/// Bounded; the hub uses `try_send` and drops frames for a connection
/// whose queue is full, so it never waits on a slow socket.
pub type OutboundTx = mpsc::Sender<Utf8Bytes>;
pub type OutboundRx = mpsc::Receiver<Utf8Bytes>;

/// Active connections and their outbound channels.
///
/// Owned by the hub task; nothing else touches it.
pub type ClientRegistry = HashMap<ConnectionId, OutboundTx>;

/// Message flowing from a connection task into the hub task.
#[derive(Debug)]
pub enum HubRequest {
    /// Transport handshake finished; register `outbound` and assign an identity.
    Connect {
        conn_id: ConnectionId,
        outbound: OutboundTx,
    },

    /// Decoded client frame.
    Message {
        conn_id: ConnectionId,
        msg: InputMessage,
    },

    /// Transport closed. Sent exactly once per connection.
    Disconnect { conn_id: ConnectionId },
}

/// Channel from connections → hub task.
pub type HubTx = mpsc::UnboundedSender<HubRequest>;
pub type HubRx = mpsc::UnboundedReceiver<HubRequest>;

/// Limits applied to every connection, derived from `Config`.
#[derive(Debug, Clone, Copy)]
pub struct ConnectionSettings {
    /// Period between server pings.
    pub ping_interval: Duration,

    /// Silence after which the connection is treated as gone.
    pub idle_limit: Duration,

    /// Capacity of the outbound frame queue.
    pub outbound_buffer: usize,
}

impl From<&crate::config::Config> for ConnectionSettings {
    fn from(config: &crate::config::Config) -> Self {
        ConnectionSettings {
            ping_interval: config.ping_interval,
            idle_limit: config.idle_limit(),
            outbound_buffer: config.outbound_buffer,
        }
    }
}
