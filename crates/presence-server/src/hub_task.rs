//! Central hub loop.
//!
//! This task owns the `PresenceHub` and the outbound channel of every
//! active connection, and processes all `HubRequest`s one at a time.
//! That single consumer is the serialization point for every registry
//! mutation and every broadcast.
//!
//! Routing policy:
//! - `Outbound::Direct`    => only the named connection.
//! - `Outbound::Broadcast` => every registered connection, encoded once.
//!
//! Sends are fire-and-forget: a full queue drops the frame (the next
//! snapshot supersedes it), a closed channel is ignored and the
//! connection's own task reports the disconnect.

use axum::extract::ws::Utf8Bytes;
use presence_core::{ConnectionId, HubEvent, Outbound, OutputMessage, PresenceHub};
use presence_protocol::encode_output;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, error, info};

use crate::types::{ClientRegistry, HubRequest, HubRx, OutboundTx};

/// Run the central hub processing loop until every sender is gone.
pub async fn run_hub_loop(mut hub_rx: HubRx, mut hub: PresenceHub) {
    let mut clients = ClientRegistry::new();

    while let Some(req) = hub_rx.recv().await {
        let event = match req {
            HubRequest::Connect { conn_id, outbound } => {
                clients.insert(conn_id.clone(), outbound);
                HubEvent::Connected(conn_id)
            }
            HubRequest::Message { conn_id, msg } => HubEvent::Message(conn_id, msg),
            HubRequest::Disconnect { conn_id } => {
                clients.remove(&conn_id);
                HubEvent::Disconnected(conn_id)
            }
        };

        let outputs = hub.process_event(event);

        for out in &outputs {
            route_output(out, &clients);
        }

        debug!(connections = hub.num_connections(), "hub event processed");
    }

    info!("Hub loop shutting down (hub_rx closed)");
}

/// Deliver a single `Outbound` to the appropriate connection(s).
fn route_output(out: &Outbound, clients: &ClientRegistry) {
    match out {
        Outbound::Direct(conn_id, msg) => {
            if let Some(tx) = clients.get(conn_id) {
                if let Some(frame) = encode(msg) {
                    deliver(conn_id, tx, frame);
                }
            }
        }
        Outbound::Broadcast(msg) => {
            let Some(frame) = encode(msg) else {
                return;
            };
            for (conn_id, tx) in clients {
                deliver(conn_id, tx, frame.clone());
            }
        }
    }
}

fn deliver(conn_id: &ConnectionId, tx: &OutboundTx, frame: Utf8Bytes) {
    match tx.try_send(frame) {
        Ok(()) => {}
        Err(TrySendError::Full(_)) => {
            debug!(conn_id = %conn_id, "outbound queue full, dropping frame");
        }
        Err(TrySendError::Closed(_)) => {}
    }
}

fn encode(msg: &OutputMessage) -> Option<Utf8Bytes> {
    match encode_output(msg) {
        Ok(frame) => Some(Utf8Bytes::from(frame)),
        Err(e) => {
            error!("Failed to encode output message: {}", e);
            None
        }
    }
}
