//! Per-connection WebSocket I/O.
//!
//! Each connection runs two halves:
//! - a writer task draining the connection's outbound channel into the socket
//!   and pinging the peer every `ping_interval`,
//! - a reader loop decoding text frames into hub requests.
//!
//! The reader reports `Disconnect` to the hub exactly once, whether the
//! socket closed cleanly, failed, or went silent for longer than
//! `idle_limit`.

use axum::extract::ws::{Message, WebSocket};
use futures::{sink::SinkExt, stream::StreamExt};
use presence_core::ConnectionId;
use presence_protocol::decode_input;
use tokio::sync::mpsc;
use tokio::time::{interval_at, timeout, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::types::{ConnectionSettings, HubRequest, HubTx, OutboundRx, OutboundTx};

/// Run the I/O loop for a single connection until the socket closes.
pub async fn run_client(
    conn_id: ConnectionId,
    socket: WebSocket,
    hub_tx: HubTx,
    settings: ConnectionSettings,
) {
    let (mut ws_sender, mut ws_receiver) = socket.split();

    let (out_tx, mut out_rx): (OutboundTx, OutboundRx) = mpsc::channel(settings.outbound_buffer);

    let register = HubRequest::Connect {
        conn_id: conn_id.clone(),
        outbound: out_tx,
    };
    if hub_tx.send(register).is_err() {
        warn!(conn_id = %conn_id, "Hub channel closed, dropping connection");
        return;
    }

    // Writer task: forward encoded frames until the hub drops us or the
    // socket stops accepting writes, then close the socket.
    let writer_conn_id = conn_id.clone();
    let mut writer = tokio::spawn(async move {
        let period = settings.ping_interval;
        let mut ping = interval_at(Instant::now() + period, period);
        ping.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            let outgoing = tokio::select! {
                frame = out_rx.recv() => match frame {
                    Some(frame) => Message::Text(frame),
                    None => break,
                },
                _ = ping.tick() => Message::Ping(Default::default()),
            };
            if let Err(e) = ws_sender.send(outgoing).await {
                debug!(conn_id = %writer_conn_id, "write error: {}", e);
                return;
            }
        }
        let _ = ws_sender.close().await;
    });

    // Reader loop. Any frame, pongs included, counts as liveness.
    loop {
        let result = match timeout(settings.idle_limit, ws_receiver.next()).await {
            Ok(Some(result)) => result,
            Ok(None) => break,
            Err(_) => {
                info!(conn_id = %conn_id, "No traffic for {:?}, dropping connection", settings.idle_limit);
                break;
            }
        };

        match result {
            Ok(Message::Text(text)) => match decode_input(text.as_str()) {
                Ok(msg) => {
                    let req = HubRequest::Message {
                        conn_id: conn_id.clone(),
                        msg,
                    };
                    if hub_tx.send(req).is_err() {
                        warn!(conn_id = %conn_id, "Hub channel closed");
                        break;
                    }
                }
                Err(e) => {
                    debug!(conn_id = %conn_id, "ignoring malformed frame: {}", e);
                }
            },
            Ok(Message::Close(_)) => break,
            Ok(Message::Binary(_)) => {
                debug!(conn_id = %conn_id, "ignoring binary frame");
            }
            Ok(_) => {}
            Err(e) => {
                debug!(conn_id = %conn_id, "read error: {}", e);
                break;
            }
        }
    }

    let _ = hub_tx.send(HubRequest::Disconnect {
        conn_id: conn_id.clone(),
    });

    // The hub drops our outbound sender on Disconnect, so the writer
    // drains what is queued and closes. A peer that stopped reading
    // cannot hold the task past `idle_limit`.
    if timeout(settings.idle_limit, &mut writer).await.is_err() {
        debug!(conn_id = %conn_id, "writer did not finish, aborting");
        writer.abort();
    }
}
