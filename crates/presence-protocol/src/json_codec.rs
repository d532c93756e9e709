//! JSON encoding/decoding for presence-core messages.
//!
//! This module converts between:
//! - JSON text frames (`&str`)
//! - high-level `presence_core::InputMessage` / `OutputMessage`
//!
//! Decoding is strict about payload shape: a `cursorMove` without
//! numeric `x` and `y` is rejected rather than passed through.

use std::collections::BTreeMap;

use presence_core::{
    AssignedDetails, ConnectionId, CursorMove, CursorState, Identity, InputMessage, OutputMessage,
    Snapshot,
};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::wire_types::{
    Envelope, RawEnvelope, WireAssignedDetails, WireCursor, WireCursorMove,
    EVENT_ASSIGNED_DETAILS, EVENT_CURSOR_MOVE, EVENT_UPDATE_CURSORS,
};

/// Errors that can occur while encoding/decoding frames.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Frame is not a JSON envelope at all.
    #[error("malformed frame: {0}")]
    Json(#[from] serde_json::Error),

    /// Envelope names an event this side does not accept.
    #[error("unknown event `{0}`")]
    UnknownEvent(String),

    /// Envelope is fine but the payload has the wrong shape.
    #[error("invalid `{event}` payload: {source}")]
    InvalidPayload {
        event: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

// -----------------------------------------------------------------------------
// Output (server → client)
// -----------------------------------------------------------------------------

/// Encode an `OutputMessage` into a JSON text frame.
pub fn encode_output(msg: &OutputMessage) -> Result<String, ProtocolError> {
    let frame = match msg {
        OutputMessage::AssignedDetails(d) => serde_json::to_string(&Envelope {
            event: EVENT_ASSIGNED_DETAILS,
            data: WireAssignedDetails {
                id: d.id.as_str().to_string(),
                name: d.name.clone(),
                color: d.color.clone(),
            },
        })?,
        OutputMessage::UpdateCursors(snapshot) => serde_json::to_string(&Envelope {
            event: EVENT_UPDATE_CURSORS,
            data: snapshot_to_wire(snapshot),
        })?,
    };

    Ok(frame)
}

/// Decode a JSON text frame into an `OutputMessage`.
pub fn decode_output(frame: &str) -> Result<OutputMessage, ProtocolError> {
    let RawEnvelope { event, data } = serde_json::from_str(frame)?;

    match event.as_str() {
        EVENT_ASSIGNED_DETAILS => {
            let d: WireAssignedDetails = payload(EVENT_ASSIGNED_DETAILS, data)?;
            Ok(OutputMessage::AssignedDetails(AssignedDetails {
                id: ConnectionId::new(d.id),
                name: d.name,
                color: d.color,
            }))
        }
        EVENT_UPDATE_CURSORS => {
            let cursors: BTreeMap<String, WireCursor> = payload(EVENT_UPDATE_CURSORS, data)?;
            Ok(OutputMessage::UpdateCursors(snapshot_from_wire(cursors)))
        }
        _ => Err(ProtocolError::UnknownEvent(event)),
    }
}

// -----------------------------------------------------------------------------
// Input (client → server)
// -----------------------------------------------------------------------------

/// Encode an `InputMessage` into a JSON text frame.
pub fn encode_input(msg: &InputMessage) -> Result<String, ProtocolError> {
    let frame = match msg {
        InputMessage::CursorMove(mv) => serde_json::to_string(&Envelope {
            event: EVENT_CURSOR_MOVE,
            data: WireCursorMove {
                x: mv.x,
                y: mv.y,
                active: mv.active,
            },
        })?,
    };

    Ok(frame)
}

/// Decode a JSON text frame into an `InputMessage`.
pub fn decode_input(frame: &str) -> Result<InputMessage, ProtocolError> {
    let RawEnvelope { event, data } = serde_json::from_str(frame)?;

    match event.as_str() {
        EVENT_CURSOR_MOVE => {
            let mv: WireCursorMove = payload(EVENT_CURSOR_MOVE, data)?;
            Ok(InputMessage::CursorMove(CursorMove {
                x: mv.x,
                y: mv.y,
                active: mv.active,
            }))
        }
        _ => Err(ProtocolError::UnknownEvent(event)),
    }
}

// -----------------------------------------------------------------------------
// Helpers
// -----------------------------------------------------------------------------

fn payload<T: DeserializeOwned>(
    event: &'static str,
    data: serde_json::Value,
) -> Result<T, ProtocolError> {
    serde_json::from_value(data).map_err(|source| ProtocolError::InvalidPayload { event, source })
}

fn snapshot_to_wire(snapshot: &Snapshot) -> BTreeMap<&str, WireCursor> {
    snapshot
        .iter()
        .map(|(id, c)| {
            (
                id.as_str(),
                WireCursor {
                    name: c.identity.name.clone(),
                    x: c.x,
                    y: c.y,
                    color: c.identity.color.clone(),
                    active: c.active,
                },
            )
        })
        .collect()
}

fn snapshot_from_wire(cursors: BTreeMap<String, WireCursor>) -> Snapshot {
    cursors
        .into_iter()
        .map(|(id, c)| {
            (
                ConnectionId::new(id),
                CursorState {
                    identity: Identity::new(c.name, c.color),
                    x: c.x,
                    y: c.y,
                    active: c.active,
                },
            )
        })
        .collect()
}
