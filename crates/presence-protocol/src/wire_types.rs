//! Wire shapes and event names.
//!
//! Every frame is one JSON text message of the form
//!
//! ```text
//! {"event": "<name>", "data": <payload>}
//! ```
//!
//! Server → client:
//! - `assignedDetails` : `{"id": str, "name": str, "color": str}`
//! - `updateCursors`   : `{"<connId>": {"name", "x", "y", "color", "active"?}, ...}`
//!
//! Client → server:
//! - `cursorMove`      : `{"x": number, "y": number, "active"?: bool}`
//!
//! `active` is omitted when it is unset.

use serde::{Deserialize, Serialize};

pub const EVENT_ASSIGNED_DETAILS: &str = "assignedDetails";
pub const EVENT_UPDATE_CURSORS: &str = "updateCursors";
pub const EVENT_CURSOR_MOVE: &str = "cursorMove";

/// Outer frame used when encoding.
#[derive(Debug, Serialize)]
pub struct Envelope<'a, T> {
    pub event: &'a str,
    pub data: T,
}

/// Outer frame with the payload left undecoded.
#[derive(Debug, Deserialize)]
pub struct RawEnvelope {
    pub event: String,
    #[serde(default)]
    pub data: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireAssignedDetails {
    pub id: String,
    pub name: String,
    pub color: String,
}

/// One entry of an `updateCursors` map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireCursor {
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WireCursorMove {
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}
