//! presence-client
//!
//! Headless client for the presence server: connection handling plus a
//! local view of everyone's cursors.

pub mod board;
pub mod network;

pub use board::{Cursor, CursorBoard};
pub use network::PresenceConnection;
