//! presence-server
//!
//! Multi-client async WebSocket server for cursor presence.

pub mod config;
pub mod types;
pub mod server;

// these are internal modules, not re-exported
mod client;
mod hub_task;
