//! presence-core
//!
//! Pure cursor-presence logic:
//! - connection ids and display identities
//! - identity allocation (names + colors)
//! - the cursor registry
//! - the per-connection lifecycle hub

pub mod connection;
pub mod identity;
pub mod allocator;
pub mod cursor;
pub mod registry;
pub mod messages;
pub mod hub;

pub use connection::ConnectionId;
pub use identity::{Identity, DEFAULT_NAMES, DEFAULT_PALETTE};
pub use allocator::IdentityAllocator;
pub use cursor::CursorState;
pub use registry::{PresenceRegistry, Snapshot};

pub use messages::{
    AssignedDetails,
    CursorMove,
    InputMessage,
    OutputMessage,
};

pub use hub::{ConnectionState, HubEvent, Outbound, PresenceHub};
