//! presence-protocol
//!
//! Wire-level encoding/decoding for the presence service.
//!
//! This crate is responsible for turning logical presence messages
//! (`presence_core::InputMessage` / `OutputMessage`) into JSON text
//! frames and back again.
//!
//! - [`wire_types`] : event names and serde payload shapes
//! - [`json_codec`] : encode / decode entry points

pub mod wire_types;
pub mod json_codec;

pub use json_codec::{
    ProtocolError,
    decode_input,
    encode_input,
    decode_output,
    encode_output,
};
