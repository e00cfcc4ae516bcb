//! btwire - BitTorrent peer wire protocol
//!
//! This library implements the BitTorrent peer wire protocol (BEP-3):
//! the post-handshake message codec with its length-prefixed framing,
//! the 68-byte handshake, and an async TCP transport that delimits
//! frames on the stream.
//!
//! # Modules
//!
//! - [`wire`] - Messages, handshake, peer IDs, and the peer transport

pub mod wire;

pub use wire::{Handshake, Message, MessageKind, PeerId, PeerTransport, WireError};
