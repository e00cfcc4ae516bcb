//! Peer wire protocol (BEP-3)
//!
//! This module implements the BitTorrent peer wire protocol: the
//! handshake, the nine-message post-handshake codec, and a TCP
//! transport that frames the byte stream into complete messages.

mod error;
mod handshake;
mod message;
mod peer_id;
mod transport;

pub use error::WireError;
pub use handshake::{Handshake, HANDSHAKE_LEN, PROTOCOL};
pub use message::{Message, MessageKind};
pub use peer_id::PeerId;
pub use transport::PeerTransport;
