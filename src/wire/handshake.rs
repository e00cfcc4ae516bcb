use super::error::WireError;
use super::peer_id::PeerId;
use bytes::{BufMut, Bytes, BytesMut};

/// Protocol identifier sent in every handshake.
pub const PROTOCOL: &[u8] = b"BitTorrent protocol";

/// Total handshake size: pstrlen + pstr + reserved + info hash + peer id.
pub const HANDSHAKE_LEN: usize = 68;

// Reserved-byte feature bits.
const EXTENSION_BIT: u8 = 0x10; // reserved[5], BEP-10
const DHT_BIT: u8 = 0x01; // reserved[7], BEP-5
const FAST_BIT: u8 = 0x04; // reserved[7], BEP-6

/// The 68-byte handshake that opens a peer connection.
///
/// Layout: one length byte (19), the protocol string, 8 reserved
/// bytes, the 20-byte info hash, and the 20-byte peer ID. Handshakes
/// built with [`Handshake::new`] leave the reserved bytes zeroed; this
/// crate speaks only the base message set and advertises no
/// extensions. The reserved-bit accessors are for inspecting what the
/// remote side claims to support.
#[derive(Debug, Clone)]
pub struct Handshake {
    pub info_hash: [u8; 20],
    pub peer_id: PeerId,
    pub reserved: [u8; 8],
}

impl Handshake {
    pub fn new(info_hash: [u8; 20], peer_id: PeerId) -> Self {
        Self {
            info_hash,
            peer_id,
            reserved: [0u8; 8],
        }
    }

    pub fn supports_extension_protocol(&self) -> bool {
        self.reserved[5] & EXTENSION_BIT != 0
    }

    pub fn supports_dht(&self) -> bool {
        self.reserved[7] & DHT_BIT != 0
    }

    pub fn supports_fast_extension(&self) -> bool {
        self.reserved[7] & FAST_BIT != 0
    }

    /// Serializes the handshake into its fixed 68-byte form.
    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(HANDSHAKE_LEN);
        buf.put_u8(PROTOCOL.len() as u8);
        buf.put_slice(PROTOCOL);
        buf.put_slice(&self.reserved);
        buf.put_slice(&self.info_hash);
        buf.put_slice(self.peer_id.as_bytes());
        buf.freeze()
    }

    /// Parses a handshake from the first 68 bytes of `data`.
    ///
    /// Fails with [`WireError::InvalidHandshake`] on short input or a
    /// protocol string other than "BitTorrent protocol".
    pub fn decode(data: &[u8]) -> Result<Self, WireError> {
        if data.len() < HANDSHAKE_LEN {
            return Err(WireError::InvalidHandshake);
        }

        if data[0] as usize != PROTOCOL.len() || &data[1..20] != PROTOCOL {
            return Err(WireError::InvalidHandshake);
        }

        let mut reserved = [0u8; 8];
        reserved.copy_from_slice(&data[20..28]);

        let mut info_hash = [0u8; 20];
        info_hash.copy_from_slice(&data[28..48]);

        let peer_id = PeerId::from_bytes(&data[48..68]).ok_or(WireError::InvalidHandshake)?;

        Ok(Self {
            info_hash,
            peer_id,
            reserved,
        })
    }
}
