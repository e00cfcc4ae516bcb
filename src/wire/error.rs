use thiserror::Error;

/// Errors from the peer wire codec and transport.
///
/// [`Message::decode`](super::Message::decode) only ever returns
/// `UnknownMessageType` or `TruncatedPayload`; the remaining variants
/// come from the handshake and transport layers.
#[derive(Debug, Error)]
pub enum WireError {
    /// Network I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The peer sent a malformed handshake.
    #[error("invalid handshake")]
    InvalidHandshake,

    /// A frame carried a type code outside the registered range.
    #[error("unknown message type: {0}")]
    UnknownMessageType(u8),

    /// A payload was shorter than its kind's fixed-width fields.
    #[error("truncated payload: {0}")]
    TruncatedPayload(String),

    /// A frame declared a length above the transport ceiling.
    #[error("message too large: {0} bytes")]
    MessageTooLarge(usize),

    /// The connection was closed by the peer.
    #[error("connection closed")]
    ConnectionClosed,

    /// Operation timed out.
    #[error("timeout")]
    Timeout,
}
