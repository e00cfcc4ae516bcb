use super::error::WireError;
use bytes::{Buf, BufMut, Bytes, BytesMut};

/// Wire codes for the nine post-handshake message types (BEP-3).
///
/// The numeric code of each kind is its position in the protocol's
/// message table and is part of the wire format; renumbering any of
/// them is a protocol break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MessageKind {
    Choke = 0,
    Unchoke = 1,
    Interested = 2,
    Uninterested = 3,
    Have = 4,
    Bitfield = 5,
    Request = 6,
    Piece = 7,
    Cancel = 8,
}

impl MessageKind {
    /// Returns the wire code for this kind.
    pub const fn code(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for MessageKind {
    type Error = WireError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(MessageKind::Choke),
            1 => Ok(MessageKind::Unchoke),
            2 => Ok(MessageKind::Interested),
            3 => Ok(MessageKind::Uninterested),
            4 => Ok(MessageKind::Have),
            5 => Ok(MessageKind::Bitfield),
            6 => Ok(MessageKind::Request),
            7 => Ok(MessageKind::Piece),
            8 => Ok(MessageKind::Cancel),
            _ => Err(WireError::UnknownMessageType(value)),
        }
    }
}

/// A post-handshake peer wire message.
///
/// Each variant carries exactly the fields its wire payload defines.
/// All integer fields are unsigned 32-bit big-endian on the wire.
/// Bitfields and block data are opaque to the codec and travel as
/// [`Bytes`] views, so decoding large piece payloads does not copy
/// them out of the frame buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    Choke,
    Unchoke,
    Interested,
    Uninterested,
    Have {
        piece_index: u32,
    },
    Bitfield(Bytes),
    Request {
        piece_index: u32,
        block_offset: u32,
        block_size: u32,
    },
    Piece {
        piece_index: u32,
        block_offset: u32,
        block_data: Bytes,
    },
    Cancel {
        piece_index: u32,
        block_offset: u32,
        block_size: u32,
    },
}

impl Message {
    /// Returns the kind of this message.
    pub fn kind(&self) -> MessageKind {
        match self {
            Message::Choke => MessageKind::Choke,
            Message::Unchoke => MessageKind::Unchoke,
            Message::Interested => MessageKind::Interested,
            Message::Uninterested => MessageKind::Uninterested,
            Message::Have { .. } => MessageKind::Have,
            Message::Bitfield(_) => MessageKind::Bitfield,
            Message::Request { .. } => MessageKind::Request,
            Message::Piece { .. } => MessageKind::Piece,
            Message::Cancel { .. } => MessageKind::Cancel,
        }
    }

    /// Serializes the message into a complete wire frame.
    ///
    /// The frame is a 4-byte big-endian length counting everything
    /// after the prefix (type code plus payload), the type-code byte,
    /// the fixed-width fields, then any opaque payload. Opaque
    /// payloads carry no inner length prefix; their size is implied by
    /// the frame length.
    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::new();

        match self {
            Message::Choke | Message::Unchoke | Message::Interested | Message::Uninterested => {
                buf.put_u32(1);
                buf.put_u8(self.kind().code());
            }
            Message::Have { piece_index } => {
                buf.put_u32(5);
                buf.put_u8(MessageKind::Have.code());
                buf.put_u32(*piece_index);
            }
            Message::Bitfield(bitfield) => {
                buf.put_u32(1 + bitfield.len() as u32);
                buf.put_u8(MessageKind::Bitfield.code());
                buf.put_slice(bitfield);
            }
            Message::Request {
                piece_index,
                block_offset,
                block_size,
            } => {
                buf.put_u32(13);
                buf.put_u8(MessageKind::Request.code());
                buf.put_u32(*piece_index);
                buf.put_u32(*block_offset);
                buf.put_u32(*block_size);
            }
            Message::Piece {
                piece_index,
                block_offset,
                block_data,
            } => {
                buf.put_u32(9 + block_data.len() as u32);
                buf.put_u8(MessageKind::Piece.code());
                buf.put_u32(*piece_index);
                buf.put_u32(*block_offset);
                buf.put_slice(block_data);
            }
            Message::Cancel {
                piece_index,
                block_offset,
                block_size,
            } => {
                buf.put_u32(13);
                buf.put_u8(MessageKind::Cancel.code());
                buf.put_u32(*piece_index);
                buf.put_u32(*block_offset);
                buf.put_u32(*block_size);
            }
        }

        buf.freeze()
    }

    /// Parses one complete wire frame into a message.
    ///
    /// The frame must start at the 4-byte length prefix; the transport
    /// layer is responsible for delimiting frames on the stream. The
    /// prefix is consumed but not cross-checked against the buffer:
    /// opaque tails (bitfield, block data) take whatever bytes remain
    /// after the fixed fields, and fixed-arity kinds ignore trailing
    /// bytes. Fixed fields shorter than their kind requires fail with
    /// [`WireError::TruncatedPayload`]; a type code above 8 fails with
    /// [`WireError::UnknownMessageType`]. Field values are not
    /// validated beyond structure.
    pub fn decode(mut frame: Bytes) -> Result<Self, WireError> {
        if frame.len() < 5 {
            return Err(WireError::TruncatedPayload("frame too short".into()));
        }

        // Length prefix already served its purpose at the transport layer.
        frame.advance(4);
        let kind = MessageKind::try_from(frame.get_u8())?;

        match kind {
            MessageKind::Choke => Ok(Message::Choke),
            MessageKind::Unchoke => Ok(Message::Unchoke),
            MessageKind::Interested => Ok(Message::Interested),
            MessageKind::Uninterested => Ok(Message::Uninterested),
            MessageKind::Have => {
                if frame.remaining() < 4 {
                    return Err(WireError::TruncatedPayload("have too short".into()));
                }
                Ok(Message::Have {
                    piece_index: frame.get_u32(),
                })
            }
            MessageKind::Bitfield => {
                let len = frame.remaining();
                Ok(Message::Bitfield(frame.copy_to_bytes(len)))
            }
            MessageKind::Request => {
                if frame.remaining() < 12 {
                    return Err(WireError::TruncatedPayload("request too short".into()));
                }
                Ok(Message::Request {
                    piece_index: frame.get_u32(),
                    block_offset: frame.get_u32(),
                    block_size: frame.get_u32(),
                })
            }
            MessageKind::Piece => {
                if frame.remaining() < 8 {
                    return Err(WireError::TruncatedPayload("piece too short".into()));
                }
                let piece_index = frame.get_u32();
                let block_offset = frame.get_u32();
                let len = frame.remaining();
                Ok(Message::Piece {
                    piece_index,
                    block_offset,
                    block_data: frame.copy_to_bytes(len),
                })
            }
            MessageKind::Cancel => {
                if frame.remaining() < 12 {
                    return Err(WireError::TruncatedPayload("cancel too short".into()));
                }
                Ok(Message::Cancel {
                    piece_index: frame.get_u32(),
                    block_offset: frame.get_u32(),
                    block_size: frame.get_u32(),
                })
            }
        }
    }
}
