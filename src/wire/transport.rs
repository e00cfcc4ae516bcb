use super::error::WireError;
use super::handshake::{Handshake, HANDSHAKE_LEN};
use super::message::Message;
use bytes::{Buf, BytesMut};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::trace;

const MAX_FRAME_SIZE: usize = 16 * 1024 * 1024;
const READ_TIMEOUT: Duration = Duration::from_secs(120);
const WRITE_TIMEOUT: Duration = Duration::from_secs(30);

/// Message-oriented transport over a peer TCP stream.
///
/// Buffers incoming bytes until a complete length-prefixed frame has
/// arrived, so [`Message::decode`] always receives exactly one full
/// frame. Keep-alive frames (length 0, no type code) are consumed
/// here and never surface as messages; [`PeerTransport::send_keep_alive`]
/// emits one.
pub struct PeerTransport {
    stream: TcpStream,
    read_buf: BytesMut,
}

impl PeerTransport {
    pub fn new(stream: TcpStream) -> Self {
        Self {
            stream,
            read_buf: BytesMut::with_capacity(32 * 1024),
        }
    }

    pub async fn send_handshake(&mut self, handshake: &Handshake) -> Result<(), WireError> {
        self.write_all(&handshake.encode()).await
    }

    pub async fn receive_handshake(&mut self) -> Result<Handshake, WireError> {
        self.fill_to(HANDSHAKE_LEN).await?;
        let data = self.read_buf.split_to(HANDSHAKE_LEN);
        Handshake::decode(&data)
    }

    pub async fn send_message(&mut self, message: &Message) -> Result<(), WireError> {
        self.write_all(&message.encode()).await
    }

    /// Sends a zero-length keep-alive frame.
    pub async fn send_keep_alive(&mut self) -> Result<(), WireError> {
        self.write_all(&0u32.to_be_bytes()).await
    }

    /// Receives the next message, consuming any keep-alive frames
    /// that precede it.
    pub async fn receive_message(&mut self) -> Result<Message, WireError> {
        loop {
            self.fill_to(4).await?;
            let length = u32::from_be_bytes([
                self.read_buf[0],
                self.read_buf[1],
                self.read_buf[2],
                self.read_buf[3],
            ]) as usize;

            if length == 0 {
                self.read_buf.advance(4);
                trace!("keep-alive received");
                continue;
            }

            if length > MAX_FRAME_SIZE {
                return Err(WireError::MessageTooLarge(length));
            }

            self.fill_to(4 + length).await?;
            let frame = self.read_buf.split_to(4 + length);
            return Message::decode(frame.freeze());
        }
    }

    pub fn into_inner(self) -> TcpStream {
        self.stream
    }

    pub fn peer_addr(&self) -> std::io::Result<std::net::SocketAddr> {
        self.stream.peer_addr()
    }

    /// Reads from the stream until the buffer holds at least `needed` bytes.
    async fn fill_to(&mut self, needed: usize) -> Result<(), WireError> {
        while self.read_buf.len() < needed {
            let n = timeout(READ_TIMEOUT, self.stream.read_buf(&mut self.read_buf))
                .await
                .map_err(|_| WireError::Timeout)??;

            if n == 0 {
                return Err(WireError::ConnectionClosed);
            }
        }
        Ok(())
    }

    async fn write_all(&mut self, data: &[u8]) -> Result<(), WireError> {
        timeout(WRITE_TIMEOUT, self.stream.write_all(data))
            .await
            .map_err(|_| WireError::Timeout)??;
        Ok(())
    }
}
