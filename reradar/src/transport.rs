//! Host transport framing.
//!
//! Each frame is an 8-byte header followed by the payload:
//!
//! ```text
//! ┌──────────────┬──────────────┬─────────────────────┐
//! │ type: u32 LE │ len: u32 LE  │ payload (len bytes) │
//! └──────────────┴──────────────┴─────────────────────┘
//! ```
//!
//! Inbound payloads are raw bytes; outbound payloads are UTF-8 text.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::protocol::{Message, Reply};

/// Frame header size in bytes.
pub const HEADER_LEN: usize = 8;

/// Largest payload accepted from the host.
pub const MAX_PAYLOAD_LEN: u32 = 16 * 1024 * 1024;

/// Errors raised while moving frames over the transport.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Failed to connect to {path}: {source}")]
    Connect {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Transport I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Connection closed mid-frame")]
    Truncated,

    #[error("Frame payload of {len} bytes exceeds limit of {max}")]
    FrameTooLarge { len: u32, max: u32 },

    #[error("Reply payload of {0} bytes does not fit a frame")]
    ReplyTooLarge(usize),
}

/// Reads one frame.
///
/// Returns `Ok(None)` when the stream ends cleanly between frames.
pub async fn read_message<R>(reader: &mut R) -> Result<Option<Message>, TransportError>
where
    R: AsyncRead + Unpin,
{
    let mut header = [0u8; HEADER_LEN];
    let mut filled = 0;
    while filled < HEADER_LEN {
        let n = reader.read(&mut header[filled..]).await?;
        if n == 0 {
            if filled == 0 {
                return Ok(None);
            }
            return Err(TransportError::Truncated);
        }
        filled += n;
    }

    let msg_type = u32::from_le_bytes([header[0], header[1], header[2], header[3]]);
    let len = u32::from_le_bytes([header[4], header[5], header[6], header[7]]);
    if len > MAX_PAYLOAD_LEN {
        return Err(TransportError::FrameTooLarge {
            len,
            max: MAX_PAYLOAD_LEN,
        });
    }

    let mut payload = vec![0u8; len as usize];
    reader.read_exact(&mut payload).await.map_err(|e| {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            TransportError::Truncated
        } else {
            TransportError::Io(e)
        }
    })?;

    Ok(Some(Message { msg_type, payload }))
}

/// Writes one reply frame and flushes.
pub async fn write_reply<W>(writer: &mut W, reply: &Reply) -> Result<(), TransportError>
where
    W: AsyncWrite + Unpin,
{
    let payload = reply.payload.as_bytes();
    let len =
        u32::try_from(payload.len()).map_err(|_| TransportError::ReplyTooLarge(payload.len()))?;

    let mut frame = Vec::with_capacity(HEADER_LEN + payload.len());
    frame.extend_from_slice(&reply.msg_type.to_le_bytes());
    frame.extend_from_slice(&len.to_le_bytes());
    frame.extend_from_slice(payload);

    writer.write_all(&frame).await?;
    writer.flush().await?;
    Ok(())
}

/// Connects to the host's Unix-domain socket.
#[cfg(unix)]
pub async fn connect(path: &Path) -> Result<tokio::net::UnixStream, TransportError> {
    tokio::net::UnixStream::connect(path)
        .await
        .map_err(|source| TransportError::Connect {
            path: path.to_path_buf(),
            source,
        })
}
