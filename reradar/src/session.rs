//! Long-lived session with the host.
//!
//! A reader task decodes frames and queues them on a bounded channel. The
//! session loop takes one message at a time, runs the dispatcher on the
//! blocking pool, and writes the replies before taking the next message, so
//! replies always follow arrival order.
//!
//! ```text
//! socket ──► reader task ──► mpsc ──► session loop ──► spawn_blocking(dispatch)
//!                                          │
//!                                          └──► write replies ──► socket
//! ```

use std::sync::Arc;

use thiserror::Error;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::dispatch::{Dispatcher, Outcome};
use crate::protocol::{Message, Reply};
use crate::reference::ReferenceError;
use crate::transport::{read_message, write_reply, TransportError};

/// Default number of frames buffered ahead of the dispatcher.
pub const DEFAULT_QUEUE_CAPACITY: usize = 64;

/// Session settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub queue_capacity: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }
}

/// How a session ended without error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The host sent the terminate message.
    Terminated,
    /// The host closed the connection.
    Disconnected,
    /// The shutdown token was cancelled.
    Cancelled,
}

/// Errors that end a session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Reference data unavailable: {0}")]
    Reference(#[from] ReferenceError),

    #[error("Dispatch task failed: {0}")]
    Dispatch(String),
}

/// A session over one host connection.
pub struct Session {
    dispatcher: Arc<Dispatcher>,
    config: SessionConfig,
}

impl Session {
    pub fn new(dispatcher: Arc<Dispatcher>, config: SessionConfig) -> Self {
        Self { dispatcher, config }
    }

    /// Serves messages from `reader`, writing replies to `writer`, until the
    /// host terminates, disconnects, or `shutdown` is cancelled.
    pub async fn run<R, W>(
        self,
        reader: R,
        mut writer: W,
        shutdown: CancellationToken,
    ) -> Result<SessionEnd, SessionError>
    where
        R: AsyncRead + Unpin + Send + 'static,
        W: AsyncWrite + Unpin,
    {
        info!(queue_capacity = self.config.queue_capacity, "Session starting");

        let (tx, mut rx) = mpsc::channel(self.config.queue_capacity.max(1));
        let reader_shutdown = shutdown.child_token();
        let reader_handle = tokio::spawn(read_frames(reader, tx, reader_shutdown.clone()));

        let result = loop {
            tokio::select! {
                biased;

                _ = shutdown.cancelled() => {
                    info!("Session cancelled");
                    break Ok(SessionEnd::Cancelled);
                }

                next = rx.recv() => {
                    let message = match next {
                        None => {
                            info!("Host closed the connection");
                            break Ok(SessionEnd::Disconnected);
                        }
                        Some(Err(e)) => break Err(SessionError::from(e)),
                        Some(Ok(message)) => message,
                    };

                    match self.dispatch(message).await {
                        Ok(Outcome::Terminate) => break Ok(SessionEnd::Terminated),
                        Ok(Outcome::Replies(replies)) => {
                            if let Err(e) = write_all(&mut writer, &replies).await {
                                break Err(e);
                            }
                        }
                        Err(e) => break Err(e),
                    }
                }
            }
        };

        reader_shutdown.cancel();
        reader_handle.abort();
        match &result {
            Ok(end) => info!(?end, "Session stopped"),
            Err(e) => warn!(error = %e, "Session failed"),
        }
        result
    }

    async fn dispatch(&self, message: Message) -> Result<Outcome, SessionError> {
        let dispatcher = Arc::clone(&self.dispatcher);
        let outcome = tokio::task::spawn_blocking(move || dispatcher.dispatch(&message))
            .await
            .map_err(|e| SessionError::Dispatch(e.to_string()))??;
        Ok(outcome)
    }
}

async fn write_all<W>(writer: &mut W, replies: &[Reply]) -> Result<(), SessionError>
where
    W: AsyncWrite + Unpin,
{
    for reply in replies {
        debug!(msg_type = reply.msg_type, len = reply.payload.len(), "Sending reply");
        write_reply(writer, reply).await?;
    }
    Ok(())
}

async fn read_frames<R>(
    mut reader: R,
    tx: mpsc::Sender<Result<Message, TransportError>>,
    shutdown: CancellationToken,
) where
    R: AsyncRead + Unpin,
{
    loop {
        let next = tokio::select! {
            biased;
            _ = shutdown.cancelled() => break,
            next = read_message(&mut reader) => next,
        };

        match next {
            Ok(Some(message)) => {
                if tx.send(Ok(message)).await.is_err() {
                    break;
                }
            }
            Ok(None) => break,
            Err(e) => {
                warn!(error = %e, "Failed to read frame");
                let _ = tx.send(Err(e)).await;
                break;
            }
        }
    }
    debug!("Frame reader stopped");
}
