//! Unix domain socket transport.
//!
//! Sends each payload as one datagram to a path-addressed local endpoint,
//! such as the InfluxDB or Telegraf `unixgram` listener.

use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use tokio::net::UnixDatagram;

use super::traits::{Transport, TransportKind, TransportStats};
use crate::{Descriptor, Error};

/// Unix datagram transport addressing a socket path.
pub struct UnixSocketTransport {
    socket: UnixDatagram,
    path: PathBuf,
    stats: RwLock<TransportStats>,
}

impl std::fmt::Debug for UnixSocketTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnixSocketTransport")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl UnixSocketTransport {
    /// Creates an unbound datagram socket that sends to `path`.
    ///
    /// The endpoint does not need to exist yet; a missing endpoint surfaces
    /// as a transport error on the first [`send`](Transport::send).
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, Error> {
        let path = path.into();
        let socket = UnixDatagram::unbound()?;

        tracing::debug!(path = %path.display(), "Unix socket transport created");

        Ok(Self {
            socket,
            path,
            stats: RwLock::new(TransportStats::default()),
        })
    }

    /// Builds a transport from a parsed `unix:///path` descriptor.
    ///
    /// Host and port are ignored.
    pub fn from_descriptor(descriptor: &Descriptor) -> Result<Self, Error> {
        if descriptor.path().is_empty() {
            return Err(Error::malformed_uri(format!(
                "Unix socket URI {} is missing a path",
                descriptor
            )));
        }
        Self::new(descriptor.path())
    }

    /// Returns the target socket path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait::async_trait]
impl Transport for UnixSocketTransport {
    fn kind(&self) -> TransportKind {
        TransportKind::UnixSocket
    }

    async fn send(&self, payload: &[u8]) -> Result<(), Error> {
        let result = match self.socket.send_to(payload, &self.path).await {
            Ok(written) if written == payload.len() => Ok(()),
            Ok(written) => Err(Error::transport(format!(
                "truncated datagram: sent {} of {} bytes",
                written,
                payload.len()
            ))),
            Err(e) => Err(Error::transport(format!(
                "failed to send to {}: {}",
                self.path.display(),
                e
            ))
            .with_source(e)),
        };

        match result {
            Ok(()) => {
                tracing::trace!(path = %self.path.display(), bytes = payload.len(), "datagram sent");
                self.stats.write().record_send(payload.len());
                Ok(())
            },
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "Unix socket send failed");
                self.stats.write().record_failure();
                Err(err)
            },
        }
    }

    fn stats(&self) -> TransportStats {
        self.stats.read().clone()
    }
}
