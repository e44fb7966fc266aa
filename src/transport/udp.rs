//! UDP transport.
//!
//! Each [`send`](Transport::send) emits exactly one datagram to the InfluxDB
//! UDP listener. There is no acknowledgement and no query support.

use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};

use parking_lot::RwLock;
use tokio::net::UdpSocket;

use super::traits::{Transport, TransportKind, TransportStats};
use crate::{Descriptor, Error};

/// UDP transport bound to one remote listener.
///
/// The socket is bound to an ephemeral local port and `connect`ed to the
/// peer at construction, so every `send` goes to the same address.
pub struct UdpTransport {
    socket: UdpSocket,
    peer: SocketAddr,
    stats: RwLock<TransportStats>,
}

impl std::fmt::Debug for UdpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UdpTransport")
            .field("peer", &self.peer)
            .finish_non_exhaustive()
    }
}

impl UdpTransport {
    /// Resolves `host:port` and connects a fresh socket to the first address.
    pub async fn connect(host: &str, port: u16) -> Result<Self, Error> {
        let peer = tokio::net::lookup_host((host, port))
            .await
            .map_err(|e| {
                Error::transport(format!("failed to resolve {}:{}: {}", host, port, e))
                    .with_source(e)
            })?
            .next()
            .ok_or_else(|| {
                Error::transport(format!("{}:{} resolved to no addresses", host, port))
            })?;

        let local: SocketAddr = if peer.is_ipv4() {
            (Ipv4Addr::UNSPECIFIED, 0).into()
        } else {
            (Ipv6Addr::UNSPECIFIED, 0).into()
        };

        let socket = UdpSocket::bind(local).await?;
        socket.connect(peer).await?;

        tracing::debug!(%peer, "UDP transport connected");

        Ok(Self {
            socket,
            peer,
            stats: RwLock::new(TransportStats::default()),
        })
    }

    /// Builds a transport from a parsed `udp://host:port` descriptor.
    pub async fn from_descriptor(descriptor: &Descriptor) -> Result<Self, Error> {
        let port = descriptor.port().ok_or_else(|| {
            Error::malformed_uri(format!("UDP URI {} is missing a port", descriptor))
        })?;
        if descriptor.host().is_empty() {
            return Err(Error::malformed_uri(format!(
                "UDP URI {} is missing a host",
                descriptor
            )));
        }
        Self::connect(descriptor.host(), port).await
    }

    /// Returns the resolved remote address.
    pub fn peer(&self) -> SocketAddr {
        self.peer
    }

    /// Returns the local address the socket is bound to.
    pub fn local_addr(&self) -> Result<SocketAddr, Error> {
        Ok(self.socket.local_addr()?)
    }
}

#[async_trait::async_trait]
impl Transport for UdpTransport {
    fn kind(&self) -> TransportKind {
        TransportKind::Udp
    }

    async fn send(&self, payload: &[u8]) -> Result<(), Error> {
        let result = match self.socket.send(payload).await {
            Ok(written) if written == payload.len() => Ok(()),
            Ok(written) => Err(Error::transport(format!(
                "truncated datagram: sent {} of {} bytes",
                written,
                payload.len()
            ))),
            Err(e) => Err(Error::from(e)),
        };

        match result {
            Ok(()) => {
                tracing::trace!(peer = %self.peer, bytes = payload.len(), "datagram sent");
                self.stats.write().record_send(payload.len());
                Ok(())
            },
            Err(err) => {
                tracing::warn!(peer = %self.peer, error = %err, "UDP send failed");
                self.stats.write().record_failure();
                Err(err)
            },
        }
    }

    fn stats(&self) -> TransportStats {
        self.stats.read().clone()
    }
}
