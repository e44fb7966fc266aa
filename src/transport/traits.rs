//! Transport trait definitions and common types.
//!
//! This module defines the core transport abstraction shared by the UDP,
//! HTTP/HTTPS and Unix socket backends.

use bytes::Bytes;

use crate::Error;

// ============================================================================
// Transport Kind
// ============================================================================

/// Runtime variant of a [`Transport`].
///
/// ## Example
///
/// ```rust
/// use influxdb_transport::TransportKind;
///
/// let kind = TransportKind::Https;
/// assert!(kind.is_http());
/// assert!(kind.is_secure());
/// assert_eq!(kind.scheme(), "https");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportKind {
    /// Connectionless datagrams, one per `send`.
    Udp,
    /// Plain-text HTTP request/response.
    Http,
    /// HTTP over TLS.
    Https,
    /// Datagrams to a path-addressed local socket.
    UnixSocket,
}

impl TransportKind {
    /// Returns `true` if this is the UDP transport.
    pub fn is_udp(&self) -> bool {
        matches!(self, TransportKind::Udp)
    }

    /// Returns `true` for both plain and secure HTTP.
    pub fn is_http(&self) -> bool {
        matches!(self, TransportKind::Http | TransportKind::Https)
    }

    /// Returns `true` if this is the Unix socket transport.
    pub fn is_unix_socket(&self) -> bool {
        matches!(self, TransportKind::UnixSocket)
    }

    /// Returns `true` if the channel is encrypted.
    pub fn is_secure(&self) -> bool {
        matches!(self, TransportKind::Https)
    }

    /// The scheme token that selects this transport.
    pub fn scheme(&self) -> &'static str {
        match self {
            TransportKind::Udp => "udp",
            TransportKind::Http => "http",
            TransportKind::Https => "https",
            TransportKind::UnixSocket => "unix",
        }
    }
}

impl std::fmt::Display for TransportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransportKind::Udp => write!(f, "UDP"),
            TransportKind::Http => write!(f, "HTTP"),
            TransportKind::Https => write!(f, "HTTPS"),
            TransportKind::UnixSocket => write!(f, "Unix socket"),
        }
    }
}

// ============================================================================
// Transport Stats
// ============================================================================

/// Per-transport counters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransportStats {
    /// Payloads successfully sent.
    pub payloads_sent: u64,
    /// Bytes successfully sent.
    pub bytes_sent: u64,
    /// Queries that returned a response.
    pub queries: u64,
    /// Failed `send` or `query` calls.
    pub failures: u64,
}

impl TransportStats {
    pub(crate) fn record_send(&mut self, bytes: usize) {
        self.payloads_sent += 1;
        self.bytes_sent += bytes as u64;
    }

    pub(crate) fn record_query(&mut self) {
        self.queries += 1;
    }

    pub(crate) fn record_failure(&mut self) {
        self.failures += 1;
    }
}

// ============================================================================
// Transport Trait
// ============================================================================

/// Uniform contract implemented by every transport backend.
///
/// A transport owns exactly one connection resource (socket or HTTP
/// client), released when the transport is dropped. Calls perform I/O
/// immediately; nothing is buffered across calls and nothing is retried.
///
/// Only request/response protocols can answer queries. Check
/// [`supports_query()`](Transport::supports_query) before calling
/// [`query()`](Transport::query), or match on
/// [`ErrorKind::UnsupportedOperation`](crate::ErrorKind::UnsupportedOperation).
#[async_trait::async_trait]
pub trait Transport: Send + Sync + std::fmt::Debug {
    /// Returns the runtime variant.
    fn kind(&self) -> TransportKind;

    /// Returns `true` if [`query()`](Transport::query) is implemented.
    fn supports_query(&self) -> bool {
        false
    }

    /// Sends one payload of serialized points.
    ///
    /// Fails with [`ErrorKind::Transport`](crate::ErrorKind::Transport)
    /// carrying the I/O cause if the write cannot be completed.
    async fn send(&self, payload: &[u8]) -> Result<(), Error>;

    /// Runs a query and returns the raw response body.
    ///
    /// The default implementation fails with
    /// [`ErrorKind::UnsupportedOperation`](crate::ErrorKind::UnsupportedOperation).
    async fn query(&self, request: &str) -> Result<Bytes, Error> {
        let _ = request;
        Err(Error::unsupported_operation(format!(
            "{} transport does not support queries",
            self.kind()
        )))
    }

    /// Returns transport statistics.
    fn stats(&self) -> TransportStats;
}
