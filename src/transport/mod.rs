//! Transport layer for shipping metrics to InfluxDB.
//!
//! This module provides the transport implementations and the URL-driven
//! factory that selects between them:
//!
//! - UDP transport (via tokio) - fire-and-forget datagrams
//! - HTTP/HTTPS transport (via reqwest) - writes and queries
//! - Unix socket transport (via tokio) - local datagram endpoint
//!
//! Most users go through [`Client`](crate::Client); [`resolve_transport`]
//! is available when only the raw [`Transport`] is wanted.
//!
//! ## Feature Flags
//!
//! - `http` (default): Enable the `http` and `https` schemes
//!
//! ## Transport Selection
//!
//! ```rust
//! use influxdb_transport::transport::dispatch_table;
//!
//! let table = dispatch_table();
//! assert!(table.contains("udp"));
//! assert!(!table.contains("ftp"));
//! ```

mod factory;
mod traits;
mod udp;

#[cfg(feature = "http")]
mod http;

#[cfg(unix)]
mod unix;

pub use factory::{
    Constructor, DispatchTable, dispatch_table, resolve_transport, resolve_transport_with,
};
pub use traits::{Transport, TransportKind, TransportStats};
pub use udp::UdpTransport;

#[cfg(feature = "http")]
pub use http::{HttpTransport, HttpTransportBuilder};

#[cfg(unix)]
pub use unix::UnixSocketTransport;
