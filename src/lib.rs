//! # influxdb-transport
//!
//! URL-driven transports for shipping line-protocol metrics to InfluxDB.
//!
//! A connection string picks the wire protocol:
//!
//! | URL | Transport | Query |
//! |-----|-----------|-------|
//! | `udp://host:8089` | one datagram per payload | no |
//! | `http://[user[:pass]@]host:8086[/base][?db=name]` | `POST /write`, `GET /query` | yes |
//! | `https://...` | same as HTTP over TLS | yes |
//! | `unix:///path/to/socket` | one Unix datagram per payload | no |
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use influxdb_transport::Client;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), influxdb_transport::Error> {
//!     let mut client = Client::connect("udp://localhost:8089").await?;
//!     client.write("cpu,host=a usage=0.5").await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Resolving a transport directly
//!
//! ```rust
//! use influxdb_transport::{Descriptor, ErrorKind, resolve_transport};
//!
//! # tokio_test::block_on(async {
//! let descriptor = Descriptor::parse("udp://localhost:8089");
//! assert_eq!(descriptor.scheme(), "udp");
//! assert_eq!(descriptor.port(), Some(8089));
//!
//! let err = resolve_transport("localhost:8089").await.unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::MalformedUri);
//!
//! let err = resolve_transport("ftp://host:1").await.unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::UnsupportedScheme);
//! # });
//! ```
//!
//! ## Features
//!
//! - `http` (default): HTTP and HTTPS transports via reqwest
//! - `rustls` (default): Use rustls for TLS
//! - `native-tls`: Use native TLS (OpenSSL on Linux, Secure Transport on macOS)

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod client;
pub mod config;
pub mod error;
pub mod transport;
pub mod types;
pub mod uri;

// Testing utilities
pub mod testing;

// Prelude for convenient imports
pub mod prelude;

#[cfg(feature = "http")]
mod user_agent;

pub use client::{Client, ClientBuilder};
pub use config::{TlsConfig, TransportConfig};
pub use error::{Error, ErrorKind, Result};
pub use transport::{
    Transport, TransportKind, TransportStats, resolve_transport, resolve_transport_with,
};
pub use types::{QueryResponse, Series, StatementResult};
pub use uri::Descriptor;
