//! Configuration types.
//!
//! - [`TransportConfig`]: timeouts and TLS for transport constructors
//! - [`TlsConfig`]: TLS settings for `https://` transports

mod tls;
mod transport;

pub use tls::TlsConfig;
pub use transport::{DEFAULT_CONNECT_TIMEOUT, DEFAULT_TIMEOUT, TransportConfig};
