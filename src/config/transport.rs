//! Settings handed to transport constructors.

use std::time::Duration;

use super::TlsConfig;

/// Default request timeout for HTTP transports.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default connect timeout for HTTP transports.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Construction-time settings passed to every transport constructor.
///
/// Datagram transports (UDP, Unix socket) ignore these; they only shape
/// the HTTP client behind `http://` and `https://` URLs.
///
/// ## Example
///
/// ```rust
/// use std::time::Duration;
/// use influxdb_transport::{TlsConfig, TransportConfig};
///
/// let config = TransportConfig::builder()
///     .timeout(Duration::from_secs(5))
///     .tls(TlsConfig::insecure())
///     .build();
/// assert_eq!(config.timeout, Duration::from_secs(5));
/// ```
#[derive(Debug, Clone, bon::Builder)]
pub struct TransportConfig {
    /// Total time allowed for one HTTP request.
    #[builder(default = DEFAULT_TIMEOUT)]
    pub timeout: Duration,

    /// Time allowed to establish the HTTP connection.
    #[builder(default = DEFAULT_CONNECT_TIMEOUT)]
    pub connect_timeout: Duration,

    /// TLS settings for `https://` transports.
    #[builder(default)]
    pub tls: TlsConfig,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}
