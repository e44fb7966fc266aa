//! TLS configuration for `https://` transports.

use std::path::PathBuf;

/// Configuration for TLS connections made by the HTTPS transport.
///
/// By default the system root certificates are used and server
/// certificates are validated. This configuration allows a private CA
/// or, for local development only, disabling verification.
///
/// ## Example: Custom CA
///
/// ```rust
/// use influxdb_transport::TlsConfig;
///
/// let config = TlsConfig::builder()
///     .ca_cert_file("/etc/influxdb/ca.crt")
///     .build();
/// assert!(config.has_custom_ca());
/// ```
#[derive(Debug, Clone, Default, bon::Builder)]
pub struct TlsConfig {
    /// Custom CA certificate file path.
    #[builder(into)]
    pub ca_cert_file: Option<PathBuf>,

    /// Custom CA certificate PEM data.
    #[builder(into)]
    pub ca_cert_pem: Option<String>,

    /// Whether to skip certificate verification.
    ///
    /// **WARNING**: This is insecure and should only be used for local development.
    #[builder(default = false)]
    pub skip_verification: bool,
}

impl TlsConfig {
    /// Creates an insecure TLS config that skips verification.
    ///
    /// **WARNING**: This makes connections vulnerable to man-in-the-middle attacks.
    /// Only use this against a local server with a self-signed certificate.
    pub fn insecure() -> Self {
        Self::builder().skip_verification(true).build()
    }

    /// Returns `true` if a custom CA is configured.
    pub fn has_custom_ca(&self) -> bool {
        self.ca_cert_file.is_some() || self.ca_cert_pem.is_some()
    }
}
