//! Client builder with typestate pattern.

use std::{marker::PhantomData, time::Duration};

use crate::{
    Client, Error,
    config::{TlsConfig, TransportConfig},
    transport::resolve_transport_with,
};

/// Marker type: URL not yet provided.
pub struct NoUrl;

/// Marker type: URL has been provided.
pub struct HasUrl;

/// Builder for creating [`Client`] instances.
///
/// Uses the typestate pattern so that `build()` is only available once a
/// connection string has been provided.
///
/// ## Required Configuration
///
/// - `url()`: The connection string (`udp://`, `http://`, `https://`, `unix://`)
///
/// ## Optional Configuration
///
/// - `transport_config()`: Full construction settings
/// - `timeout()` / `connect_timeout()`: HTTP timeouts
/// - `tls_config()`: TLS settings for `https://`
/// - `batch_size()`: Buffer writes and send them in batches
///
/// ## Example
///
/// ```rust,no_run
/// # async fn demo() -> Result<(), influxdb_transport::Error> {
/// use std::time::Duration;
/// use influxdb_transport::Client;
///
/// let client = Client::builder()
///     .url("http://localhost:8086/?db=telegraf")
///     .timeout(Duration::from_secs(5))
///     .batch_size(500)
///     .build()
///     .await?;
/// # Ok(())
/// # }
/// ```
pub struct ClientBuilder<UrlState> {
    url: Option<String>,
    transport_config: TransportConfig,
    batch_size: Option<usize>,
    _url_state: PhantomData<UrlState>,
}

impl ClientBuilder<NoUrl> {
    /// Creates a new client builder.
    pub fn new() -> Self {
        Self {
            url: None,
            transport_config: TransportConfig::default(),
            batch_size: None,
            _url_state: PhantomData,
        }
    }

    /// Sets the connection string.
    ///
    /// # Example
    ///
    /// ```rust
    /// use influxdb_transport::Client;
    ///
    /// let builder = Client::builder().url("udp://localhost:8089");
    /// ```
    pub fn url(self, url: impl Into<String>) -> ClientBuilder<HasUrl> {
        ClientBuilder {
            url: Some(url.into()),
            transport_config: self.transport_config,
            batch_size: self.batch_size,
            _url_state: PhantomData,
        }
    }
}

impl Default for ClientBuilder<NoUrl> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U> ClientBuilder<U> {
    /// Replaces the transport construction settings.
    #[must_use]
    pub fn transport_config(mut self, config: TransportConfig) -> Self {
        self.transport_config = config;
        self
    }

    /// Sets the HTTP request timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.transport_config.timeout = timeout;
        self
    }

    /// Sets the HTTP connect timeout.
    #[must_use]
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.transport_config.connect_timeout = timeout;
        self
    }

    /// Sets the TLS configuration used by `https://` connections.
    ///
    /// # Example
    ///
    /// ```rust
    /// use influxdb_transport::{Client, TlsConfig};
    ///
    /// let builder = Client::builder()
    ///     .url("https://localhost:8086")
    ///     .tls_config(TlsConfig::builder().ca_cert_file("/etc/ssl/influx-ca.pem").build());
    /// ```
    #[must_use]
    pub fn tls_config(mut self, config: TlsConfig) -> Self {
        self.transport_config.tls = config;
        self
    }

    /// Buffers writes and sends them `size` lines at a time.
    ///
    /// A size of zero is treated as one.
    #[must_use]
    pub fn batch_size(mut self, size: usize) -> Self {
        self.batch_size = Some(size);
        self
    }
}

impl ClientBuilder<HasUrl> {
    /// Resolves the connection string and builds the client.
    ///
    /// # Errors
    ///
    /// Fails with the kind reported by transport resolution:
    /// `MalformedUri`, `UnsupportedScheme` or `Transport`.
    pub async fn build(self) -> Result<Client, Error> {
        let url = self
            .url
            .ok_or_else(|| Error::malformed_uri("connection string is required"))?;

        let transport = resolve_transport_with(&url, &self.transport_config).await?;

        let mut client = Client::from_transport(transport);
        if let Some(size) = self.batch_size {
            client.batch_of(size);
        }
        Ok(client)
    }
}
