//! HTTP/HTTPS transport using reqwest.
//!
//! Writes are `POST {base}/write?db=..` with line protocol as the body.
//! Queries are `GET {base}/query?db=..&q=..` and return the raw response
//! body. Plain and secure HTTP share this implementation and differ only
//! in the URL scheme and the TLS settings applied to the client.

use bytes::Bytes;
use parking_lot::RwLock;
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use url::Url;

use super::traits::{Transport, TransportKind, TransportStats};
use crate::config::{TlsConfig, TransportConfig};
use crate::user_agent;
use crate::{Descriptor, Error};

const LINE_PROTOCOL: &str = "text/plain; charset=utf-8";

// ============================================================================
// HTTP Transport
// ============================================================================

/// HTTP transport using reqwest.
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: Url,
    kind: TransportKind,
    database: Option<String>,
    username: Option<String>,
    password: Option<String>,
    stats: RwLock<TransportStats>,
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("base_url", &self.base_url.as_str())
            .field("database", &self.database)
            .finish_non_exhaustive()
    }
}

impl HttpTransport {
    /// Creates a new HTTP transport builder.
    pub fn builder() -> HttpTransportBuilder {
        HttpTransportBuilder::new()
    }

    /// Builds a transport from a parsed descriptor.
    ///
    /// `kind` chooses plain or secure HTTP; the descriptor's own scheme is
    /// not consulted, so each dispatch entry maps to one behavior.
    pub fn from_descriptor(
        descriptor: &Descriptor,
        config: &TransportConfig,
        kind: TransportKind,
    ) -> Result<Self, Error> {
        let host_port = descriptor.host_port().ok_or_else(|| {
            Error::malformed_uri(format!(
                "{} URI {} needs a host and a port",
                kind, descriptor
            ))
        })?;

        let origin = format!("{}://{}/", kind.scheme(), host_port);
        let mut base = Url::parse(&origin).map_err(|e| {
            Error::malformed_uri(format!("invalid base URL for {}: {}", descriptor, e))
                .with_source(e)
        })?;
        base.set_path(descriptor.raw_path());

        let mut builder = Self::builder().base_url(base)?.config(config.clone());
        if let Some(database) = descriptor.database() {
            builder = builder.database(database);
        }
        if let Some(username) = descriptor.username() {
            builder = builder.credentials(username, descriptor.password());
        }
        builder.build()
    }

    /// Returns the base URL requests are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the target database, if one was configured.
    pub fn database(&self) -> Option<&str> {
        self.database.as_deref()
    }

    fn endpoint(&self, name: &str) -> Result<Url, Error> {
        let mut url = self.base_url.join(name).map_err(|e| {
            Error::malformed_uri(format!("invalid endpoint {}: {}", name, e)).with_source(e)
        })?;
        if let Some(ref database) = self.database {
            url.query_pairs_mut().append_pair("db", database);
        }
        Ok(url)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.username {
            Some(ref username) => request.basic_auth(username, self.password.as_deref()),
            None => request,
        }
    }

    /// Sends a request and returns the body of a 2xx response.
    async fn execute(&self, request: reqwest::RequestBuilder) -> Result<Bytes, Error> {
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(map_status_error(status.as_u16(), &error_text));
        }

        Ok(response.bytes().await?)
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    fn kind(&self) -> TransportKind {
        self.kind
    }

    fn supports_query(&self) -> bool {
        true
    }

    async fn send(&self, payload: &[u8]) -> Result<(), Error> {
        let url = self.endpoint("write")?;
        let request = self
            .authorize(self.client.post(url))
            .header(CONTENT_TYPE, HeaderValue::from_static(LINE_PROTOCOL))
            .body(payload.to_vec());

        match self.execute(request).await {
            Ok(_) => {
                tracing::trace!(base_url = %self.base_url, bytes = payload.len(), "write accepted");
                self.stats.write().record_send(payload.len());
                Ok(())
            },
            Err(err) => {
                tracing::warn!(base_url = %self.base_url, error = %err, "HTTP write failed");
                self.stats.write().record_failure();
                Err(err)
            },
        }
    }

    async fn query(&self, request: &str) -> Result<Bytes, Error> {
        let mut url = self.endpoint("query")?;
        url.query_pairs_mut().append_pair("q", request);

        match self.execute(self.authorize(self.client.get(url))).await {
            Ok(body) => {
                tracing::trace!(base_url = %self.base_url, bytes = body.len(), "query answered");
                self.stats.write().record_query();
                Ok(body)
            },
            Err(err) => {
                tracing::warn!(base_url = %self.base_url, error = %err, "HTTP query failed");
                self.stats.write().record_failure();
                Err(err)
            },
        }
    }

    fn stats(&self) -> TransportStats {
        self.stats.read().clone()
    }
}

// ============================================================================
// HTTP Transport Builder
// ============================================================================

/// Builder for [`HttpTransport`].
pub struct HttpTransportBuilder {
    base_url: Option<Url>,
    database: Option<String>,
    username: Option<String>,
    password: Option<String>,
    config: TransportConfig,
}

impl HttpTransportBuilder {
    fn new() -> Self {
        Self {
            base_url: None,
            database: None,
            username: None,
            password: None,
            config: TransportConfig::default(),
        }
    }

    /// Sets the base URL (`http://host:port[/prefix]`).
    pub fn base_url(mut self, url: impl AsRef<str>) -> Result<Self, Error> {
        let url = Url::parse(url.as_ref()).map_err(|e| {
            Error::malformed_uri(format!("invalid base URL: {}", e)).with_source(e)
        })?;
        self.base_url = Some(url);
        Ok(self)
    }

    /// Sets the database written to and queried.
    pub fn database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    /// Enables HTTP basic authentication.
    pub fn credentials(mut self, username: impl Into<String>, password: Option<&str>) -> Self {
        self.username = Some(username.into());
        self.password = password.map(str::to_owned);
        self
    }

    /// Sets timeouts and TLS settings.
    pub fn config(mut self, config: TransportConfig) -> Self {
        self.config = config;
        self
    }

    /// Builds the transport.
    pub fn build(self) -> Result<HttpTransport, Error> {
        let mut base_url = self
            .base_url
            .ok_or_else(|| Error::malformed_uri("base URL is required"))?;

        let kind = match base_url.scheme() {
            "http" => TransportKind::Http,
            "https" => TransportKind::Https,
            other => return Err(Error::unsupported_scheme(other)),
        };

        base_url.set_query(None);
        base_url.set_fragment(None);
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let mut client_builder = reqwest::Client::builder()
            .timeout(self.config.timeout)
            .connect_timeout(self.config.connect_timeout)
            .user_agent(user_agent::user_agent());

        if kind.is_secure() {
            client_builder = apply_tls(client_builder, &self.config.tls)?;
        }

        let client = client_builder.build().map_err(|e| {
            Error::transport(format!("failed to create HTTP client: {}", e)).with_source(e)
        })?;

        tracing::debug!(%base_url, %kind, database = ?self.database, "HTTP transport created");

        Ok(HttpTransport {
            client,
            base_url,
            kind,
            database: self.database,
            username: self.username,
            password: self.password,
            stats: RwLock::new(TransportStats::default()),
        })
    }
}

#[cfg(any(feature = "rustls", feature = "native-tls"))]
fn apply_tls(
    mut client_builder: reqwest::ClientBuilder,
    tls_config: &TlsConfig,
) -> Result<reqwest::ClientBuilder, Error> {
    if tls_config.skip_verification {
        client_builder = client_builder.danger_accept_invalid_certs(true);
    }

    if let Some(ref ca_cert_file) = tls_config.ca_cert_file {
        let cert_pem = std::fs::read(ca_cert_file).map_err(|e| {
            Error::transport(format!(
                "failed to read certificate {}: {}",
                ca_cert_file.display(),
                e
            ))
            .with_source(e)
        })?;
        let cert = reqwest::Certificate::from_pem(&cert_pem).map_err(|e| {
            Error::transport(format!(
                "invalid certificate {}: {}",
                ca_cert_file.display(),
                e
            ))
            .with_source(e)
        })?;
        client_builder = client_builder.add_root_certificate(cert);
    }

    if let Some(ref ca_cert_pem) = tls_config.ca_cert_pem {
        let cert = reqwest::Certificate::from_pem(ca_cert_pem.as_bytes()).map_err(|e| {
            Error::transport(format!("invalid CA certificate PEM: {}", e)).with_source(e)
        })?;
        client_builder = client_builder.add_root_certificate(cert);
    }

    Ok(client_builder)
}

#[cfg(not(any(feature = "rustls", feature = "native-tls")))]
fn apply_tls(
    client_builder: reqwest::ClientBuilder,
    tls_config: &TlsConfig,
) -> Result<reqwest::ClientBuilder, Error> {
    if tls_config.skip_verification || tls_config.has_custom_ca() {
        tracing::warn!("TLS settings ignored: built without a TLS backend");
    }
    Ok(client_builder)
}

/// Maps a non-2xx response to a transport error.
///
/// InfluxDB reports failures as `{"error": "..."}`; that message is used
/// when present, otherwise the raw body.
fn map_status_error(status: u16, body: &str) -> Error {
    let message = if body.is_empty() {
        format!("HTTP {}", status)
    } else if let Ok(error) = serde_json::from_str::<serde_json::Value>(body) {
        error
            .get("error")
            .and_then(|e| e.as_str())
            .unwrap_or(body)
            .to_string()
    } else {
        body.trim().to_string()
    };

    Error::transport(message).with_status(status)
}
