//! URL-driven transport resolution.
//!
//! A [`DispatchTable`] maps each scheme token to exactly one constructor.
//! The standard table is built on first use and never mutated afterwards.
//!
//! | Scheme  | Transport                | Requires          |
//! |---------|--------------------------|-------------------|
//! | `udp`   | [`UdpTransport`]         | host, port        |
//! | `http`  | `HttpTransport` (plain)  | host, port        |
//! | `https` | `HttpTransport` (TLS)    | host, port        |
//! | `unix`  | `UnixSocketTransport`    | path              |

use std::collections::HashMap;
use std::sync::OnceLock;

use futures::FutureExt;
use futures::future::BoxFuture;

use super::traits::Transport;
use super::udp::UdpTransport;
use crate::config::TransportConfig;
use crate::{Descriptor, Error};

#[cfg(feature = "http")]
use super::http::HttpTransport;
#[cfg(feature = "http")]
use super::traits::TransportKind;
#[cfg(unix)]
use super::unix::UnixSocketTransport;

/// Builds a transport from a parsed descriptor.
pub type Constructor = for<'a> fn(
    &'a Descriptor,
    &'a TransportConfig,
) -> BoxFuture<'a, Result<Box<dyn Transport>, Error>>;

/// Process-wide standard table, built on first use.
static DISPATCH_TABLE: OnceLock<DispatchTable> = OnceLock::new();

/// Read-only mapping from scheme token to transport constructor.
pub struct DispatchTable {
    constructors: HashMap<&'static str, Constructor>,
}

impl DispatchTable {
    /// Builds the table of transports compiled into this crate.
    pub fn standard() -> Self {
        let constructors = standard_entries().into_iter().collect();
        Self { constructors }
    }

    /// Returns `true` if `scheme` has a registered constructor.
    pub fn contains(&self, scheme: &str) -> bool {
        self.constructors.contains_key(scheme)
    }

    /// Returns the registered schemes in lexical order.
    pub fn schemes(&self) -> Vec<&'static str> {
        let mut schemes: Vec<_> = self.constructors.keys().copied().collect();
        schemes.sort_unstable();
        schemes
    }

    /// Looks up the constructor for `scheme`.
    pub fn get(&self, scheme: &str) -> Option<Constructor> {
        self.constructors.get(scheme).copied()
    }

    /// Parses `url`, dispatches on its scheme and builds the transport.
    pub async fn resolve(
        &self,
        url: &str,
        config: &TransportConfig,
    ) -> Result<Box<dyn Transport>, Error> {
        let descriptor = Descriptor::parse(url);
        if descriptor.is_malformed() {
            return Err(Error::malformed_uri(format!("ill-formed URI: {:?}", url)));
        }

        let constructor = self
            .get(descriptor.scheme())
            .ok_or_else(|| Error::unsupported_scheme(descriptor.scheme()))?;

        tracing::debug!(scheme = descriptor.scheme(), %descriptor, "resolving transport");
        constructor(&descriptor, config).await
    }
}

impl std::fmt::Debug for DispatchTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DispatchTable")
            .field("schemes", &self.schemes())
            .finish()
    }
}

/// Returns the shared standard dispatch table.
pub fn dispatch_table() -> &'static DispatchTable {
    DISPATCH_TABLE.get_or_init(DispatchTable::standard)
}

/// Resolves `url` to a transport using default settings.
///
/// # Errors
///
/// - [`ErrorKind::MalformedUri`](crate::ErrorKind::MalformedUri) if `url` has
///   no `scheme://` prefix or lacks what the transport needs
/// - [`ErrorKind::UnsupportedScheme`](crate::ErrorKind::UnsupportedScheme) if
///   no transport is registered for the scheme
/// - [`ErrorKind::Transport`](crate::ErrorKind::Transport) if opening the
///   connection resource fails
///
/// # Example
///
/// ```rust,no_run
/// # async fn demo() -> Result<(), influxdb_transport::Error> {
/// use influxdb_transport::{resolve_transport, TransportKind};
///
/// let transport = resolve_transport("udp://localhost:8089").await?;
/// assert_eq!(transport.kind(), TransportKind::Udp);
/// transport.send(b"cpu,host=a usage=0.5").await?;
/// # Ok(())
/// # }
/// ```
pub async fn resolve_transport(url: &str) -> Result<Box<dyn Transport>, Error> {
    resolve_transport_with(url, &TransportConfig::default()).await
}

/// Resolves `url` to a transport with explicit construction settings.
pub async fn resolve_transport_with(
    url: &str,
    config: &TransportConfig,
) -> Result<Box<dyn Transport>, Error> {
    dispatch_table().resolve(url, config).await
}

fn standard_entries() -> Vec<(&'static str, Constructor)> {
    #[allow(unused_mut)]
    let mut entries: Vec<(&'static str, Constructor)> =
        vec![("udp", with_udp_transport as Constructor)];

    #[cfg(feature = "http")]
    {
        entries.push(("http", with_http_transport as Constructor));
        entries.push(("https", with_https_transport as Constructor));
    }

    #[cfg(unix)]
    entries.push(("unix", with_unix_socket_transport as Constructor));

    entries
}

fn with_udp_transport<'a>(
    descriptor: &'a Descriptor,
    _config: &'a TransportConfig,
) -> BoxFuture<'a, Result<Box<dyn Transport>, Error>> {
    async move {
        let transport = UdpTransport::from_descriptor(descriptor).await?;
        Ok(Box::new(transport) as Box<dyn Transport>)
    }
    .boxed()
}

#[cfg(feature = "http")]
fn with_http_transport<'a>(
    descriptor: &'a Descriptor,
    config: &'a TransportConfig,
) -> BoxFuture<'a, Result<Box<dyn Transport>, Error>> {
    async move {
        let transport = HttpTransport::from_descriptor(descriptor, config, TransportKind::Http)?;
        Ok(Box::new(transport) as Box<dyn Transport>)
    }
    .boxed()
}

#[cfg(feature = "http")]
fn with_https_transport<'a>(
    descriptor: &'a Descriptor,
    config: &'a TransportConfig,
) -> BoxFuture<'a, Result<Box<dyn Transport>, Error>> {
    async move {
        let transport = HttpTransport::from_descriptor(descriptor, config, TransportKind::Https)?;
        Ok(Box::new(transport) as Box<dyn Transport>)
    }
    .boxed()
}

#[cfg(unix)]
fn with_unix_socket_transport<'a>(
    descriptor: &'a Descriptor,
    _config: &'a TransportConfig,
) -> BoxFuture<'a, Result<Box<dyn Transport>, Error>> {
    async move {
        let transport = UnixSocketTransport::from_descriptor(descriptor)?;
        Ok(Box::new(transport) as Box<dyn Transport>)
    }
    .boxed()
}
