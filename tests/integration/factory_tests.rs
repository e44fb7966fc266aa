//! URL resolution against live local endpoints.

use anyhow::Result;
use influxdb_transport::{
    ErrorKind, TransportConfig, TransportKind, resolve_transport, resolve_transport_with,
    transport::dispatch_table,
};
use test_case::test_case;

use crate::common::{UdpListener, init_tracing};

#[cfg(unix)]
#[test]
fn test_dispatch_table_has_distinct_http_entries() {
    let table = dispatch_table();
    assert!(table.contains("http"));
    assert!(table.contains("https"));
    assert_eq!(table.schemes(), vec!["http", "https", "udp", "unix"]);
}

#[test_case("udp://127.0.0.1:8089", TransportKind::Udp ; "udp")]
#[test_case("http://127.0.0.1:8086", TransportKind::Http ; "http")]
#[test_case("https://metrics.example.com:8086", TransportKind::Https ; "https")]
#[test_case("HTTP://127.0.0.1:8086/?db=x", TransportKind::Http ; "uppercase scheme")]
#[tokio::test]
async fn test_scheme_selects_kind(url: &str, expected: TransportKind) -> Result<()> {
    init_tracing();
    let transport = resolve_transport(url).await?;
    assert_eq!(transport.kind(), expected);
    assert_eq!(transport.supports_query(), expected.is_http());
    Ok(())
}

#[test_case("localhost:8089" ; "no separator")]
#[test_case("" ; "empty")]
#[test_case("://host:1" ; "empty scheme")]
#[test_case("   " ; "whitespace")]
#[tokio::test]
async fn test_malformed_urls(url: &str) {
    let err = resolve_transport(url).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedUri);
    assert!(!err.is_retriable());
}

#[test_case("ftp://host:1", "ftp" ; "ftp")]
#[test_case("tcp://host:8086", "tcp" ; "tcp")]
#[test_case("ws://host:80", "ws" ; "ws")]
#[tokio::test]
async fn test_unsupported_schemes(url: &str, scheme: &str) {
    let err = resolve_transport(url).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnsupportedScheme);
    assert_eq!(err.scheme(), Some(scheme));
    assert!(err.to_string().contains(scheme));
}

#[tokio::test]
async fn test_udp_payload_reaches_listener() -> Result<()> {
    init_tracing();
    let listener = UdpListener::bind().await?;
    let transport = resolve_transport(&listener.url()?).await?;

    transport.send(b"cpu,host=a usage=0.5").await?;
    assert_eq!(listener.recv().await?, "cpu,host=a usage=0.5");

    let stats = transport.stats();
    assert_eq!(stats.payloads_sent, 1);
    assert_eq!(stats.bytes_sent, 20);
    Ok(())
}

#[tokio::test]
async fn test_udp_query_is_unsupported() -> Result<()> {
    let listener = UdpListener::bind().await?;
    let transport = resolve_transport(&listener.url()?).await?;

    let err = transport.query("SELECT 1").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnsupportedOperation);
    Ok(())
}

#[tokio::test]
async fn test_udp_requires_port() {
    let err = resolve_transport("udp://127.0.0.1").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedUri);
}

#[tokio::test]
async fn test_unresolvable_udp_host() {
    let err = resolve_transport("udp://does-not-exist.invalid:8089")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
}

#[tokio::test]
async fn test_resolve_with_custom_config() -> Result<()> {
    let config = TransportConfig::builder()
        .timeout(std::time::Duration::from_secs(2))
        .build();
    let transport = resolve_transport_with("https://localhost:8086", &config).await?;
    assert_eq!(transport.kind(), TransportKind::Https);
    assert!(transport.kind().is_secure());
    Ok(())
}

#[cfg(unix)]
mod unix {
    use super::*;
    use crate::common::UnixListener;

    #[tokio::test]
    async fn test_unix_payload_reaches_listener() -> Result<()> {
        init_tracing();
        let listener = UnixListener::bind()?;
        let transport = resolve_transport(&listener.url()).await?;
        assert_eq!(transport.kind(), TransportKind::UnixSocket);
        assert!(!transport.supports_query());

        transport.send(b"mem used=42i").await?;
        assert_eq!(listener.recv().await?, "mem used=42i");
        Ok(())
    }

    #[tokio::test]
    async fn test_unix_needs_no_host_or_port() -> Result<()> {
        let transport = resolve_transport("unix:///tmp/influxdb-not-there.sock").await?;
        assert_eq!(transport.kind(), TransportKind::UnixSocket);
        Ok(())
    }

    #[tokio::test]
    async fn test_unix_send_without_listener_fails() -> Result<()> {
        let transport = resolve_transport("unix:///tmp/influxdb-not-there.sock").await?;
        let err = transport.send(b"x v=1").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert_eq!(transport.stats().failures, 1);
        Ok(())
    }
}
