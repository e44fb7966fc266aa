//! End-to-end client tests.

use std::time::Duration;

use anyhow::Result;
use influxdb_transport::{Client, Error, ErrorKind, TransportKind, testing::MockTransport};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_string, header, method, path, query_param},
};

use crate::common::{UdpListener, init_tracing};

#[tokio::test]
async fn test_http_write_and_query() -> Result<()> {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/write"))
        .and(query_param("db", "telegraf"))
        .and(body_string("cpu,host=a usage=0.5\ncpu,host=b usage=0.7"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/query"))
        .and(query_param("db", "telegraf"))
        .and(query_param("q", "SELECT usage FROM cpu"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{
                "statement_id": 0,
                "series": [{
                    "name": "cpu",
                    "columns": ["time", "usage"],
                    "values": [[1, 0.5], [2, 0.7]]
                }]
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = Client::connect(&format!("{}/?db=telegraf", server.uri())).await?;
    assert_eq!(client.transport_kind(), TransportKind::Http);
    assert!(client.supports_query());

    client
        .write_batch(["cpu,host=a usage=0.5", "cpu,host=b usage=0.7"])
        .await?;

    let series = client.query_series("SELECT usage FROM cpu").await?;
    assert_eq!(series.len(), 1);
    let usage: Vec<f64> = series[0].column("usage").filter_map(|v| v.as_f64()).collect();
    assert_eq!(usage, vec![0.5, 0.7]);

    let stats = client.stats();
    assert_eq!(stats.payloads_sent, 1);
    assert_eq!(stats.queries, 1);
    Ok(())
}

#[tokio::test]
async fn test_http_base_path_and_credentials() -> Result<()> {
    let server = MockServer::start().await;
    let authority = server.uri().trim_start_matches("http://").to_owned();

    Mock::given(method("POST"))
        .and(path("/influx/write"))
        .and(header("authorization", "Basic YWRtaW46c2VjcmV0"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = Client::connect(&format!("http://admin:secret@{}/influx", authority)).await?;
    client.write("disk free=1i").await?;
    Ok(())
}

#[tokio::test]
async fn test_http_encoded_base_path() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/a%3Fb/write"))
        .and(query_param("db", "ops"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = Client::connect(&format!("{}/a%3Fb?db=ops", server.uri())).await?;
    client.write("disk free=1i").await?;
    Ok(())
}

#[tokio::test]
async fn test_http_error_status_keeps_batch() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/write"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({"error": "unable to parse 'bad line'"})),
        )
        .mount(&server)
        .await;

    let mut client = Client::builder()
        .url(format!("{}/?db=telegraf", server.uri()))
        .timeout(Duration::from_secs(5))
        .batch_size(10)
        .build()
        .await?;

    client.write("bad line").await?;
    let err = client.flush().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert_eq!(err.status(), Some(400));
    assert!(err.message().contains("unable to parse"));
    assert_eq!(client.buffered(), 1);
    assert_eq!(client.stats().failures, 1);
    Ok(())
}

#[tokio::test]
async fn test_http_statement_error() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"statement_id": 0, "error": "database not found: nope"}]
        })))
        .mount(&server)
        .await;

    let client = Client::connect(&format!("{}/?db=nope", server.uri())).await?;
    let err = client.query_series("SHOW MEASUREMENTS").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert!(err.message().contains("database not found"));
    Ok(())
}

#[tokio::test]
async fn test_udp_client_batches() -> Result<()> {
    init_tracing();
    let listener = UdpListener::bind().await?;
    let mut client = Client::builder()
        .url(listener.url()?)
        .batch_size(2)
        .build()
        .await?;
    assert!(!client.supports_query());

    client.write("a v=1").await?;
    client.write("b v=2").await?;
    assert_eq!(listener.recv().await?, "a v=1\nb v=2");

    client.write("c v=3").await?;
    client.close().await?;
    assert_eq!(listener.recv().await?, "c v=3");
    Ok(())
}

#[tokio::test]
async fn test_udp_client_rejects_query() -> Result<()> {
    let listener = UdpListener::bind().await?;
    let client = Client::connect(&listener.url()?).await?;

    let err = client.query("SELECT 1").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnsupportedOperation);
    Ok(())
}

#[tokio::test]
async fn test_failed_construction_builds_nothing() {
    for url in ["nonsense", "ftp://host:1", "udp://host-only"] {
        let err = Client::connect(url).await.unwrap_err();
        assert!(err.kind().is_resolution_error(), "{url}: {err}");
    }
}

#[tokio::test]
async fn test_construct_and_drop_cycles() -> Result<()> {
    let listener = UdpListener::bind().await?;
    let url = listener.url()?;

    for i in 0..64 {
        let mut client = Client::connect(&url).await?;
        client.write(format!("loop i={}i", i)).await?;
        drop(client);
        assert_eq!(listener.recv().await?, format!("loop i={}i", i));

        let _ = Client::connect("ftp://host:1").await;
    }
    Ok(())
}

#[tokio::test]
async fn test_mock_transport_release() -> Result<()> {
    let mock = MockTransport::with_kind(TransportKind::Https);
    let probe = mock.probe();

    let mut client = Client::from_transport(Box::new(mock));
    probe.fail_next(Error::transport("connection reset"));
    assert!(client.write("x v=1").await.is_err());
    client.write("x v=2").await?;

    drop(client);
    assert!(probe.is_released());
    assert_eq!(probe.sent_lines(), vec!["x v=2"]);
    Ok(())
}
