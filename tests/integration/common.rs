//! Shared fixtures: log setup and local listeners.

use std::{net::SocketAddr, sync::Once, time::Duration};

use anyhow::{Context, Result};
use tokio::net::UdpSocket;
use tracing_subscriber::EnvFilter;

static INIT_TRACING: Once = Once::new();

/// Installs a test subscriber honouring `RUST_LOG`.
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
            )
            .with_test_writer()
            .try_init();
    });
}

/// A UDP socket on loopback standing in for an InfluxDB UDP listener.
pub struct UdpListener {
    socket: UdpSocket,
}

impl UdpListener {
    pub async fn bind() -> Result<Self> {
        let socket = UdpSocket::bind("127.0.0.1:0")
            .await
            .context("failed to bind loopback UDP listener")?;
        Ok(Self { socket })
    }

    pub fn addr(&self) -> Result<SocketAddr> {
        Ok(self.socket.local_addr()?)
    }

    pub fn url(&self) -> Result<String> {
        Ok(format!("udp://{}", self.addr()?))
    }

    /// Receives one datagram, failing after two seconds.
    pub async fn recv(&self) -> Result<String> {
        let mut buf = vec![0u8; 65_536];
        let len = tokio::time::timeout(Duration::from_secs(2), self.socket.recv(&mut buf))
            .await
            .context("timed out waiting for datagram")??;
        Ok(String::from_utf8(buf[..len].to_vec())?)
    }
}

/// A Unix datagram socket bound to a unique path in the temp directory.
#[cfg(unix)]
pub struct UnixListener {
    socket: tokio::net::UnixDatagram,
    path: std::path::PathBuf,
}

#[cfg(unix)]
impl UnixListener {
    pub fn bind() -> Result<Self> {
        let path = std::env::temp_dir().join(format!("influx-{}.sock", uuid::Uuid::new_v4()));
        let socket = tokio::net::UnixDatagram::bind(&path)
            .with_context(|| format!("failed to bind {}", path.display()))?;
        Ok(Self { socket, path })
    }

    pub fn url(&self) -> String {
        format!("unix://{}", self.path.display())
    }

    pub async fn recv(&self) -> Result<String> {
        let mut buf = vec![0u8; 65_536];
        let len = tokio::time::timeout(Duration::from_secs(2), self.socket.recv(&mut buf))
            .await
            .context("timed out waiting for datagram")??;
        Ok(String::from_utf8(buf[..len].to_vec())?)
    }
}

#[cfg(unix)]
impl Drop for UnixListener {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}
