//! The user-facing client.
//!
//! A [`Client`] owns exactly one [`Transport`] chosen from its connection
//! string, and optionally buffers line-protocol writes into batches.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use influxdb_transport::Client;
//!
//! # async fn demo() -> Result<(), influxdb_transport::Error> {
//! let mut client = Client::connect("http://localhost:8086/?db=telegraf").await?;
//! client.write("cpu,host=a usage=0.5").await?;
//!
//! if client.supports_query() {
//!     let series = client.query_series("SELECT * FROM cpu").await?;
//!     println!("{} series", series.len());
//! }
//! client.close().await?;
//! # Ok(())
//! # }
//! ```

mod builder;

pub use builder::{ClientBuilder, HasUrl, NoUrl};

use bytes::Bytes;

use crate::{
    Error,
    transport::{Transport, TransportKind, TransportStats},
    types::{QueryResponse, Series},
};

/// Client for an InfluxDB endpoint.
///
/// Mutating methods take `&mut self`, so one client is used by one task at
/// a time. Dropping the client releases its transport; lines still buffered
/// at that point are discarded with a warning, so call [`Client::flush`] or
/// [`Client::close`] first.
pub struct Client {
    transport: Box<dyn Transport>,
    buffer: Vec<String>,
    batch_size: Option<usize>,
}

impl Client {
    /// Creates a new client builder.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use influxdb_transport::Client;
    ///
    /// # async fn demo() -> Result<(), influxdb_transport::Error> {
    /// let client = Client::builder()
    ///     .url("udp://localhost:8089")
    ///     .batch_size(100)
    ///     .build()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn builder() -> ClientBuilder<NoUrl> {
        ClientBuilder::new()
    }

    /// Connects with default settings.
    ///
    /// # Errors
    ///
    /// `MalformedUri` for an unparseable string, `UnsupportedScheme` for an
    /// unknown scheme and `Transport` when the endpoint cannot be set up.
    pub async fn connect(url: &str) -> Result<Self, Error> {
        Self::builder().url(url).build().await
    }

    /// Wraps an already constructed transport.
    pub fn from_transport(transport: Box<dyn Transport>) -> Self {
        Self {
            transport,
            buffer: Vec::new(),
            batch_size: None,
        }
    }

    /// Turns on batching: writes are buffered and sent `size` lines at a
    /// time. A size of zero is treated as one.
    pub fn batch_of(&mut self, size: usize) -> &mut Self {
        self.batch_size = Some(size.max(1));
        self
    }

    /// Returns the batch size, or `None` when writes are sent immediately.
    pub fn batch_size(&self) -> Option<usize> {
        self.batch_size
    }

    /// Writes one line-protocol line.
    pub async fn write(&mut self, line: impl Into<String>) -> Result<(), Error> {
        let line = line.into();
        match self.batch_size {
            None => self.transport.send(line.as_bytes()).await,
            Some(size) => {
                self.buffer.push(line);
                self.send_full_batches(size).await
            },
        }
    }

    /// Writes several lines.
    ///
    /// Without batching the lines travel as a single newline-joined payload.
    pub async fn write_batch<I, S>(&mut self, lines: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        match self.batch_size {
            None => {
                let lines: Vec<String> = lines.into_iter().map(Into::into).collect();
                if lines.is_empty() {
                    return Ok(());
                }
                self.transport.send(lines.join("\n").as_bytes()).await
            },
            Some(size) => {
                self.buffer.extend(lines.into_iter().map(Into::into));
                self.send_full_batches(size).await
            },
        }
    }

    /// Sends all buffered lines as one payload.
    ///
    /// On failure the lines stay buffered so the flush can be retried.
    pub async fn flush(&mut self) -> Result<(), Error> {
        if self.buffer.is_empty() {
            return Ok(());
        }

        let payload = self.buffer.join("\n");
        self.transport.send(payload.as_bytes()).await?;
        self.buffer.clear();
        Ok(())
    }

    /// Sends `size`-line payloads off the front of the buffer while a full
    /// batch is available. Lines leave the buffer only once sent.
    async fn send_full_batches(&mut self, size: usize) -> Result<(), Error> {
        while self.buffer.len() >= size {
            let payload = self.buffer[..size].join("\n");
            self.transport.send(payload.as_bytes()).await?;
            self.buffer.drain(..size);
        }
        Ok(())
    }

    /// Runs a query and returns the raw response body.
    ///
    /// # Errors
    ///
    /// `UnsupportedOperation` when the transport cannot query (see
    /// [`Client::supports_query`]).
    pub async fn query(&self, request: &str) -> Result<Bytes, Error> {
        self.transport.query(request).await
    }

    /// Runs a query and decodes the JSON response into series.
    pub async fn query_series(&self, request: &str) -> Result<Vec<Series>, Error> {
        let body = self.query(request).await?;
        QueryResponse::from_slice(&body)?.into_series()
    }

    /// Returns the kind of the owned transport.
    pub fn transport_kind(&self) -> TransportKind {
        self.transport.kind()
    }

    /// Returns `true` if [`Client::query`] can succeed on this transport.
    pub fn supports_query(&self) -> bool {
        self.transport.supports_query()
    }

    /// Returns the transport's counters.
    pub fn stats(&self) -> TransportStats {
        self.transport.stats()
    }

    /// Returns the number of lines waiting for a flush.
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Flushes pending lines and releases the transport.
    ///
    /// The transport is released even when the final flush fails.
    pub async fn close(mut self) -> Result<(), Error> {
        let result = self.flush().await;
        if result.is_err() {
            self.buffer.clear();
        }
        result
    }
}

impl Drop for Client {
    fn drop(&mut self) {
        if !self.buffer.is_empty() {
            tracing::warn!(
                lines = self.buffer.len(),
                transport = %self.transport.kind(),
                "client dropped with unflushed lines"
            );
        }
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("transport", &self.transport)
            .field("buffered", &self.buffer.len())
            .field("batch_size", &self.batch_size)
            .finish()
    }
}
