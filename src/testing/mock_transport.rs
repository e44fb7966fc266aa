//! In-memory transport for testing code built on [`Client`](crate::Client).

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use bytes::Bytes;
use parking_lot::{Mutex, RwLock};

use crate::Error;
use crate::transport::{Transport, TransportKind, TransportStats};

#[derive(Default)]
struct MockState {
    /// Payloads accepted by `send`.
    sent: Mutex<Vec<Bytes>>,
    /// Requests passed to `query`.
    queries: Mutex<Vec<String>>,
    /// Canned query response; `None` makes the mock send-only.
    query_response: RwLock<Option<Bytes>>,
    /// Failure returned by the next call.
    failure: Mutex<Option<Error>>,
    /// Total `send`/`query` calls, including failed ones.
    request_count: AtomicU64,
    /// Injected failures returned so far.
    failures: AtomicU64,
    released: AtomicBool,
}

/// Mock transport for testing.
///
/// Records every payload and can inject failures. Inspection happens
/// through a [`MockProbe`], which stays valid after the transport itself
/// has been moved into a client and dropped.
///
/// ## Example
///
/// ```rust
/// use influxdb_transport::Client;
/// use influxdb_transport::testing::MockTransport;
///
/// # tokio_test::block_on(async {
/// let mock = MockTransport::new();
/// let probe = mock.probe();
///
/// let mut client = Client::from_transport(Box::new(mock));
/// client.write("cpu value=1").await.unwrap();
/// assert_eq!(probe.sent_lines(), vec!["cpu value=1"]);
///
/// drop(client);
/// assert!(probe.is_released());
/// # });
/// ```
pub struct MockTransport {
    kind: TransportKind,
    state: Arc<MockState>,
}

impl MockTransport {
    /// Creates a send-only mock reporting itself as UDP.
    pub fn new() -> Self {
        Self::with_kind(TransportKind::Udp)
    }

    /// Creates a mock reporting the given kind.
    pub fn with_kind(kind: TransportKind) -> Self {
        Self {
            kind,
            state: Arc::new(MockState::default()),
        }
    }

    /// Makes the mock answer every query with `body`.
    #[must_use]
    pub fn with_query_response(self, body: impl Into<Bytes>) -> Self {
        *self.state.query_response.write() = Some(body.into());
        self
    }

    /// Returns a handle for inspecting this mock.
    pub fn probe(&self) -> MockProbe {
        MockProbe {
            state: Arc::clone(&self.state),
        }
    }

    fn take_failure(&self) -> Result<(), Error> {
        self.state.request_count.fetch_add(1, Ordering::Relaxed);
        match self.state.failure.lock().take() {
            Some(error) => {
                self.state.failures.fetch_add(1, Ordering::Relaxed);
                Err(error)
            },
            None => Ok(()),
        }
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MockTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockTransport")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

impl Drop for MockTransport {
    fn drop(&mut self) {
        self.state.released.store(true, Ordering::SeqCst);
    }
}

#[async_trait::async_trait]
impl Transport for MockTransport {
    fn kind(&self) -> TransportKind {
        self.kind
    }

    fn supports_query(&self) -> bool {
        self.state.query_response.read().is_some()
    }

    async fn send(&self, payload: &[u8]) -> Result<(), Error> {
        self.take_failure()?;
        self.state.sent.lock().push(Bytes::copy_from_slice(payload));
        Ok(())
    }

    async fn query(&self, request: &str) -> Result<Bytes, Error> {
        let Some(body) = self.state.query_response.read().clone() else {
            return Err(Error::unsupported_operation(format!(
                "{} transport does not support queries",
                self.kind
            )));
        };
        self.take_failure()?;
        self.state.queries.lock().push(request.to_owned());
        Ok(body)
    }

    fn stats(&self) -> TransportStats {
        let sent = self.state.sent.lock();
        TransportStats {
            payloads_sent: sent.len() as u64,
            bytes_sent: sent.iter().map(|p| p.len() as u64).sum(),
            queries: self.state.queries.lock().len() as u64,
            failures: self.state.failures.load(Ordering::Relaxed),
        }
    }
}

/// Inspection handle for a [`MockTransport`].
#[derive(Clone)]
pub struct MockProbe {
    state: Arc<MockState>,
}

impl MockProbe {
    /// Returns every payload sent so far.
    pub fn sent(&self) -> Vec<Bytes> {
        self.state.sent.lock().clone()
    }

    /// Returns sent payloads split into lines.
    pub fn sent_lines(&self) -> Vec<String> {
        self.state
            .sent
            .lock()
            .iter()
            .flat_map(|payload| {
                String::from_utf8_lossy(payload)
                    .lines()
                    .map(str::to_owned)
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    /// Returns every query request received so far.
    pub fn queries(&self) -> Vec<String> {
        self.state.queries.lock().clone()
    }

    /// Returns the number of `send`/`query` calls, including failed ones.
    pub fn request_count(&self) -> u64 {
        self.state.request_count.load(Ordering::Relaxed)
    }

    /// Makes the next `send` or `query` fail with `error`.
    pub fn fail_next(&self, error: Error) {
        *self.state.failure.lock() = Some(error);
    }

    /// Returns `true` once the transport has been dropped.
    pub fn is_released(&self) -> bool {
        self.state.released.load(Ordering::SeqCst)
    }
}

impl std::fmt::Debug for MockProbe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockProbe")
            .field("released", &self.is_released())
            .finish_non_exhaustive()
    }
}
