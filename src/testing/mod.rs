//! Testing utilities.
//!
//! - [`MockTransport`]: An in-memory [`Transport`](crate::Transport) that
//!   records payloads and can inject failures
//! - [`MockProbe`]: Inspects a mock after it has been handed to a client
//!
//! ## Quick Start
//!
//! ```rust
//! use influxdb_transport::{Client, Error, ErrorKind};
//! use influxdb_transport::testing::MockTransport;
//!
//! # tokio_test::block_on(async {
//! let mock = MockTransport::new();
//! let probe = mock.probe();
//! let mut client = Client::from_transport(Box::new(mock));
//!
//! probe.fail_next(Error::transport("listener down"));
//! let err = client.write("cpu value=1").await.unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::Transport);
//! # });
//! ```

mod mock_transport;

pub use mock_transport::{MockProbe, MockTransport};
