//! Integration tests for influxdb-transport.
//!
//! Everything here runs against local endpoints: loopback UDP sockets,
//! Unix datagram sockets in the temp directory, and wiremock HTTP servers.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test --test integration
//!
//! # With transport logs
//! RUST_LOG=influxdb_transport=trace cargo test --test integration -- --nocapture
//! ```

mod client_tests;
mod common;
mod factory_tests;
