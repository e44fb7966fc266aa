//! Prelude module for convenient imports.
//!
//! ```rust
//! use influxdb_transport::prelude::*;
//! ```

pub use crate::{
    client::{Client, ClientBuilder},
    config::{TlsConfig, TransportConfig},
    error::{Error, ErrorKind, Result},
    transport::{Transport, TransportKind, TransportStats, resolve_transport},
    types::Series,
    uri::Descriptor,
};
