//! Error types for transport resolution and I/O.
//!
//! A single [`Error`] type is returned by every fallible operation. Its
//! [`ErrorKind`] says which of four failure classes occurred:
//!
//! - [`ErrorKind::MalformedUri`]: the connection string could not be used
//! - [`ErrorKind::UnsupportedScheme`]: no transport registered for the scheme
//! - [`ErrorKind::Transport`]: I/O failed while building or using a transport
//! - [`ErrorKind::UnsupportedOperation`]: the transport cannot do that
//!
//! ```rust,ignore
//! match Client::connect("ftp://host:1").await {
//!     Err(e) if e.kind() == ErrorKind::UnsupportedScheme => {
//!         eprintln!("no backend for {}", e.scheme().unwrap_or_default());
//!     }
//!     other => { /* ... */ }
//! }
//! ```

#[allow(clippy::module_inception)]
mod error;
mod kind;

pub use self::error::Error;
pub use self::kind::ErrorKind;

/// A specialized `Result` type for transport operations.
pub type Result<T> = std::result::Result<T, Error>;
