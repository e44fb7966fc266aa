//! Error kind enumeration for categorizing transport errors.

/// Categorization of transport and dispatch errors.
///
/// Every failure surfaced by this crate carries exactly one of these kinds,
/// so callers can `match` on it without inspecting messages.
///
/// ## Retriable vs Non-Retriable
///
/// | ErrorKind              | Retriable | Action                          |
/// |------------------------|-----------|---------------------------------|
/// | `MalformedUri`         | No        | Fix the connection string       |
/// | `UnsupportedScheme`    | No        | Use `udp`, `http`, `https`, `unix` |
/// | `Transport`            | Caller's choice | Inspect `source()` / `status()` |
/// | `UnsupportedOperation` | No        | Use a transport that supports it |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The connection string has no parseable scheme, or lacks a component
    /// the selected transport needs (host, port or socket path).
    ///
    /// **Not retriable.** Fix the connection string.
    #[error("malformed URI")]
    MalformedUri,

    /// The scheme parsed but no transport is registered for it.
    ///
    /// The offending scheme is available through
    /// [`Error::scheme()`](crate::Error::scheme).
    ///
    /// **Not retriable.**
    #[error("unsupported scheme")]
    UnsupportedScheme,

    /// An I/O failure while building a transport or during `send`/`query`.
    ///
    /// The originating cause is available through `source()`. HTTP status
    /// failures also carry [`Error::status()`](crate::Error::status).
    ///
    /// No retry happens at this layer; the caller decides.
    #[error("transport error")]
    Transport,

    /// The operation is not supported by this transport variant
    /// (e.g. `query` over UDP).
    ///
    /// **Not retriable.**
    #[error("unsupported operation")]
    UnsupportedOperation,
}

impl ErrorKind {
    /// Returns `true` if an operation failing with this kind may succeed
    /// when repeated.
    ///
    /// # Example
    ///
    /// ```rust
    /// use influxdb_transport::ErrorKind;
    ///
    /// assert!(ErrorKind::Transport.is_retriable());
    /// assert!(!ErrorKind::MalformedUri.is_retriable());
    /// ```
    #[inline]
    pub fn is_retriable(&self) -> bool {
        matches!(self, ErrorKind::Transport)
    }

    /// Returns `true` for kinds raised while resolving a connection string.
    #[inline]
    pub fn is_resolution_error(&self) -> bool {
        matches!(self, ErrorKind::MalformedUri | ErrorKind::UnsupportedScheme)
    }
}
