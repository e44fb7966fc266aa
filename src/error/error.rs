//! Main error type for transport resolution and I/O.

use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;

use super::ErrorKind;

/// The error type for every fallible operation in this crate.
///
/// ## Error Anatomy
///
/// ```text
/// Error
/// ├── kind: ErrorKind          (category for matching)
/// ├── message: String          (human-readable description)
/// ├── scheme: Option           (offending scheme, UnsupportedScheme only)
/// ├── status: Option           (HTTP status of a failed request)
/// └── source: Option           (underlying cause)
/// ```
///
/// ## Example
///
/// ```rust
/// use influxdb_transport::{Error, ErrorKind};
///
/// fn describe(err: &Error) -> String {
///     match err.kind() {
///         ErrorKind::UnsupportedScheme => {
///             format!("no transport for {:?}", err.scheme())
///         }
///         ErrorKind::Transport => match err.status() {
///             Some(status) => format!("server answered {}", status),
///             None => "I/O failure".to_string(),
///         },
///         _ => err.to_string(),
///     }
/// }
///
/// let err = Error::unsupported_scheme("ftp");
/// assert_eq!(describe(&err), "no transport for Some(\"ftp\")");
/// ```
#[derive(Debug)]
pub struct Error {
    /// The error category.
    kind: ErrorKind,

    /// Human-readable error message.
    message: Cow<'static, str>,

    /// The scheme that had no registered transport.
    scheme: Option<String>,

    /// HTTP status code of a failed request.
    status: Option<u16>,

    /// The underlying error, if any.
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

impl Error {
    /// Creates a new error with the given kind and message.
    ///
    /// # Example
    ///
    /// ```rust
    /// use influxdb_transport::{Error, ErrorKind};
    ///
    /// let err = Error::new(ErrorKind::MalformedUri, "missing host");
    /// assert_eq!(err.kind(), ErrorKind::MalformedUri);
    /// ```
    pub fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
            scheme: None,
            status: None,
            source: None,
        }
    }

    /// Creates an error from a kind with a default message.
    pub fn from_kind(kind: ErrorKind) -> Self {
        let message = match kind {
            ErrorKind::MalformedUri => "ill-formed URI",
            ErrorKind::UnsupportedScheme => "unrecognized backend",
            ErrorKind::Transport => "transport failure",
            ErrorKind::UnsupportedOperation => "operation not supported by this transport",
        };
        Self::new(kind, message)
    }

    /// Returns the error kind for categorization.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the human-readable message without the kind prefix.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the scheme that could not be dispatched.
    ///
    /// Only set on [`ErrorKind::UnsupportedScheme`] errors.
    #[inline]
    pub fn scheme(&self) -> Option<&str> {
        self.scheme.as_deref()
    }

    /// Returns the HTTP status code of a failed request, if any.
    #[inline]
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// Returns `true` if the failed operation may succeed when repeated.
    ///
    /// Equivalent to `self.kind().is_retriable()`.
    #[inline]
    pub fn is_retriable(&self) -> bool {
        self.kind.is_retriable()
    }

    /// Sets the HTTP status for this error.
    #[must_use]
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the source error for this error.
    #[must_use]
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    // Convenience constructors

    /// Creates a malformed URI error.
    pub fn malformed_uri(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::MalformedUri, message)
    }

    /// Creates an unsupported scheme error naming `scheme`.
    pub fn unsupported_scheme(scheme: impl Into<String>) -> Self {
        let scheme = scheme.into();
        let mut err = Self::new(
            ErrorKind::UnsupportedScheme,
            format!("unrecognized backend {}", scheme),
        );
        err.scheme = Some(scheme);
        err
    }

    /// Creates a transport error.
    pub fn transport(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Transport, message)
    }

    /// Creates an unsupported operation error.
    pub fn unsupported_operation(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::UnsupportedOperation, message)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)?;

        if let Some(ref scheme) = self.scheme {
            write!(f, " (scheme: {})", scheme)?;
        }
        if let Some(status) = self.status {
            write!(f, " (status: {})", status)?;
        }

        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Self::from_kind(kind)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::transport(err.to_string()).with_source(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::transport(format!("invalid JSON response: {}", err)).with_source(err)
    }
}

#[cfg(feature = "http")]
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            format!("request timed out: {}", err)
        } else if err.is_connect() {
            format!("connection failed: {}", err)
        } else {
            format!("HTTP error: {}", err)
        };
        let status = err.status().map(|s| s.as_u16());
        let mut mapped = Error::transport(message);
        mapped.status = status;
        mapped.with_source(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_new() {
        let err = Error::new(ErrorKind::Transport, "socket closed");
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert_eq!(err.message(), "socket closed");
        assert!(err.scheme().is_none());
        assert!(err.status().is_none());
    }

    #[test]
    fn test_error_from_kind() {
        let err = Error::from_kind(ErrorKind::MalformedUri);
        assert_eq!(err.kind(), ErrorKind::MalformedUri);
        assert!(err.to_string().contains("ill-formed URI"));
    }

    #[test]
    fn test_unsupported_scheme_carries_scheme() {
        let err = Error::unsupported_scheme("ftp");
        assert_eq!(err.kind(), ErrorKind::UnsupportedScheme);
        assert_eq!(err.scheme(), Some("ftp"));
        assert!(err.to_string().contains("ftp"));
    }

    #[test]
    fn test_error_with_status() {
        let err = Error::transport("write rejected").with_status(400);
        assert_eq!(err.status(), Some(400));
        assert!(err.to_string().contains("(status: 400)"));
    }

    #[test]
    fn test_error_with_source() {
        let io_err = std::io::Error::other("underlying error");
        let err = Error::transport("send failed").with_source(io_err);
        assert!(err.source().is_some());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err: Error = io_err.into();
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert!(err.source().is_some());
        assert!(err.is_retriable());
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = json_err.into();
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert!(err.message().contains("invalid JSON"));
    }

    #[test]
    fn test_from_error_kind() {
        let err: Error = ErrorKind::UnsupportedOperation.into();
        assert_eq!(err.kind(), ErrorKind::UnsupportedOperation);
        assert!(!err.is_retriable());
    }

    #[test]
    fn test_convenience_constructors() {
        assert_eq!(Error::malformed_uri("x").kind(), ErrorKind::MalformedUri);
        assert_eq!(Error::transport("x").kind(), ErrorKind::Transport);
        assert_eq!(
            Error::unsupported_operation("x").kind(),
            ErrorKind::UnsupportedOperation
        );
    }
}
