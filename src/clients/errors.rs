//! Error types for cielo24 API calls.
//!
//! Calls can fail in three distinct ways:
//!
//! - [`ValidationError`]: The call was rejected before any network I/O
//!   (missing required field, malformed option, unknown endpoint). Returned
//!   as `Err` from every call method.
//! - [`TransportError`]: The network round trip itself failed.
//! - [`ApiError`]: The service answered but reported a logical failure.
//!
//! The last two are *reported*, not returned as `Err`: they are stored as a
//! [`CallError`] on the [`ApiResponse`](crate::clients::ApiResponse) so a
//! sequence of calls can continue past individual failures.
//!
//! # Example
//!
//! ```rust,ignore
//! use cielo24::clients::CallError;
//!
//! let response = client.job_info(params, CallOptions::default()).await?;
//! match response.error() {
//!     None => println!("Tasks: {:?}", response.json),
//!     Some(CallError::Api(e)) => println!("API error {}: {:?}", e.code, e.error_comment),
//!     Some(CallError::Transport(e)) => println!("Network error: {e}"),
//! }
//! ```

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Error raised before any network I/O when a call is malformed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required parameter was not supplied.
    #[error("{field} is required")]
    MissingField {
        /// Name of the missing parameter.
        field: &'static str,
    },

    /// The options bag carried a literal query string where a mapping is needed.
    #[error("The query must be a key/value mapping")]
    QueryNotMapping,

    /// The endpoint identifier is not one of the supported endpoints.
    #[error("A valid endpoint must be provided, got '{name}'")]
    UnknownEndpoint {
        /// The identifier that was provided.
        name: String,
    },

    /// `add_media` was called with neither `media_url` nor `media_path`.
    #[error("A media_url or media_path is required")]
    MissingMediaSource,

    /// The local media file cannot be read.
    #[error("Unable to read media_path '{}'", .path.display())]
    UnreadableMedia {
        /// The path that was provided.
        path: PathBuf,
    },

    /// A caller-supplied header name or value is not valid HTTP.
    #[error("Invalid HTTP header '{name}'")]
    InvalidHeader {
        /// The offending header name.
        name: String,
    },
}

/// Category of a [`TransportError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransportErrorKind {
    /// The HTTP client could not be constructed.
    ClientBuild,
    /// Connecting to the host failed (DNS, refused, TLS handshake).
    Connect,
    /// The request timed out.
    Timeout,
    /// The redirect limit was exceeded.
    Redirect,
    /// The upload file could not be opened or inspected.
    File,
    /// Reading the response body failed.
    Body,
    /// Any other request failure.
    Request,
}

impl fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::ClientBuild => "client build",
            Self::Connect => "connect",
            Self::Timeout => "timeout",
            Self::Redirect => "redirect",
            Self::File => "file",
            Self::Body => "body",
            Self::Request => "request",
        };
        f.write_str(label)
    }
}

/// The network call itself failed; no response was received.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Transport error ({kind}): {message}")]
pub struct TransportError {
    /// What stage of the round trip failed.
    pub kind: TransportErrorKind,
    /// Human-readable description from the underlying library.
    pub message: String,
}

impl TransportError {
    /// Creates a transport error of the given kind.
    #[must_use]
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Classifies a `reqwest` failure.
    #[must_use]
    pub fn from_reqwest(error: &reqwest::Error) -> Self {
        let kind = if error.is_builder() {
            TransportErrorKind::ClientBuild
        } else if error.is_timeout() {
            TransportErrorKind::Timeout
        } else if error.is_connect() {
            TransportErrorKind::Connect
        } else if error.is_redirect() {
            TransportErrorKind::Redirect
        } else if error.is_body() || error.is_decode() {
            TransportErrorKind::Body
        } else {
            TransportErrorKind::Request
        };
        Self::new(kind, error.to_string())
    }

    /// Wraps a failure to open or inspect an upload file.
    #[must_use]
    pub fn from_io(error: &std::io::Error) -> Self {
        Self::new(TransportErrorKind::File, error.to_string())
    }
}

/// The service responded but reported a logical failure.
///
/// Carries the decoded error payload verbatim. cielo24 reports errors with
/// `ErrorType` and `ErrorComment` fields, usually alongside a status >= 400
/// but sometimes with a 200.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("API error {code}: {}", describe(.error_type.as_deref(), .error_comment.as_deref()))]
pub struct ApiError {
    /// HTTP status code of the response.
    pub code: u16,
    /// The `ErrorType` field, if present.
    pub error_type: Option<String>,
    /// The `ErrorComment` field, if present.
    pub error_comment: Option<String>,
    /// The full decoded payload, if the body was JSON.
    pub payload: Option<serde_json::Value>,
}

fn describe(error_type: Option<&str>, error_comment: Option<&str>) -> String {
    match (error_type, error_comment) {
        (Some(t), Some(c)) => format!("{t}: {c}"),
        (Some(s), None) | (None, Some(s)) => s.to_string(),
        (None, None) => "no error details".to_string(),
    }
}

/// The per-call failure recorded on a response.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CallError {
    /// The network call failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The service reported an error.
    #[error(transparent)]
    Api(#[from] ApiError),
}
