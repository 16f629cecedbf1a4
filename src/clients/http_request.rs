//! Request description types for the cielo24 API SDK.
//!
//! A call starts as a caller-supplied [`CallOptions`] bag (every field
//! optional) and is resolved by [`resolve`](crate::clients::resolve) into a
//! fully-populated [`RequestOptions`] that the
//! [`HttpClient`](crate::clients::HttpClient) executes.

use std::collections::HashMap;
use std::path::PathBuf;

use reqwest::header::HeaderMap;

use crate::clients::endpoint::Endpoint;
use crate::clients::query::{Query, QueryParams};
use crate::config::{ApiVersion, BaseUrl};

/// Content type used for structured bodies when the caller sets none.
pub const DEFAULT_CONTENT_TYPE: &str = "text/plain";

/// The body of a request.
///
/// A request has no body (sent as GET), a structured body (POSTed with a
/// `Content-Type`), or a local file streamed as the raw POST payload.
#[derive(Clone, Debug, PartialEq)]
pub enum RequestBody {
    /// Form-encoded key/value pairs.
    Form(QueryParams),
    /// A JSON document.
    Json(serde_json::Value),
    /// A local file uploaded as raw bytes.
    File(PathBuf),
}

impl RequestBody {
    /// Returns a short label for logging.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Form(_) => "form",
            Self::Json(_) => "json",
            Self::File(_) => "file",
        }
    }
}

/// How the response body should be surfaced to the caller.
///
/// The body is decoded leniently in both formats so error payloads are
/// still classified; the format selects the view returned by
/// [`ApiResponse::body`](crate::clients::ApiResponse::body).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ResponseFormat {
    /// The decoded JSON; a non-JSON body is logged as unexpected.
    #[default]
    Json,
    /// The body text; plain text is expected.
    Raw,
}

/// Per-call overrides for low-level transport behavior.
///
/// Unset fields fall back to the client's baseline settings.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransportOptions {
    /// Overrides the `User-Agent` header.
    pub user_agent: Option<String>,
    /// Overrides whether invalid TLS certificates are accepted.
    pub accept_invalid_certs: Option<bool>,
    /// Overrides whether redirects are followed.
    pub follow_redirects: Option<bool>,
    /// Overrides the redirect hop limit.
    pub max_redirects: Option<usize>,
}

/// Caller-supplied options for one call.
///
/// Every field is optional; the option resolver fills the rest from the
/// client's defaults.
///
/// # Example
///
/// ```rust
/// use cielo24::clients::{CallOptions, QueryParams, ResponseFormat};
///
/// let options = CallOptions::new()
///     .query(QueryParams::new().with("elementlist_version", "2"))
///     .header("X-Trace", "abc")
///     .response_format(ResponseFormat::Raw);
///
/// assert_eq!(options.headers.get("X-Trace").map(String::as_str), Some("abc"));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CallOptions {
    /// Pre-existing query entries; explicit params override them.
    pub query: Option<Query>,
    /// Overrides the base URL selected by the test-mode flag.
    pub base_url: Option<BaseUrl>,
    /// Overrides the configured API version.
    pub version: Option<ApiVersion>,
    /// The request body, if any.
    pub body: Option<RequestBody>,
    /// `Content-Type` for structured bodies.
    pub content_type: Option<String>,
    /// Extra HTTP headers.
    pub headers: HashMap<String, String>,
    /// Transport overrides.
    pub transport: TransportOptions,
    /// Raw or decoded response.
    pub response_format: Option<ResponseFormat>,
}

impl CallOptions {
    /// Creates an empty options bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the pre-existing query.
    #[must_use]
    pub fn query(mut self, query: impl Into<Query>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Overrides the base URL.
    #[must_use]
    pub fn base_url(mut self, url: BaseUrl) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Overrides the API version.
    #[must_use]
    pub const fn version(mut self, version: ApiVersion) -> Self {
        self.version = Some(version);
        self
    }

    /// Sets the request body.
    #[must_use]
    pub fn body(mut self, body: RequestBody) -> Self {
        self.body = Some(body);
        self
    }

    /// Sets the content type for structured bodies.
    #[must_use]
    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Adds a single header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Sets the transport overrides.
    #[must_use]
    pub fn transport(mut self, transport: TransportOptions) -> Self {
        self.transport = transport;
        self
    }

    /// Sets the response format.
    #[must_use]
    pub const fn response_format(mut self, format: ResponseFormat) -> Self {
        self.response_format = Some(format);
        self
    }
}

/// The fully-resolved description of one call.
#[derive(Clone, Debug)]
pub struct RequestOptions {
    /// The endpoint to call.
    pub endpoint: Endpoint,
    /// Base URL, ending with `/`.
    pub base_url: BaseUrl,
    /// API version sent as `v`.
    pub version: ApiVersion,
    /// Merged query parameters, in insertion order.
    pub query: QueryParams,
    /// The request body; `None` means a GET.
    pub body: Option<RequestBody>,
    /// `Content-Type` for structured bodies.
    pub content_type: String,
    /// Validated extra headers.
    pub headers: HeaderMap,
    /// Transport overrides, applied over the client baseline.
    pub transport: TransportOptions,
    /// Raw or decoded response.
    pub response_format: ResponseFormat,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_call_options_default_is_empty() {
        let options = CallOptions::default();
        assert!(options.query.is_none());
        assert!(options.body.is_none());
        assert!(options.headers.is_empty());
        assert_eq!(options.transport, TransportOptions::default());
        assert!(options.response_format.is_none());
    }

    #[test]
    fn test_call_options_builder_chaining() {
        let options = CallOptions::new()
            .query(QueryParams::new().with("a", "1"))
            .version(ApiVersion::new(2).unwrap())
            .body(RequestBody::Json(json!({"k": "v"})))
            .content_type("application/json")
            .header("X-One", "1")
            .header("X-Two", "2")
            .transport(TransportOptions {
                max_redirects: Some(1),
                ..TransportOptions::default()
            })
            .response_format(ResponseFormat::Raw);

        assert_eq!(
            options.query,
            Some(Query::Params(QueryParams::new().with("a", "1")))
        );
        assert_eq!(options.version.map(ApiVersion::number), Some(2));
        assert_eq!(options.content_type.as_deref(), Some("application/json"));
        assert_eq!(options.headers.len(), 2);
        assert_eq!(options.transport.max_redirects, Some(1));
        assert_eq!(options.response_format, Some(ResponseFormat::Raw));
    }

    #[test]
    fn test_body_kind_labels() {
        assert_eq!(RequestBody::Form(QueryParams::new()).kind(), "form");
        assert_eq!(RequestBody::Json(json!(null)).kind(), "json");
        assert_eq!(RequestBody::File(PathBuf::from("a.mp4")).kind(), "file");
    }

    #[test]
    fn test_response_format_defaults_to_json() {
        assert_eq!(ResponseFormat::default(), ResponseFormat::Json);
    }
}
