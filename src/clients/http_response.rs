//! HTTP response types for the cielo24 API SDK.
//!
//! This module provides the [`ApiResponse`] type and the response
//! classifier that decides whether a call succeeded.

use std::collections::HashMap;

use bytes::Bytes;
use serde::de::DeserializeOwned;

use crate::clients::errors::{ApiError, CallError, TransportError};
use crate::clients::http_request::ResponseFormat;

/// Payload field naming the error category.
pub const ERROR_TYPE_FIELD: &str = "ErrorType";

/// Payload field carrying the human-readable error.
pub const ERROR_COMMENT_FIELD: &str = "ErrorComment";

/// The outcome of one API call.
///
/// Carries the body bytes exactly as received, their UTF-8 text, and the
/// decoded JSON when the body was JSON. The body is decoded in both response
/// formats so errors reported inside a plain-text call are still classified;
/// the format only selects the view returned by [`body`](Self::body).
/// `error` is `None` on success,
/// otherwise it holds either a transport failure or an API error; the two
/// are distinct [`CallError`] variants.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiResponse {
    /// The HTTP status code; `0` when no response was received.
    pub code: u16,
    /// Response headers, lowercased (headers may have multiple values).
    pub headers: HashMap<String, Vec<String>>,
    /// The response body exactly as received.
    pub bytes: Bytes,
    /// The response body decoded as UTF-8 text (invalid sequences replaced).
    pub raw: String,
    /// The body decoded as JSON, if it was valid JSON.
    pub json: Option<serde_json::Value>,
    /// Which view of the body the caller asked for.
    pub format: ResponseFormat,
    /// The failure recorded for this call, if any.
    pub error: Option<CallError>,
}

/// A view of the response body matching the requested [`ResponseFormat`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ResponseBody<'a> {
    /// The decoded JSON, absent if the body was not JSON.
    Json(Option<&'a serde_json::Value>),
    /// The body as text.
    Raw(&'a str),
}

impl ApiResponse {
    /// Creates a response from received data, with `bytes` taken from `raw`.
    /// The error is not yet set; pass the result through [`classify`].
    #[must_use]
    pub fn new(
        code: u16,
        headers: HashMap<String, Vec<String>>,
        raw: String,
        json: Option<serde_json::Value>,
        format: ResponseFormat,
    ) -> Self {
        Self {
            code,
            headers,
            bytes: Bytes::from(raw.clone().into_bytes()),
            raw,
            json,
            format,
            error: None,
        }
    }

    /// Creates a response for a call whose round trip failed.
    #[must_use]
    pub fn transport_failure(error: TransportError, format: ResponseFormat) -> Self {
        Self {
            code: 0,
            headers: HashMap::new(),
            bytes: Bytes::new(),
            raw: String::new(),
            json: None,
            format,
            error: Some(CallError::Transport(error)),
        }
    }

    /// Replaces the body bytes with the exact bytes received on the wire.
    #[must_use]
    pub fn with_bytes(mut self, bytes: Bytes) -> Self {
        self.bytes = bytes;
        self
    }

    /// Returns `true` if the call produced no error.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Returns the recorded error, if any.
    #[must_use]
    pub const fn error(&self) -> Option<&CallError> {
        self.error.as_ref()
    }

    /// Returns the API error, if the service reported one.
    #[must_use]
    pub const fn api_error(&self) -> Option<&ApiError> {
        match &self.error {
            Some(CallError::Api(error)) => Some(error),
            _ => None,
        }
    }

    /// Returns the transport error, if the round trip failed.
    #[must_use]
    pub const fn transport_error(&self) -> Option<&TransportError> {
        match &self.error {
            Some(CallError::Transport(error)) => Some(error),
            _ => None,
        }
    }

    /// Returns the body view selected by the call's response format.
    #[must_use]
    pub fn body(&self) -> ResponseBody<'_> {
        match self.format {
            ResponseFormat::Json => ResponseBody::Json(self.json.as_ref()),
            ResponseFormat::Raw => ResponseBody::Raw(&self.raw),
        }
    }

    /// Returns a string field from the decoded JSON payload.
    #[must_use]
    pub fn json_str(&self, field: &str) -> Option<&str> {
        self.json.as_ref()?.get(field)?.as_str()
    }

    /// Deserializes the decoded JSON payload into `T`.
    ///
    /// Returns `None` when no JSON was decoded (raw mode or a non-JSON body).
    ///
    /// # Example
    ///
    /// ```rust
    /// use cielo24::clients::{ApiResponse, ResponseFormat};
    /// use serde::Deserialize;
    /// use serde_json::json;
    /// use std::collections::HashMap;
    ///
    /// #[derive(Deserialize)]
    /// struct NewJob {
    ///     #[serde(rename = "JobId")]
    ///     job_id: String,
    /// }
    ///
    /// let payload = json!({"JobId": "abc", "TaskId": "t1"});
    /// let response = ApiResponse::new(200, HashMap::new(), payload.to_string(), Some(payload), ResponseFormat::Json);
    ///
    /// let job: NewJob = response.json_as().unwrap().unwrap();
    /// assert_eq!(job.job_id, "abc");
    /// ```
    #[must_use]
    pub fn json_as<T: DeserializeOwned>(&self) -> Option<Result<T, serde_json::Error>> {
        self.json
            .as_ref()
            .map(|json| serde_json::from_value(json.clone()))
    }

    /// Returns the first value of a response header.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }
}

/// Marks a response as an API error when warranted.
///
/// A response is an error when its status is 400 or greater, or when its
/// decoded payload carries an `ErrorType` or `ErrorComment` field (the
/// service sometimes reports errors with a 200). Transport failures are left
/// untouched.
///
/// # Example
///
/// ```rust
/// use cielo24::clients::{classify, ApiResponse, ResponseFormat};
/// use serde_json::json;
/// use std::collections::HashMap;
///
/// let payload = json!({"ErrorType": "BAD_API_TOKEN"});
/// let response = ApiResponse::new(
///     200,
///     HashMap::new(),
///     payload.to_string(),
///     Some(payload),
///     ResponseFormat::Json,
/// );
///
/// let response = classify(response);
/// assert_eq!(response.api_error().unwrap().error_type.as_deref(), Some("BAD_API_TOKEN"));
/// ```
#[must_use]
pub fn classify(mut response: ApiResponse) -> ApiResponse {
    if response.transport_error().is_some() {
        return response;
    }

    let field = |name: &str| {
        response
            .json
            .as_ref()
            .and_then(|json| json.get(name))
            .filter(|value| !value.is_null())
    };
    let error_type = field(ERROR_TYPE_FIELD);
    let error_comment = field(ERROR_COMMENT_FIELD);

    if response.code >= 400 || error_type.is_some() || error_comment.is_some() {
        let error = ApiError {
            code: response.code,
            error_type: error_type.map(value_to_string),
            error_comment: error_comment.map(value_to_string),
            payload: response.json.clone(),
        };
        tracing::debug!("Call classified as API error: {}", error);
        response.error = Some(CallError::Api(error));
    } else {
        response.error = None;
    }

    response
}

fn value_to_string(value: &serde_json::Value) -> String {
    value
        .as_str()
        .map_or_else(|| value.to_string(), ToString::to_string)
}
