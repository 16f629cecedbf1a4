//! HTTP client implementation for cielo24 API communication.
//!
//! This module provides the [`HttpClient`] type: it builds the request URL,
//! chooses a body strategy, performs exactly one round trip and classifies
//! the response. There is no retry.

use std::collections::HashMap;

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_LENGTH, CONTENT_TYPE};
use tokio_util::io::ReaderStream;

use crate::clients::errors::TransportError;
use crate::clients::http_request::{RequestBody, RequestOptions, ResponseFormat, TransportOptions};
use crate::clients::http_response::{classify, ApiResponse};
use crate::config::{CieloConfig, DEFAULT_MAX_REDIRECTS};

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Resolved low-level transport settings for one call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransportSettings {
    /// `User-Agent` header value.
    pub user_agent: String,
    /// Whether invalid TLS certificates are accepted.
    pub accept_invalid_certs: bool,
    /// Whether redirects are followed.
    pub follow_redirects: bool,
    /// Redirect hop limit when following.
    pub max_redirects: usize,
}

impl TransportSettings {
    /// Returns a copy with every set field of `overrides` applied.
    #[must_use]
    pub fn with_overrides(&self, overrides: &TransportOptions) -> Self {
        Self {
            user_agent: overrides
                .user_agent
                .clone()
                .unwrap_or_else(|| self.user_agent.clone()),
            accept_invalid_certs: overrides
                .accept_invalid_certs
                .unwrap_or(self.accept_invalid_certs),
            follow_redirects: overrides.follow_redirects.unwrap_or(self.follow_redirects),
            max_redirects: overrides.max_redirects.unwrap_or(self.max_redirects),
        }
    }

    fn redirect_policy(&self) -> reqwest::redirect::Policy {
        if self.follow_redirects {
            reqwest::redirect::Policy::limited(self.max_redirects)
        } else {
            reqwest::redirect::Policy::none()
        }
    }
}

impl Default for TransportSettings {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(None),
            accept_invalid_certs: true,
            follow_redirects: true,
            max_redirects: DEFAULT_MAX_REDIRECTS,
        }
    }
}

fn default_user_agent(prefix: Option<&str>) -> String {
    let prefix = prefix.map_or(String::new(), |prefix| format!("{prefix} | "));
    format!("{prefix}cielo24 API Library v{SDK_VERSION} | Rust")
}

/// Builds the request URL: `{base_url}{endpoint}?&v={version}{query}`.
///
/// The `&` directly after `?` is part of the upstream wire format.
///
/// # Example
///
/// ```rust
/// use cielo24::clients::{build_url, resolve, CallOptions, Endpoint, QueryParams, RequestDefaults};
/// use cielo24::{ApiVersion, BaseUrl};
///
/// let base_url = BaseUrl::new("https://api.cielo24.com/api/").unwrap();
/// let defaults = RequestDefaults { base_url: &base_url, version: ApiVersion::V1, credential: None };
/// let options = resolve(
///     Endpoint::JobInfo,
///     QueryParams::new().with("job_id", "42"),
///     CallOptions::default(),
///     &defaults,
/// )
/// .unwrap();
///
/// assert_eq!(build_url(&options), "https://api.cielo24.com/api/job/info?&v=1&job_id=42");
/// ```
#[must_use]
pub fn build_url(options: &RequestOptions) -> String {
    format!(
        "{}{}?&v={}{}",
        options.base_url,
        options.endpoint.path(),
        options.version,
        options.query.encode()
    )
}

/// HTTP client for cielo24 API communication.
///
/// Holds the immutable baseline transport settings. Each call merges its
/// own overrides over the baseline, so calls never affect each other.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`.
#[derive(Clone, Debug, Default)]
pub struct HttpClient {
    baseline: TransportSettings,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a client whose baseline comes from the configuration.
    #[must_use]
    pub fn new(config: &CieloConfig) -> Self {
        Self {
            baseline: TransportSettings {
                user_agent: default_user_agent(config.user_agent_prefix()),
                accept_invalid_certs: config.accept_invalid_certs(),
                follow_redirects: true,
                max_redirects: config.max_redirects(),
            },
        }
    }

    /// Creates a client with an explicit baseline.
    #[must_use]
    pub const fn with_settings(baseline: TransportSettings) -> Self {
        Self { baseline }
    }

    /// Returns the baseline transport settings.
    #[must_use]
    pub const fn baseline(&self) -> &TransportSettings {
        &self.baseline
    }

    /// Executes one call and classifies the outcome.
    ///
    /// Transport failures are recorded on the returned response rather than
    /// returned as `Err`. The per-call connection and any opened upload file
    /// are dropped before this returns, on every path.
    pub async fn execute(&self, options: &RequestOptions) -> ApiResponse {
        let url = build_url(options);
        let settings = self.baseline.with_overrides(&options.transport);

        tracing::debug!(
            endpoint = %options.endpoint,
            body = options.body.as_ref().map_or("none", RequestBody::kind),
            "Calling cielo24 API"
        );

        let response = match Self::send(&url, options, &settings).await {
            Ok(response) => response,
            Err(error) => {
                tracing::warn!(
                    "Request to cielo24 API at {} failed: {}",
                    options.endpoint,
                    error
                );
                return ApiResponse::transport_failure(error, options.response_format);
            }
        };

        let code = response.status().as_u16();
        let headers = Self::parse_response_headers(response.headers());
        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(error) => {
                return ApiResponse::transport_failure(
                    TransportError::from_reqwest(&error),
                    options.response_format,
                );
            }
        };

        let raw = String::from_utf8_lossy(&bytes).into_owned();
        let json = Self::decode_json(&raw, options);

        classify(
            ApiResponse::new(code, headers, raw, json, options.response_format).with_bytes(bytes),
        )
    }

    async fn send(
        url: &str,
        options: &RequestOptions,
        settings: &TransportSettings,
    ) -> Result<reqwest::Response, TransportError> {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .user_agent(settings.user_agent.as_str())
            .danger_accept_invalid_certs(settings.accept_invalid_certs)
            .redirect(settings.redirect_policy())
            .build()
            .map_err(|e| TransportError::from_reqwest(&e))?;

        let mut headers = options.headers.clone();
        let request = match &options.body {
            None => client.get(url),
            Some(RequestBody::Form(params)) => {
                Self::set_content_type(&mut headers, &options.content_type);
                client.post(url).body(params.to_form_body())
            }
            Some(RequestBody::Json(value)) => {
                Self::set_content_type(&mut headers, &options.content_type);
                client.post(url).body(value.to_string())
            }
            Some(RequestBody::File(path)) => {
                let file = tokio::fs::File::open(path)
                    .await
                    .map_err(|e| TransportError::from_io(&e))?;
                let length = file
                    .metadata()
                    .await
                    .map_err(|e| TransportError::from_io(&e))?
                    .len();
                headers.insert(CONTENT_LENGTH, HeaderValue::from(length));
                client
                    .post(url)
                    .body(reqwest::Body::wrap_stream(ReaderStream::new(file)))
            }
        };

        request
            .headers(headers)
            .send()
            .await
            .map_err(|e| TransportError::from_reqwest(&e))
    }

    /// Sets `Content-Type` unless the caller already supplied one.
    fn set_content_type(headers: &mut HeaderMap, content_type: &str) {
        if headers.contains_key(CONTENT_TYPE) {
            return;
        }
        if let Ok(value) = HeaderValue::from_str(content_type) {
            headers.insert(CONTENT_TYPE, value);
        } else {
            tracing::warn!("Ignoring invalid content type {:?}", content_type);
        }
    }

    /// Decodes the body as JSON; failures yield `None`.
    ///
    /// Plain text is expected in raw mode, so only JSON-mode failures warn.
    fn decode_json(raw: &str, options: &RequestOptions) -> Option<serde_json::Value> {
        if raw.trim().is_empty() {
            return None;
        }
        match serde_json::from_str(raw) {
            Ok(json) => Some(json),
            Err(_) if options.response_format == ResponseFormat::Raw => None,
            Err(error) => {
                tracing::warn!(
                    "Response from cielo24 API at {} is not valid JSON: {}",
                    options.endpoint,
                    error
                );
                None
            }
        }
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(headers: &HeaderMap) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}
