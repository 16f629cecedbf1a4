//! The option resolver: merges explicit params, caller options and client
//! defaults into one [`RequestOptions`].
//!
//! Precedence, highest first:
//!
//! 1. explicit params passed to the call
//! 2. entries already present in `CallOptions::query`
//! 3. client defaults (base URL, version, credential, content type)
//!
//! When the explicit params carry no `api_token`, the session credential is
//! injected. The resolver performs no endpoint-specific validation.

use std::collections::HashMap;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::clients::endpoint::Endpoint;
use crate::clients::errors::ValidationError;
use crate::clients::http_request::{CallOptions, RequestOptions, DEFAULT_CONTENT_TYPE};
use crate::clients::query::{Query, QueryParams};
use crate::config::{ApiVersion, BaseUrl};

/// Query parameter carrying the credential.
pub const API_TOKEN_PARAM: &str = "api_token";

/// Client-level defaults consulted by [`resolve`].
#[derive(Clone, Copy, Debug)]
pub struct RequestDefaults<'a> {
    /// Base URL selected by the test-mode flag.
    pub base_url: &'a BaseUrl,
    /// Configured API version.
    pub version: ApiVersion,
    /// Session credential (token, else key), if any.
    pub credential: Option<&'a str>,
}

/// Resolves one call into a fully-populated [`RequestOptions`].
///
/// # Errors
///
/// Returns [`ValidationError::QueryNotMapping`] if `options.query` is a
/// literal string, or [`ValidationError::InvalidHeader`] if a caller header
/// is not valid HTTP.
///
/// # Example
///
/// ```rust
/// use cielo24::clients::{resolve, CallOptions, Endpoint, QueryParams, RequestDefaults};
/// use cielo24::{ApiVersion, BaseUrl};
///
/// let base_url = BaseUrl::new("https://sandbox.cielo24.com/api/").unwrap();
/// let defaults = RequestDefaults {
///     base_url: &base_url,
///     version: ApiVersion::V1,
///     credential: None,
/// };
///
/// let options = CallOptions::new()
///     .query(QueryParams::new().with("job_id", "B").with("extra", "C"));
/// let resolved = resolve(
///     Endpoint::JobInfo,
///     QueryParams::new().with("job_id", "A"),
///     options,
///     &defaults,
/// )
/// .unwrap();
///
/// assert_eq!(resolved.query.encode(), "&job_id=A&extra=C");
/// ```
pub fn resolve(
    endpoint: Endpoint,
    mut params: QueryParams,
    options: CallOptions,
    defaults: &RequestDefaults<'_>,
) -> Result<RequestOptions, ValidationError> {
    let existing = match options.query {
        None => QueryParams::new(),
        Some(Query::Params(existing)) => existing,
        Some(Query::Literal(_)) => return Err(ValidationError::QueryNotMapping),
    };

    if !params.contains_key(API_TOKEN_PARAM) {
        if let Some(credential) = defaults.credential {
            params.insert(API_TOKEN_PARAM, credential);
        }
    }

    let headers = to_header_map(&options.headers)?;

    Ok(RequestOptions {
        endpoint,
        base_url: options
            .base_url
            .unwrap_or_else(|| defaults.base_url.clone()),
        version: options.version.unwrap_or(defaults.version),
        query: params.merged_over(existing),
        body: options.body,
        content_type: options
            .content_type
            .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string()),
        headers,
        transport: options.transport,
        response_format: options.response_format.unwrap_or_default(),
    })
}

fn to_header_map(headers: &HashMap<String, String>) -> Result<HeaderMap, ValidationError> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let invalid = || ValidationError::InvalidHeader { name: name.clone() };
        let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid())?;
        let header_value = HeaderValue::from_str(value).map_err(|_| invalid())?;
        map.insert(header_name, header_value);
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::http_request::{RequestBody, ResponseFormat, TransportOptions};
    use reqwest::header::CONTENT_TYPE;
    use serde_json::json;

    fn base_url() -> BaseUrl {
        BaseUrl::new("https://sandbox.cielo24.com/api/").unwrap()
    }

    fn defaults<'a>(base_url: &'a BaseUrl, credential: Option<&'a str>) -> RequestDefaults<'a> {
        RequestDefaults {
            base_url,
            version: ApiVersion::V1,
            credential,
        }
    }

    #[test]
    fn test_explicit_params_override_existing_query() {
        let url = base_url();
        let options =
            CallOptions::new().query(QueryParams::from([("job_id", "B"), ("extra", "C")]));
        let resolved = resolve(
            Endpoint::JobDelete,
            QueryParams::from([("job_id", "A")]),
            options,
            &defaults(&url, None),
        )
        .unwrap();

        assert_eq!(resolved.query.encode(), "&job_id=A&extra=C");
    }

    #[test]
    fn test_credential_is_injected_when_absent() {
        let url = base_url();
        let resolved = resolve(
            Endpoint::JobList,
            QueryParams::new(),
            CallOptions::default(),
            &defaults(&url, Some("session-token")),
        )
        .unwrap();

        assert_eq!(resolved.query.get(API_TOKEN_PARAM), Some("session-token"));
    }

    #[test]
    fn test_explicit_credential_is_not_replaced() {
        let url = base_url();
        let resolved = resolve(
            Endpoint::JobList,
            QueryParams::from([("api_token", "explicit")]),
            CallOptions::default(),
            &defaults(&url, Some("session-token")),
        )
        .unwrap();

        assert_eq!(resolved.query.get(API_TOKEN_PARAM), Some("explicit"));
    }

    #[test]
    fn test_injected_credential_overrides_existing_query_token() {
        let url = base_url();
        let options = CallOptions::new().query(QueryParams::from([("api_token", "stale")]));
        let resolved = resolve(
            Endpoint::JobList,
            QueryParams::new(),
            options,
            &defaults(&url, Some("fresh")),
        )
        .unwrap();

        assert_eq!(resolved.query.get(API_TOKEN_PARAM), Some("fresh"));
        assert_eq!(resolved.query.len(), 1);
    }

    #[test]
    fn test_no_credential_means_no_token_param() {
        let url = base_url();
        let resolved = resolve(
            Endpoint::Login,
            QueryParams::from([("username", "u")]),
            CallOptions::default(),
            &defaults(&url, None),
        )
        .unwrap();

        assert!(!resolved.query.contains_key(API_TOKEN_PARAM));
    }

    #[test]
    fn test_literal_query_is_rejected() {
        let url = base_url();
        let options = CallOptions::new().query(Query::Literal("job_id=1".to_string()));
        let result = resolve(
            Endpoint::JobInfo,
            QueryParams::new(),
            options,
            &defaults(&url, None),
        );

        assert!(matches!(result, Err(ValidationError::QueryNotMapping)));
    }

    #[test]
    fn test_defaults_fill_unset_fields() {
        let url = base_url();
        let resolved = resolve(
            Endpoint::JobCreate,
            QueryParams::new(),
            CallOptions::default(),
            &defaults(&url, None),
        )
        .unwrap();

        assert_eq!(resolved.endpoint, Endpoint::JobCreate);
        assert_eq!(resolved.base_url, url);
        assert_eq!(resolved.version, ApiVersion::V1);
        assert!(resolved.query.is_empty());
        assert!(resolved.body.is_none());
        assert_eq!(resolved.content_type, "text/plain");
        assert!(resolved.headers.is_empty());
        assert_eq!(resolved.transport, TransportOptions::default());
        assert_eq!(resolved.response_format, ResponseFormat::Json);
    }

    #[test]
    fn test_caller_options_override_defaults() {
        let url = base_url();
        let other = BaseUrl::new("http://localhost:9000/api/").unwrap();
        let options = CallOptions::new()
            .base_url(other.clone())
            .version(ApiVersion::new(3).unwrap())
            .body(RequestBody::Json(json!({"a": 1})))
            .content_type("application/json")
            .header("Content-Type", "application/x-custom")
            .response_format(ResponseFormat::Raw);

        let resolved = resolve(
            Endpoint::JobCreate,
            QueryParams::new(),
            options,
            &defaults(&url, None),
        )
        .unwrap();

        assert_eq!(resolved.base_url, other);
        assert_eq!(resolved.version.number(), 3);
        assert_eq!(resolved.body, Some(RequestBody::Json(json!({"a": 1}))));
        assert_eq!(resolved.content_type, "application/json");
        assert_eq!(
            resolved.headers.get(CONTENT_TYPE).unwrap(),
            "application/x-custom"
        );
        assert_eq!(resolved.response_format, ResponseFormat::Raw);
    }

    #[test]
    fn test_invalid_header_is_rejected() {
        let url = base_url();
        let options = CallOptions::new().header("Bad Header", "value");
        let result = resolve(
            Endpoint::JobList,
            QueryParams::new(),
            options,
            &defaults(&url, None),
        );

        assert!(matches!(
            result,
            Err(ValidationError::InvalidHeader { name }) if name == "Bad Header"
        ));
    }
}
