//! Request construction and transport for cielo24 API communication.
//!
//! This module is the core of the SDK: it turns a call into one HTTP round
//! trip and classifies the result.
//!
//! # Overview
//!
//! - [`Endpoint`]: The closed set of supported endpoints
//! - [`QueryParams`], [`Query`], [`encode_query`]: Ordered parameters and the query encoder
//! - [`CallOptions`]: Caller-supplied options, every field optional
//! - [`resolve`]: The option resolver producing a [`RequestOptions`]
//! - [`build_url`]: The URL builder
//! - [`HttpClient`]: The transport executor
//! - [`ApiResponse`], [`classify`]: The response and its classifier
//! - [`ValidationError`], [`TransportError`], [`ApiError`], [`CallError`]: Error taxonomy
//!
//! # Example
//!
//! ```rust,ignore
//! use cielo24::clients::{resolve, CallOptions, Endpoint, HttpClient, QueryParams, RequestDefaults};
//!
//! let defaults = RequestDefaults {
//!     base_url: config.base_url(),
//!     version: config.api_version(),
//!     credential: session.current_credential(),
//! };
//! let options = resolve(
//!     Endpoint::JobInfo,
//!     QueryParams::new().with("job_id", "abc"),
//!     CallOptions::default(),
//!     &defaults,
//! )?;
//!
//! let response = HttpClient::new(&config).execute(&options).await;
//! if let Some(error) = response.error() {
//!     println!("Call failed: {error}");
//! }
//! ```

mod endpoint;
pub mod errors;
mod http_client;
mod http_request;
mod http_response;
mod query;
mod resolver;

pub use endpoint::Endpoint;
pub use errors::{
    ApiError, CallError, TransportError, TransportErrorKind, ValidationError,
};
pub use http_client::{build_url, HttpClient, TransportSettings, SDK_VERSION};
pub use http_request::{
    CallOptions, RequestBody, RequestOptions, ResponseFormat, TransportOptions,
    DEFAULT_CONTENT_TYPE,
};
pub use http_response::{
    classify, ApiResponse, ResponseBody, ERROR_COMMENT_FIELD, ERROR_TYPE_FIELD,
};
pub use query::{encode_query, Query, QueryParams};
pub use resolver::{resolve, RequestDefaults, API_TOKEN_PARAM};
