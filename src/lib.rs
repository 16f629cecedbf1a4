//! # cielo24 API Rust SDK
//!
//! A Rust client for the cielo24 transcription and captioning API.
//!
//! ## Overview
//!
//! This SDK provides:
//! - Type-safe configuration via [`CieloConfig`] and [`CieloConfigBuilder`]
//! - Validated newtypes for credentials and base URLs
//! - Session handling: a login token takes precedence over the secure key
//! - An option resolver and query encoder producing one request per call
//! - An async transport supporting form, JSON and binary file bodies
//! - Response classification that catches errors reported with a 200 status
//!
//! ## Quick Start
//!
//! ```rust
//! use cielo24::{ApiKey, ApiVersion, CieloConfig};
//!
//! let config = CieloConfig::builder()
//!     .username("api_user")
//!     .api_key(ApiKey::new("your-secure-key").unwrap())
//!     .api_version(ApiVersion::V1)
//!     .sandbox(true)
//!     .build();
//!
//! assert_eq!(config.base_url().as_ref(), "https://sandbox.cielo24.com/api/");
//! ```
//!
//! ## Making Calls
//!
//! ```rust,ignore
//! use cielo24::{CieloClient, CieloConfig};
//! use cielo24::clients::{CallOptions, QueryParams};
//!
//! let mut client = CieloClient::new(config);
//! client
//!     .login(QueryParams::new().with("password", "secret"), CallOptions::new())
//!     .await?;
//!
//! let job = client.job_create(QueryParams::new(), CallOptions::new()).await?;
//! let job_id = job.json_str("JobId").unwrap_or_default().to_string();
//!
//! client
//!     .add_media(
//!         QueryParams::new()
//!             .with("job_id", job_id.as_str())
//!             .with("media_path", "/path/to/video.mp4"),
//!         CallOptions::new(),
//!     )
//!     .await?;
//!
//! let transcript = client
//!     .get_transcript(QueryParams::new().with("job_id", job_id.as_str()), CallOptions::new())
//!     .await?;
//! if let Some(error) = transcript.error() {
//!     eprintln!("Transcript failed: {error}");
//! } else {
//!     println!("{}", transcript.raw);
//! }
//! ```
//!
//! ## Errors
//!
//! Calls return `Err(ValidationError)` only when they are malformed, before
//! any network I/O. Transport failures and API errors are recorded on the
//! returned [`ApiResponse`](clients::ApiResponse) as distinct
//! [`CallError`](clients::CallError) variants.
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration and session are owned by the client
//! - **Fail-fast validation**: Newtypes validate on construction
//! - **One round trip per call**: No retries and no background tasks
//! - **Async-first**: Built on `tokio` and `reqwest`

pub mod api;
pub mod auth;
pub mod clients;
pub mod config;
pub mod error;

// Re-export public types at crate root for convenience
pub use api::CieloClient;
pub use auth::Session;
pub use config::{
    ApiKey, ApiToken, ApiVersion, BaseUrl, CieloConfig, CieloConfigBuilder, PRODUCTION_URL,
    SANDBOX_URL,
};
pub use error::ConfigError;

// Re-export client types at crate root for convenience
pub use clients::{
    ApiError, ApiResponse, CallError, CallOptions, Endpoint, HttpClient, Query, QueryParams,
    RequestBody, ResponseFormat, TransportError, ValidationError,
};
