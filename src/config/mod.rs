//! Configuration types for the cielo24 API SDK.
//!
//! This module provides the configuration used to construct a
//! [`CieloClient`](crate::CieloClient).
//!
//! # Overview
//!
//! - [`CieloConfig`]: The main configuration struct holding all SDK settings
//! - [`CieloConfigBuilder`]: A builder for constructing [`CieloConfig`] instances
//! - [`ApiKey`]: A validated secure key with masked debug output
//! - [`ApiToken`]: A validated session token with masked debug output
//! - [`BaseUrl`]: A validated API base URL
//! - [`ApiVersion`]: The cielo24 API version to use
//!
//! # Example
//!
//! ```rust
//! use cielo24::{ApiKey, CieloConfig};
//!
//! let config = CieloConfig::builder()
//!     .username("api_user")
//!     .api_key(ApiKey::new("my-secure-key").unwrap())
//!     .sandbox(true)
//!     .build();
//!
//! assert_eq!(config.base_url().as_ref(), "https://sandbox.cielo24.com/api/");
//! ```

mod newtypes;
mod version;

pub use newtypes::{ApiKey, ApiToken, BaseUrl};
pub use version::ApiVersion;

/// Production API host.
pub const PRODUCTION_URL: &str = "https://api.cielo24.com/api/";

/// Sandbox (test mode) API host.
pub const SANDBOX_URL: &str = "https://sandbox.cielo24.com/api/";

/// Number of redirect hops followed by default.
pub const DEFAULT_MAX_REDIRECTS: usize = 5;

/// Configuration for the cielo24 API SDK.
///
/// # Thread Safety
///
/// `CieloConfig` is `Clone`, `Send`, and `Sync`.
///
/// # TLS Verification
///
/// The upstream hosts have historically been called with certificate
/// verification disabled, so `accept_invalid_certs` defaults to `true`.
/// Set it to `false` when targeting any other endpoint.
#[derive(Clone, Debug)]
pub struct CieloConfig {
    username: Option<String>,
    api_key: Option<ApiKey>,
    api_token: Option<ApiToken>,
    api_version: ApiVersion,
    sandbox: bool,
    production_url: BaseUrl,
    sandbox_url: BaseUrl,
    user_agent_prefix: Option<String>,
    accept_invalid_certs: bool,
    max_redirects: usize,
}

impl CieloConfig {
    /// Creates a new builder for constructing a `CieloConfig`.
    #[must_use]
    pub fn builder() -> CieloConfigBuilder {
        CieloConfigBuilder::new()
    }

    /// Returns the account username, if configured.
    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Returns the long-lived secure key, if configured.
    #[must_use]
    pub const fn api_key(&self) -> Option<&ApiKey> {
        self.api_key.as_ref()
    }

    /// Returns the pre-seeded session token, if configured.
    #[must_use]
    pub const fn api_token(&self) -> Option<&ApiToken> {
        self.api_token.as_ref()
    }

    /// Returns the API version.
    #[must_use]
    pub const fn api_version(&self) -> ApiVersion {
        self.api_version
    }

    /// Returns whether test mode (the sandbox host) is enabled.
    #[must_use]
    pub const fn is_sandbox(&self) -> bool {
        self.sandbox
    }

    /// Returns the base URL selected by the test-mode flag.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        if self.sandbox {
            &self.sandbox_url
        } else {
            &self.production_url
        }
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns whether invalid TLS certificates are accepted.
    #[must_use]
    pub const fn accept_invalid_certs(&self) -> bool {
        self.accept_invalid_certs
    }

    /// Returns the maximum number of redirects followed per call.
    #[must_use]
    pub const fn max_redirects(&self) -> usize {
        self.max_redirects
    }
}

impl Default for CieloConfig {
    fn default() -> Self {
        CieloConfigBuilder::new().build()
    }
}

// Verify CieloConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<CieloConfig>();
};

/// Builder for constructing [`CieloConfig`] instances.
///
/// # Defaults
///
/// - `api_version`: `1`
/// - `sandbox`: `false`
/// - `production_url`: [`PRODUCTION_URL`]
/// - `sandbox_url`: [`SANDBOX_URL`]
/// - `accept_invalid_certs`: `true`
/// - `max_redirects`: [`DEFAULT_MAX_REDIRECTS`]
/// - credentials and `user_agent_prefix`: `None`
#[derive(Debug, Default)]
pub struct CieloConfigBuilder {
    username: Option<String>,
    api_key: Option<ApiKey>,
    api_token: Option<ApiToken>,
    api_version: Option<ApiVersion>,
    sandbox: Option<bool>,
    production_url: Option<BaseUrl>,
    sandbox_url: Option<BaseUrl>,
    user_agent_prefix: Option<String>,
    accept_invalid_certs: Option<bool>,
    max_redirects: Option<usize>,
}

impl CieloConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the account username used by `login` and `generate_api_key`.
    #[must_use]
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Sets the long-lived secure key.
    #[must_use]
    pub fn api_key(mut self, key: ApiKey) -> Self {
        self.api_key = Some(key);
        self
    }

    /// Pre-seeds the session with an existing token.
    #[must_use]
    pub fn api_token(mut self, token: ApiToken) -> Self {
        self.api_token = Some(token);
        self
    }

    /// Sets the API version.
    #[must_use]
    pub const fn api_version(mut self, version: ApiVersion) -> Self {
        self.api_version = Some(version);
        self
    }

    /// Enables or disables test mode (the sandbox host).
    #[must_use]
    pub const fn sandbox(mut self, sandbox: bool) -> Self {
        self.sandbox = Some(sandbox);
        self
    }

    /// Overrides the production base URL.
    #[must_use]
    pub fn production_url(mut self, url: BaseUrl) -> Self {
        self.production_url = Some(url);
        self
    }

    /// Overrides the sandbox base URL.
    #[must_use]
    pub fn sandbox_url(mut self, url: BaseUrl) -> Self {
        self.sandbox_url = Some(url);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Sets whether invalid TLS certificates are accepted.
    #[must_use]
    pub const fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = Some(accept);
        self
    }

    /// Sets the maximum number of redirects followed per call.
    #[must_use]
    pub const fn max_redirects(mut self, max: usize) -> Self {
        self.max_redirects = Some(max);
        self
    }

    /// Builds the [`CieloConfig`], filling unset fields with defaults.
    ///
    /// All values are validated by their newtypes, so building cannot fail.
    #[must_use]
    pub fn build(self) -> CieloConfig {
        CieloConfig {
            username: self.username,
            api_key: self.api_key,
            api_token: self.api_token,
            api_version: self.api_version.unwrap_or_default(),
            sandbox: self.sandbox.unwrap_or(false),
            production_url: self
                .production_url
                .unwrap_or_else(|| BaseUrl::from_static(PRODUCTION_URL)),
            sandbox_url: self
                .sandbox_url
                .unwrap_or_else(|| BaseUrl::from_static(SANDBOX_URL)),
            user_agent_prefix: self.user_agent_prefix,
            accept_invalid_certs: self.accept_invalid_certs.unwrap_or(true),
            max_redirects: self.max_redirects.unwrap_or(DEFAULT_MAX_REDIRECTS),
        }
    }
}
