//! The [`CieloClient`] facade.

use crate::auth::Session;
use crate::clients::{
    resolve, ApiResponse, CallOptions, Endpoint, HttpClient, QueryParams, RequestDefaults,
    RequestOptions, ValidationError,
};
use crate::config::CieloConfig;

/// Client for the cielo24 API.
///
/// Owns the configuration, the [`Session`] (current credential) and the
/// transport. Every call resolves its options against the client defaults,
/// performs one round trip and returns the classified [`ApiResponse`].
///
/// Calls return `Err` only for [`ValidationError`]s, raised before any
/// network I/O. Transport and API failures are recorded on the response.
///
/// # Concurrency
///
/// `login` and `logout` mutate the session and take `&mut self`; wrap the
/// client in a lock to share it between tasks.
///
/// # Example
///
/// ```rust,ignore
/// use cielo24::{CieloClient, CieloConfig, ApiKey};
/// use cielo24::clients::{CallOptions, QueryParams};
///
/// let config = CieloConfig::builder()
///     .username("api_user")
///     .api_key(ApiKey::new("secure-key")?)
///     .sandbox(true)
///     .build();
/// let mut client = CieloClient::new(config);
///
/// client.login(QueryParams::new().with("password", "pw"), CallOptions::default()).await?;
///
/// let job = client.job_create(QueryParams::new(), CallOptions::default()).await?;
/// let job_id = job.json_str("JobId").unwrap_or_default().to_string();
/// ```
#[derive(Clone, Debug)]
pub struct CieloClient {
    config: CieloConfig,
    session: Session,
    http_client: HttpClient,
}

// Verify CieloClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<CieloClient>();
};

impl CieloClient {
    /// Creates a client, seeding the session from the configured key and token.
    #[must_use]
    pub fn new(config: CieloConfig) -> Self {
        if config.accept_invalid_certs() {
            tracing::debug!("TLS certificate verification is disabled for cielo24 API calls");
        }
        let session = Session::new(config.api_key().cloned(), config.api_token().cloned());
        let http_client = HttpClient::new(&config);
        Self {
            config,
            session,
            http_client,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &CieloConfig {
        &self.config
    }

    /// Returns the session state.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Returns the session state for direct modification.
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Returns the transport.
    #[must_use]
    pub const fn http_client(&self) -> &HttpClient {
        &self.http_client
    }

    /// Resolves a call against this client's defaults without executing it.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if the options are malformed.
    pub fn resolve(
        &self,
        endpoint: Endpoint,
        params: QueryParams,
        options: CallOptions,
    ) -> Result<RequestOptions, ValidationError> {
        let defaults = RequestDefaults {
            base_url: self.config.base_url(),
            version: self.config.api_version(),
            credential: self.session.current_credential(),
        };
        resolve(endpoint, params, options, &defaults)
    }

    /// Calls an endpoint with explicit params and caller options.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if the options are malformed; no request
    /// is sent in that case.
    pub async fn call(
        &self,
        endpoint: Endpoint,
        params: QueryParams,
        options: CallOptions,
    ) -> Result<ApiResponse, ValidationError> {
        let request = self.resolve(endpoint, params, options)?;
        Ok(self.http_client.execute(&request).await)
    }

    /// Calls an endpoint identified by its path, e.g. `"job/list"`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownEndpoint`] if `name` is not a
    /// supported endpoint, or any error from [`call`](Self::call).
    pub async fn call_named(
        &self,
        name: &str,
        params: QueryParams,
        options: CallOptions,
    ) -> Result<ApiResponse, ValidationError> {
        let endpoint: Endpoint = name.parse()?;
        self.call(endpoint, params, options).await
    }
}

/// Fails with [`ValidationError::MissingField`] unless `field` is present.
pub(crate) fn require(params: &QueryParams, field: &'static str) -> Result<(), ValidationError> {
    if params.contains_key(field) {
        Ok(())
    } else {
        Err(ValidationError::MissingField { field })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::Query;
    use crate::config::{ApiKey, ApiToken};

    fn config() -> CieloConfig {
        CieloConfig::builder()
            .username("user")
            .api_key(ApiKey::new("key").unwrap())
            .sandbox(true)
            .build()
    }

    #[test]
    fn test_session_is_seeded_from_config() {
        let client = CieloClient::new(config());
        assert_eq!(client.session().current_credential(), Some("key"));

        let seeded = CieloConfig::builder()
            .api_key(ApiKey::new("key").unwrap())
            .api_token(ApiToken::new("token").unwrap())
            .build();
        let client = CieloClient::new(seeded);
        assert_eq!(client.session().current_credential(), Some("token"));
    }

    #[test]
    fn test_resolve_uses_session_credential_and_sandbox_url() {
        let client = CieloClient::new(config());
        let request = client
            .resolve(Endpoint::JobList, QueryParams::new(), CallOptions::default())
            .unwrap();

        assert_eq!(request.base_url.as_ref(), "https://sandbox.cielo24.com/api/");
        assert_eq!(request.query.get("api_token"), Some("key"));
    }

    #[test]
    fn test_resolve_follows_session_changes() {
        let mut client = CieloClient::new(config());
        client
            .session_mut()
            .on_login_success(ApiToken::new("fresh").unwrap());

        let request = client
            .resolve(Endpoint::JobList, QueryParams::new(), CallOptions::default())
            .unwrap();
        assert_eq!(request.query.get("api_token"), Some("fresh"));
    }

    #[test]
    fn test_require_reports_missing_field() {
        let params = QueryParams::new().with("job_id", "1");
        assert!(require(&params, "job_id").is_ok());
        assert_eq!(
            require(&params, "media_url"),
            Err(ValidationError::MissingField { field: "media_url" })
        );
    }

    #[tokio::test]
    async fn test_call_named_rejects_unknown_endpoint() {
        let client = CieloClient::new(config());
        let result = client
            .call_named("job/explode", QueryParams::new(), CallOptions::default())
            .await;
        assert!(matches!(
            result,
            Err(ValidationError::UnknownEndpoint { name }) if name == "job/explode"
        ));
    }

    #[tokio::test]
    async fn test_call_rejects_literal_query_before_sending() {
        let client = CieloClient::new(config());
        let options = CallOptions::new().query(Query::Literal("a=1".to_string()));
        let result = client
            .call(Endpoint::JobList, QueryParams::new(), options)
            .await;
        assert!(matches!(result, Err(ValidationError::QueryNotMapping)));
    }
}
