//! Access-control endpoints: login, logout and key management.

use crate::api::client::{require, CieloClient};
use crate::clients::{
    ApiResponse, CallOptions, Endpoint, QueryParams, RequestBody, ValidationError,
    API_TOKEN_PARAM,
};
use crate::config::ApiToken;

/// Payload field carrying the token returned by `account/login`.
const API_TOKEN_FIELD: &str = "ApiToken";

impl CieloClient {
    /// Logs in with a `password` or `securekey`.
    ///
    /// `username` defaults to the configured user. On success the returned
    /// `ApiToken` becomes the session credential for subsequent calls.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if the options are malformed.
    pub async fn login(
        &mut self,
        mut params: QueryParams,
        options: CallOptions,
    ) -> Result<ApiResponse, ValidationError> {
        if let Some(username) = self.config().username() {
            params.insert_default("username", username);
        }

        let response = self.call(Endpoint::Login, params, options).await?;

        if response.is_ok() {
            match response.json_str(API_TOKEN_FIELD).map(ApiToken::new) {
                Some(Ok(token)) => {
                    tracing::debug!("Stored session token from cielo24 login");
                    self.session_mut().on_login_success(token);
                }
                _ => tracing::warn!("cielo24 login succeeded without an ApiToken in the response"),
            }
        }

        Ok(response)
    }

    /// Logs out, invalidating the current token.
    ///
    /// If the response carries no error the session token is cleared and
    /// later calls fall back to the configured secure key.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if the options are malformed.
    pub async fn logout(
        &mut self,
        params: QueryParams,
        options: CallOptions,
    ) -> Result<ApiResponse, ValidationError> {
        let response = self.call(Endpoint::Logout, params, options).await?;
        if response.is_ok() {
            self.session_mut().on_logout_success();
        }
        Ok(response)
    }

    /// Creates a long-lived secure key usable in place of a password.
    ///
    /// `account_id` defaults to the configured user.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if the options are malformed.
    pub async fn generate_api_key(
        &self,
        mut params: QueryParams,
        options: CallOptions,
    ) -> Result<ApiResponse, ValidationError> {
        if let Some(username) = self.config().username() {
            params.insert_default("account_id", username);
        }
        self.call(Endpoint::GenerateApiKey, params, options).await
    }

    /// Updates the account password. Requires `new_password`.
    ///
    /// The params are POSTed as a form body together with `v` and
    /// `api_token`; only the credential travels in the query string.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingField`] if `new_password` is absent.
    pub async fn update_password(
        &self,
        params: QueryParams,
        mut options: CallOptions,
    ) -> Result<ApiResponse, ValidationError> {
        require(&params, "new_password")?;

        let version = options.version.unwrap_or_else(|| self.config().api_version());
        let mut body = params.clone();
        body.insert_default("v", version.to_string());
        if let Some(credential) = self.session().current_credential() {
            body.insert_default(API_TOKEN_PARAM, credential);
        }
        options.body = Some(RequestBody::Form(body));

        let mut query = QueryParams::new();
        if let Some(token) = params.get(API_TOKEN_PARAM) {
            query.insert(API_TOKEN_PARAM, token);
        }
        self.call(Endpoint::UpdatePassword, query, options).await
    }

    /// Invalidates a secure key. `secure_key` defaults to the configured key.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if the options are malformed.
    pub async fn remove_api_key(
        &self,
        mut params: QueryParams,
        options: CallOptions,
    ) -> Result<ApiResponse, ValidationError> {
        if let Some(key) = self.session().key() {
            let key: &str = key.as_ref();
            params.insert_default("secure_key", key);
        }
        self.call(Endpoint::RemoveApiKey, params, options).await
    }
}
