use async_trait::async_trait;
use integration_sdk::UpstreamApi;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::instrument;
use url::Url;

use super::{TokenError, TokenProvider};
use crate::infra::authority;
use crate::secret::SecretString;

const TOKEN_PATH: &str = "/auth/oauth/token";

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: SecretString,
    #[serde(default)]
    token_type: Option<String>,
}

/// `OAuth2` client-credentials grant against the auth service, one request
/// per token. Credentials travel in an HTTP Basic `Authorization` header.
pub struct ClientCredentialsTokenProvider {
    http: reqwest::Client,
    token_url: Url,
    host: String,
    client_id: String,
    client_secret: SecretString,
}

impl ClientCredentialsTokenProvider {
    /// # Errors
    ///
    /// Returns [`TokenError::ConfigError`] if the token URL cannot be built
    /// from `base_url`.
    pub fn new(
        http: reqwest::Client,
        base_url: &Url,
        client_id: impl Into<String>,
        client_secret: SecretString,
    ) -> Result<Self, TokenError> {
        let raw = format!("{}{TOKEN_PATH}", base_url.as_str().trim_end_matches('/'));
        let token_url = Url::parse(&raw)
            .map_err(|e| TokenError::ConfigError(format!("invalid token URL '{raw}': {e}")))?;
        Ok(Self {
            http,
            host: authority(&token_url),
            token_url,
            client_id: client_id.into(),
            client_secret,
        })
    }
}

#[async_trait]
impl TokenProvider for ClientCredentialsTokenProvider {
    #[instrument(skip(self), fields(service = system.token_service_name()))]
    async fn get_token(&self, system: UpstreamApi) -> Result<SecretString, TokenError> {
        let service = system.token_service_name();

        let response = self
            .http
            .post(self.token_url.clone())
            .query(&[("grant_type", "client_credentials")])
            .basic_auth(&self.client_id, Some(self.client_secret.expose()))
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, host = %self.host, "auth service unreachable");
                TokenError::Connection {
                    host: self.host.clone(),
                    service: service.to_owned(),
                }
            })?;

        match response.status() {
            StatusCode::SERVICE_UNAVAILABLE => {
                return Err(TokenError::ServiceUnavailable {
                    host: self.host.clone(),
                    service: service.to_owned(),
                });
            }
            StatusCode::UNAUTHORIZED => {
                return Err(TokenError::InvalidCredentials {
                    service: service.to_owned(),
                });
            }
            status if !status.is_success() => {
                return Err(TokenError::Http {
                    service: service.to_owned(),
                    status: status.as_u16(),
                });
            }
            _ => {}
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| TokenError::InvalidResponse(e.to_string()))?;

        if let Some(ref tt) = token.token_type
            && !tt.eq_ignore_ascii_case("bearer")
        {
            return Err(TokenError::UnsupportedTokenType(tt.clone()));
        }
        if token.access_token.is_empty() {
            return Err(TokenError::InvalidResponse("empty access_token".to_owned()));
        }

        tracing::debug!("token acquired");
        Ok(token.access_token)
    }
}
