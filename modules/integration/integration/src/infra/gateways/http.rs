//! Shared per-call contract for every gateway adapter.

use std::sync::Arc;
use std::time::Instant;

use integration_sdk::{UpstreamApi, UpstreamError, UpstreamErrorType, UpstreamResult};
use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::instrument;
use url::Url;

use crate::infra::auth::TokenProvider;
use crate::infra::authority;

/// HTTP client bound to one upstream system.
///
/// Every call fetches a fresh bearer token, and every exit path yields an
/// [`UpstreamResult`]:
/// - token failure or transport failure: `INTERNAL`
/// - non-success status: classified by [`UpstreamErrorType::from_upstream_status`]
/// - success with an empty or `null` body: no data and no errors
/// - success with an undecodable body: `INTERNAL`
pub struct UpstreamClient {
    http: reqwest::Client,
    tokens: Arc<dyn TokenProvider>,
    system: UpstreamApi,
    base_url: String,
    host: String,
}

impl UpstreamClient {
    #[must_use]
    pub fn new(
        http: reqwest::Client,
        tokens: Arc<dyn TokenProvider>,
        system: UpstreamApi,
        base_url: &Url,
    ) -> Self {
        Self {
            http,
            tokens,
            system,
            base_url: base_url.as_str().trim_end_matches('/').to_owned(),
            host: authority(base_url),
        }
    }

    #[must_use]
    pub fn system(&self) -> UpstreamApi {
        self.system
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> UpstreamResult<T> {
        self.execute(Method::GET, path, query, None::<&()>).await
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> UpstreamResult<T>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        self.execute(Method::POST, path, &[], Some(body)).await
    }

    #[instrument(skip(self, query, body), fields(system = %self.system, status))]
    async fn execute<B, T>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&B>,
    ) -> UpstreamResult<T>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let token = match self.tokens.get_token(self.system).await {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!(error = %e, "token acquisition failed");
                return UpstreamResult::from_error(UpstreamError::internal(
                    self.system,
                    e.to_string(),
                ));
            }
        };

        let start = Instant::now();
        let url = format!("{}{path}", self.base_url);
        let mut builder = self
            .http
            .request(method, &url)
            .bearer_auth(token.expose())
            .query(query);
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    timeout = e.is_timeout(),
                    connect = e.is_connect(),
                    host = %self.host,
                    "upstream transport failure"
                );
                return UpstreamResult::from_error(UpstreamError::internal(
                    self.system,
                    format!("Connection to {} failed", self.host),
                ));
            }
        };

        let status = response.status();
        tracing::Span::current().record("status", status.as_u16());
        let duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        tracing::info!(duration_ms, "upstream call completed");

        if let Some(kind) = UpstreamErrorType::from_upstream_status(status.as_u16()) {
            return UpstreamResult::from_error(
                UpstreamError::new(self.system, kind)
                    .with_description(format!("{} responded with {status}", self.host)),
            );
        }

        match response.bytes().await {
            Ok(bytes) => decode_body(self.system, &bytes),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read upstream body");
                UpstreamResult::from_error(UpstreamError::internal(
                    self.system,
                    format!("Connection to {} failed", self.host),
                ))
            }
        }
    }
}

/// Decode a success body; empty and `null` mean "no data".
fn decode_body<T: DeserializeOwned>(system: UpstreamApi, bytes: &[u8]) -> UpstreamResult<T> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return UpstreamResult::from_parts(None, Vec::new());
    }
    match serde_json::from_slice::<Option<T>>(bytes) {
        Ok(data) => UpstreamResult::from_parts(data, Vec::new()),
        Err(e) => {
            tracing::warn!(system = %system, error = %e, "undecodable upstream body");
            UpstreamResult::from_error(UpstreamError::internal(
                system,
                format!("Unexpected response from {system}: {e}"),
            ))
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Payload {
        id: u32,
    }

    #[test]
    fn empty_and_null_bodies_carry_no_data_and_no_errors() {
        for body in [&b""[..], b"  \n", b"null"] {
            let result: UpstreamResult<Payload> = decode_body(UpstreamApi::PrisonApi, body);
            assert_eq!(result.data(), None);
            assert!(!result.has_errors());
        }
    }

    #[test]
    fn decodes_json_payload() {
        let result: UpstreamResult<Payload> = decode_body(UpstreamApi::PrisonApi, br#"{"id":7}"#);
        assert_eq!(result.data(), Some(&Payload { id: 7 }));
    }

    #[test]
    fn unexpected_shape_is_internal() {
        let result: UpstreamResult<Payload> =
            decode_body(UpstreamApi::NDelius, br#"{"unexpected":true}"#);
        assert!(result.has_error(UpstreamErrorType::Internal));
        assert_eq!(result.errors()[0].caused_by, UpstreamApi::NDelius);
    }
}
