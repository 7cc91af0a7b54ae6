#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use httpmock::MockServer;
use integration::SecretString;
use integration::infra::auth::{TokenError, TokenProvider};
use integration::infra::gateways::UpstreamClient;
use integration_sdk::UpstreamApi;
use url::Url;

pub const TOKEN: &str = "mock-bearer-token";

/// Hands out a fixed token and records which services asked.
#[derive(Default)]
pub struct RecordingTokens {
    requests: Mutex<Vec<&'static str>>,
    fail_with: Option<String>,
}

impl RecordingTokens {
    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_owned()),
            ..Self::default()
        }
    }

    pub fn requests(&self) -> Vec<&'static str> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl TokenProvider for RecordingTokens {
    async fn get_token(&self, system: UpstreamApi) -> Result<SecretString, TokenError> {
        self.requests
            .lock()
            .unwrap()
            .push(system.token_service_name());
        match &self.fail_with {
            Some(message) => Err(TokenError::InvalidResponse(message.clone())),
            None => Ok(SecretString::new(TOKEN)),
        }
    }
}

pub fn http() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(5))
        .build()
        .unwrap()
}

pub fn upstream(
    server: &MockServer,
    system: UpstreamApi,
    tokens: &Arc<RecordingTokens>,
) -> UpstreamClient {
    let tokens: Arc<dyn TokenProvider> = tokens.clone();
    UpstreamClient::new(
        http(),
        tokens,
        system,
        &Url::parse(&server.base_url()).unwrap(),
    )
}
