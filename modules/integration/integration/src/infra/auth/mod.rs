//! Bearer credentials for upstream calls.

mod client_credentials;
mod error;

pub use client_credentials::ClientCredentialsTokenProvider;
pub use error::TokenError;

use async_trait::async_trait;
use integration_sdk::UpstreamApi;

use crate::secret::SecretString;

/// Supplies a bearer token for one upstream system.
///
/// Callers ask on every upstream call and never keep the token; any caching
/// is the provider's concern.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn get_token(&self, system: UpstreamApi) -> Result<SecretString, TokenError>;
}
