use thiserror::Error;

/// Errors returned while acquiring a bearer token.
///
/// No variant ever carries a client secret or token.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TokenError {
    /// The auth service could not be reached.
    #[error("Connection to {host} failed for {service}.")]
    Connection { host: String, service: String },

    /// The auth service answered 503.
    #[error("{host} is unavailable for {service}.")]
    ServiceUnavailable { host: String, service: String },

    /// The auth service rejected the client credentials (401).
    #[error("Invalid credentials used for {service}.")]
    InvalidCredentials { service: String },

    /// Any other non-success status.
    #[error("token request failed for {service}: HTTP {status}")]
    Http { service: String, status: u16 },

    /// The response body was unparseable or lacked an access token.
    #[error("invalid token response: {0}")]
    InvalidResponse(String),

    /// The auth service issued something other than a bearer token.
    #[error("unsupported token type: {0}")]
    UnsupportedTokenType(String),

    #[error("token provider config error: {0}")]
    ConfigError(String),
}
