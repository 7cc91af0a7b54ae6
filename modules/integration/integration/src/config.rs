//! Configuration for the integration module.
//!
//! Layered: defaults -> YAML file (if provided) -> env (`INTEGRATION__*`, nested with `__`).

use std::collections::BTreeMap;
use std::path::Path;

use figment::Figment;
use figment::providers::{Env, Format, Yaml};
use integration_sdk::{ConsumerFilters, UpstreamApi};
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::secret::SecretString;

pub const ENV_PREFIX: &str = "INTEGRATION__";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file does not exist: {0}")]
    MissingFile(String),

    #[error("failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("invalid configuration: {0}")]
    Invalid(String),

    #[error("unknown consumer: {0}")]
    UnknownConsumer(String),
}

/// Module configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IntegrationConfig {
    pub http: HttpConfig,
    pub auth: AuthConfig,
    pub upstreams: UpstreamsConfig,
    pub logging: LoggingConfig,
    /// Named consumers and their resource scope.
    pub consumers: BTreeMap<String, ConsumerConfig>,
}

/// Timeouts applied to every outbound call, token requests included.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HttpConfig {
    pub request_timeout_ms: u64,
    pub connect_timeout_ms: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            request_timeout_ms: 10_000,
            connect_timeout_ms: 2_000,
        }
    }
}

/// Client-credentials access to the auth service.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuthConfig {
    pub base_url: String,
    pub client_id: String,
    pub client_secret: SecretString,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:9090".to_owned(),
            client_id: String::new(),
            client_secret: SecretString::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UpstreamConfig {
    pub base_url: String,
}

impl UpstreamConfig {
    fn local(port: u16) -> Self {
        Self {
            base_url: format!("http://localhost:{port}"),
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self::local(4000)
    }
}

/// One base URL per upstream system.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UpstreamsConfig {
    pub prison_api: UpstreamConfig,
    pub prisoner_offender_search: UpstreamConfig,
    pub probation_offender_search: UpstreamConfig,
    pub ndelius: UpstreamConfig,
    pub manage_pom_case: UpstreamConfig,
}

impl UpstreamsConfig {
    #[must_use]
    pub fn get(&self, system: UpstreamApi) -> &UpstreamConfig {
        match system {
            UpstreamApi::PrisonApi => &self.prison_api,
            UpstreamApi::PrisonerOffenderSearch => &self.prisoner_offender_search,
            UpstreamApi::ProbationOffenderSearch => &self.probation_offender_search,
            UpstreamApi::NDelius => &self.ndelius,
            UpstreamApi::ManagePomCase => &self.manage_pom_case,
        }
    }
}

impl Default for UpstreamsConfig {
    fn default() -> Self {
        Self {
            prison_api: UpstreamConfig::local(4000),
            prisoner_offender_search: UpstreamConfig::local(4001),
            probation_offender_search: UpstreamConfig::local(4002),
            ndelius: UpstreamConfig::local(4003),
            manage_pom_case: UpstreamConfig::local(4004),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub format: LogFormat,
    /// Default filter directive when `RUST_LOG` is unset and no `-v` is given.
    pub level: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConsumerConfig {
    /// Prison codes this consumer may access. Absent means unrestricted.
    pub prisons: Option<Vec<String>>,
}

impl ConsumerConfig {
    #[must_use]
    pub fn filters(&self) -> ConsumerFilters {
        ConsumerFilters::from_optional(self.prisons.clone())
    }
}

impl IntegrationConfig {
    /// Load the layered configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingFile`] if `path` is given but is not a
    /// file, and [`ConfigError::Load`] if a layer cannot be parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut figment = Figment::new();
        if let Some(path) = path {
            if !path.is_file() {
                return Err(ConfigError::MissingFile(path.display().to_string()));
            }
            figment = figment.merge(Yaml::file_exact(path));
        }
        figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(|e| ConfigError::Load(Box::new(e)))
    }

    /// Reject configuration the module cannot run with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.http.request_timeout_ms == 0 || self.http.connect_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "http timeouts must be greater than zero".to_owned(),
            ));
        }
        if self.auth.client_id.trim().is_empty() {
            return Err(ConfigError::Invalid("auth.client_id is required".to_owned()));
        }
        if self.auth.client_secret.is_empty() {
            return Err(ConfigError::Invalid(
                "auth.client_secret is required".to_owned(),
            ));
        }
        parse_base_url("auth.base_url", &self.auth.base_url)?;
        for system in [
            UpstreamApi::PrisonApi,
            UpstreamApi::PrisonerOffenderSearch,
            UpstreamApi::ProbationOffenderSearch,
            UpstreamApi::NDelius,
            UpstreamApi::ManagePomCase,
        ] {
            parse_base_url(system.as_str(), &self.upstreams.get(system).base_url)?;
        }
        Ok(())
    }

    /// Resolve the filters for a named consumer; no name means unrestricted.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownConsumer`] if the name is not configured.
    pub fn filters_for(&self, consumer: Option<&str>) -> Result<ConsumerFilters, ConfigError> {
        let Some(name) = consumer else {
            return Ok(ConsumerFilters::Unrestricted);
        };
        self.consumers
            .get(name)
            .map(ConsumerConfig::filters)
            .ok_or_else(|| ConfigError::UnknownConsumer(name.to_owned()))
    }
}

/// Parse an `http`/`https` base URL.
///
/// # Errors
///
/// Returns [`ConfigError::Invalid`] if the value is not an absolute HTTP URL.
pub fn parse_base_url(field: &str, value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::Invalid(format!("{field}: '{value}' is not a URL: {e}")))?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(ConfigError::Invalid(format!(
            "{field}: '{value}' must be an http(s) URL with a host"
        )));
    }
    Ok(url)
}
