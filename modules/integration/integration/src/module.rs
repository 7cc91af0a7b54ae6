//! Wiring: configuration in, a ready [`IntegrationApi`] out.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use integration_sdk::{IntegrationApi, UpstreamApi};

use crate::config::{IntegrationConfig, parse_base_url};
use crate::domain::IntegrationLocalClient;
use crate::domain::directory::{IdentifierResolver, SearchPersonDirectory};
use crate::domain::service::{
    ReasonableAdjustmentsService, ResponsibleOfficerService, RiskCategoriesService,
    TransactionTransferService,
};
use crate::infra::auth::{ClientCredentialsTokenProvider, TokenProvider};
use crate::infra::gateways::{
    ManagePomCaseGateway, NDeliusGateway, PrisonApiGateway, PrisonerOffenderSearchGateway,
    ProbationOffenderSearchGateway, UpstreamClient,
};

/// Build the integration client from validated configuration.
///
/// # Errors
///
/// Fails if the configuration is invalid or the HTTP client cannot be built.
pub fn build(config: &IntegrationConfig) -> anyhow::Result<Arc<dyn IntegrationApi>> {
    config.validate()?;

    let http = reqwest::Client::builder()
        .timeout(Duration::from_millis(config.http.request_timeout_ms))
        .connect_timeout(Duration::from_millis(config.http.connect_timeout_ms))
        .build()
        .context("failed to create HTTP client")?;

    let auth_url = parse_base_url("auth.base_url", &config.auth.base_url)?;
    let tokens: Arc<dyn TokenProvider> = Arc::new(ClientCredentialsTokenProvider::new(
        http.clone(),
        &auth_url,
        config.auth.client_id.clone(),
        config.auth.client_secret.clone(),
    )?);

    build_with(config, &http, &tokens)
}

/// Build against an explicit HTTP client and token provider.
///
/// # Errors
///
/// Fails if an upstream base URL does not parse.
pub fn build_with(
    config: &IntegrationConfig,
    http: &reqwest::Client,
    tokens: &Arc<dyn TokenProvider>,
) -> anyhow::Result<Arc<dyn IntegrationApi>> {
    let client = |system: UpstreamApi| -> anyhow::Result<UpstreamClient> {
        let base_url = parse_base_url(system.as_str(), &config.upstreams.get(system).base_url)?;
        Ok(UpstreamClient::new(
            http.clone(),
            Arc::clone(tokens),
            system,
            &base_url,
        ))
    };

    let prison = Arc::new(PrisonApiGateway::new(client(UpstreamApi::PrisonApi)?));
    let pom = Arc::new(ManagePomCaseGateway::new(client(UpstreamApi::ManagePomCase)?));
    let community = Arc::new(NDeliusGateway::new(client(UpstreamApi::NDelius)?));
    let directory = Arc::new(SearchPersonDirectory::new(
        Arc::new(ProbationOffenderSearchGateway::new(client(
            UpstreamApi::ProbationOffenderSearch,
        )?)),
        Arc::new(PrisonerOffenderSearchGateway::new(client(
            UpstreamApi::PrisonerOffenderSearch,
        )?)),
    ));
    let resolver = IdentifierResolver::new(directory);

    let api = IntegrationLocalClient::new(
        RiskCategoriesService::new(resolver.clone(), prison.clone()),
        ReasonableAdjustmentsService::new(resolver.clone(), prison.clone()),
        ResponsibleOfficerService::new(resolver.clone(), pom, community),
        TransactionTransferService::new(resolver, prison),
    );
    tracing::info!("integration client initialized");
    Ok(Arc::new(api))
}
