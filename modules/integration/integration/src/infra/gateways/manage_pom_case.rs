//! Manage-POM-case adapter: prison offender manager allocations.

use async_trait::async_trait;
use integration_sdk::{NomisNumber, Prison, PrisonOffenderManager, UpstreamResult};
use serde::Deserialize;
use tracing::instrument;
use urlencoding::encode;

use super::http::UpstreamClient;
use crate::domain::ports::PomAllocationGateway;

#[derive(Deserialize)]
struct AllocationDto {
    #[serde(default)]
    manager: ManagerDto,
    #[serde(default)]
    prison: PrisonDto,
}

#[derive(Deserialize, Default)]
struct ManagerDto {
    forename: Option<String>,
    surname: Option<String>,
}

#[derive(Deserialize, Default)]
struct PrisonDto {
    code: Option<String>,
}

pub struct ManagePomCaseGateway {
    client: UpstreamClient,
}

impl ManagePomCaseGateway {
    #[must_use]
    pub fn new(client: UpstreamClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PomAllocationGateway for ManagePomCaseGateway {
    #[instrument(skip(self))]
    async fn get_primary_pom(&self, nomis: &NomisNumber) -> UpstreamResult<PrisonOffenderManager> {
        let path = format!("/api/allocation/{}/primary_pom", encode(nomis.as_str()));
        self.client
            .get_json::<AllocationDto>(&path, &[])
            .await
            .map(|dto| PrisonOffenderManager {
                forename: dto.manager.forename,
                surname: dto.manager.surname,
                prison: Prison {
                    code: dto.prison.code,
                },
            })
    }
}
