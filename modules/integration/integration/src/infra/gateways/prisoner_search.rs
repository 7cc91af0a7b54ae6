//! Prisoner offender search adapter.

use async_trait::async_trait;
use integration_sdk::{NomisNumber, UpstreamResult};
use serde::Deserialize;
use tracing::instrument;
use urlencoding::encode;

use super::http::UpstreamClient;
use crate::domain::models::Prisoner;
use crate::domain::ports::PrisonerSearchGateway;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PrisonerDto {
    prisoner_number: Option<String>,
    prison_id: Option<String>,
}

pub struct PrisonerOffenderSearchGateway {
    client: UpstreamClient,
}

impl PrisonerOffenderSearchGateway {
    #[must_use]
    pub fn new(client: UpstreamClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PrisonerSearchGateway for PrisonerOffenderSearchGateway {
    #[instrument(skip(self))]
    async fn get_prisoner(&self, nomis: &NomisNumber) -> UpstreamResult<Prisoner> {
        let path = format!("/prisoner/{}", encode(nomis.as_str()));
        self.client
            .get_json::<PrisonerDto>(&path, &[])
            .await
            .map(|dto| Prisoner {
                prisoner_number: dto.prisoner_number,
                prison_id: dto.prison_id,
            })
    }
}
