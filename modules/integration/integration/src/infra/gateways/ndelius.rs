//! nDelius adapter: community supervision case records.

use async_trait::async_trait;
use integration_sdk::{
    CommunityOffenderManager, DeliusCrn, PersonResponsibleOfficerName,
    PersonResponsibleOfficerTeam, UpstreamResult,
};
use serde::Deserialize;
use tracing::instrument;
use urlencoding::encode;

use super::http::UpstreamClient;
use crate::domain::ports::CommunityCaseGateway;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommunityManagerDto {
    #[serde(default)]
    name: NameDto,
    email: Option<String>,
    telephone_number: Option<String>,
    #[serde(default)]
    team: TeamDto,
}

#[derive(Deserialize, Default)]
struct NameDto {
    forename: Option<String>,
    surname: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct TeamDto {
    code: Option<String>,
    description: Option<String>,
    email: Option<String>,
    telephone_number: Option<String>,
}

impl From<CommunityManagerDto> for CommunityOffenderManager {
    fn from(dto: CommunityManagerDto) -> Self {
        Self {
            name: PersonResponsibleOfficerName {
                forename: dto.name.forename,
                surname: dto.name.surname,
            },
            email: dto.email,
            telephone_number: dto.telephone_number,
            team: PersonResponsibleOfficerTeam {
                code: dto.team.code,
                description: dto.team.description,
                email: dto.team.email,
                telephone_number: dto.team.telephone_number,
            },
        }
    }
}

pub struct NDeliusGateway {
    client: UpstreamClient,
}

impl NDeliusGateway {
    #[must_use]
    pub fn new(client: UpstreamClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CommunityCaseGateway for NDeliusGateway {
    #[instrument(skip(self))]
    async fn get_community_offender_manager(
        &self,
        crn: &DeliusCrn,
    ) -> UpstreamResult<CommunityOffenderManager> {
        let path = format!("/case/{}/community-manager", encode(crn.as_str()));
        self.client
            .get_json::<CommunityManagerDto>(&path, &[])
            .await
            .map(Into::into)
    }
}
