//! Probation offender search adapter.

use async_trait::async_trait;
use integration_sdk::{Identifiers, UpstreamApi, UpstreamError, UpstreamResult};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::http::UpstreamClient;
use crate::domain::directory::PersonQuery;
use crate::domain::ports::ProbationSearchGateway;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    crn: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    noms_number: Option<&'a str>,
}

impl<'a> From<&'a PersonQuery> for SearchRequest<'a> {
    fn from(query: &'a PersonQuery) -> Self {
        match query {
            PersonQuery::Crn(crn) => Self {
                crn: Some(crn.as_str()),
                noms_number: None,
            },
            PersonQuery::Nomis(nomis) => Self {
                crn: None,
                noms_number: Some(nomis.as_str()),
            },
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct OffenderDto {
    #[serde(default)]
    other_ids: OtherIdsDto,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct OtherIdsDto {
    crn: Option<String>,
    noms_number: Option<String>,
}

pub struct ProbationOffenderSearchGateway {
    client: UpstreamClient,
}

impl ProbationOffenderSearchGateway {
    #[must_use]
    pub fn new(client: UpstreamClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ProbationSearchGateway for ProbationOffenderSearchGateway {
    #[instrument(skip(self))]
    async fn find_person(&self, query: &PersonQuery) -> UpstreamResult<Identifiers> {
        let (offenders, errors) = self
            .client
            .post_json::<_, Vec<OffenderDto>>("/search", &SearchRequest::from(query))
            .await
            .into_parts();
        if !errors.is_empty() {
            return UpstreamResult::failure(errors);
        }
        let Some(offenders) = offenders else {
            return UpstreamResult::from_parts(None, Vec::new());
        };
        match offenders.into_iter().next() {
            Some(offender) => UpstreamResult::success(Identifiers {
                nomis_number: offender.other_ids.noms_number,
                delius_crn: offender.other_ids.crn,
            }),
            None => UpstreamResult::from_error(UpstreamError::not_found(
                UpstreamApi::ProbationOffenderSearch,
            )),
        }
    }
}
