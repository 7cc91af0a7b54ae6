use std::sync::Arc;

use integration_sdk::{
    CommunityOffenderManager, ConsumerFilters, DeliusCrn, InvariantViolation, NomisNumber,
    PersonResponsibleOfficer, PrisonOffenderManager, UpstreamApi, UpstreamResult,
};
use tracing::instrument;

use super::{finish, settle_or_return};
use crate::domain::directory::IdentifierResolver;
use crate::domain::ports::{CommunityCaseGateway, PomAllocationGateway};

const OPERATION: &str = "get_person_responsible_officer";

pub struct ResponsibleOfficerService {
    resolver: IdentifierResolver,
    pom: Arc<dyn PomAllocationGateway>,
    community: Arc<dyn CommunityCaseGateway>,
}

impl ResponsibleOfficerService {
    #[must_use]
    pub fn new(
        resolver: IdentifierResolver,
        pom: Arc<dyn PomAllocationGateway>,
        community: Arc<dyn CommunityCaseGateway>,
    ) -> Self {
        Self {
            resolver,
            pom,
            community,
        }
    }

    /// A person never held in custody has no allocation to look up.
    async fn prison_leg(&self, nomis: Option<String>) -> UpstreamResult<PrisonOffenderManager> {
        match nomis {
            Some(nomis) => self.pom.get_primary_pom(&NomisNumber(nomis)).await,
            None => UpstreamResult::success(PrisonOffenderManager::default()),
        }
    }

    /// A person without a probation case has no community manager.
    async fn community_leg(&self, crn: Option<String>) -> UpstreamResult<CommunityOffenderManager> {
        match crn {
            Some(crn) => {
                self.community
                    .get_community_offender_manager(&DeliusCrn(crn))
                    .await
            }
            None => UpstreamResult::success(CommunityOffenderManager::default()),
        }
    }

    /// Both officers, fetched concurrently; prison leg errors come first.
    /// A leg whose identifier the person lacks is skipped and reported empty.
    ///
    /// # Errors
    ///
    /// Returns [`InvariantViolation`] when an upstream succeeds without data.
    #[instrument(skip(self, filters), fields(operation = OPERATION))]
    pub async fn execute(
        &self,
        hmpps_id: &str,
        filters: &ConsumerFilters,
    ) -> Result<UpstreamResult<PersonResponsibleOfficer>, InvariantViolation> {
        let identifiers = settle_or_return!(
            OPERATION,
            self.resolver.identifiers(hmpps_id, filters).await?,
            UpstreamApi::ProbationOffenderSearch
        );

        tracing::debug!(
            has_nomis = identifiers.nomis_number.is_some(),
            has_crn = identifiers.delius_crn.is_some(),
            "fetching prison and community officers"
        );
        let (prison, community) = futures::join!(
            self.prison_leg(identifiers.nomis_number),
            self.community_leg(identifiers.delius_crn)
        );

        // Only consulted when both legs are error-free and one lacks data.
        let empty_leg = if prison.data().is_none() {
            UpstreamApi::ManagePomCase
        } else {
            UpstreamApi::NDelius
        };

        let merged = prison.zip(community).map(|(prison, community)| PersonResponsibleOfficer {
            prison_offender_manager: prison,
            community_offender_manager: community,
        });
        finish(OPERATION, merged, empty_leg)
    }
}
