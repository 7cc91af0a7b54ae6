use std::sync::Arc;

use integration_sdk::{
    ConsumerFilters, InvariantViolation, RiskCategory, UpstreamApi, UpstreamResult,
};
use tracing::instrument;

use super::{finish, settle_or_return};
use crate::domain::directory::IdentifierResolver;
use crate::domain::ports::PrisonGateway;

const OPERATION: &str = "get_risk_categories";

pub struct RiskCategoriesService {
    resolver: IdentifierResolver,
    prison: Arc<dyn PrisonGateway>,
}

impl RiskCategoriesService {
    #[must_use]
    pub fn new(resolver: IdentifierResolver, prison: Arc<dyn PrisonGateway>) -> Self {
        Self { resolver, prison }
    }

    /// # Errors
    ///
    /// Returns [`InvariantViolation`] when an upstream succeeds without data.
    #[instrument(skip(self, filters), fields(operation = OPERATION))]
    pub async fn execute(
        &self,
        hmpps_id: &str,
        filters: &ConsumerFilters,
    ) -> Result<UpstreamResult<RiskCategory>, InvariantViolation> {
        tracing::debug!("fetching risk categories");
        let nomis = settle_or_return!(
            OPERATION,
            self.resolver.nomis_number(hmpps_id, filters).await?,
            UpstreamApi::ProbationOffenderSearch
        );

        let categories = self.prison.get_risk_categories(&nomis).await;
        finish(OPERATION, categories, UpstreamApi::PrisonApi)
    }
}
