//! Public API trait for the integration module.

use async_trait::async_trait;

use crate::error::InvariantViolation;
use crate::filters::ConsumerFilters;
use crate::models::{
    PersonResponsibleOfficer, ReasonableAdjustment, RiskCategory,
    TransactionTransferCreateResponse, TransactionTransferRequest,
};
use crate::result::UpstreamResult;

/// One method per orchestrated operation.
///
/// Classified upstream failures come back inside the [`UpstreamResult`];
/// the outer `Err` is reserved for [`InvariantViolation`], which callers
/// must treat as fatal.
///
/// ```ignore
/// let result = client.get_risk_categories("A1234BC", &filters).await?;
/// if let Some(first) = result.errors().first() {
///     respond(first.kind.status_code(), &result);
/// }
/// ```
#[async_trait]
pub trait IntegrationApi: Send + Sync {
    /// Risk categories for a person in custody.
    async fn get_risk_categories(
        &self,
        hmpps_id: &str,
        filters: &ConsumerFilters,
    ) -> Result<UpstreamResult<RiskCategory>, InvariantViolation>;

    /// Reasonable adjustments across all of a person's bookings.
    async fn get_reasonable_adjustments(
        &self,
        hmpps_id: &str,
        filters: &ConsumerFilters,
    ) -> Result<UpstreamResult<Vec<ReasonableAdjustment>>, InvariantViolation>;

    /// Prison and community offender managers for a person.
    async fn get_person_responsible_officer(
        &self,
        hmpps_id: &str,
        filters: &ConsumerFilters,
    ) -> Result<UpstreamResult<PersonResponsibleOfficer>, InvariantViolation>;

    /// Move money between a prisoner's ledger accounts in a given prison.
    async fn post_transaction_transfer(
        &self,
        prison_id: &str,
        hmpps_id: &str,
        request: &TransactionTransferRequest,
        filters: &ConsumerFilters,
    ) -> Result<UpstreamResult<TransactionTransferCreateResponse>, InvariantViolation>;
}
