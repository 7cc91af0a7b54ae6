//! Output ports: one capability interface per upstream system.
//!
//! Every method returns an [`UpstreamResult`]; implementations must classify
//! all failures and never panic or return a bare error.

use async_trait::async_trait;
use integration_sdk::{
    CommunityOffenderManager, ConsumerFilters, DeliusCrn, Identifiers, InvariantViolation,
    NomisNumber, PrisonOffenderManager, ReasonableAdjustment, RiskCategory,
    TransactionTransferRequest, UpstreamResult,
};

use super::directory::PersonQuery;
use super::models::{Booking, LedgerTransfer, Prisoner};

/// Custodial records and the prisoner financial ledger.
#[async_trait]
pub trait PrisonGateway: Send + Sync {
    async fn get_risk_categories(&self, nomis: &NomisNumber) -> UpstreamResult<RiskCategory>;

    async fn get_bookings(&self, nomis: &NomisNumber) -> UpstreamResult<Vec<Booking>>;

    /// Adjustments for one booking, across every health-treatment code.
    async fn get_reasonable_adjustments(
        &self,
        booking_id: i64,
    ) -> UpstreamResult<Vec<ReasonableAdjustment>>;

    async fn post_transaction_transfer(
        &self,
        prison_id: &str,
        nomis: &NomisNumber,
        request: &TransactionTransferRequest,
    ) -> UpstreamResult<LedgerTransfer>;
}

/// Prison offender manager allocations.
#[async_trait]
pub trait PomAllocationGateway: Send + Sync {
    async fn get_primary_pom(&self, nomis: &NomisNumber) -> UpstreamResult<PrisonOffenderManager>;
}

/// Community supervision case records.
#[async_trait]
pub trait CommunityCaseGateway: Send + Sync {
    async fn get_community_offender_manager(
        &self,
        crn: &DeliusCrn,
    ) -> UpstreamResult<CommunityOffenderManager>;
}

/// Search over people known to probation.
#[async_trait]
pub trait ProbationSearchGateway: Send + Sync {
    async fn find_person(&self, query: &PersonQuery) -> UpstreamResult<Identifiers>;
}

/// Search over people in custody.
#[async_trait]
pub trait PrisonerSearchGateway: Send + Sync {
    async fn get_prisoner(&self, nomis: &NomisNumber) -> UpstreamResult<Prisoner>;
}

/// Resolves a consumer-facing person identifier, scope-checked.
///
/// A search that answers without a body is an [`InvariantViolation`]
/// naming the search that answered.
#[async_trait]
pub trait PersonDirectory: Send + Sync {
    async fn resolve(
        &self,
        hmpps_id: &str,
        filters: &ConsumerFilters,
    ) -> Result<UpstreamResult<Identifiers>, InvariantViolation>;
}
