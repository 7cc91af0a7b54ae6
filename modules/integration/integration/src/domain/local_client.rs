//! Local (in-process) client for the integration module.

use async_trait::async_trait;
use integration_sdk::{
    ConsumerFilters, IntegrationApi, InvariantViolation, PersonResponsibleOfficer,
    ReasonableAdjustment, RiskCategory, TransactionTransferCreateResponse,
    TransactionTransferRequest, UpstreamResult,
};

use super::service::{
    ReasonableAdjustmentsService, ResponsibleOfficerService, RiskCategoriesService,
    TransactionTransferService,
};

/// Local client dispatching each operation to its orchestrator.
pub struct IntegrationLocalClient {
    risk_categories: RiskCategoriesService,
    reasonable_adjustments: ReasonableAdjustmentsService,
    responsible_officer: ResponsibleOfficerService,
    transaction_transfer: TransactionTransferService,
}

impl IntegrationLocalClient {
    #[must_use]
    pub fn new(
        risk_categories: RiskCategoriesService,
        reasonable_adjustments: ReasonableAdjustmentsService,
        responsible_officer: ResponsibleOfficerService,
        transaction_transfer: TransactionTransferService,
    ) -> Self {
        Self {
            risk_categories,
            reasonable_adjustments,
            responsible_officer,
            transaction_transfer,
        }
    }
}

fn log_violation(op: &str, e: InvariantViolation) -> InvariantViolation {
    tracing::error!(operation = op, error = %e, "integration call aborted");
    e
}

#[async_trait]
impl IntegrationApi for IntegrationLocalClient {
    async fn get_risk_categories(
        &self,
        hmpps_id: &str,
        filters: &ConsumerFilters,
    ) -> Result<UpstreamResult<RiskCategory>, InvariantViolation> {
        self.risk_categories
            .execute(hmpps_id, filters)
            .await
            .map_err(|e| log_violation("get_risk_categories", e))
    }

    async fn get_reasonable_adjustments(
        &self,
        hmpps_id: &str,
        filters: &ConsumerFilters,
    ) -> Result<UpstreamResult<Vec<ReasonableAdjustment>>, InvariantViolation> {
        self.reasonable_adjustments
            .execute(hmpps_id, filters)
            .await
            .map_err(|e| log_violation("get_reasonable_adjustments", e))
    }

    async fn get_person_responsible_officer(
        &self,
        hmpps_id: &str,
        filters: &ConsumerFilters,
    ) -> Result<UpstreamResult<PersonResponsibleOfficer>, InvariantViolation> {
        self.responsible_officer
            .execute(hmpps_id, filters)
            .await
            .map_err(|e| log_violation("get_person_responsible_officer", e))
    }

    async fn post_transaction_transfer(
        &self,
        prison_id: &str,
        hmpps_id: &str,
        request: &TransactionTransferRequest,
        filters: &ConsumerFilters,
    ) -> Result<UpstreamResult<TransactionTransferCreateResponse>, InvariantViolation> {
        self.transaction_transfer
            .execute(prison_id, hmpps_id, request, filters)
            .await
            .map_err(|e| log_violation("post_transaction_transfer", e))
    }
}
