use std::sync::Arc;

use integration_sdk::{
    ConsumerFilters, InvariantViolation, TransactionTransferCreateResponse,
    TransactionTransferRequest, UpstreamApi, UpstreamError, UpstreamResult,
};
use tracing::instrument;

use super::{failed, finish, settle_or_return};
use crate::domain::access::check_prison_access;
use crate::domain::directory::IdentifierResolver;
use crate::domain::ports::PrisonGateway;

const OPERATION: &str = "post_transaction_transfer";

pub struct TransactionTransferService {
    resolver: IdentifierResolver,
    prison: Arc<dyn PrisonGateway>,
}

impl TransactionTransferService {
    #[must_use]
    pub fn new(resolver: IdentifierResolver, prison: Arc<dyn PrisonGateway>) -> Self {
        Self { resolver, prison }
    }

    /// # Errors
    ///
    /// Returns [`InvariantViolation`] when the ledger accepts the transfer
    /// without confirming it.
    #[instrument(
        skip(self, request, filters),
        fields(operation = OPERATION, client_transaction_id = %request.client_transaction_id)
    )]
    pub async fn execute(
        &self,
        prison_id: &str,
        hmpps_id: &str,
        request: &TransactionTransferRequest,
        filters: &ConsumerFilters,
    ) -> Result<UpstreamResult<TransactionTransferCreateResponse>, InvariantViolation> {
        if !request.is_supported_transfer() {
            return Ok(failed(
                OPERATION,
                vec![UpstreamError::bad_request(
                    UpstreamApi::PrisonApi,
                    "Invalid from and/or to accounts provided",
                )],
            ));
        }

        if let Err(denied) = check_prison_access(prison_id, filters, UpstreamApi::PrisonApi) {
            return Ok(failed(OPERATION, vec![denied]));
        }

        let nomis = settle_or_return!(
            OPERATION,
            self.resolver.nomis_number(hmpps_id, filters).await?,
            UpstreamApi::ProbationOffenderSearch
        );

        tracing::debug!(prison_id, "posting ledger transfer");
        let transfer = self
            .prison
            .post_transaction_transfer(prison_id, &nomis, request)
            .await
            .map(|ledger| TransactionTransferCreateResponse {
                debit_transaction_id: ledger.debit_transaction.id,
                credit_transaction_id: ledger.credit_transaction.id,
                transaction_id: ledger.transaction_id.to_string(),
            });
        finish(OPERATION, transfer, UpstreamApi::PrisonApi)
    }
}
