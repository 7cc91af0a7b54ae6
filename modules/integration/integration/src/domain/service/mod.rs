//! Orchestrators: one per API operation.
//!
//! Each runs validate -> authorize -> resolve -> call -> merge, returning as
//! soon as a stage fails so a rejected request never reaches the network.

mod reasonable_adjustments;
mod responsible_officer;
mod risk_categories;
mod transaction_transfer;

pub use reasonable_adjustments::ReasonableAdjustmentsService;
pub use responsible_officer::ResponsibleOfficerService;
pub use risk_categories::RiskCategoriesService;
pub use transaction_transfer::TransactionTransferService;

use integration_sdk::{InvariantViolation, UpstreamApi, UpstreamError, UpstreamResult};

/// Unwrap a stage result or return its errors from the enclosing orchestrator.
///
/// An error-free result without a payload is an [`InvariantViolation`].
macro_rules! settle_or_return {
    ($operation:expr, $result:expr, $system:expr) => {
        match $result.settle($system)? {
            Ok(data) => data,
            Err(errors) => return Ok($crate::domain::service::failed($operation, errors)),
        }
    };
}
pub(crate) use settle_or_return;

fn failed<T>(operation: &'static str, errors: Vec<UpstreamError>) -> UpstreamResult<T> {
    if let Some(first) = errors.first() {
        tracing::info!(
            operation,
            error_count = errors.len(),
            first_error = %first,
            "operation returned upstream errors"
        );
    }
    UpstreamResult::failure(errors)
}

/// Final stage: the merged result must carry either a payload or errors.
fn finish<T>(
    operation: &'static str,
    result: UpstreamResult<T>,
    system: UpstreamApi,
) -> Result<UpstreamResult<T>, InvariantViolation> {
    Ok(match result.settle(system)? {
        Ok(data) => UpstreamResult::success(data),
        Err(errors) => failed(operation, errors),
    })
}
