//! Consumer resource-scope authorization.

use integration_sdk::{ConsumerFilters, UpstreamApi, UpstreamError};

/// Authorize access to a resource scoped by `code` before any network call.
///
/// Out-of-scope codes always yield the same single forbidden error tagged to
/// `system`, whatever the resource's real upstream state.
///
/// # Errors
///
/// Returns a forbidden [`UpstreamError`] when the filters exclude `code`.
pub fn check_prison_access(
    code: &str,
    filters: &ConsumerFilters,
    system: UpstreamApi,
) -> Result<(), UpstreamError> {
    if filters.allows(code) {
        return Ok(());
    }
    tracing::debug!(code, system = %system, "resource outside consumer scope");
    Err(UpstreamError::forbidden(system))
}
