//! Upstream error taxonomy.
//!
//! Every predictable failure of an upstream call is carried as an
//! [`UpstreamError`] inside an [`UpstreamResult`](crate::UpstreamResult).
//! The only failure that leaves that channel is [`InvariantViolation`].

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Upstream systems fronted by the integration layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UpstreamApi {
    /// Custodial records and the prisoner financial ledger.
    PrisonApi,
    /// Search over people currently or previously in custody.
    PrisonerOffenderSearch,
    /// Search over people known to probation.
    ProbationOffenderSearch,
    /// Community supervision case records.
    #[serde(rename = "NDELIUS")]
    NDelius,
    /// Prison offender manager allocations.
    ManagePomCase,
}

impl UpstreamApi {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PrisonApi => "PRISON_API",
            Self::PrisonerOffenderSearch => "PRISONER_OFFENDER_SEARCH",
            Self::ProbationOffenderSearch => "PROBATION_OFFENDER_SEARCH",
            Self::NDelius => "NDELIUS",
            Self::ManagePomCase => "MANAGE_POM_CASE",
        }
    }

    /// Service name presented to the token provider when acquiring a
    /// credential for this system.
    #[must_use]
    pub fn token_service_name(self) -> &'static str {
        match self {
            Self::PrisonApi => "NOMIS",
            Self::PrisonerOffenderSearch => "Prisoner Offender Search",
            Self::ProbationOffenderSearch => "Probation Offender Search",
            Self::NDelius => "nDelius",
            Self::ManagePomCase => "ManagePOMCase",
        }
    }
}

impl fmt::Display for UpstreamApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification of an upstream failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UpstreamErrorType {
    /// Malformed or unsupported input.
    BadRequest,
    /// The resource does not exist upstream.
    NotFound,
    /// Authorization was denied.
    Forbidden,
    /// The upstream was reachable but failed (5xx).
    UpstreamUnavailable,
    /// Transport failure or an unexpected upstream shape.
    Internal,
}

impl UpstreamErrorType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BadRequest => "BAD_REQUEST",
            Self::NotFound => "NOT_FOUND",
            Self::Forbidden => "FORBIDDEN",
            Self::UpstreamUnavailable => "UPSTREAM_UNAVAILABLE",
            Self::Internal => "INTERNAL",
        }
    }

    /// Classify an upstream HTTP status.
    ///
    /// Returns `None` for statuses that are not failures. Anything above the
    /// 5xx range is treated as an unavailable upstream.
    #[must_use]
    pub fn from_upstream_status(status: u16) -> Option<Self> {
        match status {
            404 => Some(Self::NotFound),
            401 | 403 => Some(Self::Forbidden),
            400..=499 => Some(Self::BadRequest),
            500.. => Some(Self::UpstreamUnavailable),
            _ => None,
        }
    }

    /// Conventional HTTP status for a response whose first error has this type.
    #[must_use]
    pub fn status_code(self) -> u16 {
        match self {
            Self::BadRequest => 400,
            Self::NotFound => 404,
            Self::Forbidden => 403,
            Self::UpstreamUnavailable => 502,
            Self::Internal => 500,
        }
    }
}

/// A classified failure attributed to one upstream system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamError {
    pub caused_by: UpstreamApi,
    #[serde(rename = "type")]
    pub kind: UpstreamErrorType,
    /// Free text for humans; never used for control flow.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl UpstreamError {
    #[must_use]
    pub fn new(caused_by: UpstreamApi, kind: UpstreamErrorType) -> Self {
        Self {
            caused_by,
            kind,
            description: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn bad_request(caused_by: UpstreamApi, description: impl Into<String>) -> Self {
        Self::new(caused_by, UpstreamErrorType::BadRequest).with_description(description)
    }

    #[must_use]
    pub fn not_found(caused_by: UpstreamApi) -> Self {
        Self::new(caused_by, UpstreamErrorType::NotFound)
    }

    #[must_use]
    pub fn forbidden(caused_by: UpstreamApi) -> Self {
        Self::new(caused_by, UpstreamErrorType::Forbidden)
    }

    #[must_use]
    pub fn internal(caused_by: UpstreamApi, description: impl Into<String>) -> Self {
        Self::new(caused_by, UpstreamErrorType::Internal).with_description(description)
    }
}

impl fmt::Display for UpstreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} from {}", self.kind.as_str(), self.caused_by)?;
        if let Some(description) = &self.description {
            write!(f, ": {description}")?;
        }
        Ok(())
    }
}

/// An upstream reported success but the data an operation requires is absent.
///
/// This is fatal and never classified as an [`UpstreamError`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invariant violated by {system}: {message}")]
pub struct InvariantViolation {
    pub system: UpstreamApi,
    pub message: String,
}

impl InvariantViolation {
    #[must_use]
    pub fn missing_data(system: UpstreamApi) -> Self {
        Self {
            system,
            message: "No information provided by upstream system".to_owned(),
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn classifies_upstream_statuses() {
        assert_eq!(
            UpstreamErrorType::from_upstream_status(404),
            Some(UpstreamErrorType::NotFound)
        );
        assert_eq!(
            UpstreamErrorType::from_upstream_status(400),
            Some(UpstreamErrorType::BadRequest)
        );
        assert_eq!(
            UpstreamErrorType::from_upstream_status(422),
            Some(UpstreamErrorType::BadRequest)
        );
        assert_eq!(
            UpstreamErrorType::from_upstream_status(403),
            Some(UpstreamErrorType::Forbidden)
        );
        assert_eq!(
            UpstreamErrorType::from_upstream_status(503),
            Some(UpstreamErrorType::UpstreamUnavailable)
        );
        assert_eq!(UpstreamErrorType::from_upstream_status(200), None);
        assert_eq!(UpstreamErrorType::from_upstream_status(204), None);
    }

    #[test]
    fn non_standard_statuses_above_5xx_are_failures() {
        for status in [600, 799, 999] {
            assert_eq!(
                UpstreamErrorType::from_upstream_status(status),
                Some(UpstreamErrorType::UpstreamUnavailable),
                "status {status}"
            );
        }
    }

    #[test]
    fn error_serializes_with_wire_names() {
        let err = UpstreamError::bad_request(UpstreamApi::PrisonApi, "bad accounts");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "causedBy": "PRISON_API",
                "type": "BAD_REQUEST",
                "description": "bad accounts"
            })
        );
    }

    #[test]
    fn description_is_omitted_when_absent() {
        let json = serde_json::to_value(UpstreamError::not_found(UpstreamApi::NDelius)).unwrap();
        assert!(json.get("description").is_none());
    }

    #[test]
    fn invariant_violation_renders() {
        let e = InvariantViolation::missing_data(UpstreamApi::PrisonApi);
        assert_eq!(
            e.to_string(),
            "invariant violated by PRISON_API: No information provided by upstream system"
        );
    }
}
