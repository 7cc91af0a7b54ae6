//! Person directory and identifier resolution.

use std::sync::{Arc, LazyLock};

use async_trait::async_trait;
use integration_sdk::{
    ConsumerFilters, DeliusCrn, Identifiers, InvariantViolation, NomisNumber, UpstreamApi,
    UpstreamError, UpstreamResult,
};
use regex::Regex;
use tracing::instrument;

use super::ports::{PersonDirectory, PrisonerSearchGateway, ProbationSearchGateway};

#[allow(clippy::expect_used)] // good regex, it doesn't panic
static CRN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]\d{6}$").expect("static regex should not panic"));
#[allow(clippy::expect_used)] // good regex, it doesn't panic
static NOMIS_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z]\d{4}[A-Z]{2}$").expect("static regex should not panic")
});

/// A consumer-facing person identifier, classified by shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersonQuery {
    /// Probation case reference number, e.g. `X123456`.
    Crn(String),
    /// Prison number, e.g. `A1234BC`.
    Nomis(String),
}

impl PersonQuery {
    /// Returns `None` when the identifier matches neither scheme.
    #[must_use]
    pub fn parse(hmpps_id: &str) -> Option<Self> {
        if CRN_REGEX.is_match(hmpps_id) {
            Some(Self::Crn(hmpps_id.to_owned()))
        } else if NOMIS_REGEX.is_match(hmpps_id) {
            Some(Self::Nomis(hmpps_id.to_owned()))
        } else {
            None
        }
    }
}

/// [`PersonDirectory`] backed by probation offender search, with the
/// person's current prison checked against restricted filters.
pub struct SearchPersonDirectory {
    probation: Arc<dyn ProbationSearchGateway>,
    prisoners: Arc<dyn PrisonerSearchGateway>,
}

impl SearchPersonDirectory {
    #[must_use]
    pub fn new(
        probation: Arc<dyn ProbationSearchGateway>,
        prisoners: Arc<dyn PrisonerSearchGateway>,
    ) -> Self {
        Self {
            probation,
            prisoners,
        }
    }

    async fn check_scope(
        &self,
        identifiers: Identifiers,
        filters: &ConsumerFilters,
    ) -> Result<UpstreamResult<Identifiers>, InvariantViolation> {
        let Some(nomis) = identifiers.nomis_number.clone() else {
            return Ok(UpstreamResult::from_error(out_of_scope()));
        };
        let (prisoner, errors) = self
            .prisoners
            .get_prisoner(&NomisNumber(nomis))
            .await
            .into_parts();
        if !errors.is_empty() {
            return Ok(UpstreamResult::failure(errors));
        }
        let prisoner = prisoner
            .ok_or_else(|| InvariantViolation::missing_data(UpstreamApi::PrisonerOffenderSearch))?;
        if prisoner
            .prison_id
            .as_deref()
            .is_some_and(|prison| filters.allows(prison))
        {
            Ok(UpstreamResult::success(identifiers))
        } else {
            Ok(UpstreamResult::from_error(out_of_scope()))
        }
    }
}

/// Out-of-scope people look exactly like absent ones.
fn out_of_scope() -> UpstreamError {
    UpstreamError::not_found(UpstreamApi::PrisonerOffenderSearch)
}

#[async_trait]
impl PersonDirectory for SearchPersonDirectory {
    #[instrument(skip(self, filters), fields(restricted = !filters.is_unrestricted()))]
    async fn resolve(
        &self,
        hmpps_id: &str,
        filters: &ConsumerFilters,
    ) -> Result<UpstreamResult<Identifiers>, InvariantViolation> {
        let Some(query) = PersonQuery::parse(hmpps_id) else {
            return Ok(UpstreamResult::from_error(UpstreamError::bad_request(
                UpstreamApi::ProbationOffenderSearch,
                format!("Invalid HMPPS ID: {hmpps_id}"),
            )));
        };

        let (identifiers, errors) = self.probation.find_person(&query).await.into_parts();
        if !errors.is_empty() {
            return Ok(UpstreamResult::failure(errors));
        }
        let identifiers = identifiers
            .ok_or_else(|| InvariantViolation::missing_data(UpstreamApi::ProbationOffenderSearch))?;

        if filters.is_unrestricted() {
            return Ok(UpstreamResult::success(identifiers));
        }
        self.check_scope(identifiers, filters).await
    }
}

/// Narrows directory [`Identifiers`] to the identifier an operation needs.
#[derive(Clone)]
pub struct IdentifierResolver {
    directory: Arc<dyn PersonDirectory>,
}

impl IdentifierResolver {
    #[must_use]
    pub fn new(directory: Arc<dyn PersonDirectory>) -> Self {
        Self { directory }
    }

    pub async fn identifiers(
        &self,
        hmpps_id: &str,
        filters: &ConsumerFilters,
    ) -> Result<UpstreamResult<Identifiers>, InvariantViolation> {
        self.directory.resolve(hmpps_id, filters).await
    }

    pub async fn nomis_number(
        &self,
        hmpps_id: &str,
        filters: &ConsumerFilters,
    ) -> Result<UpstreamResult<NomisNumber>, InvariantViolation> {
        Ok(narrow(self.identifiers(hmpps_id, filters).await?, |ids| {
            ids.nomis_number.map(NomisNumber)
        }))
    }

    pub async fn delius_crn(
        &self,
        hmpps_id: &str,
        filters: &ConsumerFilters,
    ) -> Result<UpstreamResult<DeliusCrn>, InvariantViolation> {
        Ok(narrow(self.identifiers(hmpps_id, filters).await?, |ids| {
            ids.delius_crn.map(DeliusCrn)
        }))
    }
}

/// A resolved person lacking the requested identifier is not-found.
fn narrow<T>(
    resolved: UpstreamResult<Identifiers>,
    pick: impl FnOnce(Identifiers) -> Option<T>,
) -> UpstreamResult<T> {
    let (identifiers, errors) = resolved.into_parts();
    if !errors.is_empty() {
        return UpstreamResult::failure(errors);
    }
    match identifiers {
        Some(ids) => pick(ids).map_or_else(
            || {
                UpstreamResult::from_error(UpstreamError::not_found(
                    UpstreamApi::ProbationOffenderSearch,
                ))
            },
            UpstreamResult::success,
        ),
        None => UpstreamResult::from_parts(None, Vec::new()),
    }
}
