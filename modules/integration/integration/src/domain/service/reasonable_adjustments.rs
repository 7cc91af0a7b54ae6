use std::sync::Arc;

use futures::future::join_all;
use integration_sdk::{
    ConsumerFilters, InvariantViolation, ReasonableAdjustment, UpstreamApi, UpstreamResult,
    combine_all,
};
use tracing::instrument;

use super::{finish, settle_or_return};
use crate::domain::directory::IdentifierResolver;
use crate::domain::ports::PrisonGateway;

const OPERATION: &str = "get_reasonable_adjustments";

pub struct ReasonableAdjustmentsService {
    resolver: IdentifierResolver,
    prison: Arc<dyn PrisonGateway>,
}

impl ReasonableAdjustmentsService {
    #[must_use]
    pub fn new(resolver: IdentifierResolver, prison: Arc<dyn PrisonGateway>) -> Self {
        Self { resolver, prison }
    }

    /// Adjustments across every booking, flattened in booking order.
    ///
    /// # Errors
    ///
    /// Returns [`InvariantViolation`] when an upstream succeeds without data.
    #[instrument(skip(self, filters), fields(operation = OPERATION))]
    pub async fn execute(
        &self,
        hmpps_id: &str,
        filters: &ConsumerFilters,
    ) -> Result<UpstreamResult<Vec<ReasonableAdjustment>>, InvariantViolation> {
        let nomis = settle_or_return!(
            OPERATION,
            self.resolver.nomis_number(hmpps_id, filters).await?,
            UpstreamApi::ProbationOffenderSearch
        );

        let bookings = settle_or_return!(
            OPERATION,
            self.prison.get_bookings(&nomis).await,
            UpstreamApi::PrisonApi
        );
        tracing::debug!(bookings = bookings.len(), "fetching adjustments per booking");

        // join_all yields in input order, so errors stay in booking order.
        let per_booking = join_all(
            bookings
                .iter()
                .map(|booking| self.prison.get_reasonable_adjustments(booking.booking_id)),
        )
        .await;

        let merged = combine_all(per_booking).map(|lists| lists.into_iter().flatten().collect());
        finish(OPERATION, merged, UpstreamApi::PrisonApi)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::collections::HashMap;
    use std::time::Duration;

    use chrono::NaiveDate;
    use integration_sdk::{UpstreamError, UpstreamErrorType};

    use super::*;
    use crate::domain::models::Booking;
    use crate::domain::test_support::{FakeDirectory, FakePrison};

    fn adjustment(code: &str) -> ReasonableAdjustment {
        ReasonableAdjustment {
            treatment_code: Some(code.to_owned()),
            comment_text: Some("abcd".to_owned()),
            start_date: NaiveDate::from_ymd_opt(2010, 6, 21),
            end_date: NaiveDate::from_ymd_opt(2010, 6, 21),
            treatment_description: Some("Wheelchair accessibility".to_owned()),
        }
    }

    fn bookings(ids: &[i64]) -> UpstreamResult<Vec<Booking>> {
        UpstreamResult::success(
            ids.iter()
                .map(|&booking_id| Booking { booking_id })
                .collect(),
        )
    }

    fn service(prison: &Arc<FakePrison>) -> ReasonableAdjustmentsService {
        ReasonableAdjustmentsService::new(
            IdentifierResolver::new(Arc::new(FakeDirectory::known())),
            prison.clone(),
        )
    }

    #[tokio::test]
    async fn flattens_adjustments_in_booking_order() {
        let prison = Arc::new(FakePrison {
            bookings: Some(bookings(&[1, 2])),
            adjustments: HashMap::from([
                (1, UpstreamResult::success(vec![adjustment("WHEELCHR_ACC")])),
                (
                    2,
                    UpstreamResult::success(vec![adjustment("HEAR_AID"), adjustment("LIFT")]),
                ),
            ]),
            ..FakePrison::default()
        });

        let result = service(&prison)
            .execute("A1234BC", &ConsumerFilters::Unrestricted)
            .await
            .unwrap();

        let codes: Vec<_> = result
            .data()
            .unwrap()
            .iter()
            .map(|a| a.treatment_code.as_deref().unwrap())
            .collect();
        assert_eq!(codes, vec!["WHEELCHR_ACC", "HEAR_AID", "LIFT"]);
    }

    #[tokio::test]
    async fn no_bookings_is_an_empty_list() {
        let prison = Arc::new(FakePrison {
            bookings: Some(bookings(&[])),
            ..FakePrison::default()
        });

        let result = service(&prison)
            .execute("A1234BC", &ConsumerFilters::Unrestricted)
            .await
            .unwrap();

        assert_eq!(result, UpstreamResult::success(Vec::new()));
        assert_eq!(prison.calls.entries(), vec!["get_bookings A1234BC"]);
    }

    #[tokio::test]
    async fn failing_bookings_keep_their_errors_in_order() {
        let prison = Arc::new(FakePrison {
            bookings: Some(bookings(&[1, 2, 3])),
            adjustments: HashMap::from([
                (
                    1,
                    UpstreamResult::from_error(UpstreamError::not_found(UpstreamApi::PrisonApi)),
                ),
                (2, UpstreamResult::success(vec![adjustment("LIFT")])),
                (
                    3,
                    UpstreamResult::from_error(UpstreamError::new(
                        UpstreamApi::PrisonApi,
                        UpstreamErrorType::UpstreamUnavailable,
                    )),
                ),
            ]),
            ..FakePrison::default()
        });

        let result = service(&prison)
            .execute("A1234BC", &ConsumerFilters::Unrestricted)
            .await
            .unwrap();

        assert_eq!(result.data(), None);
        let kinds: Vec<_> = result.errors().iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                UpstreamErrorType::NotFound,
                UpstreamErrorType::UpstreamUnavailable
            ]
        );
    }

    #[tokio::test]
    async fn errors_keep_booking_order_when_later_booking_answers_first() {
        let prison = Arc::new(FakePrison {
            bookings: Some(bookings(&[1, 2])),
            adjustments: HashMap::from([
                (
                    1,
                    UpstreamResult::from_error(UpstreamError::not_found(UpstreamApi::PrisonApi)),
                ),
                (
                    2,
                    UpstreamResult::from_error(UpstreamError::new(
                        UpstreamApi::PrisonApi,
                        UpstreamErrorType::UpstreamUnavailable,
                    )),
                ),
            ]),
            adjustment_delays: HashMap::from([(1, Duration::from_millis(50))]),
            ..FakePrison::default()
        });

        let result = service(&prison)
            .execute("A1234BC", &ConsumerFilters::Unrestricted)
            .await
            .unwrap();

        assert_eq!(
            prison.completions.entries(),
            vec!["reasonable_adjustments 2", "reasonable_adjustments 1"]
        );
        let kinds: Vec<_> = result.errors().iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                UpstreamErrorType::NotFound,
                UpstreamErrorType::UpstreamUnavailable
            ]
        );
    }

    #[tokio::test]
    async fn bookings_failure_stops_before_adjustments() {
        let prison = Arc::new(FakePrison {
            bookings: Some(UpstreamResult::from_error(UpstreamError::not_found(
                UpstreamApi::PrisonApi,
            ))),
            ..FakePrison::default()
        });

        let result = service(&prison)
            .execute("A1234BC", &ConsumerFilters::Unrestricted)
            .await
            .unwrap();

        assert!(result.has_error(UpstreamErrorType::NotFound));
        assert_eq!(prison.calls.count(), 1);
    }
}
