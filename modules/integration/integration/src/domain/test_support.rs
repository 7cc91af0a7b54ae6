//! Recording fakes for the domain ports.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use integration_sdk::{
    CommunityOffenderManager, ConsumerFilters, DeliusCrn, Identifiers, InvariantViolation,
    NomisNumber, PrisonOffenderManager, ReasonableAdjustment, RiskCategory,
    TransactionTransferRequest, UpstreamApi, UpstreamError, UpstreamResult,
};

use super::directory::PersonQuery;
use super::models::{Booking, LedgerTransfer, Prisoner};
use super::ports::{
    CommunityCaseGateway, PersonDirectory, PomAllocationGateway, PrisonGateway,
    PrisonerSearchGateway, ProbationSearchGateway,
};

/// Shared log of calls made against fakes.
#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    pub fn record(&self, call: impl Into<String>) {
        self.0.lock().unwrap().push(call.into());
    }

    pub fn count(&self) -> usize {
        self.0.lock().unwrap().len()
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

/// Hold a reply back so concurrent legs finish out of declared order.
async fn pause(delay: Option<&Duration>) {
    if let Some(delay) = delay {
        tokio::time::sleep(*delay).await;
    }
}

fn reply<T: Clone>(
    configured: Option<&UpstreamResult<T>>,
    system: UpstreamApi,
) -> UpstreamResult<T> {
    configured.cloned().unwrap_or_else(|| {
        UpstreamResult::from_error(UpstreamError::internal(system, "unexpected call"))
    })
}

#[derive(Default)]
pub struct FakePrison {
    pub risk_categories: Option<UpstreamResult<RiskCategory>>,
    pub bookings: Option<UpstreamResult<Vec<Booking>>>,
    pub adjustments: HashMap<i64, UpstreamResult<Vec<ReasonableAdjustment>>>,
    pub adjustment_delays: HashMap<i64, Duration>,
    pub transfer: Option<UpstreamResult<LedgerTransfer>>,
    pub calls: CallLog,
    /// Replies in the order they were produced; may be shared between fakes.
    pub completions: CallLog,
}

#[async_trait]
impl PrisonGateway for FakePrison {
    async fn get_risk_categories(&self, nomis: &NomisNumber) -> UpstreamResult<RiskCategory> {
        self.calls.record(format!("get_risk_categories {nomis}"));
        reply(self.risk_categories.as_ref(), UpstreamApi::PrisonApi)
    }

    async fn get_bookings(&self, nomis: &NomisNumber) -> UpstreamResult<Vec<Booking>> {
        self.calls.record(format!("get_bookings {nomis}"));
        reply(self.bookings.as_ref(), UpstreamApi::PrisonApi)
    }

    async fn get_reasonable_adjustments(
        &self,
        booking_id: i64,
    ) -> UpstreamResult<Vec<ReasonableAdjustment>> {
        self.calls
            .record(format!("get_reasonable_adjustments {booking_id}"));
        pause(self.adjustment_delays.get(&booking_id)).await;
        self.completions.record(format!("reasonable_adjustments {booking_id}"));
        reply(self.adjustments.get(&booking_id), UpstreamApi::PrisonApi)
    }

    async fn post_transaction_transfer(
        &self,
        prison_id: &str,
        nomis: &NomisNumber,
        _request: &TransactionTransferRequest,
    ) -> UpstreamResult<LedgerTransfer> {
        self.calls
            .record(format!("post_transaction_transfer {prison_id} {nomis}"));
        reply(self.transfer.as_ref(), UpstreamApi::PrisonApi)
    }
}

#[derive(Default)]
pub struct FakePomAllocation {
    pub response: Option<UpstreamResult<PrisonOffenderManager>>,
    pub delay: Option<Duration>,
    pub calls: CallLog,
    pub completions: CallLog,
}

#[async_trait]
impl PomAllocationGateway for FakePomAllocation {
    async fn get_primary_pom(&self, nomis: &NomisNumber) -> UpstreamResult<PrisonOffenderManager> {
        self.calls.record(format!("get_primary_pom {nomis}"));
        pause(self.delay.as_ref()).await;
        self.completions.record("primary_pom");
        reply(self.response.as_ref(), UpstreamApi::ManagePomCase)
    }
}

#[derive(Default)]
pub struct FakeCommunityCase {
    pub response: Option<UpstreamResult<CommunityOffenderManager>>,
    pub delay: Option<Duration>,
    pub calls: CallLog,
    pub completions: CallLog,
}

#[async_trait]
impl CommunityCaseGateway for FakeCommunityCase {
    async fn get_community_offender_manager(
        &self,
        crn: &DeliusCrn,
    ) -> UpstreamResult<CommunityOffenderManager> {
        self.calls
            .record(format!("get_community_offender_manager {crn}"));
        pause(self.delay.as_ref()).await;
        self.completions.record("community_offender_manager");
        reply(self.response.as_ref(), UpstreamApi::NDelius)
    }
}

#[derive(Default)]
pub struct FakeProbationSearch {
    pub response: Option<UpstreamResult<Identifiers>>,
    pub calls: CallLog,
}

impl FakeProbationSearch {
    pub fn responding(response: UpstreamResult<Identifiers>) -> Self {
        Self {
            response: Some(response),
            ..Self::default()
        }
    }
}

#[async_trait]
impl ProbationSearchGateway for FakeProbationSearch {
    async fn find_person(&self, query: &PersonQuery) -> UpstreamResult<Identifiers> {
        let id = match query {
            PersonQuery::Crn(id) | PersonQuery::Nomis(id) => id,
        };
        self.calls.record(format!("find_person {id}"));
        reply(self.response.as_ref(), UpstreamApi::ProbationOffenderSearch)
    }
}

#[derive(Default)]
pub struct FakePrisonerSearch {
    pub response: Option<UpstreamResult<Prisoner>>,
    pub calls: CallLog,
}

impl FakePrisonerSearch {
    pub fn responding(response: UpstreamResult<Prisoner>) -> Self {
        Self {
            response: Some(response),
            ..Self::default()
        }
    }
}

#[async_trait]
impl PrisonerSearchGateway for FakePrisonerSearch {
    async fn get_prisoner(&self, nomis: &NomisNumber) -> UpstreamResult<Prisoner> {
        self.calls.record(format!("get_prisoner {nomis}"));
        reply(self.response.as_ref(), UpstreamApi::PrisonerOffenderSearch)
    }
}

pub struct FakeDirectory {
    pub response: UpstreamResult<Identifiers>,
    pub calls: CallLog,
}

impl FakeDirectory {
    pub fn responding(response: UpstreamResult<Identifiers>) -> Self {
        Self {
            response,
            calls: CallLog::default(),
        }
    }

    /// A directory that knows the person by both identifiers.
    pub fn known() -> Self {
        Self::responding(UpstreamResult::success(Identifiers {
            nomis_number: Some("A1234BC".to_owned()),
            delius_crn: Some("X123456".to_owned()),
        }))
    }
}

#[async_trait]
impl PersonDirectory for FakeDirectory {
    async fn resolve(
        &self,
        hmpps_id: &str,
        _filters: &ConsumerFilters,
    ) -> Result<UpstreamResult<Identifiers>, InvariantViolation> {
        self.calls.record(format!("resolve {hmpps_id}"));
        Ok(self.response.clone())
    }
}
