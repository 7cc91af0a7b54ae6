//! Prison API adapter: custodial records and the prisoner financial ledger.

use async_trait::async_trait;
use chrono::NaiveDate;
use integration_sdk::{
    NomisNumber, ReasonableAdjustment, RiskAssessment, RiskCategory, TransactionTransferRequest,
    UpstreamResult,
};
use serde::Deserialize;
use tracing::instrument;
use urlencoding::encode;

use super::http::UpstreamClient;
use crate::domain::models::{Booking, LedgerTransaction, LedgerTransfer};
use crate::domain::ports::PrisonGateway;

const HEALTH_TREATMENT_CODES: &str = "/api/reference-domains/domains/HEALTH_TREAT/codes";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RiskCategoryDto {
    offender_no: Option<String>,
    category_code: Option<String>,
    category: Option<String>,
    #[serde(default)]
    assessments: Vec<RiskAssessmentDto>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RiskAssessmentDto {
    classification_code: Option<String>,
    classification: Option<String>,
    assessment_code: Option<String>,
    assessment_description: Option<String>,
    approval_date: Option<NaiveDate>,
}

impl From<RiskCategoryDto> for RiskCategory {
    fn from(dto: RiskCategoryDto) -> Self {
        Self {
            offender_no: dto.offender_no,
            category_code: dto.category_code,
            category: dto.category,
            assessments: dto
                .assessments
                .into_iter()
                .map(|a| RiskAssessment {
                    classification_code: a.classification_code,
                    classification: a.classification,
                    assessment_code: a.assessment_code,
                    assessment_description: a.assessment_description,
                    approval_date: a.approval_date,
                })
                .collect(),
        }
    }
}

#[derive(Deserialize)]
struct BookingsPage {
    #[serde(default)]
    content: Vec<BookingDto>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BookingDto {
    booking_id: i64,
}

#[derive(Deserialize)]
struct ReferenceCode {
    code: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReasonableAdjustmentsDto {
    #[serde(default)]
    reasonable_adjustments: Vec<ReasonableAdjustmentDto>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReasonableAdjustmentDto {
    treatment_code: Option<String>,
    comment_text: Option<String>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    treatment_description: Option<String>,
}

impl From<ReasonableAdjustmentDto> for ReasonableAdjustment {
    fn from(dto: ReasonableAdjustmentDto) -> Self {
        Self {
            treatment_code: dto.treatment_code,
            comment_text: dto.comment_text,
            start_date: dto.start_date,
            end_date: dto.end_date,
            treatment_description: dto.treatment_description,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LedgerTransferDto {
    debit_transaction: LedgerTransactionDto,
    credit_transaction: LedgerTransactionDto,
    transaction_id: i64,
}

#[derive(Deserialize)]
struct LedgerTransactionDto {
    id: String,
}

impl From<LedgerTransferDto> for LedgerTransfer {
    fn from(dto: LedgerTransferDto) -> Self {
        Self {
            debit_transaction: LedgerTransaction {
                id: dto.debit_transaction.id,
            },
            credit_transaction: LedgerTransaction {
                id: dto.credit_transaction.id,
            },
            transaction_id: dto.transaction_id,
        }
    }
}

pub struct PrisonApiGateway {
    client: UpstreamClient,
}

impl PrisonApiGateway {
    #[must_use]
    pub fn new(client: UpstreamClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PrisonGateway for PrisonApiGateway {
    #[instrument(skip(self))]
    async fn get_risk_categories(&self, nomis: &NomisNumber) -> UpstreamResult<RiskCategory> {
        let path = format!("/api/offenders/{}/risk-categories", encode(nomis.as_str()));
        self.client
            .get_json::<RiskCategoryDto>(&path, &[])
            .await
            .map(Into::into)
    }

    #[instrument(skip(self))]
    async fn get_bookings(&self, nomis: &NomisNumber) -> UpstreamResult<Vec<Booking>> {
        self.client
            .get_json::<BookingsPage>("/api/bookings/v2", &[("offenderNo", nomis.as_str())])
            .await
            .map(|page| {
                page.content
                    .into_iter()
                    .map(|b| Booking {
                        booking_id: b.booking_id,
                    })
                    .collect()
            })
    }

    /// Two calls: the health-treatment codes, then the adjustments of those types.
    #[instrument(skip(self))]
    async fn get_reasonable_adjustments(
        &self,
        booking_id: i64,
    ) -> UpstreamResult<Vec<ReasonableAdjustment>> {
        let (codes, errors) = self
            .client
            .get_json::<Vec<ReferenceCode>>(HEALTH_TREATMENT_CODES, &[])
            .await
            .into_parts();
        if !errors.is_empty() {
            return UpstreamResult::failure(errors);
        }
        let Some(codes) = codes else {
            return UpstreamResult::from_parts(None, Vec::new());
        };
        if codes.is_empty() {
            return UpstreamResult::success(Vec::new());
        }

        let query: Vec<(&str, &str)> = codes.iter().map(|c| ("type", c.code.as_str())).collect();
        let path = format!("/api/bookings/{booking_id}/reasonable-adjustments");
        self.client
            .get_json::<ReasonableAdjustmentsDto>(&path, &query)
            .await
            .map(|dto| {
                dto.reasonable_adjustments
                    .into_iter()
                    .map(Into::into)
                    .collect()
            })
    }

    #[instrument(skip(self, request))]
    async fn post_transaction_transfer(
        &self,
        prison_id: &str,
        nomis: &NomisNumber,
        request: &TransactionTransferRequest,
    ) -> UpstreamResult<LedgerTransfer> {
        let path = format!(
            "/api/finance/prison/{}/offenders/{}/transfer-transactions",
            encode(prison_id),
            encode(nomis.as_str())
        );
        self.client
            .post_json::<_, LedgerTransferDto>(&path, request)
            .await
            .map(Into::into)
    }
}
