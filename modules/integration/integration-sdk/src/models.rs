//! Consumer-facing models.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifiers a person is known by across upstream systems.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Identifiers {
    /// Prison (NOMIS) number, e.g. `A1234BC`.
    pub nomis_number: Option<String>,
    /// Probation case reference number, e.g. `X123456`.
    pub delius_crn: Option<String>,
}

/// A prison (NOMIS) number resolved for a person.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct NomisNumber(pub String);

impl NomisNumber {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NomisNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A probation case reference number resolved for a person.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct DeliusCrn(pub String);

impl DeliusCrn {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeliusCrn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskCategory {
    pub offender_no: Option<String>,
    pub category_code: Option<String>,
    pub category: Option<String>,
    pub assessments: Vec<RiskAssessment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub classification_code: Option<String>,
    pub classification: Option<String>,
    pub assessment_code: Option<String>,
    pub assessment_description: Option<String>,
    pub approval_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReasonableAdjustment {
    pub treatment_code: Option<String>,
    pub comment_text: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub treatment_description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Prison {
    pub code: Option<String>,
}

/// Prison offender manager allocated to a person in custody.
///
/// The default (all fields absent) stands for "no allocation looked up".
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrisonOffenderManager {
    pub forename: Option<String>,
    pub surname: Option<String>,
    pub prison: Prison,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonResponsibleOfficerName {
    pub forename: Option<String>,
    pub surname: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonResponsibleOfficerTeam {
    pub code: Option<String>,
    pub description: Option<String>,
    pub email: Option<String>,
    pub telephone_number: Option<String>,
}

/// Community offender manager supervising a person on probation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityOffenderManager {
    pub name: PersonResponsibleOfficerName,
    pub email: Option<String>,
    pub telephone_number: Option<String>,
    pub team: PersonResponsibleOfficerTeam,
}

/// Both officers responsible for a person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonResponsibleOfficer {
    pub prison_offender_manager: PrisonOffenderManager,
    pub community_offender_manager: CommunityOffenderManager,
}

/// Request to move money between two of a prisoner's ledger accounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionTransferRequest {
    pub description: String,
    /// Amount in pence.
    pub amount: i64,
    pub client_transaction_id: String,
    pub from_account: String,
    pub to_account: String,
}

impl TransactionTransferRequest {
    /// Account pairs the ledger accepts for a transfer.
    pub const SUPPORTED_TRANSFERS: &'static [(&'static str, &'static str)] =
        &[("spends", "savings")];

    #[must_use]
    pub fn is_supported_transfer(&self) -> bool {
        Self::SUPPORTED_TRANSFERS
            .iter()
            .any(|(from, to)| self.from_account == *from && self.to_account == *to)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionTransferCreateResponse {
    pub debit_transaction_id: String,
    pub credit_transaction_id: String,
    pub transaction_id: String,
}
