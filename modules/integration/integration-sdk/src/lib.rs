//! Integration SDK
//!
//! Public contract of the integration module, which fronts several upstream
//! case-management systems behind one consistent API:
//!
//! - [`UpstreamResult`], [`UpstreamError`], [`UpstreamErrorType`] - the
//!   success-or-classified-errors model and its merge law
//! - [`UpstreamApi`] - identifiers of the fronted upstream systems
//! - [`InvariantViolation`] - the single fatal failure
//! - [`ConsumerFilters`] - per-consumer resource scope
//! - [`IntegrationApi`] - one method per orchestrated operation
//!
//! ## Usage
//!
//! ```ignore
//! use integration_sdk::{ConsumerFilters, IntegrationApi};
//!
//! let filters = ConsumerFilters::restricted_to(["MDI"]);
//! let result = client.get_risk_categories("A1234BC", &filters).await?;
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![deny(rust_2018_idioms)]

pub mod api;
pub mod error;
pub mod filters;
pub mod models;
pub mod result;

pub use api::IntegrationApi;
pub use error::{InvariantViolation, UpstreamApi, UpstreamError, UpstreamErrorType};
pub use filters::ConsumerFilters;
pub use models::{
    CommunityOffenderManager, DeliusCrn, Identifiers, NomisNumber, PersonResponsibleOfficer,
    PersonResponsibleOfficerName, PersonResponsibleOfficerTeam, Prison, PrisonOffenderManager,
    ReasonableAdjustment, RiskAssessment, RiskCategory, TransactionTransferCreateResponse,
    TransactionTransferRequest,
};
pub use result::{UpstreamResult, combine_all};
