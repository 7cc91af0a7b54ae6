//! One adapter per upstream system, all sharing [`UpstreamClient`].

pub mod http;
mod manage_pom_case;
mod ndelius;
mod prison_api;
mod prisoner_search;
mod probation_search;

pub use http::UpstreamClient;
pub use manage_pom_case::ManagePomCaseGateway;
pub use ndelius::NDeliusGateway;
pub use prison_api::PrisonApiGateway;
pub use prisoner_search::PrisonerOffenderSearchGateway;
pub use probation_search::ProbationOffenderSearchGateway;
