//! Integration Module
//!
//! Fronts the prison, probation and ledger upstream systems behind the
//! [`integration_sdk::IntegrationApi`] contract. Each operation is an
//! orchestrator in [`domain::service`]; upstream access goes through the
//! gateway adapters in [`infra::gateways`], authenticated by the token
//! provider in [`infra::auth`].
//!
//! Build a client with [`module::build`] from an [`IntegrationConfig`].
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod domain;
pub mod infra;
pub mod module;
pub mod secret;

pub use config::{ConfigError, IntegrationConfig};
pub use secret::SecretString;
