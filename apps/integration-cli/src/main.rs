#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use std::process::ExitCode;

use clap::{Parser, Subcommand};

mod common;
mod logging;
mod person;
mod transfer;

/// Query prison and probation upstreams through the integration module.
#[derive(Parser)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(name = "integration")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Risk categories for a person in custody
    RiskCategories(person::PersonArgs),
    /// Reasonable adjustments across all bookings
    ReasonableAdjustments(person::PersonArgs),
    /// Prison and community offender managers
    ResponsibleOfficer(person::PersonArgs),
    /// Move money between a prisoner's ledger accounts
    Transfer(transfer::TransferArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    match cli.command {
        Commands::RiskCategories(args) => args.run(person::Query::RiskCategories).await,
        Commands::ReasonableAdjustments(args) => {
            args.run(person::Query::ReasonableAdjustments).await
        }
        Commands::ResponsibleOfficer(args) => args.run(person::Query::ResponsibleOfficer).await,
        Commands::Transfer(args) => args.run().await,
    }
}
