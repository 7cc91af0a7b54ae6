use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Args;
use integration::IntegrationConfig;
use integration_sdk::{ConsumerFilters, IntegrationApi, InvariantViolation, UpstreamResult};
use serde::Serialize;

use crate::logging;

#[derive(Args)]
pub struct CommonArgs {
    /// Path to configuration file
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Consumer whose access scope applies; unrestricted when omitted
    #[arg(long)]
    consumer: Option<String>,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Everything a subcommand needs to issue one call.
pub struct Session {
    pub client: Arc<dyn IntegrationApi>,
    pub filters: ConsumerFilters,
}

impl CommonArgs {
    pub fn connect(&self) -> anyhow::Result<Session> {
        let config = IntegrationConfig::load(self.config.as_deref())?;
        logging::init(&config.logging, self.verbose);
        let filters = config.filters_for(self.consumer.as_deref())?;
        let client = integration::module::build(&config)?;
        Ok(Session { client, filters })
    }
}

/// Print the `{ data, errors }` envelope.
///
/// Upstream errors still exit successfully since they are part of the
/// envelope; an invariant violation is fatal.
pub fn report<T: Serialize>(
    outcome: Result<UpstreamResult<T>, InvariantViolation>,
) -> anyhow::Result<ExitCode> {
    match outcome {
        Ok(result) => {
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(violation) => {
            eprintln!("fatal: {violation}");
            Ok(ExitCode::FAILURE)
        }
    }
}
