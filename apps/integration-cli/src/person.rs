use std::process::ExitCode;

use clap::Args;

use crate::common::{CommonArgs, report};

#[derive(Clone, Copy)]
pub enum Query {
    RiskCategories,
    ReasonableAdjustments,
    ResponsibleOfficer,
}

#[derive(Args)]
pub struct PersonArgs {
    /// Person identifier: CRN (X123456) or prison number (A1234BC)
    hmpps_id: String,
    #[command(flatten)]
    common_args: CommonArgs,
}

impl PersonArgs {
    pub async fn run(&self, query: Query) -> anyhow::Result<ExitCode> {
        let session = self.common_args.connect()?;
        let (client, filters) = (&session.client, &session.filters);
        match query {
            Query::RiskCategories => {
                report(client.get_risk_categories(&self.hmpps_id, filters).await)
            }
            Query::ReasonableAdjustments => {
                report(client.get_reasonable_adjustments(&self.hmpps_id, filters).await)
            }
            Query::ResponsibleOfficer => report(
                client
                    .get_person_responsible_officer(&self.hmpps_id, filters)
                    .await,
            ),
        }
    }
}
