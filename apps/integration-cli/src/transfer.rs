use std::process::ExitCode;

use clap::Args;
use integration_sdk::TransactionTransferRequest;

use crate::common::{CommonArgs, report};

#[derive(Args)]
pub struct TransferArgs {
    /// Prison holding the accounts, e.g. MDI
    prison_id: String,
    /// Person identifier: CRN or prison number
    hmpps_id: String,
    /// Amount in pence
    #[arg(long)]
    amount: i64,
    #[arg(long)]
    description: String,
    /// Caller-chosen idempotency reference
    #[arg(long)]
    client_transaction_id: String,
    #[arg(long, default_value = "spends")]
    from_account: String,
    #[arg(long, default_value = "savings")]
    to_account: String,
    #[command(flatten)]
    common_args: CommonArgs,
}

impl TransferArgs {
    pub async fn run(&self) -> anyhow::Result<ExitCode> {
        let session = self.common_args.connect()?;
        let request = TransactionTransferRequest {
            description: self.description.clone(),
            amount: self.amount,
            client_transaction_id: self.client_transaction_id.clone(),
            from_account: self.from_account.clone(),
            to_account: self.to_account.clone(),
        };
        report(
            session
                .client
                .post_transaction_transfer(
                    &self.prison_id,
                    &self.hmpps_id,
                    &request,
                    &session.filters,
                )
                .await,
        )
    }
}
