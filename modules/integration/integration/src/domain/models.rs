//! Upstream-side records used between gateways and orchestrators.
//!
//! These never reach a consumer directly; orchestrators shape them into the
//! SDK models.

/// A custodial booking (one period in custody).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    pub booking_id: i64,
}

/// A person's current custodial record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prisoner {
    pub prisoner_number: Option<String>,
    /// Code of the prison currently holding the person, if any.
    pub prison_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerTransaction {
    pub id: String,
}

/// Ledger confirmation of a completed transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerTransfer {
    pub debit_transaction: LedgerTransaction,
    pub credit_transaction: LedgerTransaction,
    pub transaction_id: i64,
}
