//! The ledger capability consumed by the payroll orchestrator.

use crate::error::PayrollResult;
use crate::models::{AccountStatus, ActiveStatus, ConfirmEntry, LedgerEntry, NewLedgerEntry};

/// Operations the payroll engine needs from the general ledger.
///
/// The ledger owns its entries; the engine only drives their lifecycle:
/// entries are created pending on approval, confirmed on payment and
/// cancelled when an approved run is cancelled.
///
/// Lookups return `Ok(None)` for unknown ids. `Err` is reserved for
/// failures of the ledger itself.
pub trait LedgerGateway: Send + Sync {
    /// Creates a pending entry and returns its id.
    fn create_entry(&self, entry: NewLedgerEntry) -> PayrollResult<u64>;

    /// Moves a pending entry to confirmed, attaching the payment details.
    ///
    /// Confirming an entry that is already confirmed succeeds without change.
    fn confirm_entry(&self, entry_id: u64, confirmation: &ConfirmEntry) -> PayrollResult<()>;

    /// Cancels a pending entry, appending `note` to its notes.
    ///
    /// Entries that are not pending are left untouched and the call succeeds.
    fn cancel_entry(&self, entry_id: u64, note: Option<&str>) -> PayrollResult<()>;

    /// Fetches an entry.
    fn entry(&self, entry_id: u64) -> PayrollResult<Option<LedgerEntry>>;

    /// Reports whether an accounting account is active and a leaf.
    fn validate_account(&self, account_id: u64) -> PayrollResult<Option<AccountStatus>>;

    /// Reports whether a bank account is active.
    fn validate_bank_account(&self, bank_account_id: u64) -> PayrollResult<Option<ActiveStatus>>;

    /// Reports whether a cost center is active.
    fn validate_cost_center(&self, cost_center_id: u64) -> PayrollResult<Option<ActiveStatus>>;
}
