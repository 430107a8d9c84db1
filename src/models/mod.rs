//! Core data models for the payroll engine.
//!
//! This module contains the domain models used throughout the engine: payroll
//! runs and items, their status, reference periods, salary snapshots and the
//! ledger-side types exchanged with the ledger.

mod ledger;
mod notes;
mod period;
mod run;
mod salary;
mod status;

pub use ledger::{
    AccountStatus, ActiveStatus, ConfirmEntry, EntryOrigin, LedgerEntry, LedgerEntryStatus,
    LedgerEntrySummary, NewLedgerEntry, PaymentMethod,
};
pub(crate) use notes::{append_note, normalize_note};
pub use period::ReferencePeriod;
pub use run::{NewPayrollItem, PayrollItem, PayrollItemDetails, PayrollRun, PayrollRunDetails};
pub use salary::SalaryRecord;
pub use status::RunStatus;
