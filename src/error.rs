//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the payroll lifecycle can report.

use thiserror::Error;

use crate::models::RunStatus;

/// The main error type for the payroll engine.
///
/// Validation and state errors are always detected before any mutation, so a
/// caller receiving one of them can assume nothing changed.
///
/// # Example
///
/// ```
/// use payroll_engine::error::PayrollError;
///
/// let error = PayrollError::DuplicatePeriod { month: 1, year: 2024 };
/// assert_eq!(error.to_string(), "A payroll run already exists for 01/2024");
/// ```
#[derive(Debug, Error)]
pub enum PayrollError {
    /// Input failed validation (invalid period, malformed values).
    #[error("Validation failed: {message}")]
    Validation {
        /// A description of what was invalid.
        message: String,
    },

    /// A non-cancelled run already exists for the period.
    #[error("A payroll run already exists for {month:02}/{year}")]
    DuplicatePeriod {
        /// Reference month.
        month: u32,
        /// Reference year.
        year: i32,
    },

    /// No salary record is effective in the period.
    #[error("No employee has an effective salary in {month:02}/{year}")]
    NoEligibleEmployees {
        /// Reference month.
        month: u32,
        /// Reference year.
        year: i32,
    },

    /// The requested entity does not exist.
    #[error("{entity} {id} not found")]
    NotFound {
        /// Kind of entity (e.g. "payroll run", "account").
        entity: &'static str,
        /// The identifier that was looked up.
        id: u64,
    },

    /// The run is not in the status required by the operation.
    #[error("Invalid status transition {from} -> {to}: {message}")]
    InvalidStateTransition {
        /// Current status of the run.
        from: RunStatus,
        /// Status the operation would have moved to.
        to: RunStatus,
        /// Human-readable explanation.
        message: String,
    },

    /// Only draft runs may be edited or deleted.
    #[error("Payroll run {run_id} is {status}; only draft runs can be modified")]
    RunNotEditable {
        /// The run.
        run_id: u64,
        /// Its current status.
        status: RunStatus,
    },

    /// The ledger account is synthetic and cannot receive entries.
    #[error("Account {account_id} is synthetic and does not accept entries; select an analytic account")]
    NonLeafAccount {
        /// The rejected account.
        account_id: u64,
    },

    /// The ledger account is inactive.
    #[error("Account {account_id} is inactive")]
    InactiveAccount {
        /// The rejected account.
        account_id: u64,
    },

    /// The bank account is inactive.
    #[error("Bank account {bank_account_id} is inactive")]
    InactiveBankAccount {
        /// The rejected bank account.
        bank_account_id: u64,
    },

    /// The cost center is inactive.
    #[error("Cost center {cost_center_id} is inactive")]
    InactiveCostCenter {
        /// The rejected cost center.
        cost_center_id: u64,
    },

    /// Some items of a run carry no ledger entry where every item must.
    #[error("{missing} item(s) have no linked ledger entry")]
    IncompleteLedgerLinkage {
        /// Number of unlinked items.
        missing: usize,
    },

    /// Paid runs are immutable.
    #[error("Payroll run {run_id} is paid and cannot be cancelled; reverse individual ledger entries instead")]
    CannotCancelPaidRun {
        /// The paid run.
        run_id: u64,
    },

    /// The ledger collaborator failed.
    #[error("Ledger error: {message}")]
    LedgerGateway {
        /// A description of the collaborator failure.
        message: String,
    },

    /// The backing store failed.
    #[error("Storage error: {message}")]
    Storage {
        /// A description of the storage failure.
        message: String,
    },

    /// The store refused a payroll item.
    #[error("Item for employee {employee_id} rejected: {message}")]
    ItemRejected {
        /// The employee whose item was refused.
        employee_id: u64,
        /// Why the item was refused.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

impl PayrollError {
    /// Shorthand for a [`PayrollError::Validation`].
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Shorthand for a [`PayrollError::LedgerGateway`].
    pub fn ledger(message: impl Into<String>) -> Self {
        Self::LedgerGateway {
            message: message.into(),
        }
    }

    /// Shorthand for a [`PayrollError::Storage`].
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Shorthand for a missing payroll run.
    pub fn run_not_found(run_id: u64) -> Self {
        Self::NotFound {
            entity: "Payroll run",
            id: run_id,
        }
    }
}

/// A type alias for Results that return PayrollError.
pub type PayrollResult<T> = Result<T, PayrollError>;
