//! Ledger-side types: entries, their status, payment methods and account checks.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Status of a ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LedgerEntryStatus {
    /// Owed, not yet paid.
    Pending,
    /// Paid.
    Confirmed,
    /// Void.
    Cancelled,
}

impl fmt::Display for LedgerEntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LedgerEntryStatus::Pending => "pending",
            LedgerEntryStatus::Confirmed => "confirmed",
            LedgerEntryStatus::Cancelled => "cancelled",
        })
    }
}

/// How salaries of a run were paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Generic bank transfer.
    BankTransfer,
    /// Same-day interbank transfer.
    Ted,
    /// Instant payment.
    Pix,
    /// Cash deposit into the employee's account.
    Deposit,
    /// Paid in cash.
    Cash,
}

/// Where a ledger entry originated from, so the ledger can be traced back to payroll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryOrigin {
    /// Owning payroll run.
    pub payroll_run_id: u64,
    /// Payroll item the entry pays.
    pub payroll_item_id: u64,
}

/// Request to create a pending expense entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewLedgerEntry {
    /// Analytic account receiving the expense.
    pub account_id: u64,
    /// Bank account expected to pay.
    pub bank_account_id: u64,
    /// Optional cost center.
    pub cost_center_id: Option<u64>,
    /// Amount owed.
    pub amount: Decimal,
    /// Human-readable description.
    pub description: String,
    /// Accrual date (first day of the reference month).
    pub competence_date: NaiveDate,
    /// Date the amount is due.
    pub due_date: NaiveDate,
    /// Payroll origin.
    pub origin: EntryOrigin,
    /// Audit attribution.
    pub created_by: u64,
}

/// Payment details attached to an entry when it is confirmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmEntry {
    /// How the entry was paid.
    pub payment_method: PaymentMethod,
    /// Bank account the money left from.
    pub bank_account_id: u64,
    /// Date the payment took effect.
    pub effective_date: NaiveDate,
    /// Optional note appended to the entry.
    pub notes: Option<String>,
}

/// A ledger entry as reported by the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Ledger-assigned identifier.
    pub id: u64,
    /// Current status.
    pub status: LedgerEntryStatus,
    /// Analytic account.
    pub account_id: u64,
    /// Bank account.
    pub bank_account_id: u64,
    /// Optional cost center.
    pub cost_center_id: Option<u64>,
    /// Amount.
    pub amount: Decimal,
    /// Description.
    pub description: String,
    /// Accrual date.
    pub competence_date: NaiveDate,
    /// Due date.
    pub due_date: NaiveDate,
    /// Date the payment took effect, once confirmed.
    pub effective_date: Option<NaiveDate>,
    /// Payment method, once confirmed.
    pub payment_method: Option<PaymentMethod>,
    /// Free-form notes accumulated over the entry's life.
    pub notes: Option<String>,
    /// Payroll origin.
    pub origin: EntryOrigin,
}

impl LedgerEntry {
    /// The slice of the entry embedded in payroll item details.
    pub fn summary(&self) -> LedgerEntrySummary {
        LedgerEntrySummary {
            id: self.id,
            status: self.status,
            amount: self.amount,
            due_date: self.due_date,
            effective_date: self.effective_date,
            payment_method: self.payment_method,
        }
    }
}

/// Compact view of a ledger entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntrySummary {
    /// Entry id.
    pub id: u64,
    /// Current status.
    pub status: LedgerEntryStatus,
    /// Amount.
    pub amount: Decimal,
    /// Due date.
    pub due_date: NaiveDate,
    /// Effective date, once confirmed.
    pub effective_date: Option<NaiveDate>,
    /// Payment method, once confirmed.
    pub payment_method: Option<PaymentMethod>,
}

/// Validity of a chart-of-accounts account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountStatus {
    /// Inactive accounts reject entries.
    pub active: bool,
    /// Only leaf (analytic) accounts accept entries.
    pub is_leaf: bool,
}

/// Validity of a bank account or cost center.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveStatus {
    /// Inactive records reject entries.
    pub active: bool,
}
