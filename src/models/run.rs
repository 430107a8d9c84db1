//! Payroll run and payroll item models.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{LedgerEntrySummary, ReferencePeriod, RunStatus};

/// One generated payroll cycle for a reference month.
///
/// At most one non-cancelled run exists per period, and `total_amount`
/// always equals the sum of the items' `gross_amount`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayrollRun {
    /// Unique identifier.
    pub id: u64,
    /// Reference month and year.
    #[serde(flatten)]
    pub period: ReferencePeriod,
    /// Lifecycle status.
    pub status: RunStatus,
    /// Sum of the items' gross amounts.
    pub total_amount: Decimal,
    /// Planned (draft/approved) or effective (paid) payment date.
    pub payment_date: Option<NaiveDate>,
    /// Free-form notes; lifecycle annotations are appended here.
    pub notes: Option<String>,
    /// User who generated the run.
    pub created_by: u64,
    /// Generation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// One employee's line within a payroll run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollItem {
    /// Unique identifier.
    pub id: u64,
    /// Owning run.
    pub payroll_run_id: u64,
    /// Paid employee.
    pub employee_id: u64,
    /// Employee display name, captured at generation time.
    pub employee_name: String,
    /// Salary record the amount was copied from.
    pub salary_record_id: u64,
    /// Gross amount copied from the salary record.
    pub gross_amount: Decimal,
    /// Ledger entry created on approval; `None` while the run is a draft.
    pub linked_ledger_entry_id: Option<u64>,
    /// Optional item notes.
    pub notes: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Item data needed to insert a payroll item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPayrollItem {
    /// Paid employee.
    pub employee_id: u64,
    /// Employee display name.
    pub employee_name: String,
    /// Source salary record.
    pub salary_record_id: u64,
    /// Amount copied from the salary record.
    pub gross_amount: Decimal,
}

/// A payroll item joined with its ledger entry summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayrollItemDetails {
    /// The item itself.
    #[serde(flatten)]
    pub item: PayrollItem,
    /// Linked ledger entry, when the run has been approved.
    pub ledger_entry: Option<LedgerEntrySummary>,
}

/// A payroll run with its items eagerly joined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayrollRunDetails {
    /// The run.
    #[serde(flatten)]
    pub run: PayrollRun,
    /// Items of the run, ordered by employee id.
    pub items: Vec<PayrollItemDetails>,
}

impl PayrollRunDetails {
    /// Sum of the items' gross amounts.
    pub fn items_total(&self) -> Decimal {
        self.items.iter().map(|d| d.item.gross_amount).sum()
    }

    /// Items without a linked ledger entry.
    pub fn unlinked_items(&self) -> impl Iterator<Item = &PayrollItem> {
        self.items
            .iter()
            .map(|d| &d.item)
            .filter(|item| item.linked_ledger_entry_id.is_none())
    }
}
