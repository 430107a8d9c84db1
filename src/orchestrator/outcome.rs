//! Results of the orchestrator operations.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{PayrollRunDetails, ReferencePeriod, RunStatus};

/// An employee whose item could not be created during generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemFailure {
    /// The employee left out of the run.
    pub employee_id: u64,
    /// Employee display name.
    pub employee_name: String,
    /// Salary record the item would have been copied from.
    pub salary_record_id: u64,
    /// Why the item was not created.
    pub reason: String,
}

/// Result of a successful generation.
///
/// Per-employee failures do not fail the generation; they are reported here
/// and the run holds the remaining items. When every employee failed the run
/// is an empty draft that still occupies its period: delete or cancel it
/// before generating the period again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationOutcome {
    /// The generated draft run.
    pub run: PayrollRunDetails,
    /// Employees that were left out.
    pub failures: Vec<ItemFailure>,
}

impl GenerationOutcome {
    /// Returns true if at least one employee was left out.
    pub fn has_partial_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Number of employees left out.
    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }
}

/// One employee a generation would include.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewLine {
    /// Employee id.
    pub employee_id: u64,
    /// Employee display name.
    pub employee_name: String,
    /// Effective salary record.
    pub salary_record_id: u64,
    /// Gross amount the item would carry.
    pub gross_amount: Decimal,
}

/// What generating a period would produce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationPreview {
    /// Reference period.
    #[serde(flatten)]
    pub period: ReferencePeriod,
    /// Human-readable period, e.g. `January/2024`.
    pub period_label: String,
    /// Eligible employees, ordered by employee id.
    pub employees: Vec<PreviewLine>,
    /// Number of eligible employees.
    pub head_count: usize,
    /// Sum of the eligible gross amounts.
    pub total_amount: Decimal,
}

/// Whether a run may be cancelled, and why not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CancellationCheck {
    /// True if `cancel` would be accepted.
    pub can_cancel: bool,
    /// Explanation when cancelling is refused or has caveats.
    pub reason: Option<String>,
    /// Current run status, `None` if the run does not exist.
    pub status: Option<RunStatus>,
    /// True if some linked ledger entry is already confirmed.
    pub has_confirmed_entries: bool,
}

/// Payment progress of a run's ledger entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentSummary {
    /// Run id.
    pub run_id: u64,
    /// Run status.
    pub status: RunStatus,
    /// Sum of item gross amounts.
    pub total_gross: Decimal,
    /// Number of items.
    pub item_count: usize,
    /// Items whose entry is pending, or that have no entry yet.
    pub pending_items: usize,
    /// Items whose entry is confirmed.
    pub confirmed_items: usize,
    /// Items whose entry was cancelled.
    pub cancelled_items: usize,
    /// Sum of the confirmed items' gross amounts.
    pub confirmed_amount: Decimal,
}
