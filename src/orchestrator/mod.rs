//! The payroll lifecycle orchestrator.
//!
//! [`PayrollOrchestrator`] drives a run through
//! `Draft -> Approved -> Paid` (or `Cancelled`), keeping the repository and
//! the ledger consistent:
//!
//! - generation tolerates per-employee failures and reports them in a
//!   [`GenerationOutcome`],
//! - approval, payment and cancellation validate everything before the first
//!   mutation and never advance the run status after a ledger failure.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use chrono::NaiveDate;
//! use payroll_engine::config::PayrollSettings;
//! use payroll_engine::ledger::{BankAccount, InMemoryLedger, LedgerAccount};
//! use payroll_engine::models::{PaymentMethod, RunStatus, SalaryRecord};
//! use payroll_engine::orchestrator::{ApproveRun, GenerateRun, PayRun, PayrollOrchestrator};
//! use payroll_engine::repository::InMemoryPayrollRepository;
//! use payroll_engine::salary::InMemorySalaryStore;
//! use rust_decimal::Decimal;
//!
//! let ledger = InMemoryLedger::with_chart(
//!     vec![LedgerAccount {
//!         id: 3,
//!         code: "3.1.01.001".to_string(),
//!         name: "Salaries".to_string(),
//!         accepts_entries: true,
//!         active: true,
//!     }],
//!     vec![BankAccount { id: 1, name: "Operating".to_string(), active: true }],
//!     vec![],
//! );
//! let salaries = InMemorySalaryStore::new(vec![SalaryRecord {
//!     id: 1,
//!     employee_id: 10,
//!     employee_name: "Ana".to_string(),
//!     gross_amount: Decimal::new(5000, 0),
//!     effective_from: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
//!     effective_until: None,
//!     active: true,
//! }]);
//! let orchestrator = PayrollOrchestrator::new(
//!     Arc::new(InMemoryPayrollRepository::new()),
//!     Arc::new(ledger),
//!     Arc::new(salaries),
//!     PayrollSettings::default(),
//! );
//!
//! let generated = orchestrator
//!     .generate(GenerateRun { month: 1, year: 2024, payment_date: None, notes: None }, 1)
//!     .unwrap();
//! let run_id = generated.run.run.id;
//!
//! orchestrator
//!     .approve(run_id, ApproveRun { account_id: 3, bank_account_id: 1, cost_center_id: None, notes: None }, 1)
//!     .unwrap();
//! let paid = orchestrator
//!     .pay(run_id, PayRun { bank_account_id: 1, payment_method: PaymentMethod::Pix, payment_date: None, notes: None }, 1)
//!     .unwrap();
//! assert_eq!(paid.run.status, RunStatus::Paid);
//! ```

mod approve;
mod cancel;
mod commands;
mod drafts;
mod generate;
mod inspect;
mod outcome;
mod pay;
#[cfg(test)]
mod testing;

use std::sync::Arc;

use chrono::{NaiveDate, Utc};

use crate::config::PayrollSettings;
use crate::error::{PayrollError, PayrollResult};
use crate::ledger::LedgerGateway;
use crate::models::{
    PayrollItemDetails, PayrollRun, PayrollRunDetails, ReferencePeriod, normalize_note,
};
use crate::repository::PayrollRepository;
use crate::salary::SalaryRecordStore;

pub use commands::{ApproveRun, CancelRun, GenerateRun, PayRun, UpdateDraft};
pub use outcome::{
    CancellationCheck, GenerationOutcome, GenerationPreview, ItemFailure, PaymentSummary,
    PreviewLine,
};

/// Coordinates payroll runs, salary records and the ledger.
///
/// The orchestrator is the only component that changes a run's status or
/// links its items to ledger entries.
pub struct PayrollOrchestrator {
    repository: Arc<dyn PayrollRepository>,
    ledger: Arc<dyn LedgerGateway>,
    salaries: Arc<dyn SalaryRecordStore>,
    settings: PayrollSettings,
}

impl PayrollOrchestrator {
    /// Creates an orchestrator over the given collaborators.
    pub fn new(
        repository: Arc<dyn PayrollRepository>,
        ledger: Arc<dyn LedgerGateway>,
        salaries: Arc<dyn SalaryRecordStore>,
        settings: PayrollSettings,
    ) -> Self {
        Self {
            repository,
            ledger,
            salaries,
            settings,
        }
    }

    /// Engine settings in effect.
    pub fn settings(&self) -> &PayrollSettings {
        &self.settings
    }

    /// A run with its items and their ledger entries.
    pub fn run(&self, run_id: u64) -> PayrollResult<PayrollRunDetails> {
        let run = self.load_run(run_id)?;
        self.details(run)
    }

    /// The non-cancelled run of `period`, if any.
    pub fn run_for_period(&self, period: ReferencePeriod) -> PayrollResult<Option<PayrollRunDetails>> {
        self.repository
            .find_by_period(period)?
            .map(|run| self.details(run))
            .transpose()
    }

    fn load_run(&self, run_id: u64) -> PayrollResult<PayrollRun> {
        self.repository
            .find_run(run_id)?
            .ok_or_else(|| PayrollError::run_not_found(run_id))
    }

    fn details(&self, run: PayrollRun) -> PayrollResult<PayrollRunDetails> {
        join_details(self.repository.as_ref(), self.ledger.as_ref(), run)
    }

    /// Checks a reference period against the generation rules.
    fn generation_period(&self, month: u32, year: i32) -> PayrollResult<ReferencePeriod> {
        let period = ReferencePeriod::new(month, year)?;
        period.validate_for_generation(
            self.settings.min_reference_year,
            self.settings.allow_future_periods,
            today(),
        )?;
        Ok(period)
    }
}

/// Joins a run with its items and each item's ledger entry summary.
pub(crate) fn join_details(
    repository: &dyn PayrollRepository,
    ledger: &dyn LedgerGateway,
    run: PayrollRun,
) -> PayrollResult<PayrollRunDetails> {
    let items = repository
        .items(run.id)?
        .into_iter()
        .map(|item| {
            let ledger_entry = match item.linked_ledger_entry_id {
                Some(entry_id) => ledger.entry(entry_id)?.map(|entry| entry.summary()),
                None => None,
            };
            Ok(PayrollItemDetails { item, ledger_entry })
        })
        .collect::<PayrollResult<Vec<_>>>()?;
    Ok(PayrollRunDetails { run, items })
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// A payment date may not precede the reference month.
fn check_payment_date(period: ReferencePeriod, payment_date: NaiveDate) -> PayrollResult<()> {
    if payment_date < period.first_day() {
        return Err(PayrollError::validation(format!(
            "payment date {} is before the reference period {}",
            payment_date, period
        )));
    }
    Ok(())
}

/// Builds a lifecycle annotation such as `[Approved on 2024-02-05] note`.
fn annotation(action: &str, date: NaiveDate, detail: Option<String>) -> String {
    match normalize_note(detail) {
        Some(detail) => format!("[{} on {}] {}", action, date, detail),
        None => format!("[{} on {}]", action, date),
    }
}

/// Wraps collaborator failures that are not already ledger errors.
fn ledger_failure(err: PayrollError) -> PayrollError {
    match err {
        PayrollError::LedgerGateway { .. } => err,
        other => PayrollError::ledger(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;

    #[test]
    fn test_annotation_with_and_without_detail() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 5).unwrap();
        assert_eq!(annotation("Approved", date, None), "[Approved on 2024-02-05]");
        assert_eq!(
            annotation("Cancelled", date, Some(" wrong amounts ".to_string())),
            "[Cancelled on 2024-02-05] wrong amounts"
        );
        assert_eq!(
            annotation("Paid", date, Some("  ".to_string())),
            "[Paid on 2024-02-05]"
        );
    }

    #[test]
    fn test_payment_date_before_period_rejected() {
        let period = ReferencePeriod::new(3, 2024).unwrap();
        let before = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let first = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert!(matches!(
            check_payment_date(period, before),
            Err(PayrollError::Validation { .. })
        ));
        assert!(check_payment_date(period, first).is_ok());
    }

    #[test]
    fn test_ledger_failure_keeps_ledger_errors() {
        let err = ledger_failure(PayrollError::ledger("boom"));
        assert_eq!(err.to_string(), "Ledger error: boom");

        let wrapped = ledger_failure(PayrollError::storage("lock"));
        assert!(matches!(wrapped, PayrollError::LedgerGateway { .. }));
    }

    #[test]
    fn test_run_not_found() {
        let harness = harness(&[5000]);
        assert!(matches!(
            harness.orchestrator.run(99),
            Err(PayrollError::NotFound { id: 99, .. })
        ));
    }

    #[test]
    fn test_run_for_period_finds_live_run() {
        let harness = harness(&[5000, 3000]);
        let outcome = generate_january(&harness);

        let found = harness
            .orchestrator
            .run_for_period(january())
            .unwrap()
            .unwrap();
        assert_eq!(found.run.id, outcome.run.run.id);
        assert_eq!(found.items.len(), 2);

        let other = ReferencePeriod::new(2, 2024).unwrap();
        assert!(harness.orchestrator.run_for_period(other).unwrap().is_none());
    }
}
