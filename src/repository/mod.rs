//! Persistence of payroll runs and items.
//!
//! [`PayrollRepository`] is the only writer of run status and item-to-ledger
//! links. Implementations must make [`PayrollRepository::insert_run`] enforce
//! period uniqueness atomically and [`PayrollRepository::approve_run`] link
//! every item and approve the run in a single step.

mod memory;
mod query;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::PayrollResult;
use crate::models::{NewPayrollItem, PayrollItem, PayrollRun, ReferencePeriod, RunStatus};

pub use memory::InMemoryPayrollRepository;
pub use query::{Page, RunQuery, RunSortField, SortOrder};

/// Data needed to insert a draft run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPayrollRun {
    /// Reference period.
    pub period: ReferencePeriod,
    /// Planned payment date.
    pub payment_date: Option<NaiveDate>,
    /// Initial notes.
    pub notes: Option<String>,
    /// Generating user.
    pub created_by: u64,
}

/// Edits allowed on a draft run. `None` leaves a field unchanged,
/// `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftChanges {
    /// New planned payment date.
    pub payment_date: Option<Option<NaiveDate>>,
    /// New notes.
    pub notes: Option<Option<String>>,
}

impl DraftChanges {
    /// Returns true if no field would change.
    pub fn is_empty(&self) -> bool {
        self.payment_date.is_none() && self.notes.is_none()
    }
}

/// Extra data recorded with a status transition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusChange {
    /// Payment date to persist, when set.
    pub payment_date: Option<NaiveDate>,
    /// Annotation appended to the run notes.
    pub note: Option<String>,
}

/// Storage of payroll runs and their items.
pub trait PayrollRepository: Send + Sync {
    /// Returns true if a non-cancelled run exists for `period`.
    fn exists_for_period(&self, period: ReferencePeriod) -> PayrollResult<bool>;

    /// Inserts a draft run with a zero total.
    ///
    /// Fails with `DuplicatePeriod` if a non-cancelled run already exists for
    /// the period; the check and the insert are one atomic step.
    fn insert_run(&self, run: NewPayrollRun) -> PayrollResult<PayrollRun>;

    /// Inserts an item into a draft run. Does not touch the run total.
    fn insert_item(&self, run_id: u64, item: NewPayrollItem) -> PayrollResult<PayrollItem>;

    /// Recomputes and persists the run total from its current items.
    fn recompute_total(&self, run_id: u64) -> PayrollResult<Decimal>;

    /// Fetches a run.
    fn find_run(&self, run_id: u64) -> PayrollResult<Option<PayrollRun>>;

    /// Items of a run, ordered by employee id.
    fn items(&self, run_id: u64) -> PayrollResult<Vec<PayrollItem>>;

    /// The non-cancelled run of `period`, if any.
    fn find_by_period(&self, period: ReferencePeriod) -> PayrollResult<Option<PayrollRun>>;

    /// Applies `changes` to a draft run.
    fn update_draft(&self, run_id: u64, changes: &DraftChanges) -> PayrollResult<PayrollRun>;

    /// Moves a run from `expected` to `target`.
    ///
    /// Rejected with `InvalidStateTransition` when the stored status is not
    /// `expected` or the transition table forbids the move. Approval is not a
    /// plain transition: it goes through [`PayrollRepository::approve_run`].
    fn transition_status(
        &self,
        run_id: u64,
        expected: RunStatus,
        target: RunStatus,
        change: StatusChange,
    ) -> PayrollResult<PayrollRun>;

    /// Links the items of a draft run to ledger entries, given as
    /// `(item_id, entry_id)`, and moves the run to `Approved`.
    ///
    /// The links must cover every item the run holds at that moment. The
    /// status check, the coverage check, the links and the transition form
    /// one atomic step: on any error nothing is changed.
    fn approve_run(
        &self,
        run_id: u64,
        links: &[(u64, u64)],
        change: StatusChange,
    ) -> PayrollResult<PayrollRun>;

    /// Removes a draft run and its items.
    fn delete_draft(&self, run_id: u64) -> PayrollResult<()>;

    /// Lists runs matching `query`.
    fn list(&self, query: &RunQuery) -> PayrollResult<Page<PayrollRun>>;

    /// Every stored run, in id order.
    fn all_runs(&self) -> PayrollResult<Vec<PayrollRun>>;
}
