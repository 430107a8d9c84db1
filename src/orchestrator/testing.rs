//! Test fixtures: a seeded orchestrator over a ledger that fails on demand.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::{ApproveRun, GenerateRun, GenerationOutcome, PayRun, PayrollOrchestrator};
use crate::config::PayrollSettings;
use crate::error::{PayrollError, PayrollResult};
use crate::ledger::{BankAccount, CostCenter, InMemoryLedger, LedgerAccount, LedgerGateway};
use crate::models::{
    AccountStatus, ActiveStatus, ConfirmEntry, LedgerEntry, NewLedgerEntry, NewPayrollItem,
    PaymentMethod, PayrollItem, PayrollRun, ReferencePeriod, RunStatus, SalaryRecord,
};
use crate::repository::{
    DraftChanges, InMemoryPayrollRepository, NewPayrollRun, Page, PayrollRepository, RunQuery,
    StatusChange,
};
use crate::salary::InMemorySalaryStore;

pub(crate) const SYNTHETIC_ACCOUNT: u64 = 1;
pub(crate) const SALARY_ACCOUNT: u64 = 3;
pub(crate) const INACTIVE_ACCOUNT: u64 = 5;
pub(crate) const BANK: u64 = 1;
pub(crate) const CLOSED_BANK: u64 = 3;
pub(crate) const COST_CENTER: u64 = 1;
pub(crate) const CLOSED_COST_CENTER: u64 = 3;

const NEVER: usize = usize::MAX;

/// Delegates to an [`InMemoryLedger`], failing selected calls.
#[derive(Debug)]
pub(crate) struct FlakyLedger {
    pub(crate) inner: InMemoryLedger,
    creates: AtomicUsize,
    fail_create_after: AtomicUsize,
    confirms: AtomicUsize,
    fail_confirm_after: AtomicUsize,
    fail_cancels: AtomicBool,
}

impl FlakyLedger {
    pub(crate) fn new(inner: InMemoryLedger) -> Self {
        Self {
            inner,
            creates: AtomicUsize::new(0),
            fail_create_after: AtomicUsize::new(NEVER),
            confirms: AtomicUsize::new(0),
            fail_confirm_after: AtomicUsize::new(NEVER),
            fail_cancels: AtomicBool::new(false),
        }
    }

    /// Lets `successes` creations through, then fails every one after.
    pub(crate) fn fail_create_after(&self, successes: usize) {
        self.creates.store(0, Ordering::SeqCst);
        self.fail_create_after.store(successes, Ordering::SeqCst);
    }

    /// Lets `successes` confirmations through, then fails every one after.
    pub(crate) fn fail_confirm_after(&self, successes: usize) {
        self.confirms.store(0, Ordering::SeqCst);
        self.fail_confirm_after.store(successes, Ordering::SeqCst);
    }

    pub(crate) fn fail_cancels(&self, fail: bool) {
        self.fail_cancels.store(fail, Ordering::SeqCst);
    }

    pub(crate) fn heal(&self) {
        self.fail_create_after.store(NEVER, Ordering::SeqCst);
        self.fail_confirm_after.store(NEVER, Ordering::SeqCst);
        self.fail_cancels(false);
    }

    pub(crate) fn entries(&self) -> Vec<LedgerEntry> {
        self.inner.entries().unwrap()
    }
}

impl LedgerGateway for FlakyLedger {
    fn create_entry(&self, entry: NewLedgerEntry) -> PayrollResult<u64> {
        let seen = self.creates.fetch_add(1, Ordering::SeqCst);
        if seen >= self.fail_create_after.load(Ordering::SeqCst) {
            return Err(PayrollError::ledger("injected create failure"));
        }
        self.inner.create_entry(entry)
    }

    fn confirm_entry(&self, entry_id: u64, confirmation: &ConfirmEntry) -> PayrollResult<()> {
        let seen = self.confirms.fetch_add(1, Ordering::SeqCst);
        if seen >= self.fail_confirm_after.load(Ordering::SeqCst) {
            return Err(PayrollError::ledger("injected confirm failure"));
        }
        self.inner.confirm_entry(entry_id, confirmation)
    }

    fn cancel_entry(&self, entry_id: u64, note: Option<&str>) -> PayrollResult<()> {
        if self.fail_cancels.load(Ordering::SeqCst) {
            return Err(PayrollError::ledger("injected cancel failure"));
        }
        self.inner.cancel_entry(entry_id, note)
    }

    fn entry(&self, entry_id: u64) -> PayrollResult<Option<LedgerEntry>> {
        self.inner.entry(entry_id)
    }

    fn validate_account(&self, account_id: u64) -> PayrollResult<Option<AccountStatus>> {
        self.inner.validate_account(account_id)
    }

    fn validate_bank_account(&self, bank_account_id: u64) -> PayrollResult<Option<ActiveStatus>> {
        self.inner.validate_bank_account(bank_account_id)
    }

    fn validate_cost_center(&self, cost_center_id: u64) -> PayrollResult<Option<ActiveStatus>> {
        self.inner.validate_cost_center(cost_center_id)
    }
}

type RepositoryHook = Box<dyn FnOnce(&InMemoryPayrollRepository) + Send>;

/// Delegates to an [`InMemoryPayrollRepository`], letting a test act on the
/// store between the moment approval reads a run and the moment it records
/// the approval, or hide recorded links.
#[derive(Default)]
pub(crate) struct HookedRepository {
    pub(crate) inner: InMemoryPayrollRepository,
    before_approve: Mutex<Option<RepositoryHook>>,
    hide_links: AtomicBool,
}

impl HookedRepository {
    /// Runs `hook` once, right before the next approval is recorded.
    pub(crate) fn before_approve(
        &self,
        hook: impl FnOnce(&InMemoryPayrollRepository) + Send + 'static,
    ) {
        *self.before_approve.lock().unwrap() = Some(Box::new(hook));
    }

    /// Reports every item as unlinked, as a store that lost its links would.
    pub(crate) fn hide_links(&self, hide: bool) {
        self.hide_links.store(hide, Ordering::SeqCst);
    }
}

impl PayrollRepository for HookedRepository {
    fn exists_for_period(&self, period: ReferencePeriod) -> PayrollResult<bool> {
        self.inner.exists_for_period(period)
    }

    fn insert_run(&self, run: NewPayrollRun) -> PayrollResult<PayrollRun> {
        self.inner.insert_run(run)
    }

    fn insert_item(&self, run_id: u64, item: NewPayrollItem) -> PayrollResult<PayrollItem> {
        self.inner.insert_item(run_id, item)
    }

    fn recompute_total(&self, run_id: u64) -> PayrollResult<Decimal> {
        self.inner.recompute_total(run_id)
    }

    fn find_run(&self, run_id: u64) -> PayrollResult<Option<PayrollRun>> {
        self.inner.find_run(run_id)
    }

    fn items(&self, run_id: u64) -> PayrollResult<Vec<PayrollItem>> {
        let mut items = self.inner.items(run_id)?;
        if self.hide_links.load(Ordering::SeqCst) {
            for item in &mut items {
                item.linked_ledger_entry_id = None;
            }
        }
        Ok(items)
    }

    fn find_by_period(&self, period: ReferencePeriod) -> PayrollResult<Option<PayrollRun>> {
        self.inner.find_by_period(period)
    }

    fn update_draft(&self, run_id: u64, changes: &DraftChanges) -> PayrollResult<PayrollRun> {
        self.inner.update_draft(run_id, changes)
    }

    fn transition_status(
        &self,
        run_id: u64,
        expected: RunStatus,
        target: RunStatus,
        change: StatusChange,
    ) -> PayrollResult<PayrollRun> {
        self.inner.transition_status(run_id, expected, target, change)
    }

    fn approve_run(
        &self,
        run_id: u64,
        links: &[(u64, u64)],
        change: StatusChange,
    ) -> PayrollResult<PayrollRun> {
        let hook = self.before_approve.lock().unwrap().take();
        if let Some(hook) = hook {
            hook(&self.inner);
        }
        self.inner.approve_run(run_id, links, change)
    }

    fn delete_draft(&self, run_id: u64) -> PayrollResult<()> {
        self.inner.delete_draft(run_id)
    }

    fn list(&self, query: &RunQuery) -> PayrollResult<Page<PayrollRun>> {
        self.inner.list(query)
    }

    fn all_runs(&self) -> PayrollResult<Vec<PayrollRun>> {
        self.inner.all_runs()
    }
}

pub(crate) struct Harness {
    pub(crate) orchestrator: PayrollOrchestrator,
    pub(crate) ledger: Arc<FlakyLedger>,
    pub(crate) repository: Arc<HookedRepository>,
    pub(crate) salaries: Arc<InMemorySalaryStore>,
}

fn account(id: u64, code: &str, accepts_entries: bool, active: bool) -> LedgerAccount {
    LedgerAccount {
        id,
        code: code.to_string(),
        name: format!("Account {}", code),
        accepts_entries,
        active,
    }
}

pub(crate) fn seeded_ledger() -> InMemoryLedger {
    InMemoryLedger::with_chart(
        vec![
            account(SYNTHETIC_ACCOUNT, "3", false, true),
            account(SALARY_ACCOUNT, "3.1.01.001", true, true),
            account(INACTIVE_ACCOUNT, "3.1.01.099", true, false),
        ],
        vec![
            BankAccount {
                id: BANK,
                name: "Operating".to_string(),
                active: true,
            },
            BankAccount {
                id: CLOSED_BANK,
                name: "Closed".to_string(),
                active: false,
            },
        ],
        vec![
            CostCenter {
                id: COST_CENTER,
                name: "Litigation".to_string(),
                active: true,
            },
            CostCenter {
                id: CLOSED_COST_CENTER,
                name: "Former branch".to_string(),
                active: false,
            },
        ],
    )
}

/// A salary record effective since 2023 for employee `employee_id`.
pub(crate) fn salary(employee_id: u64, amount: i64) -> SalaryRecord {
    SalaryRecord {
        id: employee_id * 10,
        employee_id,
        employee_name: format!("Employee {}", employee_id),
        gross_amount: Decimal::new(amount, 0),
        effective_from: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
        effective_until: None,
        active: true,
    }
}

/// An orchestrator with one employee per amount, numbered from 1.
pub(crate) fn harness(amounts: &[i64]) -> Harness {
    let records = amounts
        .iter()
        .enumerate()
        .map(|(index, amount)| salary(index as u64 + 1, *amount))
        .collect();
    let ledger = Arc::new(FlakyLedger::new(seeded_ledger()));
    let repository = Arc::new(HookedRepository::default());
    let salaries = Arc::new(InMemorySalaryStore::new(records));
    let orchestrator = PayrollOrchestrator::new(
        repository.clone(),
        ledger.clone(),
        salaries.clone(),
        PayrollSettings::default(),
    );
    Harness {
        orchestrator,
        ledger,
        repository,
        salaries,
    }
}

pub(crate) fn january() -> ReferencePeriod {
    ReferencePeriod::new(1, 2024).unwrap()
}

pub(crate) fn generate_cmd(month: u32, year: i32) -> GenerateRun {
    GenerateRun {
        month,
        year,
        payment_date: None,
        notes: None,
    }
}

pub(crate) fn approve_cmd() -> ApproveRun {
    ApproveRun {
        account_id: SALARY_ACCOUNT,
        bank_account_id: BANK,
        cost_center_id: Some(COST_CENTER),
        notes: None,
    }
}

pub(crate) fn pay_cmd() -> PayRun {
    PayRun {
        bank_account_id: BANK,
        payment_method: PaymentMethod::Pix,
        payment_date: Some(NaiveDate::from_ymd_opt(2024, 2, 5).unwrap()),
        notes: None,
    }
}

pub(crate) fn generate_january(harness: &Harness) -> GenerationOutcome {
    harness
        .orchestrator
        .generate(generate_cmd(1, 2024), 1)
        .unwrap()
}

/// Generates and approves January 2024, returning the run id.
pub(crate) fn approved_january(harness: &Harness) -> u64 {
    let run_id = generate_january(harness).run.run.id;
    harness
        .orchestrator
        .approve(run_id, approve_cmd(), 1)
        .unwrap();
    run_id
}
