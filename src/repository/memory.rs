//! In-memory payroll repository.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use rust_decimal::Decimal;

use super::{DraftChanges, NewPayrollRun, Page, PayrollRepository, RunQuery, StatusChange};
use crate::error::{PayrollError, PayrollResult};
use crate::models::{
    NewPayrollItem, PayrollItem, PayrollRun, ReferencePeriod, RunStatus, append_note,
    normalize_note,
};

#[derive(Debug, Default)]
struct Tables {
    runs: BTreeMap<u64, PayrollRun>,
    items: BTreeMap<u64, PayrollItem>,
    next_run_id: u64,
    next_item_id: u64,
}

impl Tables {
    fn run(&self, run_id: u64) -> PayrollResult<&PayrollRun> {
        self.runs
            .get(&run_id)
            .ok_or_else(|| PayrollError::run_not_found(run_id))
    }

    fn run_mut(&mut self, run_id: u64) -> PayrollResult<&mut PayrollRun> {
        self.runs
            .get_mut(&run_id)
            .ok_or_else(|| PayrollError::run_not_found(run_id))
    }

    fn draft_mut(&mut self, run_id: u64) -> PayrollResult<&mut PayrollRun> {
        let run = self.run_mut(run_id)?;
        if run.status != RunStatus::Draft {
            return Err(PayrollError::RunNotEditable {
                run_id,
                status: run.status,
            });
        }
        Ok(run)
    }

    fn items_of(&self, run_id: u64) -> impl Iterator<Item = &PayrollItem> {
        self.items
            .values()
            .filter(move |item| item.payroll_run_id == run_id)
    }

    fn live_run_for(&self, period: ReferencePeriod) -> Option<&PayrollRun> {
        self.runs
            .values()
            .find(|run| run.period == period && run.status != RunStatus::Cancelled)
    }
}

/// Payroll runs and items kept in memory behind a single lock.
///
/// Every trait operation takes the lock once, so each is atomic with respect
/// to the others. This is what makes the period uniqueness check inside
/// [`PayrollRepository::insert_run`] race-free.
#[derive(Debug, Default)]
pub struct InMemoryPayrollRepository {
    tables: RwLock<Tables>,
}

impl InMemoryPayrollRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> PayrollResult<RwLockReadGuard<'_, Tables>> {
        self.tables
            .read()
            .map_err(|_| PayrollError::storage("payroll tables lock poisoned"))
    }

    fn write(&self) -> PayrollResult<RwLockWriteGuard<'_, Tables>> {
        self.tables
            .write()
            .map_err(|_| PayrollError::storage("payroll tables lock poisoned"))
    }
}

impl PayrollRepository for InMemoryPayrollRepository {
    fn exists_for_period(&self, period: ReferencePeriod) -> PayrollResult<bool> {
        Ok(self.read()?.live_run_for(period).is_some())
    }

    fn insert_run(&self, new_run: NewPayrollRun) -> PayrollResult<PayrollRun> {
        let mut tables = self.write()?;
        if tables.live_run_for(new_run.period).is_some() {
            return Err(PayrollError::DuplicatePeriod {
                month: new_run.period.month(),
                year: new_run.period.year(),
            });
        }

        tables.next_run_id += 1;
        let now = Utc::now();
        let run = PayrollRun {
            id: tables.next_run_id,
            period: new_run.period,
            status: RunStatus::Draft,
            total_amount: Decimal::ZERO,
            payment_date: new_run.payment_date,
            notes: normalize_note(new_run.notes),
            created_by: new_run.created_by,
            created_at: now,
            updated_at: now,
        };
        tables.runs.insert(run.id, run.clone());
        Ok(run)
    }

    fn insert_item(&self, run_id: u64, item: NewPayrollItem) -> PayrollResult<PayrollItem> {
        let mut tables = self.write()?;
        tables.draft_mut(run_id)?;

        if item.gross_amount <= Decimal::ZERO {
            return Err(PayrollError::ItemRejected {
                employee_id: item.employee_id,
                message: format!("gross amount must be positive, got {}", item.gross_amount),
            });
        }
        if tables
            .items_of(run_id)
            .any(|existing| existing.employee_id == item.employee_id)
        {
            return Err(PayrollError::ItemRejected {
                employee_id: item.employee_id,
                message: "employee is already included in this payroll run".to_string(),
            });
        }

        tables.next_item_id += 1;
        let created = PayrollItem {
            id: tables.next_item_id,
            payroll_run_id: run_id,
            employee_id: item.employee_id,
            employee_name: item.employee_name,
            salary_record_id: item.salary_record_id,
            gross_amount: item.gross_amount,
            linked_ledger_entry_id: None,
            notes: None,
            created_at: Utc::now(),
        };
        tables.items.insert(created.id, created.clone());
        Ok(created)
    }

    fn recompute_total(&self, run_id: u64) -> PayrollResult<Decimal> {
        let mut tables = self.write()?;
        let total: Decimal = tables.items_of(run_id).map(|item| item.gross_amount).sum();
        let run = tables.run_mut(run_id)?;
        run.total_amount = total;
        run.updated_at = Utc::now();
        Ok(total)
    }

    fn find_run(&self, run_id: u64) -> PayrollResult<Option<PayrollRun>> {
        Ok(self.read()?.runs.get(&run_id).cloned())
    }

    fn items(&self, run_id: u64) -> PayrollResult<Vec<PayrollItem>> {
        let tables = self.read()?;
        let mut items: Vec<PayrollItem> = tables.items_of(run_id).cloned().collect();
        items.sort_by_key(|item| (item.employee_id, item.id));
        Ok(items)
    }

    fn find_by_period(&self, period: ReferencePeriod) -> PayrollResult<Option<PayrollRun>> {
        Ok(self.read()?.live_run_for(period).cloned())
    }

    fn update_draft(&self, run_id: u64, changes: &DraftChanges) -> PayrollResult<PayrollRun> {
        let mut tables = self.write()?;
        let run = tables.draft_mut(run_id)?;
        if let Some(payment_date) = changes.payment_date {
            run.payment_date = payment_date;
        }
        if let Some(notes) = &changes.notes {
            run.notes = normalize_note(notes.clone());
        }
        if !changes.is_empty() {
            run.updated_at = Utc::now();
        }
        Ok(run.clone())
    }

    fn transition_status(
        &self,
        run_id: u64,
        expected: RunStatus,
        target: RunStatus,
        change: StatusChange,
    ) -> PayrollResult<PayrollRun> {
        let mut tables = self.write()?;
        let run = tables.run_mut(run_id)?;

        if run.status != expected {
            return Err(PayrollError::InvalidStateTransition {
                from: run.status,
                to: target,
                message: format!("run was expected to be {}", expected),
            });
        }
        if target == RunStatus::Approved {
            return Err(PayrollError::InvalidStateTransition {
                from: run.status,
                to: target,
                message: "approval must record the ledger links of every item".to_string(),
            });
        }
        if !expected.can_transition_to(target) {
            return Err(PayrollError::InvalidStateTransition {
                from: run.status,
                to: target,
                message: "transition not allowed".to_string(),
            });
        }

        run.status = target;
        if let Some(payment_date) = change.payment_date {
            run.payment_date = Some(payment_date);
        }
        if let Some(note) = change.note {
            append_note(&mut run.notes, &note);
        }
        run.updated_at = Utc::now();
        Ok(run.clone())
    }

    fn approve_run(
        &self,
        run_id: u64,
        links: &[(u64, u64)],
        change: StatusChange,
    ) -> PayrollResult<PayrollRun> {
        let mut tables = self.write()?;
        let status = tables.run(run_id)?.status;
        if status != RunStatus::Draft {
            return Err(PayrollError::InvalidStateTransition {
                from: status,
                to: RunStatus::Approved,
                message: "only draft runs can be approved".to_string(),
            });
        }

        let mut linked = BTreeMap::new();
        for &(item_id, entry_id) in links {
            match tables.items.get(&item_id) {
                Some(item) if item.payroll_run_id != run_id => {
                    return Err(PayrollError::validation(format!(
                        "item {} does not belong to payroll run {}",
                        item_id, run_id
                    )));
                }
                Some(item) if item.linked_ledger_entry_id.is_some() => {
                    return Err(PayrollError::validation(format!(
                        "item {} is already linked to a ledger entry",
                        item_id
                    )));
                }
                Some(_) => {}
                None => {
                    return Err(PayrollError::NotFound {
                        entity: "Payroll item",
                        id: item_id,
                    });
                }
            }
            if linked.insert(item_id, entry_id).is_some() {
                return Err(PayrollError::validation(format!(
                    "item {} is linked twice",
                    item_id
                )));
            }
        }

        let missing = tables
            .items_of(run_id)
            .filter(|item| !linked.contains_key(&item.id))
            .count();
        if missing > 0 {
            return Err(PayrollError::IncompleteLedgerLinkage { missing });
        }
        if linked.is_empty() {
            return Err(PayrollError::validation(
                "cannot approve a payroll run without items",
            ));
        }

        for (item_id, entry_id) in &linked {
            if let Some(item) = tables.items.get_mut(item_id) {
                item.linked_ledger_entry_id = Some(*entry_id);
            }
        }
        let run = tables.run_mut(run_id)?;
        run.status = RunStatus::Approved;
        if let Some(payment_date) = change.payment_date {
            run.payment_date = Some(payment_date);
        }
        if let Some(note) = change.note {
            append_note(&mut run.notes, &note);
        }
        run.updated_at = Utc::now();
        Ok(run.clone())
    }

    fn delete_draft(&self, run_id: u64) -> PayrollResult<()> {
        let mut tables = self.write()?;
        tables.draft_mut(run_id)?;
        tables.items.retain(|_, item| item.payroll_run_id != run_id);
        tables.runs.remove(&run_id);
        Ok(())
    }

    fn list(&self, query: &RunQuery) -> PayrollResult<Page<PayrollRun>> {
        let tables = self.read()?;
        let mut runs: Vec<PayrollRun> = tables
            .runs
            .values()
            .filter(|run| query.matches(run))
            .cloned()
            .collect();
        query.sort(&mut runs);
        Ok(Page::from_sorted(runs, query))
    }

    fn all_runs(&self) -> PayrollResult<Vec<PayrollRun>> {
        Ok(self.read()?.runs.values().cloned().collect())
    }
}
