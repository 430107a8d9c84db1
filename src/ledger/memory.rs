//! In-memory general ledger.

use std::collections::{BTreeMap, HashMap};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use super::accounts::{BankAccount, CostCenter, LedgerAccount};
use super::gateway::LedgerGateway;
use crate::error::{PayrollError, PayrollResult};
use crate::models::{
    AccountStatus, ActiveStatus, ConfirmEntry, LedgerEntry, LedgerEntryStatus, NewLedgerEntry,
    append_note,
};

#[derive(Debug, Default)]
struct LedgerState {
    accounts: HashMap<u64, LedgerAccount>,
    bank_accounts: HashMap<u64, BankAccount>,
    cost_centers: HashMap<u64, CostCenter>,
    entries: BTreeMap<u64, LedgerEntry>,
    next_entry_id: u64,
}

/// A general ledger kept in memory.
///
/// Besides serving [`LedgerGateway`], the ledger enforces its own integrity:
/// entries can only target known, active, analytic accounts and active bank
/// accounts.
///
/// # Example
///
/// ```
/// use payroll_engine::ledger::{InMemoryLedger, LedgerAccount, LedgerGateway};
///
/// let ledger = InMemoryLedger::new();
/// ledger.add_account(LedgerAccount {
///     id: 1,
///     code: "3".to_string(),
///     name: "Expenses".to_string(),
///     accepts_entries: false,
///     active: true,
/// });
///
/// let status = ledger.validate_account(1).unwrap().unwrap();
/// assert!(status.active);
/// assert!(!status.is_leaf);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    state: RwLock<LedgerState>,
}

impl InMemoryLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a ledger knowing the given accounts, bank accounts and cost centers.
    pub fn with_chart(
        accounts: Vec<LedgerAccount>,
        bank_accounts: Vec<BankAccount>,
        cost_centers: Vec<CostCenter>,
    ) -> Self {
        let ledger = Self::new();
        for account in accounts {
            ledger.add_account(account);
        }
        for bank_account in bank_accounts {
            ledger.add_bank_account(bank_account);
        }
        for cost_center in cost_centers {
            ledger.add_cost_center(cost_center);
        }
        ledger
    }

    /// Registers or replaces an accounting account.
    pub fn add_account(&self, account: LedgerAccount) {
        if let Ok(mut state) = self.state.write() {
            state.accounts.insert(account.id, account);
        }
    }

    /// Registers or replaces a bank account.
    pub fn add_bank_account(&self, bank_account: BankAccount) {
        if let Ok(mut state) = self.state.write() {
            state.bank_accounts.insert(bank_account.id, bank_account);
        }
    }

    /// Registers or replaces a cost center.
    pub fn add_cost_center(&self, cost_center: CostCenter) {
        if let Ok(mut state) = self.state.write() {
            state.cost_centers.insert(cost_center.id, cost_center);
        }
    }

    /// All entries, ordered by id.
    pub fn entries(&self) -> PayrollResult<Vec<LedgerEntry>> {
        Ok(self.read()?.entries.values().cloned().collect())
    }

    fn read(&self) -> PayrollResult<RwLockReadGuard<'_, LedgerState>> {
        self.state
            .read()
            .map_err(|_| PayrollError::ledger("ledger lock poisoned"))
    }

    fn write(&self) -> PayrollResult<RwLockWriteGuard<'_, LedgerState>> {
        self.state
            .write()
            .map_err(|_| PayrollError::ledger("ledger lock poisoned"))
    }
}

impl LedgerGateway for InMemoryLedger {
    fn create_entry(&self, entry: NewLedgerEntry) -> PayrollResult<u64> {
        let mut state = self.write()?;

        match state.accounts.get(&entry.account_id) {
            Some(account) if account.active && account.accepts_entries => {}
            Some(account) => {
                return Err(PayrollError::ledger(format!(
                    "account {} ({}) does not accept entries",
                    account.id, account.code
                )));
            }
            None => {
                return Err(PayrollError::ledger(format!(
                    "account {} does not exist",
                    entry.account_id
                )));
            }
        }
        if !state
            .bank_accounts
            .get(&entry.bank_account_id)
            .is_some_and(|bank| bank.active)
        {
            return Err(PayrollError::ledger(format!(
                "bank account {} is unavailable",
                entry.bank_account_id
            )));
        }

        state.next_entry_id += 1;
        let id = state.next_entry_id;
        state.entries.insert(
            id,
            LedgerEntry {
                id,
                status: LedgerEntryStatus::Pending,
                account_id: entry.account_id,
                bank_account_id: entry.bank_account_id,
                cost_center_id: entry.cost_center_id,
                amount: entry.amount,
                description: entry.description,
                competence_date: entry.competence_date,
                due_date: entry.due_date,
                effective_date: None,
                payment_method: None,
                notes: None,
                origin: entry.origin,
            },
        );
        Ok(id)
    }

    fn confirm_entry(&self, entry_id: u64, confirmation: &ConfirmEntry) -> PayrollResult<()> {
        let mut state = self.write()?;
        let entry = state
            .entries
            .get_mut(&entry_id)
            .ok_or_else(|| PayrollError::ledger(format!("entry {} does not exist", entry_id)))?;

        match entry.status {
            LedgerEntryStatus::Pending => {
                entry.status = LedgerEntryStatus::Confirmed;
                entry.payment_method = Some(confirmation.payment_method);
                entry.bank_account_id = confirmation.bank_account_id;
                entry.effective_date = Some(confirmation.effective_date);
                if let Some(notes) = &confirmation.notes {
                    append_note(&mut entry.notes, &format!("[Payment] {}", notes));
                }
                Ok(())
            }
            LedgerEntryStatus::Confirmed => {
                debug!(entry_id, "Entry already confirmed");
                Ok(())
            }
            LedgerEntryStatus::Cancelled => Err(PayrollError::ledger(format!(
                "entry {} is cancelled and cannot be confirmed",
                entry_id
            ))),
        }
    }

    fn cancel_entry(&self, entry_id: u64, note: Option<&str>) -> PayrollResult<()> {
        let mut state = self.write()?;
        let entry = state
            .entries
            .get_mut(&entry_id)
            .ok_or_else(|| PayrollError::ledger(format!("entry {} does not exist", entry_id)))?;

        if entry.status != LedgerEntryStatus::Pending {
            debug!(entry_id, status = %entry.status, "Entry not pending, left untouched");
            return Ok(());
        }
        entry.status = LedgerEntryStatus::Cancelled;
        if let Some(note) = note {
            append_note(&mut entry.notes, note);
        }
        Ok(())
    }

    fn entry(&self, entry_id: u64) -> PayrollResult<Option<LedgerEntry>> {
        Ok(self.read()?.entries.get(&entry_id).cloned())
    }

    fn validate_account(&self, account_id: u64) -> PayrollResult<Option<AccountStatus>> {
        Ok(self
            .read()?
            .accounts
            .get(&account_id)
            .map(|account| AccountStatus {
                active: account.active,
                is_leaf: account.accepts_entries,
            }))
    }

    fn validate_bank_account(&self, bank_account_id: u64) -> PayrollResult<Option<ActiveStatus>> {
        Ok(self
            .read()?
            .bank_accounts
            .get(&bank_account_id)
            .map(|bank| ActiveStatus {
                active: bank.active,
            }))
    }

    fn validate_cost_center(&self, cost_center_id: u64) -> PayrollResult<Option<ActiveStatus>> {
        Ok(self
            .read()?
            .cost_centers
            .get(&cost_center_id)
            .map(|center| ActiveStatus {
                active: center.active,
            }))
    }
}
