//! Approval: one pending ledger entry per item, linked all at once.

use tracing::{error, info};

use super::{ApproveRun, PayrollOrchestrator, annotation, ledger_failure, today};
use crate::error::{PayrollError, PayrollResult};
use crate::models::{EntryOrigin, NewLedgerEntry, PayrollRunDetails, RunStatus};
use crate::repository::StatusChange;

impl PayrollOrchestrator {
    /// Approves a draft run.
    ///
    /// Every check runs before the first ledger call. Entries are then
    /// created item by item; if one fails, the entries created so far are
    /// cancelled, nothing is linked and the run stays a draft. The links and
    /// the status change are recorded in one repository step, which refuses
    /// to approve if the run gained items or left Draft in the meantime; the
    /// entries are compensated the same way then.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the run, account, bank account or cost center is unknown
    /// - `InvalidStateTransition` if the run is not a draft
    /// - `Validation` if the run has no items
    /// - `InactiveAccount`, `NonLeafAccount`, `InactiveBankAccount`,
    ///   `InactiveCostCenter` for unusable ledger targets
    /// - `LedgerGateway` if an entry could not be created
    /// - `IncompleteLedgerLinkage` if items were added while entries were created
    pub fn approve(
        &self,
        run_id: u64,
        command: ApproveRun,
        approved_by: u64,
    ) -> PayrollResult<PayrollRunDetails> {
        let run = self.load_run(run_id)?;
        if run.status != RunStatus::Draft {
            return Err(PayrollError::InvalidStateTransition {
                from: run.status,
                to: RunStatus::Approved,
                message: "only draft runs can be approved".to_string(),
            });
        }

        let items = self.repository.items(run_id)?;
        if items.is_empty() {
            return Err(PayrollError::validation(
                "cannot approve a payroll run without items",
            ));
        }

        self.check_account(command.account_id)?;
        self.check_bank_account(command.bank_account_id)?;
        if let Some(cost_center_id) = command.cost_center_id {
            self.check_cost_center(cost_center_id)?;
        }

        let competence_date = run.period.first_day();
        let due_date = run.payment_date.unwrap_or_else(|| run.period.last_day());

        let mut links = Vec::with_capacity(items.len());
        for item in &items {
            let entry = NewLedgerEntry {
                account_id: command.account_id,
                bank_account_id: command.bank_account_id,
                cost_center_id: command.cost_center_id,
                amount: item.gross_amount,
                description: format!("Salary {} - {}", item.employee_name, run.period.label()),
                competence_date,
                due_date,
                origin: EntryOrigin {
                    payroll_run_id: run_id,
                    payroll_item_id: item.id,
                },
                created_by: approved_by,
            };
            match self.ledger.create_entry(entry) {
                Ok(entry_id) => links.push((item.id, entry_id)),
                Err(err) => {
                    error!(
                        run_id,
                        employee_id = item.employee_id,
                        created = links.len(),
                        error = %err,
                        "Approval aborted: ledger entry not created"
                    );
                    self.compensate(run_id, &links);
                    return Err(ledger_failure(err));
                }
            }
        }

        let change = StatusChange {
            payment_date: None,
            note: Some(annotation("Approved", today(), command.notes)),
        };
        let run = match self.repository.approve_run(run_id, &links, change) {
            Ok(run) => run,
            Err(err) => {
                error!(run_id, error = %err, "Approval aborted while recording ledger links");
                self.compensate(run_id, &links);
                return Err(err);
            }
        };

        info!(
            run_id,
            month = run.period.month(),
            year = run.period.year(),
            entries = links.len(),
            approved_by,
            "Payroll run approved"
        );
        self.details(run)
    }

    /// Cancels entries created by an aborted approval.
    fn compensate(&self, run_id: u64, links: &[(u64, u64)]) {
        let note = format!("Approval of payroll run {} aborted", run_id);
        for &(_, entry_id) in links {
            if let Err(err) = self.ledger.cancel_entry(entry_id, Some(&note)) {
                error!(
                    run_id,
                    entry_id,
                    error = %err,
                    "Compensation failed; ledger entry requires manual reconciliation"
                );
            }
        }
    }

    fn check_account(&self, account_id: u64) -> PayrollResult<()> {
        let status = self
            .ledger
            .validate_account(account_id)?
            .ok_or(PayrollError::NotFound {
                entity: "Account",
                id: account_id,
            })?;
        if !status.active {
            return Err(PayrollError::InactiveAccount { account_id });
        }
        if !status.is_leaf {
            return Err(PayrollError::NonLeafAccount { account_id });
        }
        Ok(())
    }

    pub(super) fn check_bank_account(&self, bank_account_id: u64) -> PayrollResult<()> {
        let status = self
            .ledger
            .validate_bank_account(bank_account_id)?
            .ok_or(PayrollError::NotFound {
                entity: "Bank account",
                id: bank_account_id,
            })?;
        if !status.active {
            return Err(PayrollError::InactiveBankAccount { bank_account_id });
        }
        Ok(())
    }

    fn check_cost_center(&self, cost_center_id: u64) -> PayrollResult<()> {
        let status = self
            .ledger
            .validate_cost_center(cost_center_id)?
            .ok_or(PayrollError::NotFound {
                entity: "Cost center",
                id: cost_center_id,
            })?;
        if !status.active {
            return Err(PayrollError::InactiveCostCenter { cost_center_id });
        }
        Ok(())
    }
}
