//! Payment: confirm every linked ledger entry, then mark the run paid.

use tracing::{error, info};

use super::{PayRun, PayrollOrchestrator, annotation, ledger_failure, today};
use crate::error::{PayrollError, PayrollResult};
use crate::models::{ConfirmEntry, PayrollRunDetails, RunStatus, normalize_note};
use crate::repository::StatusChange;

impl PayrollOrchestrator {
    /// Pays an approved run.
    ///
    /// Entries are confirmed in employee order. A failure stops the loop and
    /// leaves the run approved; entries already confirmed stay confirmed and
    /// are skipped by the ledger when the payment is retried.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the run or bank account is unknown
    /// - `InvalidStateTransition` if the run is not approved
    /// - `IncompleteLedgerLinkage` if an item has no ledger entry
    /// - `InactiveBankAccount` for a disabled bank account
    /// - `LedgerGateway` if an entry could not be confirmed
    pub fn pay(
        &self,
        run_id: u64,
        command: PayRun,
        paid_by: u64,
    ) -> PayrollResult<PayrollRunDetails> {
        let run = self.load_run(run_id)?;
        if run.status != RunStatus::Approved {
            return Err(PayrollError::InvalidStateTransition {
                from: run.status,
                to: RunStatus::Paid,
                message: "only approved runs can be paid".to_string(),
            });
        }

        let items = self.repository.items(run_id)?;
        let entry_ids: Vec<u64> = items
            .iter()
            .filter_map(|item| item.linked_ledger_entry_id)
            .collect();
        let missing = items.len() - entry_ids.len();
        if missing > 0 {
            return Err(PayrollError::IncompleteLedgerLinkage { missing });
        }

        self.check_bank_account(command.bank_account_id)?;

        let payment_date = command.payment_date.unwrap_or_else(today);
        let notes = normalize_note(command.notes);
        let confirmation = ConfirmEntry {
            payment_method: command.payment_method,
            bank_account_id: command.bank_account_id,
            effective_date: payment_date,
            notes: notes.clone(),
        };

        for (confirmed, &entry_id) in entry_ids.iter().enumerate() {
            if let Err(err) = self.ledger.confirm_entry(entry_id, &confirmation) {
                error!(
                    run_id,
                    entry_id,
                    confirmed,
                    error = %err,
                    "Payment aborted: ledger entry not confirmed"
                );
                return Err(ledger_failure(err));
            }
        }

        let run = self.repository.transition_status(
            run_id,
            RunStatus::Approved,
            RunStatus::Paid,
            StatusChange {
                payment_date: Some(payment_date),
                note: Some(annotation("Paid", payment_date, notes)),
            },
        )?;

        info!(
            run_id,
            month = run.period.month(),
            year = run.period.year(),
            entries = entry_ids.len(),
            payment_method = ?command.payment_method,
            paid_by,
            "Payroll run paid"
        );
        self.details(run)
    }
}
