//! Cancellation of draft and approved runs.

use tracing::{debug, error, info, warn};

use super::{CancelRun, PayrollOrchestrator, annotation, ledger_failure, today};
use crate::error::{PayrollError, PayrollResult};
use crate::models::{LedgerEntryStatus, PayrollRunDetails, RunStatus, normalize_note};
use crate::repository::StatusChange;

impl PayrollOrchestrator {
    /// Cancels a draft or approved run.
    ///
    /// A draft has no ledger entries and is simply cancelled. For an approved
    /// run, every linked entry that is still pending is cancelled in the
    /// ledger; confirmed or already cancelled entries are left untouched.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the run is unknown
    /// - `CannotCancelPaidRun` for a paid run
    /// - `InvalidStateTransition` for a run that is already cancelled
    /// - `LedgerGateway` if an entry could not be read or cancelled; the run
    ///   then stays approved
    pub fn cancel(
        &self,
        run_id: u64,
        command: CancelRun,
        cancelled_by: u64,
    ) -> PayrollResult<PayrollRunDetails> {
        let run = self.load_run(run_id)?;
        match run.status {
            RunStatus::Paid => return Err(PayrollError::CannotCancelPaidRun { run_id }),
            RunStatus::Cancelled => {
                return Err(PayrollError::InvalidStateTransition {
                    from: RunStatus::Cancelled,
                    to: RunStatus::Cancelled,
                    message: "run is already cancelled".to_string(),
                });
            }
            RunStatus::Approved => self.cancel_pending_entries(run_id)?,
            RunStatus::Draft => {}
        }

        let reason = normalize_note(command.reason);
        let run = self.repository.transition_status(
            run_id,
            run.status,
            RunStatus::Cancelled,
            StatusChange {
                payment_date: None,
                note: Some(annotation("Cancelled", today(), reason.clone())),
            },
        )?;

        info!(
            run_id,
            month = run.period.month(),
            year = run.period.year(),
            reason = reason.as_deref().unwrap_or(""),
            cancelled_by,
            "Payroll run cancelled"
        );
        self.details(run)
    }

    fn cancel_pending_entries(&self, run_id: u64) -> PayrollResult<()> {
        let note = format!("Payroll run {} cancelled", run_id);
        let entry_ids = self
            .repository
            .items(run_id)?
            .into_iter()
            .filter_map(|item| item.linked_ledger_entry_id);

        for entry_id in entry_ids {
            let entry = match self.ledger.entry(entry_id) {
                Ok(Some(entry)) => entry,
                Ok(None) => {
                    warn!(run_id, entry_id, "Linked ledger entry not found, skipped");
                    continue;
                }
                Err(err) => return Err(self.cancellation_aborted(run_id, entry_id, err)),
            };
            if entry.status != LedgerEntryStatus::Pending {
                debug!(run_id, entry_id, status = %entry.status, "Ledger entry left untouched");
                continue;
            }
            if let Err(err) = self.ledger.cancel_entry(entry_id, Some(&note)) {
                return Err(self.cancellation_aborted(run_id, entry_id, err));
            }
        }
        Ok(())
    }

    fn cancellation_aborted(&self, run_id: u64, entry_id: u64, err: PayrollError) -> PayrollError {
        error!(
            run_id,
            entry_id,
            error = %err,
            "Cancellation aborted: ledger entry not cancelled"
        );
        ledger_failure(err)
    }
}
