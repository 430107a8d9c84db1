//! Editing and deleting draft runs.

use tracing::info;

use super::{PayrollOrchestrator, UpdateDraft, check_payment_date};
use crate::error::{PayrollError, PayrollResult};
use crate::models::{PayrollRun, PayrollRunDetails, RunStatus};
use crate::repository::DraftChanges;

impl PayrollOrchestrator {
    /// Changes the planned payment date or the notes of a draft run.
    ///
    /// Notes are trimmed and blank notes are cleared. An empty update returns
    /// the run unchanged.
    pub fn update_draft(
        &self,
        run_id: u64,
        update: UpdateDraft,
    ) -> PayrollResult<PayrollRunDetails> {
        let run = self.load_draft(run_id)?;
        if let Some(Some(payment_date)) = update.payment_date {
            check_payment_date(run.period, payment_date)?;
        }

        let changes = DraftChanges {
            payment_date: update.payment_date,
            notes: update.notes,
        };
        if changes.is_empty() {
            return self.details(run);
        }

        let run = self.repository.update_draft(run_id, &changes)?;
        info!(run_id, "Draft payroll run updated");
        self.details(run)
    }

    /// Deletes a draft run and its items.
    pub fn delete_draft(&self, run_id: u64) -> PayrollResult<()> {
        let run = self.load_draft(run_id)?;
        self.repository.delete_draft(run_id)?;
        info!(
            run_id,
            month = run.period.month(),
            year = run.period.year(),
            "Draft payroll run deleted"
        );
        Ok(())
    }

    fn load_draft(&self, run_id: u64) -> PayrollResult<PayrollRun> {
        let run = self.load_run(run_id)?;
        if run.status != RunStatus::Draft {
            return Err(PayrollError::RunNotEditable {
                run_id,
                status: run.status,
            });
        }
        Ok(run)
    }
}
