//! Read-only checks on a run's ledger state.

use rust_decimal::Decimal;

use super::{CancellationCheck, PayrollOrchestrator, PaymentSummary};
use crate::error::PayrollResult;
use crate::models::{LedgerEntryStatus, RunStatus};

impl PayrollOrchestrator {
    /// Reports whether [`cancel`](Self::cancel) would accept the run.
    ///
    /// Business refusals are reported in the result, never as errors.
    pub fn cancellation_check(&self, run_id: u64) -> PayrollResult<CancellationCheck> {
        let Some(run) = self.repository.find_run(run_id)? else {
            return Ok(CancellationCheck {
                can_cancel: false,
                reason: Some("payroll run not found".to_string()),
                status: None,
                has_confirmed_entries: false,
            });
        };

        let check = match run.status {
            RunStatus::Paid => CancellationCheck {
                can_cancel: false,
                reason: Some(
                    "paid runs cannot be cancelled; reverse individual ledger entries instead"
                        .to_string(),
                ),
                status: Some(run.status),
                has_confirmed_entries: true,
            },
            RunStatus::Cancelled => CancellationCheck {
                can_cancel: false,
                reason: Some("run is already cancelled".to_string()),
                status: Some(run.status),
                has_confirmed_entries: false,
            },
            RunStatus::Draft => CancellationCheck {
                can_cancel: true,
                reason: None,
                status: Some(run.status),
                has_confirmed_entries: false,
            },
            RunStatus::Approved => {
                let confirmed = self
                    .details(run)?
                    .items
                    .iter()
                    .filter_map(|detail| detail.ledger_entry.as_ref())
                    .any(|entry| entry.status == LedgerEntryStatus::Confirmed);
                CancellationCheck {
                    can_cancel: true,
                    reason: confirmed.then(|| {
                        "some ledger entries are already confirmed and will be kept".to_string()
                    }),
                    status: Some(RunStatus::Approved),
                    has_confirmed_entries: confirmed,
                }
            }
        };
        Ok(check)
    }

    /// Counts items by the status of their ledger entry.
    pub fn payment_summary(&self, run_id: u64) -> PayrollResult<PaymentSummary> {
        let details = self.run(run_id)?;

        let mut summary = PaymentSummary {
            run_id,
            status: details.run.status,
            total_gross: details.items_total(),
            item_count: details.items.len(),
            pending_items: 0,
            confirmed_items: 0,
            cancelled_items: 0,
            confirmed_amount: Decimal::ZERO,
        };
        for detail in &details.items {
            match detail.ledger_entry.as_ref().map(|entry| entry.status) {
                None | Some(LedgerEntryStatus::Pending) => summary.pending_items += 1,
                Some(LedgerEntryStatus::Confirmed) => {
                    summary.confirmed_items += 1;
                    summary.confirmed_amount += detail.item.gross_amount;
                }
                Some(LedgerEntryStatus::Cancelled) => summary.cancelled_items += 1,
            }
        }
        Ok(summary)
    }
}
