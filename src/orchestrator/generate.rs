//! Generation of draft runs from effective salary records.

use rust_decimal::Decimal;
use tracing::{info, warn};

use super::{
    GenerateRun, GenerationOutcome, GenerationPreview, ItemFailure, PayrollOrchestrator,
    PreviewLine, check_payment_date,
};
use crate::error::{PayrollError, PayrollResult};
use crate::models::NewPayrollItem;
use crate::repository::NewPayrollRun;

impl PayrollOrchestrator {
    /// Generates a draft run with one item per employee effective in the period.
    ///
    /// # Errors
    ///
    /// - `Validation` for an invalid period or a payment date before it
    /// - `DuplicatePeriod` if a non-cancelled run already exists for the period
    /// - `NoEligibleEmployees` if no salary record is effective in the period
    ///
    /// These are all detected before anything is stored. Items that the
    /// repository refuses are reported in [`GenerationOutcome::failures`] and
    /// do not fail the call. If every item is refused the draft is kept
    /// empty, and it holds the period until it is deleted or cancelled.
    pub fn generate(
        &self,
        command: GenerateRun,
        requested_by: u64,
    ) -> PayrollResult<GenerationOutcome> {
        let period = self.generation_period(command.month, command.year)?;
        if let Some(payment_date) = command.payment_date {
            check_payment_date(period, payment_date)?;
        }

        if self.repository.exists_for_period(period)? {
            return Err(PayrollError::DuplicatePeriod {
                month: period.month(),
                year: period.year(),
            });
        }

        let records = self.salaries.find_active_in_period(period)?;
        if records.is_empty() {
            return Err(PayrollError::NoEligibleEmployees {
                month: period.month(),
                year: period.year(),
            });
        }

        let run = self.repository.insert_run(NewPayrollRun {
            period,
            payment_date: command.payment_date,
            notes: command.notes,
            created_by: requested_by,
        })?;

        let mut failures = Vec::new();
        for record in records {
            let item = NewPayrollItem {
                employee_id: record.employee_id,
                employee_name: record.employee_name.clone(),
                salary_record_id: record.id,
                gross_amount: record.gross_amount,
            };
            if let Err(err) = self.repository.insert_item(run.id, item) {
                warn!(
                    run_id = run.id,
                    employee_id = record.employee_id,
                    salary_record_id = record.id,
                    error = %err,
                    "Payroll item not created"
                );
                let reason = match err {
                    PayrollError::ItemRejected { message, .. } => message,
                    other => other.to_string(),
                };
                failures.push(ItemFailure {
                    employee_id: record.employee_id,
                    employee_name: record.employee_name,
                    salary_record_id: record.id,
                    reason,
                });
            }
        }

        let total = self.repository.recompute_total(run.id)?;
        let run = self.load_run(run.id)?;
        let details = self.details(run)?;

        if details.items.is_empty() {
            warn!(
                run_id = details.run.id,
                failures = failures.len(),
                "Every payroll item failed; the empty draft holds the period until it is deleted or cancelled"
            );
        }
        info!(
            run_id = details.run.id,
            month = period.month(),
            year = period.year(),
            items = details.items.len(),
            failures = failures.len(),
            total = %total,
            "Payroll run generated"
        );

        Ok(GenerationOutcome {
            run: details,
            failures,
        })
    }

    /// Shows what [`generate`](Self::generate) would produce, without storing anything.
    ///
    /// Fails like `generate` for an invalid or already-generated period. A
    /// period without eligible employees yields an empty preview.
    pub fn preview(&self, month: u32, year: i32) -> PayrollResult<GenerationPreview> {
        let period = self.generation_period(month, year)?;
        if self.repository.exists_for_period(period)? {
            return Err(PayrollError::DuplicatePeriod { month, year });
        }

        let employees: Vec<PreviewLine> = self
            .salaries
            .find_active_in_period(period)?
            .into_iter()
            .map(|record| PreviewLine {
                employee_id: record.employee_id,
                employee_name: record.employee_name,
                salary_record_id: record.id,
                gross_amount: record.gross_amount,
            })
            .collect();
        let total_amount: Decimal = employees.iter().map(|line| line.gross_amount).sum();

        Ok(GenerationPreview {
            period,
            period_label: period.label(),
            head_count: employees.len(),
            total_amount,
            employees,
        })
    }
}
