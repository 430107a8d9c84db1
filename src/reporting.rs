//! Read-side queries over payroll runs: listing and totals by status.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::config::PayrollSettings;
use crate::error::PayrollResult;
use crate::ledger::LedgerGateway;
use crate::models::{PayrollRunDetails, RunStatus};
use crate::orchestrator::join_details;
use crate::repository::{Page, PayrollRepository, RunQuery};

/// Number of runs and their summed totals for one status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusTotal {
    /// Number of runs.
    pub count: usize,
    /// Sum of the runs' total amounts.
    pub total_amount: Decimal,
}

/// Run counts and amounts grouped by status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusTotals {
    /// Draft runs.
    pub draft: StatusTotal,
    /// Approved runs.
    pub approved: StatusTotal,
    /// Paid runs.
    pub paid: StatusTotal,
    /// Cancelled runs.
    pub cancelled: StatusTotal,
}

impl StatusTotals {
    /// Totals for `status`.
    pub fn get(&self, status: RunStatus) -> &StatusTotal {
        match status {
            RunStatus::Draft => &self.draft,
            RunStatus::Approved => &self.approved,
            RunStatus::Paid => &self.paid,
            RunStatus::Cancelled => &self.cancelled,
        }
    }

    fn get_mut(&mut self, status: RunStatus) -> &mut StatusTotal {
        match status {
            RunStatus::Draft => &mut self.draft,
            RunStatus::Approved => &mut self.approved,
            RunStatus::Paid => &mut self.paid,
            RunStatus::Cancelled => &mut self.cancelled,
        }
    }
}

/// Listing and aggregation of payroll runs.
pub struct PayrollQueries {
    repository: Arc<dyn PayrollRepository>,
    ledger: Arc<dyn LedgerGateway>,
    settings: PayrollSettings,
}

impl PayrollQueries {
    /// Creates the query service.
    pub fn new(
        repository: Arc<dyn PayrollRepository>,
        ledger: Arc<dyn LedgerGateway>,
        settings: PayrollSettings,
    ) -> Self {
        Self {
            repository,
            ledger,
            settings,
        }
    }

    /// A listing query with the configured default page size.
    pub fn default_query(&self) -> RunQuery {
        RunQuery {
            per_page: self.settings.default_page_size,
            ..RunQuery::default()
        }
    }

    /// Lists runs with their items, after clamping the page size to the
    /// configured maximum.
    pub fn list(&self, mut query: RunQuery) -> PayrollResult<Page<PayrollRunDetails>> {
        query.page = query.page.max(1);
        query.per_page = query.per_page.clamp(1, self.settings.max_page_size.max(1));

        self.repository.list(&query)?.try_map(|run| {
            join_details(self.repository.as_ref(), self.ledger.as_ref(), run)
        })
    }

    /// Counts and sums runs by status.
    pub fn totals(&self) -> PayrollResult<StatusTotals> {
        let mut totals = StatusTotals::default();
        for run in self.repository.all_runs()? {
            let entry = totals.get_mut(run.status);
            entry.count += 1;
            entry.total_amount += run.total_amount;
        }
        Ok(totals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orchestrator::{CancelRun, GenerateRun, PayrollOrchestrator};
    use crate::repository::{InMemoryPayrollRepository, RunSortField, SortOrder};
    use crate::salary::InMemorySalaryStore;
    use crate::ledger::InMemoryLedger;
    use crate::models::SalaryRecord;
    use chrono::NaiveDate;

    fn setup(settings: PayrollSettings) -> (PayrollOrchestrator, PayrollQueries) {
        let repository: Arc<dyn PayrollRepository> = Arc::new(InMemoryPayrollRepository::new());
        let ledger: Arc<dyn LedgerGateway> = Arc::new(InMemoryLedger::new());
        let salaries = Arc::new(InMemorySalaryStore::new(vec![SalaryRecord {
            id: 1,
            employee_id: 1,
            employee_name: "Ana".to_string(),
            gross_amount: Decimal::new(1000, 0),
            effective_from: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            effective_until: None,
            active: true,
        }]));
        let orchestrator = PayrollOrchestrator::new(
            repository.clone(),
            ledger.clone(),
            salaries,
            settings.clone(),
        );
        let queries = PayrollQueries::new(repository, ledger, settings);
        (orchestrator, queries)
    }

    fn generate(orchestrator: &PayrollOrchestrator, month: u32) -> u64 {
        orchestrator
            .generate(
                GenerateRun {
                    month,
                    year: 2024,
                    payment_date: None,
                    notes: None,
                },
                1,
            )
            .unwrap()
            .run
            .run
            .id
    }

    #[test]
    fn test_list_clamps_page_size() {
        let settings = PayrollSettings {
            max_page_size: 2,
            default_page_size: 2,
            ..PayrollSettings::default()
        };
        let (orchestrator, queries) = setup(settings);
        for month in 1..=3 {
            generate(&orchestrator, month);
        }

        let page = queries
            .list(RunQuery {
                per_page: 500,
                ..queries.default_query()
            })
            .unwrap();
        assert_eq!(page.per_page, 2);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total, 3);
        assert_eq!(page.total_pages, 2);
    }

    #[test]
    fn test_list_includes_items_newest_first() {
        let (orchestrator, queries) = setup(PayrollSettings::default());
        generate(&orchestrator, 1);
        generate(&orchestrator, 2);

        let page = queries.list(queries.default_query()).unwrap();
        assert_eq!(page.items[0].run.period.month(), 2);
        assert_eq!(page.items[0].items.len(), 1);

        let ascending = queries
            .list(RunQuery {
                sort_by: RunSortField::Period,
                order: SortOrder::Asc,
                ..queries.default_query()
            })
            .unwrap();
        assert_eq!(ascending.items[0].run.period.month(), 1);
    }

    #[test]
    fn test_totals_by_status() {
        let (orchestrator, queries) = setup(PayrollSettings::default());
        generate(&orchestrator, 1);
        let cancelled = generate(&orchestrator, 2);
        orchestrator
            .cancel(cancelled, CancelRun::default(), 1)
            .unwrap();

        let totals = queries.totals().unwrap();
        assert_eq!(totals.get(RunStatus::Draft).count, 1);
        assert_eq!(totals.draft.total_amount, Decimal::new(1000, 0));
        assert_eq!(totals.get(RunStatus::Cancelled).count, 1);
        assert_eq!(totals.paid, StatusTotal::default());
    }
}
