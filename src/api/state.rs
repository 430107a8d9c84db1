//! Application state for the payroll API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::ledger::LedgerGateway;
use crate::orchestrator::PayrollOrchestrator;
use crate::reporting::PayrollQueries;
use crate::repository::{InMemoryPayrollRepository, PayrollRepository};

/// Shared application state.
///
/// Holds the orchestrator for lifecycle commands and the query service for
/// listings.
#[derive(Clone)]
pub struct AppState {
    orchestrator: Arc<PayrollOrchestrator>,
    queries: Arc<PayrollQueries>,
}

impl AppState {
    /// Creates a new application state from already-wired services.
    pub fn new(orchestrator: PayrollOrchestrator, queries: PayrollQueries) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
            queries: Arc::new(queries),
        }
    }

    /// Wires in-memory collaborators seeded from the loaded configuration.
    pub fn from_config(config: &ConfigLoader) -> Self {
        let repository: Arc<dyn PayrollRepository> = Arc::new(InMemoryPayrollRepository::new());
        let ledger: Arc<dyn LedgerGateway> = Arc::new(config.build_ledger());
        let salaries = Arc::new(config.build_salary_store());
        let settings = config.settings().clone();

        let queries = PayrollQueries::new(repository.clone(), ledger.clone(), settings.clone());
        let orchestrator = PayrollOrchestrator::new(repository, ledger, salaries, settings);
        Self::new(orchestrator, queries)
    }

    /// Returns the lifecycle orchestrator.
    pub fn orchestrator(&self) -> &PayrollOrchestrator {
        &self.orchestrator
    }

    /// Returns the query service.
    pub fn queries(&self) -> &PayrollQueries {
        &self.queries
    }
}
