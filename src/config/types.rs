//! Configuration types for the payroll engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use serde::Deserialize;

use crate::ledger::{BankAccount, CostCenter, LedgerAccount};
use crate::models::SalaryRecord;

/// Engine and service settings from `settings.yaml`.
///
/// Every field has a default, so an empty file is valid.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PayrollSettings {
    /// Earliest reference year a payroll may be generated for.
    pub min_reference_year: i32,
    /// Whether payrolls may be generated for months after the current one.
    pub allow_future_periods: bool,
    /// Page size used when a listing does not ask for one.
    pub default_page_size: u32,
    /// Largest page size a listing may ask for.
    pub max_page_size: u32,
    /// Address the HTTP service binds to.
    pub server_addr: String,
}

impl Default for PayrollSettings {
    fn default() -> Self {
        Self {
            min_reference_year: 2020,
            allow_future_periods: false,
            default_page_size: 50,
            max_page_size: 100,
            server_addr: "0.0.0.0:3000".to_string(),
        }
    }
}

/// `seed/accounts.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountsSeed {
    /// Chart-of-accounts entries.
    pub accounts: Vec<LedgerAccount>,
}

/// `seed/bank_accounts.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct BankAccountsSeed {
    /// Bank accounts.
    pub bank_accounts: Vec<BankAccount>,
}

/// `seed/cost_centers.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct CostCentersSeed {
    /// Cost centers.
    #[serde(default)]
    pub cost_centers: Vec<CostCenter>,
}

/// `seed/salaries.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct SalariesSeed {
    /// Salary records.
    pub salaries: Vec<SalaryRecord>,
}

/// Reference data the in-memory collaborators start with.
#[derive(Debug, Clone, Default)]
pub struct SeedData {
    /// Chart-of-accounts entries.
    pub accounts: Vec<LedgerAccount>,
    /// Bank accounts.
    pub bank_accounts: Vec<BankAccount>,
    /// Cost centers.
    pub cost_centers: Vec<CostCenter>,
    /// Salary records.
    pub salaries: Vec<SalaryRecord>,
}
