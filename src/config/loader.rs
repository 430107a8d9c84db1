//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine settings
//! and seed data from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{PayrollError, PayrollResult};
use crate::ledger::InMemoryLedger;
use crate::salary::InMemorySalaryStore;

use super::types::{
    AccountsSeed, BankAccountsSeed, CostCentersSeed, PayrollSettings, SalariesSeed, SeedData,
};

/// Loads and provides access to the engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/
/// ├── settings.yaml          # Engine and service settings
/// └── seed/
///     ├── accounts.yaml      # Chart-of-accounts subset
///     ├── bank_accounts.yaml # Bank accounts
///     ├── cost_centers.yaml  # Cost centers
///     └── salaries.yaml      # Salary records
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config")?;
/// println!("Minimum year: {}", loader.settings().min_reference_year);
/// # Ok::<(), payroll_engine::error::PayrollError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    settings: PayrollSettings,
    seed: SeedData,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing (`ConfigNotFound`)
    /// - Any file contains invalid YAML (`ConfigParseError`)
    /// - The settings are inconsistent (`ConfigParseError`)
    pub fn load<P: AsRef<Path>>(path: P) -> PayrollResult<Self> {
        let path = path.as_ref();

        let settings_path = path.join("settings.yaml");
        let settings = Self::load_yaml::<PayrollSettings>(&settings_path)?;
        Self::check_settings(&settings, &settings_path)?;

        let seed_dir = path.join("seed");
        let accounts = Self::load_yaml::<AccountsSeed>(&seed_dir.join("accounts.yaml"))?;
        let bank_accounts =
            Self::load_yaml::<BankAccountsSeed>(&seed_dir.join("bank_accounts.yaml"))?;
        let cost_centers = Self::load_yaml::<CostCentersSeed>(&seed_dir.join("cost_centers.yaml"))?;
        let salaries = Self::load_yaml::<SalariesSeed>(&seed_dir.join("salaries.yaml"))?;

        Ok(Self {
            settings,
            seed: SeedData {
                accounts: accounts.accounts,
                bank_accounts: bank_accounts.bank_accounts,
                cost_centers: cost_centers.cost_centers,
                salaries: salaries.salaries,
            },
        })
    }

    /// Creates a loader from already-built parts.
    pub fn from_parts(settings: PayrollSettings, seed: SeedData) -> Self {
        Self { settings, seed }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> PayrollResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| PayrollError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| PayrollError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn check_settings(settings: &PayrollSettings, path: &Path) -> PayrollResult<()> {
        let problem = if settings.default_page_size == 0 || settings.max_page_size == 0 {
            Some("page sizes must be positive")
        } else if settings.default_page_size > settings.max_page_size {
            Some("default_page_size exceeds max_page_size")
        } else {
            None
        };
        match problem {
            Some(message) => Err(PayrollError::ConfigParseError {
                path: path.display().to_string(),
                message: message.to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Returns the engine settings.
    pub fn settings(&self) -> &PayrollSettings {
        &self.settings
    }

    /// Returns the seed data.
    pub fn seed(&self) -> &SeedData {
        &self.seed
    }

    /// Builds a ledger holding the seeded chart of accounts.
    pub fn build_ledger(&self) -> InMemoryLedger {
        InMemoryLedger::with_chart(
            self.seed.accounts.clone(),
            self.seed.bank_accounts.clone(),
            self.seed.cost_centers.clone(),
        )
    }

    /// Builds a salary store holding the seeded salary records.
    pub fn build_salary_store(&self) -> InMemorySalaryStore {
        InMemorySalaryStore::new(self.seed.salaries.clone())
    }
}
