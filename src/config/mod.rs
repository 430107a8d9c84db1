//! Configuration loading and management for the payroll engine.
//!
//! This module loads engine settings and the seed data of the in-memory
//! collaborators (chart of accounts, bank accounts, cost centers and salary
//! records) from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config").unwrap();
//! println!("Serving on {}", config.settings().server_addr);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AccountsSeed, BankAccountsSeed, CostCentersSeed, PayrollSettings, SalariesSeed, SeedData,
};
