//! General ledger collaborator.
//!
//! The payroll engine talks to the ledger only through the [`LedgerGateway`]
//! trait. [`InMemoryLedger`] is the implementation the service runs with,
//! seeded from the chart of accounts in the configuration directory.

mod accounts;
mod gateway;
mod memory;

pub use accounts::{BankAccount, CostCenter, LedgerAccount};
pub use gateway::LedgerGateway;
pub use memory::InMemoryLedger;
