//! Chart-of-accounts records known to the in-memory ledger.

use serde::{Deserialize, Serialize};

/// An accounting account.
///
/// Synthetic accounts (`accepts_entries == false`) only aggregate their
/// children; entries must target an analytic account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerAccount {
    /// Account id.
    pub id: u64,
    /// Chart-of-accounts code, e.g. `3.1.01.001`.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Whether the account is a leaf that accepts entries.
    pub accepts_entries: bool,
    /// Inactive accounts reject entries.
    #[serde(default = "default_active")]
    pub active: bool,
}

/// A bank account money is paid from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankAccount {
    /// Bank account id.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Inactive bank accounts reject entries.
    #[serde(default = "default_active")]
    pub active: bool,
}

/// A cost center expenses can be attributed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostCenter {
    /// Cost center id.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Inactive cost centers reject entries.
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}
