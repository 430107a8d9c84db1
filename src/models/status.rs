//! Payroll run status and its transition table.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lifecycle status of a payroll run.
///
/// Runs are created in [`RunStatus::Draft`], advance to
/// [`RunStatus::Approved`] and [`RunStatus::Paid`], and may be
/// [`RunStatus::Cancelled`] from draft or approved only.
///
/// # Example
///
/// ```
/// use payroll_engine::models::RunStatus;
///
/// assert!(RunStatus::Draft.can_transition_to(RunStatus::Approved));
/// assert!(!RunStatus::Paid.can_transition_to(RunStatus::Cancelled));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// Generated, editable, no ledger entries yet.
    Draft,
    /// Every item carries a pending ledger entry.
    Approved,
    /// Every ledger entry is confirmed. Terminal.
    Paid,
    /// Abandoned. Terminal.
    Cancelled,
}

impl RunStatus {
    /// All statuses, in lifecycle order.
    pub const ALL: [RunStatus; 4] = [
        RunStatus::Draft,
        RunStatus::Approved,
        RunStatus::Paid,
        RunStatus::Cancelled,
    ];

    /// Returns true if a run in `self` may move to `target`.
    pub fn can_transition_to(self, target: RunStatus) -> bool {
        matches!(
            (self, target),
            (RunStatus::Draft, RunStatus::Approved)
                | (RunStatus::Draft, RunStatus::Cancelled)
                | (RunStatus::Approved, RunStatus::Paid)
                | (RunStatus::Approved, RunStatus::Cancelled)
        )
    }

    /// Returns true for statuses no transition leaves.
    pub fn is_terminal(self) -> bool {
        matches!(self, RunStatus::Paid | RunStatus::Cancelled)
    }

    /// The snake_case name used on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            RunStatus::Draft => "draft",
            RunStatus::Approved => "approved",
            RunStatus::Paid => "paid",
            RunStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RunStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RunStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("unknown payroll status '{}'", s))
    }
}
