//! Inputs of the orchestrator operations.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::models::PaymentMethod;

/// Generate a draft run for a reference month.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GenerateRun {
    /// Reference month, `1..=12`.
    pub month: u32,
    /// Reference year.
    pub year: i32,
    /// Planned payment date.
    #[serde(default)]
    pub payment_date: Option<NaiveDate>,
    /// Initial notes.
    #[serde(default)]
    pub notes: Option<String>,
}

/// Approve a draft run, creating one pending ledger entry per item.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApproveRun {
    /// Analytic expense account the entries are posted to.
    pub account_id: u64,
    /// Bank account the salaries will be paid from.
    pub bank_account_id: u64,
    /// Optional cost center.
    #[serde(default)]
    pub cost_center_id: Option<u64>,
    /// Appended to the approval annotation.
    #[serde(default)]
    pub notes: Option<String>,
}

/// Pay an approved run, confirming its ledger entries.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PayRun {
    /// Bank account the salaries were paid from.
    pub bank_account_id: u64,
    /// How the salaries were paid.
    pub payment_method: PaymentMethod,
    /// Effective payment date; today when absent.
    #[serde(default)]
    pub payment_date: Option<NaiveDate>,
    /// Attached to every confirmed entry and to the payment annotation.
    #[serde(default)]
    pub notes: Option<String>,
}

/// Cancel a draft or approved run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CancelRun {
    /// Recorded in the cancellation annotation.
    #[serde(default)]
    pub reason: Option<String>,
}

/// Edits to a draft run.
///
/// `None` leaves a field unchanged and `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateDraft {
    /// New planned payment date.
    pub payment_date: Option<Option<NaiveDate>>,
    /// New notes.
    pub notes: Option<Option<String>>,
}
