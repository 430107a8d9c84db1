//! Request types for the payroll API.
//!
//! Lifecycle commands are accepted as JSON bodies directly
//! ([`GenerateRun`](crate::orchestrator::GenerateRun) and friends). This
//! module holds the shapes that only exist at the HTTP edge: query strings
//! and partial updates.

use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

use crate::error::{PayrollError, PayrollResult};
use crate::models::RunStatus;
use crate::orchestrator::UpdateDraft;
use crate::repository::{RunQuery, RunSortField, SortOrder};

/// Query string of `GET /payroll-runs`.
///
/// `status` is a comma-separated list, e.g. `status=draft,approved`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListRunsParams {
    /// Page number, starting at 1.
    pub page: Option<u32>,
    /// Runs per page.
    pub per_page: Option<u32>,
    /// Reference month filter.
    pub month: Option<u32>,
    /// Reference year filter.
    pub year: Option<i32>,
    /// Comma-separated statuses.
    pub status: Option<String>,
    /// Ordering field.
    pub sort_by: Option<RunSortField>,
    /// Ordering direction.
    pub order: Option<SortOrder>,
}

impl ListRunsParams {
    /// Builds a listing query on top of `defaults`.
    pub fn into_query(self, defaults: RunQuery) -> PayrollResult<RunQuery> {
        let statuses = match self.status.as_deref() {
            Some(list) => list
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| RunStatus::from_str(s).map_err(PayrollError::validation))
                .collect::<PayrollResult<Vec<_>>>()?,
            None => Vec::new(),
        };
        if let Some(month) = self.month.filter(|m| !(1..=12).contains(m)) {
            return Err(PayrollError::validation(format!(
                "month must be between 1 and 12, got {}",
                month
            )));
        }

        Ok(RunQuery {
            page: self.page.unwrap_or(defaults.page),
            per_page: self.per_page.unwrap_or(defaults.per_page),
            month: self.month,
            year: self.year,
            statuses,
            sort_by: self.sort_by.unwrap_or(defaults.sort_by),
            order: self.order.unwrap_or(defaults.order),
        })
    }
}

/// Query string of `GET /payroll-runs/preview`.
#[derive(Debug, Clone, Deserialize)]
pub struct PreviewParams {
    /// Reference month.
    pub month: u32,
    /// Reference year.
    pub year: i32,
}

/// Body of `PATCH /payroll-runs/:id`.
///
/// An absent field is left unchanged, an explicit `null` clears it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateDraftRequest {
    /// New planned payment date.
    #[serde(default, deserialize_with = "present")]
    pub payment_date: Option<Option<NaiveDate>>,
    /// New notes.
    #[serde(default, deserialize_with = "present")]
    pub notes: Option<Option<String>>,
}

impl From<UpdateDraftRequest> for UpdateDraft {
    fn from(request: UpdateDraftRequest) -> Self {
        UpdateDraft {
            payment_date: request.payment_date,
            notes: request.notes,
        }
    }
}

/// Marks a field as present, keeping an explicit `null` as `Some(None)`.
fn present<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
