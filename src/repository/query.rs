//! Listing parameters and paginated results.

use serde::{Deserialize, Serialize};

use crate::models::{PayrollRun, RunStatus};

/// Field runs are ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunSortField {
    /// Reference year, then month.
    #[default]
    Period,
    /// Total amount.
    TotalAmount,
    /// Lifecycle status.
    Status,
    /// Generation timestamp.
    CreatedAt,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Smallest first.
    Asc,
    /// Largest first.
    #[default]
    Desc,
}

/// Filters, ordering and pagination for listing runs.
///
/// `page` is 1-based. A `per_page` of zero is treated as one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunQuery {
    /// Requested page, starting at 1.
    pub page: u32,
    /// Runs per page.
    pub per_page: u32,
    /// Only runs of this month.
    pub month: Option<u32>,
    /// Only runs of this year.
    pub year: Option<i32>,
    /// Only runs in one of these statuses; empty means any.
    pub statuses: Vec<RunStatus>,
    /// Ordering field.
    pub sort_by: RunSortField,
    /// Ordering direction.
    pub order: SortOrder,
}

impl Default for RunQuery {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 50,
            month: None,
            year: None,
            statuses: Vec::new(),
            sort_by: RunSortField::default(),
            order: SortOrder::default(),
        }
    }
}

impl RunQuery {
    /// Returns true if `run` passes the filters.
    pub fn matches(&self, run: &PayrollRun) -> bool {
        self.month.is_none_or(|month| run.period.month() == month)
            && self.year.is_none_or(|year| run.period.year() == year)
            && (self.statuses.is_empty() || self.statuses.contains(&run.status))
    }

    /// Orders `runs` in place according to the query.
    pub fn sort(&self, runs: &mut [PayrollRun]) {
        runs.sort_by(|a, b| {
            let ordering = match self.sort_by {
                RunSortField::Period => a.period.cmp(&b.period),
                RunSortField::TotalAmount => a.total_amount.cmp(&b.total_amount),
                RunSortField::Status => a.status.cmp(&b.status),
                RunSortField::CreatedAt => a.created_at.cmp(&b.created_at),
            }
            .then(a.id.cmp(&b.id));
            match self.order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });
    }

    /// Zero-based offset of the first row of the page.
    pub fn offset(&self) -> usize {
        (self.page.max(1) as usize - 1) * self.per_page.max(1) as usize
    }
}

/// One page of results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    /// Rows of this page.
    pub items: Vec<T>,
    /// Page number, starting at 1.
    pub page: u32,
    /// Rows per page.
    pub per_page: u32,
    /// Rows matching the filters across all pages.
    pub total: usize,
    /// Number of pages.
    pub total_pages: usize,
}

impl<T> Page<T> {
    /// Builds a page from the full, already ordered list of matching rows.
    pub fn from_sorted(rows: Vec<T>, query: &RunQuery) -> Self {
        let per_page = query.per_page.max(1);
        let total = rows.len();
        let items = rows
            .into_iter()
            .skip(query.offset())
            .take(per_page as usize)
            .collect();
        Self {
            items,
            page: query.page.max(1),
            per_page,
            total,
            total_pages: total.div_ceil(per_page as usize),
        }
    }

    /// Converts the rows while keeping pagination metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            per_page: self.per_page,
            total: self.total,
            total_pages: self.total_pages,
        }
    }

    /// Same as [`Page::map`] for fallible conversions.
    pub fn try_map<U, E>(self, f: impl FnMut(T) -> Result<U, E>) -> Result<Page<U>, E> {
        Ok(Page {
            items: self.items.into_iter().map(f).collect::<Result<_, E>>()?,
            page: self.page,
            per_page: self.per_page,
            total: self.total,
            total_pages: self.total_pages,
        })
    }
}
