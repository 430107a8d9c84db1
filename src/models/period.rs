//! Reference period (month/year) of a payroll run.

use std::fmt;

use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;

use crate::error::{PayrollError, PayrollResult};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// The month a payroll run pays for.
///
/// A `ReferencePeriod` always holds a month in `1..=12`; construct it with
/// [`ReferencePeriod::new`].
///
/// # Example
///
/// ```
/// use payroll_engine::models::ReferencePeriod;
/// use chrono::NaiveDate;
///
/// let period = ReferencePeriod::new(2, 2024).unwrap();
/// assert_eq!(period.first_day(), NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
/// assert_eq!(period.last_day(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
/// assert_eq!(period.label(), "February/2024");
///
/// assert!(ReferencePeriod::new(13, 2024).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ReferencePeriod {
    #[serde(rename = "reference_year")]
    year: i32,
    #[serde(rename = "reference_month")]
    month: u32,
}

impl ReferencePeriod {
    /// Creates a period, rejecting months outside `1..=12`.
    pub fn new(month: u32, year: i32) -> PayrollResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(PayrollError::validation(format!(
                "month must be between 1 and 12, got {}",
                month
            )));
        }
        if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(PayrollError::validation(format!(
                "year {} is out of range",
                year
            )));
        }
        Ok(Self { year, month })
    }

    /// The period containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Reference month, `1..=12`.
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Reference year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// First calendar day of the period.
    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// Last calendar day of the period.
    pub fn last_day(&self) -> NaiveDate {
        let (year, month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        NaiveDate::from_ymd_opt(year, month, 1)
            .and_then(|next| next.checked_sub_days(Days::new(1)))
            .unwrap_or(NaiveDate::MAX)
    }

    /// English month name.
    pub fn month_name(&self) -> &'static str {
        MONTH_NAMES[(self.month - 1) as usize]
    }

    /// Human-readable label, e.g. `January/2024`.
    pub fn label(&self) -> String {
        format!("{}/{}", self.month_name(), self.year)
    }

    /// Checks that a payroll may be generated for this period.
    ///
    /// The year must be at least `min_year`, and unless `allow_future` is set
    /// the period must not be after the month containing `today`.
    pub fn validate_for_generation(
        &self,
        min_year: i32,
        allow_future: bool,
        today: NaiveDate,
    ) -> PayrollResult<()> {
        if self.year < min_year {
            return Err(PayrollError::validation(format!(
                "year must be greater than or equal to {}",
                min_year
            )));
        }
        if !allow_future && *self > Self::containing(today) {
            return Err(PayrollError::validation(
                "cannot generate a payroll for a future period",
            ));
        }
        Ok(())
    }
}

impl fmt::Display for ReferencePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{}", self.month, self.year)
    }
}
