//! Salary record snapshot consumed at generation time.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ReferencePeriod;

/// An employee's compensation record.
///
/// Salary records are owned by the HR side of the system; the payroll engine
/// only reads them and copies `gross_amount` into payroll items.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{ReferencePeriod, SalaryRecord};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let record = SalaryRecord {
///     id: 1,
///     employee_id: 10,
///     employee_name: "Ana Souza".to_string(),
///     gross_amount: Decimal::new(500000, 2),
///     effective_from: NaiveDate::from_ymd_opt(2023, 3, 1).unwrap(),
///     effective_until: None,
///     active: true,
/// };
/// assert!(record.is_effective_in(ReferencePeriod::new(1, 2024).unwrap()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryRecord {
    /// Unique identifier of the record.
    pub id: u64,
    /// The employee this record belongs to.
    pub employee_id: u64,
    /// Display name of the employee.
    pub employee_name: String,
    /// Monthly gross amount.
    pub gross_amount: Decimal,
    /// First day the record applies (inclusive).
    pub effective_from: NaiveDate,
    /// Last day the record applies (inclusive); open-ended when `None`.
    #[serde(default)]
    pub effective_until: Option<NaiveDate>,
    /// Inactive records are never considered.
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl SalaryRecord {
    /// Returns true if the record is active and overlaps any day of `period`.
    pub fn is_effective_in(&self, period: ReferencePeriod) -> bool {
        self.active
            && self.effective_from <= period.last_day()
            && self
                .effective_until
                .is_none_or(|until| until >= period.first_day())
    }
}
