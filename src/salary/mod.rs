//! Salary record store.
//!
//! The payroll engine reads salary records but never writes them. The
//! [`SalaryRecordStore`] trait is the seam; [`InMemorySalaryStore`] backs it
//! with records loaded from the seed configuration.

use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::error::{PayrollError, PayrollResult};
use crate::models::{ReferencePeriod, SalaryRecord};

/// Read access to employee compensation records.
pub trait SalaryRecordStore: Send + Sync {
    /// Returns the salary records effective in `period`.
    ///
    /// Only active records overlapping the period are considered, and when an
    /// employee has several, the one with the latest `effective_from` wins.
    /// Results are ordered by employee id.
    fn find_active_in_period(&self, period: ReferencePeriod) -> PayrollResult<Vec<SalaryRecord>>;
}

/// Picks one effective record per employee, ordered by employee id.
pub fn select_effective(
    records: impl IntoIterator<Item = SalaryRecord>,
    period: ReferencePeriod,
) -> Vec<SalaryRecord> {
    let mut latest: BTreeMap<u64, SalaryRecord> = BTreeMap::new();
    for record in records {
        if !record.is_effective_in(period) {
            continue;
        }
        match latest.get(&record.employee_id) {
            Some(existing) if existing.effective_from >= record.effective_from => {}
            _ => {
                latest.insert(record.employee_id, record);
            }
        }
    }
    latest.into_values().collect()
}

/// Salary records held in memory.
#[derive(Debug, Default)]
pub struct InMemorySalaryStore {
    records: RwLock<Vec<SalaryRecord>>,
}

impl InMemorySalaryStore {
    /// Creates a store holding `records`.
    pub fn new(records: Vec<SalaryRecord>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    /// Adds a record.
    pub fn insert(&self, record: SalaryRecord) -> PayrollResult<()> {
        let mut records = self
            .records
            .write()
            .map_err(|_| PayrollError::storage("salary store lock poisoned"))?;
        records.push(record);
        Ok(())
    }
}

impl SalaryRecordStore for InMemorySalaryStore {
    fn find_active_in_period(&self, period: ReferencePeriod) -> PayrollResult<Vec<SalaryRecord>> {
        let records = self
            .records
            .read()
            .map_err(|_| PayrollError::storage("salary store lock poisoned"))?;
        Ok(select_effective(records.iter().cloned(), period))
    }
}
