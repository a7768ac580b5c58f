//! Employee lifecycle callbacks and the missing-location warning.

use crate::calculation::{assign_default_work_location, has_missing_work_location};
use crate::error::EngineResult;
use crate::models::{EmployeeId, WorkLocation};
use crate::storage::Store;

use super::HolidayService;

/// Employee events the host forwards to the engine.
pub trait EmployeeLifecycle {
    /// Called after an employee is created or updated. Assigns the default
    /// office when the stored work location is unset.
    fn on_employee_saved(&self, employee_id: EmployeeId) -> EngineResult<WorkLocation>;

    /// Number of active employees whose stored work location is unset.
    fn count_employees_missing_work_location(&self) -> EngineResult<usize>;

    /// Warning text for the HR screens, or `None` when nothing is missing.
    fn work_location_warning(&self) -> EngineResult<Option<String>> {
        let count = self.count_employees_missing_work_location()?;
        Ok(match count {
            0 => None,
            1 => Some(
                "1 employee has no work location assigned. This may affect leave \
                 calculations and holiday tracking."
                    .to_string(),
            ),
            n => Some(format!(
                "{n} employees have no work location assigned. This may affect leave \
                 calculations and holiday tracking."
            )),
        })
    }
}

impl<S: Store> EmployeeLifecycle for HolidayService<S> {
    fn on_employee_saved(&self, employee_id: EmployeeId) -> EngineResult<WorkLocation> {
        assign_default_work_location(self.store(), employee_id)
    }

    fn count_employees_missing_work_location(&self) -> EngineResult<usize> {
        let mut missing = 0;
        for employee in self.store().employees()? {
            if employee.is_active() && has_missing_work_location(self.store(), employee.id)? {
                missing += 1;
            }
        }
        Ok(missing)
    }
}
