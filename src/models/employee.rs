//! Employee model and related types.
//!
//! Only the parts of the host's employee record that affect holiday resolution
//! are modelled here.

use serde::{Deserialize, Serialize};

use super::{CompanyLocationId, EmployeeId};

/// Employment status as recorded by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeStatus {
    /// Currently employed.
    #[default]
    Active,
    /// Not currently working but still on record.
    Inactive,
    /// Employment has ended.
    Terminated,
}

/// Represents an employee record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: EmployeeId,
    /// Employment status.
    #[serde(default)]
    pub status: EmployeeStatus,
    /// Work location held on the employee record itself. May be `0` on
    /// historical rows.
    #[serde(default)]
    pub work_location: Option<CompanyLocationId>,
}

impl Employee {
    /// Returns true if the employee is currently active.
    ///
    /// # Examples
    ///
    /// ```
    /// use holiday_engine::models::{Employee, EmployeeStatus};
    ///
    /// let employee = Employee {
    ///     id: 12,
    ///     status: EmployeeStatus::Active,
    ///     work_location: Some(1),
    /// };
    /// assert!(employee.is_active());
    /// ```
    pub fn is_active(&self) -> bool {
        self.status == EmployeeStatus::Active
    }
}
