//! Core data models for the holiday engine.
//!
//! This module contains all the domain models used throughout the engine.

mod date_window;
mod employee;
mod holiday;
mod leave;
mod location;

pub use date_window::DateWindow;
pub use employee::{Employee, EmployeeStatus};
pub use holiday::{CompanyScope, Holiday, HolidayApplicability, LocationScope};
pub use leave::{DEFAULT_WEEKENDS, LeaveBalance, LeavePolicy, LeaveRequestArgs};
pub use location::{CompanyLocation, Country, EmployeeLocation, WorkLocation};

/// Identifier of a holiday row.
pub type HolidayId = u64;
/// Identifier of a company office.
pub type CompanyLocationId = u64;
/// Identifier of an employee.
pub type EmployeeId = u64;
/// Identifier of a leave policy.
pub type PolicyId = u64;
/// Identifier of a scope row.
pub type ScopeId = u64;
