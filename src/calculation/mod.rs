//! Calculation logic for the holiday engine.
//!
//! This module contains the holiday applicability resolver, day
//! classification, working-day counting, work-location resolution with its
//! write-back fallbacks, and leave request validation. Everything here is a
//! plain function over the repository traits in [`crate::storage`].

mod applicability;
mod day_detection;
mod leave_validation;
mod work_location;
mod working_days;

pub use applicability::{expand_to_dates, holiday_applies, resolve_holidays};
pub use day_detection::{ClassifiedDay, DayKind, classify_day, count_working_days, day_breakdown};
pub use leave_validation::{request_window, validate_leave_request};
pub use work_location::{
    assign_default_work_location, default_work_location, employee_location,
    has_missing_work_location, resolve_work_location,
};
pub use working_days::{holiday_dates, working_day_breakdown, working_days};
