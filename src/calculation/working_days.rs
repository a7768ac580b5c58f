//! Working-day calculation.

use std::collections::BTreeSet;

use chrono::{NaiveDate, Weekday};

use crate::error::EngineResult;
use crate::models::{DateWindow, EmployeeLocation};
use crate::storage::HolidayRepository;

use super::{ClassifiedDay, count_working_days, day_breakdown, expand_to_dates, resolve_holidays};

/// The dates inside `window` covered by a holiday applicable to `employee`.
///
/// An unknown location yields no dates.
pub fn holiday_dates<R>(
    store: &R,
    employee: Option<&EmployeeLocation>,
    window: &DateWindow,
) -> EngineResult<BTreeSet<NaiveDate>>
where
    R: HolidayRepository + ?Sized,
{
    let Some(employee) = employee else {
        return Ok(BTreeSet::new());
    };
    let holidays = resolve_holidays(store, employee, window)?;
    Ok(expand_to_dates(&holidays, window))
}

/// Counts the days in `window` that are neither weekend days nor holidays
/// applicable to `employee`.
pub fn working_days<R>(
    store: &R,
    employee: Option<&EmployeeLocation>,
    window: &DateWindow,
    weekends: &[Weekday],
) -> EngineResult<u32>
where
    R: HolidayRepository + ?Sized,
{
    let holidays = holiday_dates(store, employee, window)?;
    Ok(count_working_days(window, weekends, &holidays))
}

/// Like [`working_days`], but returns the classification of every day.
pub fn working_day_breakdown<R>(
    store: &R,
    employee: Option<&EmployeeLocation>,
    window: &DateWindow,
    weekends: &[Weekday],
) -> EngineResult<Vec<ClassifiedDay>>
where
    R: HolidayRepository + ?Sized,
{
    let holidays = holiday_dates(store, employee, window)?;
    Ok(day_breakdown(window, weekends, &holidays))
}
