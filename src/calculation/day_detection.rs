//! Day classification for leave calculations.
//!
//! Every calendar day in a leave window is either a weekend day (per the leave
//! policy), an applicable holiday, or a working day. Only working days are
//! charged against the employee's balance.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::models::DateWindow;

/// How a calendar day counts towards a leave request.
///
/// # Example
///
/// ```
/// use holiday_engine::calculation::DayKind;
///
/// assert_eq!(DayKind::Holiday.to_string(), "Holiday");
/// assert!(DayKind::Workday.is_working());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayKind {
    /// An ordinary working day; charged as leave.
    Workday,
    /// One of the policy's weekend days.
    Weekend,
    /// An applicable holiday falling on a non-weekend day.
    Holiday,
}

impl DayKind {
    /// Returns true if the day is charged as leave.
    pub fn is_working(&self) -> bool {
        *self == DayKind::Workday
    }
}

impl std::fmt::Display for DayKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DayKind::Workday => write!(f, "Workday"),
            DayKind::Weekend => write!(f, "Weekend"),
            DayKind::Holiday => write!(f, "Holiday"),
        }
    }
}

/// A calendar day together with its classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedDay {
    /// The calendar date.
    pub date: NaiveDate,
    /// The short weekday name of the date (e.g., "Mon").
    pub weekday: Weekday,
    /// How the day counts.
    pub kind: DayKind,
}

/// Classifies a single date.
///
/// Weekend takes precedence over holiday when a holiday falls on a weekend day.
///
/// # Example
///
/// ```
/// use holiday_engine::calculation::{classify_day, DayKind};
/// use chrono::{NaiveDate, Weekday};
/// use std::collections::BTreeSet;
///
/// let christmas = NaiveDate::from_ymd_opt(2025, 12, 25).unwrap(); // Thursday
/// let holidays = BTreeSet::from([christmas]);
/// let weekends = [Weekday::Sat, Weekday::Sun];
///
/// assert_eq!(classify_day(christmas, &weekends, &holidays), DayKind::Holiday);
/// ```
pub fn classify_day(
    date: NaiveDate,
    weekends: &[Weekday],
    holiday_dates: &BTreeSet<NaiveDate>,
) -> DayKind {
    if weekends.contains(&date.weekday()) {
        DayKind::Weekend
    } else if holiday_dates.contains(&date) {
        DayKind::Holiday
    } else {
        DayKind::Workday
    }
}

/// Classifies every day of `window`, in order.
pub fn day_breakdown(
    window: &DateWindow,
    weekends: &[Weekday],
    holiday_dates: &BTreeSet<NaiveDate>,
) -> Vec<ClassifiedDay> {
    window
        .days()
        .map(|date| ClassifiedDay {
            date,
            weekday: date.weekday(),
            kind: classify_day(date, weekends, holiday_dates),
        })
        .collect()
}

/// Counts the working days of `window`.
pub fn count_working_days(
    window: &DateWindow,
    weekends: &[Weekday],
    holiday_dates: &BTreeSet<NaiveDate>,
) -> u32 {
    window
        .days()
        .filter(|date| classify_day(*date, weekends, holiday_dates).is_working())
        .count() as u32
}
