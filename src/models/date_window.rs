//! Inclusive date windows.
//!
//! This module contains the [`DateWindow`] type used to bound holiday lookups
//! and leave-day calculations.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// An inclusive range of calendar dates.
///
/// # Example
///
/// ```
/// use holiday_engine::models::DateWindow;
/// use chrono::NaiveDate;
///
/// let window = DateWindow::new(
///     NaiveDate::from_ymd_opt(2025, 12, 22).unwrap(),
///     NaiveDate::from_ymd_opt(2025, 12, 28).unwrap(),
/// )
/// .unwrap();
///
/// assert_eq!(window.days().count(), 7);
/// assert!(window.contains(NaiveDate::from_ymd_opt(2025, 12, 25).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateWindow {
    /// The first day of the window (inclusive).
    pub start: NaiveDate,
    /// The last day of the window (inclusive).
    pub end: NaiveDate,
}

impl DateWindow {
    /// Creates a window, rejecting an end date before the start date.
    pub fn new(start: NaiveDate, end: NaiveDate) -> EngineResult<Self> {
        if end < start {
            return Err(EngineError::InvalidDateRange {
                message: "End date must be after start date".to_string(),
            });
        }
        Ok(Self { start, end })
    }

    /// Creates a window covering a single day.
    pub fn single(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    /// Checks if a given date falls within this window.
    ///
    /// The check is inclusive of both start and end dates.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Returns true if the inclusive range `[start, end]` shares at least one
    /// day with this window.
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        start <= self.end && end >= self.start
    }

    /// Returns the part of `[start, end]` that lies inside this window.
    pub fn clip(&self, start: NaiveDate, end: NaiveDate) -> Option<DateWindow> {
        if !self.overlaps(start, end) || end < start {
            return None;
        }
        Some(DateWindow {
            start: start.max(self.start),
            end: end.min(self.end),
        })
    }

    /// Iterates every calendar date in the window, in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }

    /// Number of calendar days in the window.
    pub fn len_days(&self) -> u32 {
        (self.end - self.start).num_days() as u32 + 1
    }
}
