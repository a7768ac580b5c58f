//! Request types for the holiday engine API.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::models::{DateWindow, EmployeeId, PolicyId};

/// Query string of `GET /employees/{id}/holidays`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HolidayRangeQuery {
    /// First day of the window (inclusive).
    pub start: NaiveDate,
    /// Last day of the window (inclusive).
    pub end: NaiveDate,
}

impl HolidayRangeQuery {
    /// The requested window; reversed bounds are rejected.
    pub fn window(&self) -> EngineResult<DateWindow> {
        DateWindow::new(self.start, self.end)
    }
}

/// Request body for `POST /leave/days`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveDaysRequest {
    /// The employee taking leave.
    pub employee_id: EmployeeId,
    /// First day of leave.
    pub start_date: NaiveDate,
    /// Last day of leave.
    pub end_date: NaiveDate,
    /// Policy whose weekend days apply. Unknown or absent policies use the
    /// default weekends.
    #[serde(default)]
    pub policy_id: Option<PolicyId>,
}

impl LeaveDaysRequest {
    /// The requested window; reversed bounds are rejected.
    pub fn window(&self) -> EngineResult<DateWindow> {
        DateWindow::new(self.start_date, self.end_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;

    #[test]
    fn test_leave_days_request_without_policy() {
        let json = r#"{
            "employee_id": 7,
            "start_date": "2025-12-22",
            "end_date": "2025-12-28"
        }"#;
        let request: LeaveDaysRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.policy_id, None);
        assert_eq!(request.window().unwrap().len_days(), 7);
    }

    #[test]
    fn test_reversed_range_is_invalid() {
        let query = HolidayRangeQuery {
            start: NaiveDate::from_ymd_opt(2026, 1, 2).unwrap(),
            end: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        };
        assert!(matches!(
            query.window(),
            Err(EngineError::InvalidDateRange { .. })
        ));
    }
}
