//! Leave duration for the host's leave-request workflow.

use crate::error::EngineResult;
use crate::models::{DateWindow, EmployeeId, LeaveRequestArgs};
use crate::storage::Store;

use super::HolidayService;

/// Supplies the duration recorded on a new leave request.
pub trait LeaveDurationProvider {
    /// Working days the request spans, excluding weekends and applicable
    /// holidays.
    ///
    /// Returns `fallback` (the host's own duration) when either date is
    /// missing. An unknown policy falls back to the default weekend days.
    fn leave_duration(
        &self,
        employee_id: EmployeeId,
        request: &LeaveRequestArgs,
        fallback: u32,
    ) -> EngineResult<u32>;
}

impl<S: Store> LeaveDurationProvider for HolidayService<S> {
    fn leave_duration(
        &self,
        employee_id: EmployeeId,
        request: &LeaveRequestArgs,
        fallback: u32,
    ) -> EngineResult<u32> {
        let (Some(start), Some(end)) = (request.start_date, request.end_date) else {
            return Ok(fallback);
        };
        let window = DateWindow::new(start, end)?;

        let policy = match request.policy_id {
            Some(policy_id) => self.policy(policy_id)?,
            None => None,
        };
        self.calculate_leave_days_with_holidays(employee_id, &window, policy.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::models::{CompanyLocation, Holiday, LeavePolicy};
    use crate::storage::InMemoryStore;
    use chrono::{NaiveDate, Weekday};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn service() -> HolidayService<InMemoryStore> {
        HolidayService::new(
            InMemoryStore::new()
                .with_company_location(CompanyLocation {
                    id: 1,
                    name: "Dubai".to_string(),
                    country: Some("AE".to_string()),
                    state: None,
                })
                .with_holiday(Holiday {
                    id: 1,
                    title: "New Year".to_string(),
                    start: date(2026, 1, 1),
                    end: date(2026, 1, 1),
                })
                .with_policy(LeavePolicy {
                    id: 2,
                    name: "Gulf annual".to_string(),
                    weekends: Some(vec![Weekday::Fri, Weekday::Sat]),
                }),
        )
    }

    fn request(policy_id: Option<u64>) -> LeaveRequestArgs {
        LeaveRequestArgs {
            employee_id: Some(1),
            // Mon 29 Dec 2025 .. Sun 4 Jan 2026
            start_date: Some(date(2025, 12, 29)),
            end_date: Some(date(2026, 1, 4)),
            policy_id,
        }
    }

    #[test]
    fn test_missing_dates_keep_host_duration() {
        let mut args = request(Some(2));
        args.start_date = None;
        assert_eq!(service().leave_duration(1, &args, 6).unwrap(), 6);
    }

    #[test]
    fn test_policy_weekends_apply() {
        // Mon, Tue, Wed, Sun; Thu is New Year; Fri/Sat weekend.
        assert_eq!(service().leave_duration(1, &request(Some(2)), 0).unwrap(), 4);
    }

    #[test]
    fn test_unknown_policy_uses_default_weekends() {
        // Mon, Tue, Wed, Fri; Thu is New Year; Sat/Sun weekend.
        assert_eq!(service().leave_duration(1, &request(Some(99)), 0).unwrap(), 4);
        assert_eq!(service().leave_duration(1, &request(None), 0).unwrap(), 4);
    }

    #[test]
    fn test_reversed_dates_are_rejected() {
        let mut args = request(None);
        args.end_date = Some(date(2025, 12, 1));
        assert!(matches!(
            service().leave_duration(1, &args, 0),
            Err(EngineError::InvalidDateRange { .. })
        ));
    }
}
