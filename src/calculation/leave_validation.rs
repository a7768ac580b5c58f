//! Leave request validation.
//!
//! Checks run in a fixed order and stop at the first failure:
//! employee, date range, work location, policy, working days, balance.

use chrono::{NaiveDate, Weekday};
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::error::{EngineError, EngineResult};
use crate::models::{DateWindow, LeaveRequestArgs};
use crate::storage::{DirectoryRepository, EmployeeRepository, HolidayRepository, LeaveRepository};

use super::{employee_location, working_days};

/// Validates a leave request and returns the number of working days it spans.
///
/// The returned count is what the caller should record as the request's
/// duration.
pub fn validate_leave_request<R>(
    store: &R,
    args: &LeaveRequestArgs,
    default_weekends: &[Weekday],
) -> EngineResult<u32>
where
    R: HolidayRepository + DirectoryRepository + EmployeeRepository + LeaveRepository + ?Sized,
{
    let result = run_checks(store, args, default_weekends);
    match &result {
        Ok(days) => info!(
            employee_id = args.employee_id,
            policy_id = args.policy_id,
            working_days = days,
            "Leave request validated"
        ),
        Err(err) => warn!(
            employee_id = args.employee_id,
            policy_id = args.policy_id,
            code = err.code(),
            error = %err,
            "Leave request rejected"
        ),
    }
    result
}

fn run_checks<R>(
    store: &R,
    args: &LeaveRequestArgs,
    default_weekends: &[Weekday],
) -> EngineResult<u32>
where
    R: HolidayRepository + DirectoryRepository + EmployeeRepository + LeaveRepository + ?Sized,
{
    let employee_id = match args.employee_id {
        Some(id) if id > 0 => id,
        other => {
            return Err(EngineError::InvalidEmployee { employee_id: other });
        }
    };

    let window = request_window(args.start_date, args.end_date)?;

    let Some(location) = employee_location(store, employee_id)? else {
        return Err(EngineError::NoWorkLocation { employee_id });
    };

    let policy = match args.policy_id {
        Some(policy_id) => store.policy(policy_id)?,
        None => None,
    };
    let Some(policy) = policy else {
        return Err(EngineError::InvalidPolicy {
            policy_id: args.policy_id,
        });
    };

    let weekends = policy.weekends_or(default_weekends);
    let requested = working_days(store, Some(&location), &window, weekends)?;
    if requested == 0 {
        return Err(EngineError::NoWorkingDays {
            start: window.start,
            end: window.end,
        });
    }

    let available = store
        .balance(employee_id, policy.id)?
        .unwrap_or_default()
        .available();
    if Decimal::from(requested) > available {
        return Err(EngineError::InsufficientBalance {
            requested,
            available,
        });
    }

    Ok(requested)
}

/// Builds the request window, distinguishing missing bounds from reversed ones.
pub fn request_window(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> EngineResult<DateWindow> {
    match (start, end) {
        (Some(start), Some(end)) => DateWindow::new(start, end),
        _ => Err(EngineError::InvalidDateRange {
            message: "Start and end dates are required".to_string(),
        }),
    }
}
