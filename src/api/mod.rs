//! HTTP API module for the holiday engine.
//!
//! This module exposes the holiday service as JSON endpoints for the host's
//! admin screens and leave workflow.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{HolidayRangeQuery, LeaveDaysRequest};
pub use response::{
    ApiError, ApiErrorResponse, EmployeeHolidaysResponse, EmployeeSavedResponse,
    HolidayScopeResponse, LeaveDaysResponse, LeaveValidationResponse, StatesResponse,
    UpdatesResponse, WorkLocationStatusResponse,
};
pub use state::AppState;
