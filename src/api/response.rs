//! Response types for the holiday engine API.
//!
//! This module defines the success bodies of each endpoint, the error
//! response structure, and the mapping from [`EngineError`] to HTTP status.

use std::collections::BTreeMap;

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calculation::ClassifiedDay;
use crate::error::EngineError;
use crate::migration::{MigrationReport, PendingUpdate};
use crate::models::{
    CompanyLocationId, EmployeeId, Holiday, HolidayApplicability, HolidayId, LocationScope,
    PolicyId, WorkLocation,
};

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates an invalid query string error response.
    pub fn invalid_query(message: impl Into<String>) -> Self {
        Self::new("INVALID_QUERY", message)
    }

    /// Creates a holiday not found error response.
    pub fn holiday_not_found(holiday_id: HolidayId) -> Self {
        Self::new(
            "HOLIDAY_NOT_FOUND",
            format!("Holiday not found: {holiday_id}"),
        )
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Pairs an error body with a status.
    pub fn new(status: StatusCode, error: ApiError) -> Self {
        Self { status, error }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            Json(self.error),
        )
            .into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let status = if error.is_validation() {
            StatusCode::UNPROCESSABLE_ENTITY
        } else {
            match error {
                EngineError::DuplicateCompanyScope { .. } => StatusCode::CONFLICT,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            }
        };

        let api_error = match &error {
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                ApiError::with_details(error.code(), "Configuration error", error.to_string())
            }
            EngineError::Storage { .. } => {
                ApiError::with_details(error.code(), "Storage operation failed", error.to_string())
            }
            _ => ApiError::new(error.code(), error.to_string()),
        };

        ApiErrorResponse::new(status, api_error)
    }
}

/// Body of `GET /employees/{id}/holidays`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeHolidaysResponse {
    /// The employee the lookup was made for.
    pub employee_id: EmployeeId,
    /// First day of the window.
    pub start: NaiveDate,
    /// Last day of the window.
    pub end: NaiveDate,
    /// Holiday dates inside the window, ascending.
    pub dates: Vec<NaiveDate>,
    /// Number of holiday dates.
    pub count: u32,
    /// The applicable holidays overlapping the window.
    pub holidays: Vec<Holiday>,
}

/// Body of `POST /employees/{id}/saved`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeSavedResponse {
    /// The employee that was saved.
    pub employee_id: EmployeeId,
    /// The stored work location after the callback ran.
    pub work_location: WorkLocation,
}

/// Body of `POST /leave/days`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveDaysResponse {
    /// The employee taking leave.
    pub employee_id: EmployeeId,
    /// The policy whose weekend days were used, when it exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy_id: Option<PolicyId>,
    /// Calendar days in the window, weekends and holidays included.
    pub calendar_days: u32,
    /// Working days the leave consumes.
    pub working_days: u32,
    /// Classification of every day in the window.
    pub days: Vec<ClassifiedDay>,
}

/// Body of a successful `POST /leave/validate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveValidationResponse {
    /// Always true; rejected requests return an [`ApiError`].
    pub valid: bool,
    /// Working days the request consumes.
    pub working_days: u32,
}

/// Body of `GET /holidays/{id}/scope` and `PUT /holidays/{id}/scope`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HolidayScopeResponse {
    /// The holiday.
    pub holiday_id: HolidayId,
    /// What the holiday form shows as selected.
    pub applicability: HolidayApplicability,
    /// Text for the "Applies To" column.
    pub label: String,
    /// Raw location scope rows.
    pub locations: Vec<LocationScope>,
    /// Raw company scope rows.
    pub companies: Vec<CompanyLocationId>,
}

/// Body of `GET /countries/{code}/states`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatesResponse {
    /// Country code, upper-cased.
    pub country: String,
    /// State code to state name; empty for unknown countries.
    pub states: BTreeMap<String, String>,
}

/// Body of `GET /maintenance/work-locations`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkLocationStatusResponse {
    /// Active employees without a stored work location.
    pub missing: usize,
    /// Warning for the HR screens, absent when nothing is missing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Body of `POST /maintenance/updates`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatesResponse {
    /// What this run did.
    pub report: MigrationReport,
    /// Updates still outstanding after the run.
    pub pending: Vec<PendingUpdate>,
}
