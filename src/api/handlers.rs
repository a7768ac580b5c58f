//! HTTP request handlers for the holiday engine API.
//!
//! This module contains the handler functions for all API endpoints. Each
//! handler tags its request with a correlation id, runs the synchronous
//! service call, and logs the outcome with its duration.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::{EmployeeId, HolidayApplicability, HolidayId, LeaveRequestArgs};
use crate::service::{EmployeeLifecycle, HolidayScopeEditor, HolidayService};
use crate::storage::{HolidayRepository, InMemoryStore};

use super::request::{HolidayRangeQuery, LeaveDaysRequest};
use super::response::{
    ApiError, ApiErrorResponse, EmployeeHolidaysResponse, EmployeeSavedResponse,
    HolidayScopeResponse, LeaveDaysResponse, LeaveValidationResponse, StatesResponse,
    UpdatesResponse, WorkLocationStatusResponse,
};
use super::state::AppState;

type Service = HolidayService<InMemoryStore>;
type HandlerResult<T> = Result<T, ApiErrorResponse>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/employees/:id/holidays", get(employee_holidays_handler))
        .route("/employees/:id/saved", post(employee_saved_handler))
        .route("/leave/days", post(leave_days_handler))
        .route("/leave/validate", post(leave_validate_handler))
        .route(
            "/holidays/:id/scope",
            get(get_scope_handler).put(put_scope_handler),
        )
        .route("/countries/:code/states", get(states_handler))
        .route("/maintenance/work-locations", get(work_locations_handler))
        .route("/maintenance/updates", post(updates_handler))
        .with_state(state)
}

/// Handler for `GET /employees/{id}/holidays?start=&end=`.
async fn employee_holidays_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<EmployeeId>,
    query: Result<Query<HolidayRangeQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, employee_id, "Processing employee holidays request");

    let started = Instant::now();
    let result = query
        .map_err(|rejection| query_error(correlation_id, rejection))
        .and_then(|Query(query)| employee_holidays(state.service(), employee_id, &query));
    respond(correlation_id, "employee_holidays", started, result)
}

fn employee_holidays(
    service: &Service,
    employee_id: EmployeeId,
    query: &HolidayRangeQuery,
) -> HandlerResult<EmployeeHolidaysResponse> {
    let window = query.window()?;
    let dates = service.get_employee_holiday_dates(employee_id, &window)?;
    let holidays = service.get_employee_holidays(employee_id, &window)?;
    Ok(EmployeeHolidaysResponse {
        employee_id,
        start: window.start,
        end: window.end,
        count: dates.len() as u32,
        dates,
        holidays,
    })
}

/// Handler for `POST /employees/{id}/saved`.
async fn employee_saved_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<EmployeeId>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, employee_id, "Processing employee saved event");

    let started = Instant::now();
    let result = state
        .service()
        .on_employee_saved(employee_id)
        .map(|work_location| EmployeeSavedResponse {
            employee_id,
            work_location,
        })
        .map_err(ApiErrorResponse::from);
    respond(correlation_id, "employee_saved", started, result)
}

/// Handler for `POST /leave/days`.
///
/// Returns the working-day count together with the classification of every
/// day in the window.
async fn leave_days_handler(
    State(state): State<AppState>,
    payload: Result<Json<LeaveDaysRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing leave days request");

    let started = Instant::now();
    let result = payload
        .map_err(|rejection| json_error(correlation_id, rejection))
        .and_then(|Json(request)| leave_days(state.service(), &request));
    respond(correlation_id, "leave_days", started, result)
}

fn leave_days(service: &Service, request: &LeaveDaysRequest) -> HandlerResult<LeaveDaysResponse> {
    let window = request.window()?;
    let policy = match request.policy_id {
        Some(policy_id) => service.policy(policy_id)?,
        None => None,
    };

    let working_days =
        service.calculate_leave_days_with_holidays(request.employee_id, &window, policy.as_ref())?;
    let days = service.leave_day_breakdown(request.employee_id, &window, policy.as_ref())?;

    Ok(LeaveDaysResponse {
        employee_id: request.employee_id,
        policy_id: policy.map(|p| p.id),
        calendar_days: window.len_days(),
        working_days,
        days,
    })
}

/// Handler for `POST /leave/validate`.
async fn leave_validate_handler(
    State(state): State<AppState>,
    payload: Result<Json<LeaveRequestArgs>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing leave validation request");

    let started = Instant::now();
    let result = payload
        .map_err(|rejection| json_error(correlation_id, rejection))
        .and_then(|Json(args)| {
            let working_days = state.service().validate_leave_request_with_holidays(&args)?;
            Ok(LeaveValidationResponse {
                valid: true,
                working_days,
            })
        });
    respond(correlation_id, "leave_validate", started, result)
}

/// Handler for `GET /holidays/{id}/scope`.
async fn get_scope_handler(
    State(state): State<AppState>,
    Path(holiday_id): Path<HolidayId>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, holiday_id, "Processing holiday scope lookup");

    let started = Instant::now();
    let result = scope_response(state.service(), holiday_id);
    respond(correlation_id, "get_scope", started, result)
}

/// Handler for `PUT /holidays/{id}/scope`.
///
/// Replaces the holiday's scopes and returns the scope as now stored.
async fn put_scope_handler(
    State(state): State<AppState>,
    Path(holiday_id): Path<HolidayId>,
    payload: Result<Json<HolidayApplicability>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, holiday_id, "Processing holiday scope update");

    let started = Instant::now();
    let result = payload
        .map_err(|rejection| json_error(correlation_id, rejection))
        .and_then(|Json(applicability)| {
            ensure_holiday(state.service(), holiday_id)?;
            state.service().save_scope(holiday_id, &applicability)?;
            scope_response(state.service(), holiday_id)
        });
    respond(correlation_id, "put_scope", started, result)
}

fn scope_response(service: &Service, holiday_id: HolidayId) -> HandlerResult<HolidayScopeResponse> {
    ensure_holiday(service, holiday_id)?;
    Ok(HolidayScopeResponse {
        holiday_id,
        applicability: service.load_scope(holiday_id)?,
        label: service.scope_label(holiday_id)?,
        locations: service.list_locations(holiday_id)?,
        companies: service.list_companies(holiday_id)?,
    })
}

fn ensure_holiday(service: &Service, holiday_id: HolidayId) -> HandlerResult<()> {
    match service.store().holiday(holiday_id)? {
        Some(_) => Ok(()),
        None => Err(ApiErrorResponse::new(
            StatusCode::NOT_FOUND,
            ApiError::holiday_not_found(holiday_id),
        )),
    }
}

/// Handler for `GET /countries/{code}/states`.
async fn states_handler(State(state): State<AppState>, Path(code): Path<String>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, country = %code, "Processing states lookup");

    let started = Instant::now();
    let result = state
        .service()
        .states_for_country(&code)
        .map(|states| StatesResponse {
            country: code.trim().to_ascii_uppercase(),
            states,
        })
        .map_err(ApiErrorResponse::from);
    respond(correlation_id, "states", started, result)
}

/// Handler for `GET /maintenance/work-locations`.
async fn work_locations_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing work location status request");

    let started = Instant::now();
    let result = work_location_status(state.service());
    respond(correlation_id, "work_locations", started, result)
}

fn work_location_status(service: &Service) -> HandlerResult<WorkLocationStatusResponse> {
    Ok(WorkLocationStatusResponse {
        missing: service.count_employees_missing_work_location()?,
        warning: service.work_location_warning()?,
    })
}

/// Handler for `POST /maintenance/updates`.
async fn updates_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing updates request");

    let started = Instant::now();
    let result = run_updates(state.service());
    respond(correlation_id, "updates", started, result)
}

fn run_updates(service: &Service) -> HandlerResult<UpdatesResponse> {
    Ok(UpdatesResponse {
        report: service.run_updates()?,
        pending: service.pending_updates()?,
    })
}

/// Writes the JSON response and logs the outcome.
fn respond<T: Serialize>(
    correlation_id: Uuid,
    operation: &'static str,
    started: Instant,
    result: HandlerResult<T>,
) -> Response {
    let duration = started.elapsed();
    match result {
        Ok(body) => {
            info!(
                correlation_id = %correlation_id,
                operation,
                duration_us = duration.as_micros(),
                "Request completed successfully"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(body),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                operation,
                status = err.status.as_u16(),
                code = %err.error.code,
                error = %err.error.message,
                duration_us = duration.as_micros(),
                "Request failed"
            );
            err.into_response()
        }
    }
}

fn json_error(correlation_id: Uuid, rejection: JsonRejection) -> ApiErrorResponse {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // serde's message, e.g. "missing field `employee_id`"
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::new("VALIDATION_ERROR", body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse::new(StatusCode::BAD_REQUEST, error)
}

fn query_error(correlation_id: Uuid, rejection: QueryRejection) -> ApiErrorResponse {
    let body_text = rejection.body_text();
    warn!(
        correlation_id = %correlation_id,
        error = %body_text,
        "Query string error"
    );
    ApiErrorResponse::new(StatusCode::BAD_REQUEST, ApiError::invalid_query(body_text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use axum::body::Body;
    use axum::http::Request;
    use chrono::NaiveDate;
    use serde_json::Value;
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        let loader = ConfigLoader::load("./config/default").unwrap();
        let service = HolidayService::new(loader.build_store().unwrap())
            .with_default_weekends(loader.settings().default_weekends.clone());
        AppState::new(service)
    }

    async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    fn json_request(method: &str, uri: &str, body: impl Into<String>) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.into()))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn dates(value: &Value) -> Vec<NaiveDate> {
        serde_json::from_value(value["dates"].clone()).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_new_york_employee_sees_us_and_global_holidays() {
        let router = create_router(create_test_state());
        let (status, body) = send(
            router,
            get_request("/employees/1/holidays?start=2025-11-01&end=2025-12-31"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            dates(&body),
            vec![date(2025, 11, 27), date(2025, 11, 28), date(2025, 12, 25)]
        );
        assert_eq!(body["count"], 3);
    }

    #[tokio::test]
    async fn test_melbourne_employee_sees_company_and_country_holidays() {
        let router = create_router(create_test_state());
        let (status, body) = send(
            router,
            get_request("/employees/3/holidays?start=2025-11-01&end=2025-12-31"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            dates(&body),
            vec![date(2025, 11, 4), date(2025, 12, 25), date(2025, 12, 26)]
        );
    }

    #[tokio::test]
    async fn test_missing_query_returns_400() {
        let router = create_router(create_test_state());
        let (status, body) = send(router, get_request("/employees/1/holidays?start=2025-11-01")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_QUERY");
    }

    #[tokio::test]
    async fn test_leave_days_christmas_week() {
        let router = create_router(create_test_state());
        let (status, body) = send(
            router,
            json_request(
                "POST",
                "/leave/days",
                r#"{"employee_id": 1, "start_date": "2025-12-22", "end_date": "2025-12-28"}"#,
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["working_days"], 4);
        assert_eq!(body["calendar_days"], 7);
        assert_eq!(body["days"].as_array().unwrap().len(), 7);
        assert_eq!(body["days"][3]["kind"], "holiday");
        assert_eq!(body["days"][5]["weekday"], "Sat");
    }

    #[tokio::test]
    async fn test_leave_days_uses_policy_weekends() {
        let router = create_router(create_test_state());
        let (status, body) = send(
            router,
            json_request(
                "POST",
                "/leave/days",
                r#"{"employee_id": 4, "start_date": "2025-12-22", "end_date": "2025-12-28", "policy_id": 2}"#,
            ),
        )
        .await;

        // Mon-Wed and Sun; Thu is Christmas, Fri/Sat are weekend days.
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["working_days"], 4);
        assert_eq!(body["policy_id"], 2);
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let router = create_router(create_test_state());
        let (status, body) = send(router, json_request("POST", "/leave/days", "{invalid json")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_validate_accepts_request_within_balance() {
        let router = create_router(create_test_state());
        let (status, body) = send(
            router,
            json_request(
                "POST",
                "/leave/validate",
                r#"{"employee_id": 1, "start_date": "2025-12-22", "end_date": "2025-12-28", "policy_id": 1}"#,
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["valid"], true);
        assert_eq!(body["working_days"], 4);
    }

    #[tokio::test]
    async fn test_validate_reversed_dates_returns_422() {
        let router = create_router(create_test_state());
        let (status, body) = send(
            router,
            json_request(
                "POST",
                "/leave/validate",
                r#"{"employee_id": 1, "start_date": "2025-12-28", "end_date": "2025-12-22", "policy_id": 1}"#,
            ),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["code"], "INVALID_DATE_RANGE");
        assert_eq!(body["message"], "End date must be after start date");
    }

    #[tokio::test]
    async fn test_validate_insufficient_balance_returns_422() {
        let router = create_router(create_test_state());
        let (status, body) = send(
            router,
            json_request(
                "POST",
                "/leave/validate",
                r#"{"employee_id": 2, "start_date": "2025-12-22", "end_date": "2025-12-24", "policy_id": 1}"#,
            ),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["code"], "INSUFFICIENT_BALANCE");
    }

    #[tokio::test]
    async fn test_put_scope_replaces_and_labels() {
        let router = create_router(create_test_state());
        let (status, body) = send(
            router,
            json_request("PUT", "/holidays/1/scope", r#"{"mode": "company", "ids": [2]}"#),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["applicability"]["mode"], "company");
        assert_eq!(body["label"], "Newark");
        assert_eq!(body["companies"], serde_json::json!([2]));
    }

    #[tokio::test]
    async fn test_get_scope_for_state_holiday() {
        let router = create_router(create_test_state());
        let (status, body) = send(router, get_request("/holidays/3/scope")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["label"], "United States - NY");
        assert_eq!(body["applicability"]["state"], "NY");
    }

    #[tokio::test]
    async fn test_unknown_holiday_returns_404() {
        let router = create_router(create_test_state());
        let (status, body) = send(
            router,
            json_request("PUT", "/holidays/99/scope", r#"{"mode": "global"}"#),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "HOLIDAY_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_states_lookup_is_case_insensitive() {
        let router = create_router(create_test_state());
        let (status, body) = send(router, get_request("/countries/au/states")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["country"], "AU");
        assert_eq!(body["states"]["VIC"], "Victoria");
    }

    #[tokio::test]
    async fn test_work_location_status_counts_active_employees() {
        let router = create_router(create_test_state());
        let (status, body) = send(router, get_request("/maintenance/work-locations")).await;

        // Employees 4 ("0") and 5 ("") are active and unset; 6 is terminated.
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["missing"], 2);
        assert!(
            body["warning"]
                .as_str()
                .unwrap()
                .starts_with("2 employees have no work location assigned.")
        );
    }

    #[tokio::test]
    async fn test_updates_run_once() {
        let state = create_test_state();

        let (status, body) = send(
            create_router(state.clone()),
            json_request("POST", "/maintenance/updates", ""),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["report"]["tables_created"], true);
        assert_eq!(body["report"]["employees_fixed"], 3);
        assert_eq!(body["pending"], serde_json::json!([]));

        let (_, body) = send(
            create_router(state),
            json_request("POST", "/maintenance/updates", ""),
        )
        .await;
        assert_eq!(body["report"]["tables_created"], false);
        assert_eq!(body["report"]["employees_fixed"], 0);
    }
}
