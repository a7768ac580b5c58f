//! Error types for the holiday engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! Leave-validation failures are ordinary, user-displayable outcomes and carry
//! a stable code alongside their message.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for the holiday engine.
///
/// # Example
///
/// ```
/// use holiday_engine::error::EngineError;
///
/// let error = EngineError::InvalidPolicy { policy_id: Some(7) };
/// assert_eq!(error.code(), "INVALID_POLICY");
/// assert_eq!(error.to_string(), "Invalid leave policy");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The underlying store rejected or failed an operation.
    #[error("Storage error: {message}")]
    Storage {
        /// A description of the storage failure.
        message: String,
    },

    /// A company scope for this holiday/company pair already exists.
    #[error("Holiday {holiday_id} is already scoped to company location {company_id}")]
    DuplicateCompanyScope {
        /// The holiday the scope belongs to.
        holiday_id: u64,
        /// The company location that is already attached.
        company_id: u64,
    },

    /// A country code was empty or not an ISO 3166-1 alpha-2 code.
    #[error("Invalid country: '{code}'")]
    InvalidCountry {
        /// The rejected code.
        code: String,
    },

    /// The employee identifier was missing or not positive.
    #[error("Invalid employee ID")]
    InvalidEmployee {
        /// The identifier that was supplied, if any.
        employee_id: Option<u64>,
    },

    /// The requested date range was incomplete or reversed.
    #[error("{message}")]
    InvalidDateRange {
        /// Which part of the range was wrong.
        message: String,
    },

    /// The employee's work location could not be resolved.
    #[error("Employee work location is not set. Please update employee details.")]
    NoWorkLocation {
        /// The employee without a work location.
        employee_id: u64,
    },

    /// The leave policy does not exist.
    #[error("Invalid leave policy")]
    InvalidPolicy {
        /// The identifier that was supplied, if any.
        policy_id: Option<u64>,
    },

    /// Every day in the requested range is a weekend day or a holiday.
    #[error(
        "No working days found in the selected date range (all days are holidays or weekends)"
    )]
    NoWorkingDays {
        /// First day of the requested range.
        start: NaiveDate,
        /// Last day of the requested range.
        end: NaiveDate,
    },

    /// The request needs more days than the employee has left.
    #[error("Insufficient leave balance. Requested: {requested} days, Available: {available} days")]
    InsufficientBalance {
        /// Working days the request would consume.
        requested: u32,
        /// Entitlement minus already scheduled days.
        available: Decimal,
    },
}

impl EngineError {
    /// Returns the stable code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                "CONFIG_ERROR"
            }
            EngineError::Storage { .. } => "STORAGE_ERROR",
            EngineError::DuplicateCompanyScope { .. } => "DUPLICATE_COMPANY_SCOPE",
            EngineError::InvalidCountry { .. } => "INVALID_COUNTRY",
            EngineError::InvalidEmployee { .. } => "INVALID_EMPLOYEE",
            EngineError::InvalidDateRange { .. } => "INVALID_DATE_RANGE",
            EngineError::NoWorkLocation { .. } => "NO_WORK_LOCATION",
            EngineError::InvalidPolicy { .. } => "INVALID_POLICY",
            EngineError::NoWorkingDays { .. } => "NO_WORKING_DAYS",
            EngineError::InsufficientBalance { .. } => "INSUFFICIENT_BALANCE",
        }
    }

    /// Returns true for errors that describe a rejected request rather than
    /// a fault in configuration or storage.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            EngineError::InvalidCountry { .. }
                | EngineError::InvalidEmployee { .. }
                | EngineError::InvalidDateRange { .. }
                | EngineError::NoWorkLocation { .. }
                | EngineError::InvalidPolicy { .. }
                | EngineError::NoWorkingDays { .. }
                | EngineError::InsufficientBalance { .. }
        )
    }

    pub(crate) fn storage(message: impl Into<String>) -> Self {
        EngineError::Storage {
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
