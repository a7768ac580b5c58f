//! Holiday and applicability scope models.
//!
//! A [`Holiday`] is owned by the host's holiday entity; this crate only attaches
//! [`LocationScope`] and [`CompanyScope`] rows to it. A holiday with no rows of
//! either kind is global.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{CompanyLocationId, HolidayId, ScopeId};

/// A named, inclusive date range during which employees are excused from work.
///
/// # Example
///
/// ```
/// use holiday_engine::models::Holiday;
/// use chrono::NaiveDate;
///
/// let holiday = Holiday {
///     id: 1,
///     title: "Christmas".to_string(),
///     start: NaiveDate::from_ymd_opt(2025, 12, 24).unwrap(),
///     end: NaiveDate::from_ymd_opt(2025, 12, 26).unwrap(),
/// };
/// assert_eq!(holiday.duration_days(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    /// Identifier of the holiday row.
    pub id: HolidayId,
    /// Display name of the holiday.
    pub title: String,
    /// First day of the holiday (inclusive).
    pub start: NaiveDate,
    /// Last day of the holiday (inclusive).
    pub end: NaiveDate,
}

impl Holiday {
    /// Number of calendar days the holiday covers.
    pub fn duration_days(&self) -> u32 {
        if self.end < self.start {
            return 0;
        }
        (self.end - self.start).num_days() as u32 + 1
    }
}

/// Restricts a holiday to a country, or to one state within a country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationScope {
    /// Identifier of the scope row.
    pub id: ScopeId,
    /// The holiday this scope belongs to.
    pub holiday_id: HolidayId,
    /// ISO 3166-1 alpha-2 country code.
    pub country: String,
    /// State or province; `None` means the whole country.
    pub state: Option<String>,
}

impl LocationScope {
    /// The state this scope is limited to, ignoring a blank stored value.
    pub fn state_code(&self) -> Option<&str> {
        self.state.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    /// Returns true if the scope covers the entire country.
    pub fn is_country_wide(&self) -> bool {
        self.state_code().is_none()
    }
}

/// Restricts a holiday to employees assigned to one company office.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyScope {
    /// Identifier of the scope row.
    pub id: ScopeId,
    /// The holiday this scope belongs to.
    pub holiday_id: HolidayId,
    /// The company office the holiday applies to.
    pub company_id: CompanyLocationId,
}

/// Who a holiday applies to, as submitted from the holiday form.
///
/// Saving an applicability replaces every existing scope row of the holiday.
///
/// # Example
///
/// ```
/// use holiday_engine::models::HolidayApplicability;
///
/// let json = r#"{"mode": "location", "country": "US", "state": "NY"}"#;
/// let applicability: HolidayApplicability = serde_json::from_str(json).unwrap();
/// assert_eq!(
///     applicability,
///     HolidayApplicability::Location {
///         country: "US".to_string(),
///         state: Some("NY".to_string()),
///     }
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum HolidayApplicability {
    /// Applies to every employee.
    #[default]
    Global,
    /// Applies to a country, or a state within it.
    Location {
        /// ISO 3166-1 alpha-2 country code. Empty means nothing is saved.
        country: String,
        /// Optional state; empty means country-wide.
        #[serde(default)]
        state: Option<String>,
    },
    /// Applies to the selected company offices.
    #[serde(rename = "company")]
    Companies {
        /// Selected company location ids.
        #[serde(default)]
        ids: Vec<CompanyLocationId>,
    },
}

impl HolidayApplicability {
    /// The form value of the applicability mode.
    pub fn mode(&self) -> &'static str {
        match self {
            HolidayApplicability::Global => "global",
            HolidayApplicability::Location { .. } => "location",
            HolidayApplicability::Companies { .. } => "company",
        }
    }
}
