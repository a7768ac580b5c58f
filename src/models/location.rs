//! Company offices and employee work locations.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::CompanyLocationId;

/// A country known to the host, with its states keyed by state code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    /// ISO 3166-1 alpha-2 code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// State code to state name.
    #[serde(default)]
    pub states: BTreeMap<String, String>,
}

/// A company office an employee can be assigned to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyLocation {
    /// Identifier of the office.
    pub id: CompanyLocationId,
    /// Display name of the office.
    pub name: String,
    /// ISO 3166-1 alpha-2 country code of the office.
    #[serde(default)]
    pub country: Option<String>,
    /// State or province of the office.
    #[serde(default)]
    pub state: Option<String>,
}

/// Where an employee works, as needed to decide which holidays apply.
///
/// # Example
///
/// ```
/// use holiday_engine::models::{CompanyLocation, EmployeeLocation};
///
/// let office = CompanyLocation {
///     id: 3,
///     name: "New York".to_string(),
///     country: Some("US".to_string()),
///     state: Some("NY".to_string()),
/// };
/// let location = EmployeeLocation::from(&office);
/// assert_eq!(location.company_id, 3);
/// assert_eq!(location.country.as_deref(), Some("US"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeLocation {
    /// The company office the employee is assigned to.
    pub company_id: CompanyLocationId,
    /// Country of that office.
    pub country: Option<String>,
    /// State of that office.
    pub state: Option<String>,
}

impl From<&CompanyLocation> for EmployeeLocation {
    fn from(office: &CompanyLocation) -> Self {
        Self {
            company_id: office.id,
            country: office.country.clone().filter(|c| !c.trim().is_empty()),
            state: office.state.clone().filter(|s| !s.trim().is_empty()),
        }
    }
}

/// The outcome of looking up an employee's work location.
///
/// Stored values are historically inconsistent: `NULL`, `''` and `'0'` all mean
/// "not set". Parsing collapses every one of those into [`WorkLocation::Unresolved`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "company_id", rename_all = "snake_case")]
pub enum WorkLocation {
    /// The employee is assigned to this company office.
    Resolved(CompanyLocationId),
    /// No office could be determined.
    Unresolved,
}

impl WorkLocation {
    /// Parses the raw stored work-location attribute.
    ///
    /// # Example
    ///
    /// ```
    /// use holiday_engine::models::WorkLocation;
    ///
    /// assert_eq!(WorkLocation::from_stored(Some("4")), WorkLocation::Resolved(4));
    /// assert_eq!(WorkLocation::from_stored(Some("0")), WorkLocation::Unresolved);
    /// assert_eq!(WorkLocation::from_stored(Some("")), WorkLocation::Unresolved);
    /// assert_eq!(WorkLocation::from_stored(None), WorkLocation::Unresolved);
    /// ```
    pub fn from_stored(raw: Option<&str>) -> Self {
        raw.and_then(|value| value.trim().parse::<CompanyLocationId>().ok())
            .map_or(WorkLocation::Unresolved, Self::from_id)
    }

    /// Converts an optional record value, treating `0` as unset.
    pub fn from_record(value: Option<CompanyLocationId>) -> Self {
        value.map_or(WorkLocation::Unresolved, Self::from_id)
    }

    fn from_id(id: CompanyLocationId) -> Self {
        if id == 0 {
            WorkLocation::Unresolved
        } else {
            WorkLocation::Resolved(id)
        }
    }

    /// Returns the company location id when resolved.
    pub fn company_id(&self) -> Option<CompanyLocationId> {
        match self {
            WorkLocation::Resolved(id) => Some(*id),
            WorkLocation::Unresolved => None,
        }
    }

    /// Returns true when an office is known.
    pub fn is_resolved(&self) -> bool {
        matches!(self, WorkLocation::Resolved(_))
    }
}
