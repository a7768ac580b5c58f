//! Configuration types for the holiday engine.
//!
//! This module contains the strongly-typed structures deserialized from the
//! YAML files of a configuration directory.

use chrono::{NaiveDate, Weekday};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::BTreeMap;

use crate::models::{
    CompanyLocation, CompanyLocationId, DEFAULT_WEEKENDS, EmployeeId, EmployeeStatus, HolidayId,
    LeavePolicy, PolicyId,
};

/// Runtime settings from `settings.yaml`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Settings {
    /// Address the HTTP server binds to.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
    /// Prefix for the scope table names.
    #[serde(default)]
    pub table_prefix: String,
    /// Weekend days used when a leave policy names none.
    #[serde(default = "default_weekends")]
    pub default_weekends: Vec<Weekday>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            table_prefix: String::new(),
            default_weekends: default_weekends(),
        }
    }
}

fn default_listen_addr() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_weekends() -> Vec<Weekday> {
    DEFAULT_WEEKENDS.to_vec()
}

/// A country entry in `locations.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct CountryConfig {
    /// Display name.
    pub name: String,
    /// State code to state name.
    #[serde(default)]
    pub states: BTreeMap<String, String>,
}

/// Contents of `locations.yaml`.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct LocationsConfig {
    /// Country code to country details.
    #[serde(default)]
    pub countries: BTreeMap<String, CountryConfig>,
    /// Company offices in listing order.
    #[serde(default)]
    pub company_locations: Vec<CompanyLocation>,
}

/// An initial location scope on a seeded holiday.
#[derive(Debug, Clone, Deserialize)]
pub struct LocationScopeSeed {
    /// Country code.
    pub country: String,
    /// State code; absent for a country-wide scope.
    #[serde(default)]
    pub state: Option<String>,
}

/// A holiday row in `holidays.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct HolidaySeed {
    /// Identifier of the holiday.
    pub id: HolidayId,
    /// Display name.
    pub title: String,
    /// First day (inclusive).
    pub start: NaiveDate,
    /// Last day (inclusive).
    pub end: NaiveDate,
    /// Country or state scopes.
    #[serde(default)]
    pub locations: Vec<LocationScopeSeed>,
    /// Company office scopes.
    #[serde(default)]
    pub companies: Vec<CompanyLocationId>,
}

/// Contents of `holidays.yaml`.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct HolidaysConfig {
    /// Holiday rows.
    #[serde(default)]
    pub holidays: Vec<HolidaySeed>,
}

/// An employee row in `employees.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct EmployeeSeed {
    /// Identifier of the employee.
    pub id: EmployeeId,
    /// Employment status.
    #[serde(default)]
    pub status: EmployeeStatus,
    /// Work location on the employee record.
    #[serde(default)]
    pub work_location: Option<CompanyLocationId>,
    /// Raw stored work-location attribute, kept as text so `""` and `"0"`
    /// can be seeded.
    #[serde(default)]
    pub stored_work_location: Option<String>,
}

/// Contents of `employees.yaml`.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct EmployeesConfig {
    /// Employee rows.
    #[serde(default)]
    pub employees: Vec<EmployeeSeed>,
}

/// A balance row in `policies.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct BalanceSeed {
    /// The employee holding the balance.
    pub employee_id: EmployeeId,
    /// The policy the balance belongs to.
    pub policy_id: PolicyId,
    /// Total days granted.
    pub entitlement: Decimal,
    /// Days already booked.
    #[serde(default)]
    pub scheduled: Decimal,
}

/// Contents of `policies.yaml`.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct PoliciesConfig {
    /// Leave policies.
    #[serde(default)]
    pub policies: Vec<LeavePolicy>,
    /// Employee balances.
    #[serde(default)]
    pub balances: Vec<BalanceSeed>,
}

/// Everything loaded from a configuration directory.
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    /// Runtime settings.
    pub settings: Settings,
    /// Countries and company offices.
    pub locations: LocationsConfig,
    /// Seeded holidays.
    pub holidays: HolidaysConfig,
    /// Seeded employees.
    pub employees: EmployeesConfig,
    /// Seeded policies and balances.
    pub policies: PoliciesConfig,
}
