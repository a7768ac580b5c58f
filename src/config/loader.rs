//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine settings
//! and seed data from YAML files.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::error::{EngineError, EngineResult};
use crate::models::{Country, Employee, Holiday, LeaveBalance};
use crate::service::{normalize_country, normalize_state};
use crate::storage::{HolidayRepository, InMemoryStore};

use super::types::{
    EmployeesConfig, EngineConfig, HolidaysConfig, LocationsConfig, PoliciesConfig, Settings,
};

/// Loads and provides access to engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── settings.yaml    # Listen address, table prefix, default weekends
/// ├── locations.yaml   # Countries with states, company offices
/// ├── holidays.yaml    # Holiday rows with optional scopes
/// ├── employees.yaml   # Employee records and stored work locations
/// └── policies.yaml    # Leave policies and balances
/// ```
///
/// # Example
///
/// ```no_run
/// use holiday_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default")?;
/// let store = loader.build_store()?;
/// println!("Listening on {}", loader.settings().listen_addr);
/// # Ok::<(), holiday_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns `ConfigNotFound` when a file is missing and `ConfigParseError`
    /// when a file is not valid YAML for its structure.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let settings = Self::load_yaml::<Settings>(&path.join("settings.yaml"))?;
        let locations = Self::load_yaml::<LocationsConfig>(&path.join("locations.yaml"))?;
        let holidays = Self::load_yaml::<HolidaysConfig>(&path.join("holidays.yaml"))?;
        let employees = Self::load_yaml::<EmployeesConfig>(&path.join("employees.yaml"))?;
        let policies = Self::load_yaml::<PoliciesConfig>(&path.join("policies.yaml"))?;

        info!(
            path = %path.display(),
            holidays = holidays.holidays.len(),
            company_locations = locations.company_locations.len(),
            employees = employees.employees.len(),
            "Loaded configuration"
        );

        Ok(Self {
            config: EngineConfig {
                settings,
                locations,
                holidays,
                employees,
                policies,
            },
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the runtime settings.
    pub fn settings(&self) -> &Settings {
        &self.config.settings
    }

    /// Builds an in-memory store seeded with every configured row.
    ///
    /// Seeded scopes go through the same normalisation and insert path as
    /// runtime scopes, so a malformed country is reported as `InvalidCountry`
    /// and a duplicate company scope in `holidays.yaml` as
    /// `DuplicateCompanyScope`.
    pub fn build_store(&self) -> EngineResult<InMemoryStore> {
        let mut store = InMemoryStore::new();

        for (code, country) in &self.config.locations.countries {
            store = store.with_country(Country {
                code: code.to_ascii_uppercase(),
                name: country.name.clone(),
                states: country.states.clone(),
            });
        }
        for location in &self.config.locations.company_locations {
            store = store.with_company_location(location.clone());
        }

        for seed in &self.config.employees.employees {
            store = store.with_employee(Employee {
                id: seed.id,
                status: seed.status,
                work_location: seed.work_location,
            });
            if let Some(raw) = &seed.stored_work_location {
                store = store.with_stored_work_location(seed.id, raw);
            }
        }

        for policy in &self.config.policies.policies {
            store = store.with_policy(policy.clone());
        }
        for balance in &self.config.policies.balances {
            store = store.with_balance(
                balance.employee_id,
                balance.policy_id,
                LeaveBalance {
                    entitlement: balance.entitlement,
                    scheduled: balance.scheduled,
                },
            );
        }

        for seed in &self.config.holidays.holidays {
            let holiday = Holiday {
                id: seed.id,
                title: seed.title.clone(),
                start: seed.start,
                end: seed.end,
            };
            if holiday.duration_days() == 0 {
                return Err(EngineError::ConfigParseError {
                    path: "holidays.yaml".to_string(),
                    message: format!("holiday {} ends before it starts", holiday.id),
                });
            }
            store = store.with_holiday(holiday);
        }
        for seed in &self.config.holidays.holidays {
            for scope in &seed.locations {
                let country = normalize_country(&scope.country)?;
                store.insert_location_scope(
                    seed.id,
                    &country,
                    normalize_state(scope.state.as_deref()),
                )?;
            }
            for &company_id in &seed.companies {
                store.insert_company_scope(seed.id, company_id)?;
            }
        }

        debug!("Seeded in-memory store from configuration");
        Ok(store)
    }
}
