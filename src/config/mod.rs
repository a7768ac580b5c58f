//! Configuration loading for the holiday engine.
//!
//! This module loads runtime settings and seed data (countries, company
//! offices, holidays with their scopes, employees, leave policies) from a
//! directory of YAML files.
//!
//! # Example
//!
//! ```no_run
//! use holiday_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Table prefix: {}", config.settings().table_prefix);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    BalanceSeed, CountryConfig, EmployeeSeed, EmployeesConfig, EngineConfig, HolidaySeed,
    HolidaysConfig, LocationScopeSeed, LocationsConfig, PoliciesConfig, Settings,
};
