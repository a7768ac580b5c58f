//! One-time installation of the scope tables and repair of work locations.
//!
//! Both steps are guarded by persisted option flags so that running the
//! updates on every activation or admin page load is cheap and idempotent.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::calculation::{default_work_location, has_missing_work_location};
use crate::error::EngineResult;
use crate::storage::{Store, scope_table_statements};

/// Option flag set once the scope tables exist.
pub const TABLES_VERSION_OPTION: &str = "erp_hr_holiday_locations_version";
/// Option flag set once missing work locations have been repaired.
pub const WORK_LOCATIONS_FIXED_OPTION: &str = "erp_hr_work_locations_fixed";
/// Value written to both flags.
pub const SCHEMA_VERSION: &str = "1.0.0";
/// Host update version this feature ships in.
pub const UPDATE_VERSION: &str = "1.17.0";

/// What a run of [`run_holiday_location_updates`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct MigrationReport {
    /// The scope tables were installed during this run.
    pub tables_created: bool,
    /// The work-location repair completed during this run.
    pub work_locations_repaired: bool,
    /// Employees whose work location was set by the repair.
    pub employees_fixed: usize,
}

/// An update the host should list in its updates queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingUpdate {
    /// Host version the update belongs to.
    pub version: String,
    /// What the update does.
    pub description: String,
}

/// Runs every outstanding step.
pub fn run_holiday_location_updates<R>(store: &R, table_prefix: &str) -> EngineResult<MigrationReport>
where
    R: Store + ?Sized,
{
    let mut report = MigrationReport::default();

    if store.option(TABLES_VERSION_OPTION)?.is_none() {
        create_scope_tables(store, table_prefix)?;
        report.tables_created = true;
    }

    if store.option(WORK_LOCATIONS_FIXED_OPTION)?.is_none() {
        if let Some(fixed) = fix_employee_work_locations(store)? {
            report.work_locations_repaired = true;
            report.employees_fixed = fixed;
        }
    }

    Ok(report)
}

/// Installs the scope tables and records the schema version.
pub fn create_scope_tables<R>(store: &R, table_prefix: &str) -> EngineResult<()>
where
    R: Store + ?Sized,
{
    store.apply_schema(&scope_table_statements(table_prefix))?;
    store.set_option(TABLES_VERSION_OPTION, SCHEMA_VERSION)?;
    info!(table_prefix, version = SCHEMA_VERSION, "Installed holiday scope tables");
    Ok(())
}

/// Assigns the first company location to every employee without one.
///
/// Returns `None` without setting the completion flag when there is no
/// company location to assign, so the repair runs again later.
pub fn fix_employee_work_locations<R>(store: &R) -> EngineResult<Option<usize>>
where
    R: Store + ?Sized,
{
    let Some(default_location) = default_work_location(store)? else {
        warn!("Skipping work location repair: no company locations exist");
        return Ok(None);
    };

    let mut fixed = 0;
    for employee in store.employees()? {
        if has_missing_work_location(store, employee.id)? {
            store.store_work_location(employee.id, default_location)?;
            fixed += 1;
        }
    }

    if fixed > 0 {
        info!(
            employees_fixed = fixed,
            company_id = default_location,
            "Fixed work location for employees"
        );
    }

    store.set_option(WORK_LOCATIONS_FIXED_OPTION, SCHEMA_VERSION)?;
    Ok(Some(fixed))
}

/// Lists this feature's update while the tables have not been installed.
pub fn pending_updates<R>(store: &R) -> EngineResult<Vec<PendingUpdate>>
where
    R: Store + ?Sized,
{
    if store.option(TABLES_VERSION_OPTION)?.is_some() {
        return Ok(Vec::new());
    }
    Ok(vec![PendingUpdate {
        version: UPDATE_VERSION.to_string(),
        description: "Install holiday location tables and fix work location issues".to_string(),
    }])
}
