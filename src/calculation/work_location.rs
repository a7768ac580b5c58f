//! Work-location resolution.
//!
//! The stored work-location attribute is authoritative. When it is unset the
//! employee record's own field is used, and failing that the first company
//! location. Whatever the fallback finds is written back to the stored
//! attribute so the next lookup is direct. Ids without an employee record
//! still get the default office but nothing is written for them.

use tracing::{debug, info, warn};

use crate::error::EngineResult;
use crate::models::{CompanyLocationId, EmployeeId, EmployeeLocation, WorkLocation};
use crate::storage::{DirectoryRepository, EmployeeRepository};

/// Resolves the company office an employee works at.
///
/// Returns [`WorkLocation::Unresolved`] only when neither the stored
/// attribute, the employee record, nor any company location yields an id.
pub fn resolve_work_location<R>(store: &R, employee_id: EmployeeId) -> EngineResult<WorkLocation>
where
    R: EmployeeRepository + DirectoryRepository + ?Sized,
{
    let raw = store.stored_work_location(employee_id)?;
    let stored = WorkLocation::from_stored(raw.as_deref());
    if stored.is_resolved() {
        return Ok(stored);
    }

    let record = store.employee(employee_id)?;
    let from_record = record
        .as_ref()
        .map_or(WorkLocation::Unresolved, |e| {
            WorkLocation::from_record(e.work_location)
        });
    if let WorkLocation::Resolved(company_id) = from_record {
        store.store_work_location(employee_id, company_id)?;
        info!(
            employee_id,
            company_id, "Restored work location from employee record"
        );
        return Ok(from_record);
    }

    match default_work_location(store)? {
        Some(company_id) if record.is_none() => {
            debug!(
                employee_id,
                company_id, "Using default work location for unknown employee"
            );
            Ok(WorkLocation::Resolved(company_id))
        }
        Some(company_id) => {
            store.store_work_location(employee_id, company_id)?;
            info!(
                employee_id,
                company_id, "Assigned default work location"
            );
            Ok(WorkLocation::Resolved(company_id))
        }
        None => {
            warn!(
                employee_id,
                "No work location could be resolved: no company locations exist"
            );
            Ok(WorkLocation::Unresolved)
        }
    }
}

/// The first company location in listing order, used as the default office.
pub fn default_work_location<R>(store: &R) -> EngineResult<Option<CompanyLocationId>>
where
    R: DirectoryRepository + ?Sized,
{
    Ok(store
        .company_locations()?
        .into_iter()
        .map(|l| l.id)
        .find(|id| *id != 0))
}

/// Resolves the employee's office and returns its country and state.
///
/// Returns `None` when the work location is unresolved, or when it points at
/// a company location that no longer exists.
pub fn employee_location<R>(
    store: &R,
    employee_id: EmployeeId,
) -> EngineResult<Option<EmployeeLocation>>
where
    R: EmployeeRepository + DirectoryRepository + ?Sized,
{
    let Some(company_id) = resolve_work_location(store, employee_id)?.company_id() else {
        return Ok(None);
    };

    let office = store.company_location(company_id)?;
    if office.is_none() {
        warn!(
            employee_id,
            company_id, "Work location refers to an unknown company location"
        );
    }
    Ok(office.as_ref().map(EmployeeLocation::from))
}

/// Writes the default office into the stored attribute if it is unset.
///
/// Unlike [`resolve_work_location`] this does not consult the employee record;
/// it is run right after the record itself has been saved.
pub fn assign_default_work_location<R>(
    store: &R,
    employee_id: EmployeeId,
) -> EngineResult<WorkLocation>
where
    R: EmployeeRepository + DirectoryRepository + ?Sized,
{
    let raw = store.stored_work_location(employee_id)?;
    let stored = WorkLocation::from_stored(raw.as_deref());
    if stored.is_resolved() {
        return Ok(stored);
    }

    match default_work_location(store)? {
        Some(company_id) => {
            store.store_work_location(employee_id, company_id)?;
            info!(
                employee_id,
                company_id, "Assigned default work location on save"
            );
            Ok(WorkLocation::Resolved(company_id))
        }
        None => Ok(WorkLocation::Unresolved),
    }
}

/// Returns true if the employee's stored attribute is unset, empty or zero.
pub fn has_missing_work_location<R>(store: &R, employee_id: EmployeeId) -> EngineResult<bool>
where
    R: EmployeeRepository + ?Sized,
{
    let raw = store.stored_work_location(employee_id)?;
    Ok(!WorkLocation::from_stored(raw.as_deref()).is_resolved())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CompanyLocation, Employee, EmployeeStatus};
    use crate::storage::InMemoryStore;

    fn office(id: u64, name: &str, country: &str, state: Option<&str>) -> CompanyLocation {
        CompanyLocation {
            id,
            name: name.to_string(),
            country: Some(country.to_string()),
            state: state.map(str::to_string),
        }
    }

    fn employee(id: u64, work_location: Option<u64>) -> Employee {
        Employee {
            id,
            status: EmployeeStatus::Active,
            work_location,
        }
    }

    fn two_offices() -> InMemoryStore {
        InMemoryStore::new()
            .with_company_location(office(10, "New York", "US", Some("NY")))
            .with_company_location(office(20, "London", "GB", None))
    }

    #[test]
    fn test_stored_value_wins() {
        let store = two_offices()
            .with_employee(employee(1, Some(10)))
            .with_stored_work_location(1, "20");

        assert_eq!(
            resolve_work_location(&store, 1).unwrap(),
            WorkLocation::Resolved(20)
        );
        assert_eq!(store.work_location_writes().unwrap(), 0);
    }

    #[test]
    fn test_zero_falls_back_to_record_and_persists() {
        let store = two_offices()
            .with_employee(employee(1, Some(20)))
            .with_stored_work_location(1, "0");

        assert_eq!(
            resolve_work_location(&store, 1).unwrap(),
            WorkLocation::Resolved(20)
        );
        assert_eq!(store.stored_work_location(1).unwrap().as_deref(), Some("20"));

        // Second lookup reads the persisted value directly.
        assert_eq!(
            resolve_work_location(&store, 1).unwrap(),
            WorkLocation::Resolved(20)
        );
        assert_eq!(store.work_location_writes().unwrap(), 1);
    }

    #[test]
    fn test_zero_everywhere_falls_back_to_first_office() {
        let store = two_offices()
            .with_employee(employee(1, Some(0)))
            .with_stored_work_location(1, "0");

        assert_eq!(
            resolve_work_location(&store, 1).unwrap(),
            WorkLocation::Resolved(10)
        );
        assert_eq!(store.stored_work_location(1).unwrap().as_deref(), Some("10"));
        assert_eq!(
            resolve_work_location(&store, 1).unwrap(),
            WorkLocation::Resolved(10)
        );
        assert_eq!(store.work_location_writes().unwrap(), 1);
    }

    #[test]
    fn test_unknown_employee_gets_default_without_write() {
        let store = two_offices();

        assert_eq!(
            resolve_work_location(&store, 42).unwrap(),
            WorkLocation::Resolved(10)
        );
        assert_eq!(store.stored_work_location(42).unwrap(), None);
        assert_eq!(store.work_location_writes().unwrap(), 0);
    }

    #[test]
    fn test_no_offices_is_unresolved() {
        let store = InMemoryStore::new().with_employee(employee(1, None));
        assert_eq!(
            resolve_work_location(&store, 1).unwrap(),
            WorkLocation::Unresolved
        );
        assert_eq!(store.work_location_writes().unwrap(), 0);
    }

    #[test]
    fn test_employee_location_carries_office_region() {
        let store = two_offices().with_stored_work_location(1, "10");
        let location = employee_location(&store, 1).unwrap().unwrap();
        assert_eq!(location.company_id, 10);
        assert_eq!(location.country.as_deref(), Some("US"));
        assert_eq!(location.state.as_deref(), Some("NY"));
    }

    #[test]
    fn test_employee_location_unknown_office_is_none() {
        let store = two_offices().with_stored_work_location(1, "99");
        assert_eq!(employee_location(&store, 1).unwrap(), None);
    }

    #[test]
    fn test_assign_default_ignores_record() {
        let store = two_offices().with_employee(employee(1, Some(20)));
        assert_eq!(
            assign_default_work_location(&store, 1).unwrap(),
            WorkLocation::Resolved(10)
        );
    }

    #[test]
    fn test_assign_default_keeps_existing() {
        let store = two_offices().with_stored_work_location(1, "20");
        assert_eq!(
            assign_default_work_location(&store, 1).unwrap(),
            WorkLocation::Resolved(20)
        );
        assert_eq!(store.work_location_writes().unwrap(), 0);
    }

    #[test]
    fn test_missing_work_location_detection() {
        let store = two_offices()
            .with_stored_work_location(1, "")
            .with_stored_work_location(2, "10");
        assert!(has_missing_work_location(&store, 1).unwrap());
        assert!(!has_missing_work_location(&store, 2).unwrap());
        assert!(has_missing_work_location(&store, 3).unwrap());
    }
}
