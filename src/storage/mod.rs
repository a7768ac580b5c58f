//! Storage access for holiday scopes and the host records they depend on.
//!
//! Business rules never reach a database handle directly. They are written
//! against the repository traits below, which a host backs with its own
//! storage. [`InMemoryStore`] implements all of them for tests, seeding from
//! configuration, and the bundled HTTP service.

mod memory;
mod schema;

pub use memory::InMemoryStore;
pub use schema::{
    COMPANIES_TABLE, HOLIDAY_TABLE, LOCATIONS_TABLE, scope_table_names, scope_table_statements,
};

use crate::error::EngineResult;
use crate::models::{
    CompanyLocation, CompanyLocationId, Country, DateWindow, Employee, EmployeeId, Holiday,
    HolidayId, LeaveBalance, LeavePolicy, LocationScope, PolicyId, ScopeId,
};

/// Holiday rows and their applicability scopes.
pub trait HolidayRepository {
    /// Holidays whose range intersects `window`, ordered by start date.
    fn holidays_overlapping(&self, window: &DateWindow) -> EngineResult<Vec<Holiday>>;

    /// Looks up a single holiday.
    fn holiday(&self, id: HolidayId) -> EngineResult<Option<Holiday>>;

    /// Inserts a location scope row and returns its id.
    fn insert_location_scope(
        &self,
        holiday_id: HolidayId,
        country: &str,
        state: Option<&str>,
    ) -> EngineResult<ScopeId>;

    /// Inserts a company scope row and returns its id.
    ///
    /// Fails with `DuplicateCompanyScope` if the pair already exists.
    fn insert_company_scope(
        &self,
        holiday_id: HolidayId,
        company_id: CompanyLocationId,
    ) -> EngineResult<ScopeId>;

    /// Deletes every location scope of a holiday, returning the number removed.
    fn delete_location_scopes(&self, holiday_id: HolidayId) -> EngineResult<usize>;

    /// Deletes every company scope of a holiday, returning the number removed.
    fn delete_company_scopes(&self, holiday_id: HolidayId) -> EngineResult<usize>;

    /// Location scopes of a holiday in insertion order.
    fn location_scopes(&self, holiday_id: HolidayId) -> EngineResult<Vec<LocationScope>>;

    /// Company location ids a holiday is scoped to, in insertion order.
    fn company_scopes(&self, holiday_id: HolidayId) -> EngineResult<Vec<CompanyLocationId>>;
}

/// Company offices and the country list.
pub trait DirectoryRepository {
    /// All company offices in creation order.
    fn company_locations(&self) -> EngineResult<Vec<CompanyLocation>>;

    /// Looks up a single company office.
    fn company_location(&self, id: CompanyLocationId) -> EngineResult<Option<CompanyLocation>>;

    /// Looks up a country by ISO code.
    fn country(&self, code: &str) -> EngineResult<Option<Country>>;
}

/// Employee records and the stored work-location attribute.
pub trait EmployeeRepository {
    /// Looks up an employee record.
    fn employee(&self, id: EmployeeId) -> EngineResult<Option<Employee>>;

    /// All employee records.
    fn employees(&self) -> EngineResult<Vec<Employee>>;

    /// The raw stored work-location attribute, exactly as persisted.
    fn stored_work_location(&self, id: EmployeeId) -> EngineResult<Option<String>>;

    /// Persists the work-location attribute.
    fn store_work_location(
        &self,
        id: EmployeeId,
        location: CompanyLocationId,
    ) -> EngineResult<()>;
}

/// Leave policies and balances owned by the host's leave module.
pub trait LeaveRepository {
    /// Looks up a leave policy.
    fn policy(&self, id: PolicyId) -> EngineResult<Option<LeavePolicy>>;

    /// The employee's balance under a policy, if one has been recorded.
    fn balance(
        &self,
        employee_id: EmployeeId,
        policy_id: PolicyId,
    ) -> EngineResult<Option<LeaveBalance>>;
}

/// Persisted option flags and schema installation.
pub trait SettingsRepository {
    /// Reads an option value.
    fn option(&self, key: &str) -> EngineResult<Option<String>>;

    /// Writes an option value.
    fn set_option(&self, key: &str, value: &str) -> EngineResult<()>;

    /// Executes schema statements. Statements must be idempotent.
    fn apply_schema(&self, statements: &[String]) -> EngineResult<()>;
}

/// Everything the engine needs from its host.
pub trait Store:
    HolidayRepository + DirectoryRepository + EmployeeRepository + LeaveRepository + SettingsRepository
{
}

impl<T> Store for T where
    T: HolidayRepository
        + DirectoryRepository
        + EmployeeRepository
        + LeaveRepository
        + SettingsRepository
{
}
