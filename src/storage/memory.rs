//! In-memory implementation of every repository trait.

use std::collections::{BTreeMap, HashMap};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{EngineError, EngineResult};
use crate::models::{
    CompanyLocation, CompanyLocationId, CompanyScope, Country, DateWindow, Employee, EmployeeId,
    Holiday, HolidayId, LeaveBalance, LeavePolicy, LocationScope, PolicyId, ScopeId,
};

use super::{
    DirectoryRepository, EmployeeRepository, HolidayRepository, LeaveRepository,
    SettingsRepository,
};

#[derive(Debug, Default)]
struct Tables {
    holidays: BTreeMap<HolidayId, Holiday>,
    location_scopes: Vec<LocationScope>,
    company_scopes: Vec<CompanyScope>,
    next_location_scope_id: ScopeId,
    next_company_scope_id: ScopeId,
    company_locations: Vec<CompanyLocation>,
    countries: BTreeMap<String, Country>,
    employees: BTreeMap<EmployeeId, Employee>,
    work_location_meta: HashMap<EmployeeId, String>,
    work_location_writes: usize,
    policies: BTreeMap<PolicyId, LeavePolicy>,
    balances: HashMap<(EmployeeId, PolicyId), LeaveBalance>,
    options: HashMap<String, String>,
    schema: Vec<String>,
}

/// A thread-safe, process-local store.
///
/// Each trait method takes the lock once, so every single statement is atomic.
/// Sequences of statements (such as a scope replace) are not.
///
/// # Example
///
/// ```
/// use holiday_engine::models::CompanyLocation;
/// use holiday_engine::storage::{DirectoryRepository, InMemoryStore};
///
/// let store = InMemoryStore::new().with_company_location(CompanyLocation {
///     id: 1,
///     name: "Head Office".to_string(),
///     country: Some("US".to_string()),
///     state: Some("NY".to_string()),
/// });
/// assert_eq!(store.company_locations().unwrap().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn tables_mut(&mut self) -> &mut Tables {
        self.tables.get_mut().unwrap_or_else(PoisonError::into_inner)
    }

    fn read(&self) -> EngineResult<RwLockReadGuard<'_, Tables>> {
        self.tables
            .read()
            .map_err(|_| EngineError::storage("store lock poisoned"))
    }

    fn write(&self) -> EngineResult<RwLockWriteGuard<'_, Tables>> {
        self.tables
            .write()
            .map_err(|_| EngineError::storage("store lock poisoned"))
    }

    /// Adds a holiday row.
    pub fn with_holiday(mut self, holiday: Holiday) -> Self {
        self.tables_mut().holidays.insert(holiday.id, holiday);
        self
    }

    /// Adds a company office. Offices keep the order they were added in.
    pub fn with_company_location(mut self, location: CompanyLocation) -> Self {
        self.tables_mut().company_locations.push(location);
        self
    }

    /// Adds a country to the country list.
    pub fn with_country(mut self, country: Country) -> Self {
        self.tables_mut()
            .countries
            .insert(country.code.clone(), country);
        self
    }

    /// Adds an employee record.
    pub fn with_employee(mut self, employee: Employee) -> Self {
        self.tables_mut().employees.insert(employee.id, employee);
        self
    }

    /// Sets the raw stored work-location attribute without counting it as a write.
    pub fn with_stored_work_location(mut self, employee_id: EmployeeId, raw: &str) -> Self {
        self.tables_mut()
            .work_location_meta
            .insert(employee_id, raw.to_string());
        self
    }

    /// Adds a leave policy.
    pub fn with_policy(mut self, policy: LeavePolicy) -> Self {
        self.tables_mut().policies.insert(policy.id, policy);
        self
    }

    /// Records an employee's balance under a policy.
    pub fn with_balance(
        mut self,
        employee_id: EmployeeId,
        policy_id: PolicyId,
        balance: LeaveBalance,
    ) -> Self {
        self.tables_mut()
            .balances
            .insert((employee_id, policy_id), balance);
        self
    }

    /// Sets an option flag.
    pub fn with_option(mut self, key: &str, value: &str) -> Self {
        self.tables_mut()
            .options
            .insert(key.to_string(), value.to_string());
        self
    }

    /// Number of times the work-location attribute has been written.
    pub fn work_location_writes(&self) -> EngineResult<usize> {
        Ok(self.read()?.work_location_writes)
    }

    /// Schema statements applied so far, in order.
    pub fn applied_schema(&self) -> EngineResult<Vec<String>> {
        Ok(self.read()?.schema.clone())
    }
}

impl HolidayRepository for InMemoryStore {
    fn holidays_overlapping(&self, window: &DateWindow) -> EngineResult<Vec<Holiday>> {
        let tables = self.read()?;
        let mut holidays: Vec<Holiday> = tables
            .holidays
            .values()
            .filter(|h| window.overlaps(h.start, h.end))
            .cloned()
            .collect();
        holidays.sort_by_key(|h| (h.start, h.id));
        Ok(holidays)
    }

    fn holiday(&self, id: HolidayId) -> EngineResult<Option<Holiday>> {
        Ok(self.read()?.holidays.get(&id).cloned())
    }

    fn insert_location_scope(
        &self,
        holiday_id: HolidayId,
        country: &str,
        state: Option<&str>,
    ) -> EngineResult<ScopeId> {
        let mut tables = self.write()?;
        tables.next_location_scope_id += 1;
        let id = tables.next_location_scope_id;
        tables.location_scopes.push(LocationScope {
            id,
            holiday_id,
            country: country.to_string(),
            state: state.map(str::to_string),
        });
        Ok(id)
    }

    fn insert_company_scope(
        &self,
        holiday_id: HolidayId,
        company_id: CompanyLocationId,
    ) -> EngineResult<ScopeId> {
        let mut tables = self.write()?;
        let duplicate = tables
            .company_scopes
            .iter()
            .any(|s| s.holiday_id == holiday_id && s.company_id == company_id);
        if duplicate {
            return Err(EngineError::DuplicateCompanyScope {
                holiday_id,
                company_id,
            });
        }
        tables.next_company_scope_id += 1;
        let id = tables.next_company_scope_id;
        tables.company_scopes.push(CompanyScope {
            id,
            holiday_id,
            company_id,
        });
        Ok(id)
    }

    fn delete_location_scopes(&self, holiday_id: HolidayId) -> EngineResult<usize> {
        let mut tables = self.write()?;
        let before = tables.location_scopes.len();
        tables.location_scopes.retain(|s| s.holiday_id != holiday_id);
        Ok(before - tables.location_scopes.len())
    }

    fn delete_company_scopes(&self, holiday_id: HolidayId) -> EngineResult<usize> {
        let mut tables = self.write()?;
        let before = tables.company_scopes.len();
        tables.company_scopes.retain(|s| s.holiday_id != holiday_id);
        Ok(before - tables.company_scopes.len())
    }

    fn location_scopes(&self, holiday_id: HolidayId) -> EngineResult<Vec<LocationScope>> {
        Ok(self
            .read()?
            .location_scopes
            .iter()
            .filter(|s| s.holiday_id == holiday_id)
            .cloned()
            .collect())
    }

    fn company_scopes(&self, holiday_id: HolidayId) -> EngineResult<Vec<CompanyLocationId>> {
        Ok(self
            .read()?
            .company_scopes
            .iter()
            .filter(|s| s.holiday_id == holiday_id)
            .map(|s| s.company_id)
            .collect())
    }
}

impl DirectoryRepository for InMemoryStore {
    fn company_locations(&self) -> EngineResult<Vec<CompanyLocation>> {
        Ok(self.read()?.company_locations.clone())
    }

    fn company_location(&self, id: CompanyLocationId) -> EngineResult<Option<CompanyLocation>> {
        Ok(self
            .read()?
            .company_locations
            .iter()
            .find(|l| l.id == id)
            .cloned())
    }

    fn country(&self, code: &str) -> EngineResult<Option<Country>> {
        Ok(self.read()?.countries.get(code).cloned())
    }
}

impl EmployeeRepository for InMemoryStore {
    fn employee(&self, id: EmployeeId) -> EngineResult<Option<Employee>> {
        Ok(self.read()?.employees.get(&id).cloned())
    }

    fn employees(&self) -> EngineResult<Vec<Employee>> {
        Ok(self.read()?.employees.values().cloned().collect())
    }

    fn stored_work_location(&self, id: EmployeeId) -> EngineResult<Option<String>> {
        Ok(self.read()?.work_location_meta.get(&id).cloned())
    }

    fn store_work_location(
        &self,
        id: EmployeeId,
        location: CompanyLocationId,
    ) -> EngineResult<()> {
        let mut tables = self.write()?;
        tables.work_location_meta.insert(id, location.to_string());
        tables.work_location_writes += 1;
        Ok(())
    }
}

impl LeaveRepository for InMemoryStore {
    fn policy(&self, id: PolicyId) -> EngineResult<Option<LeavePolicy>> {
        Ok(self.read()?.policies.get(&id).cloned())
    }

    fn balance(
        &self,
        employee_id: EmployeeId,
        policy_id: PolicyId,
    ) -> EngineResult<Option<LeaveBalance>> {
        Ok(self.read()?.balances.get(&(employee_id, policy_id)).copied())
    }
}

impl SettingsRepository for InMemoryStore {
    fn option(&self, key: &str) -> EngineResult<Option<String>> {
        Ok(self.read()?.options.get(key).cloned())
    }

    fn set_option(&self, key: &str, value: &str) -> EngineResult<()> {
        self.write()?
            .options
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn apply_schema(&self, statements: &[String]) -> EngineResult<()> {
        let mut tables = self.write()?;
        for statement in statements {
            if !tables.schema.contains(statement) {
                tables.schema.push(statement.clone());
            }
        }
        Ok(())
    }
}
