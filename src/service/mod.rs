//! The collaborator-facing surface of the holiday engine.
//!
//! [`HolidayService`] wraps a [`Store`] and exposes every entry point the host
//! application calls: scope CRUD, per-employee holiday lookups, leave-day
//! calculation and validation. The host's admin UI and leave workflow reach it
//! through the capability traits [`HolidayScopeEditor`],
//! [`LeaveDurationProvider`] and [`EmployeeLifecycle`].

mod employee_lifecycle;
mod leave_duration;
mod scope_editor;

pub use employee_lifecycle::EmployeeLifecycle;
pub use leave_duration::LeaveDurationProvider;
pub use scope_editor::HolidayScopeEditor;

use std::collections::BTreeMap;

use chrono::{NaiveDate, Weekday};
use tracing::{debug, info};

use crate::calculation::{
    ClassifiedDay, employee_location, holiday_dates, resolve_holidays, validate_leave_request,
    working_day_breakdown, working_days,
};
use crate::error::{EngineError, EngineResult};
use crate::migration::{self, MigrationReport, PendingUpdate};
use crate::models::{
    CompanyLocationId, DEFAULT_WEEKENDS, DateWindow, EmployeeId, Holiday, HolidayId,
    LeavePolicy, LeaveRequestArgs, LocationScope, ScopeId,
};
use crate::storage::Store;

/// Entry points for holiday scoping and leave-day calculation.
///
/// # Example
///
/// ```
/// use holiday_engine::models::{CompanyLocation, DateWindow, Holiday};
/// use holiday_engine::service::HolidayService;
/// use holiday_engine::storage::InMemoryStore;
/// use chrono::NaiveDate;
///
/// let d = |day| NaiveDate::from_ymd_opt(2025, 12, day).unwrap();
/// let store = InMemoryStore::new()
///     .with_company_location(CompanyLocation {
///         id: 1,
///         name: "New York".to_string(),
///         country: Some("US".to_string()),
///         state: Some("NY".to_string()),
///     })
///     .with_holiday(Holiday { id: 1, title: "Christmas".to_string(), start: d(25), end: d(25) });
/// let service = HolidayService::new(store);
///
/// let window = DateWindow::new(d(22), d(28)).unwrap();
/// assert_eq!(service.count_employee_holidays(42, &window).unwrap(), 1);
/// assert_eq!(service.calculate_leave_days_with_holidays(42, &window, None).unwrap(), 4);
/// ```
#[derive(Debug)]
pub struct HolidayService<S> {
    store: S,
    default_weekends: Vec<Weekday>,
    table_prefix: String,
}

impl<S: Store> HolidayService<S> {
    /// Creates a service with Saturday/Sunday weekends and no table prefix.
    pub fn new(store: S) -> Self {
        Self {
            store,
            default_weekends: DEFAULT_WEEKENDS.to_vec(),
            table_prefix: String::new(),
        }
    }

    /// Overrides the weekend days used when a policy names none.
    pub fn with_default_weekends(mut self, weekends: Vec<Weekday>) -> Self {
        self.default_weekends = weekends;
        self
    }

    /// Sets the table prefix used when installing the schema.
    pub fn with_table_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.table_prefix = prefix.into();
        self
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Weekend days used when a policy names none.
    pub fn default_weekends(&self) -> &[Weekday] {
        &self.default_weekends
    }

    /// Attaches a country or state scope to a holiday.
    ///
    /// The country code is trimmed and upper-cased and must be two ASCII
    /// letters. A blank state is stored as country-wide.
    pub fn add_location(
        &self,
        holiday_id: HolidayId,
        country: &str,
        state: Option<&str>,
    ) -> EngineResult<ScopeId> {
        let country = normalize_country(country)?;
        let state = normalize_state(state);
        let id = self
            .store
            .insert_location_scope(holiday_id, &country, state)?;
        debug!(holiday_id, country = %country, state = ?state, scope_id = id, "Added location scope");
        Ok(id)
    }

    /// Attaches a company office scope to a holiday.
    pub fn add_company(
        &self,
        holiday_id: HolidayId,
        company_id: CompanyLocationId,
    ) -> EngineResult<ScopeId> {
        let id = self.store.insert_company_scope(holiday_id, company_id)?;
        debug!(holiday_id, company_id, scope_id = id, "Added company scope");
        Ok(id)
    }

    /// Removes every location scope of a holiday.
    pub fn remove_all_locations(&self, holiday_id: HolidayId) -> EngineResult<usize> {
        self.store.delete_location_scopes(holiday_id)
    }

    /// Removes every company scope of a holiday.
    pub fn remove_all_companies(&self, holiday_id: HolidayId) -> EngineResult<usize> {
        self.store.delete_company_scopes(holiday_id)
    }

    /// Location scopes attached to a holiday.
    pub fn list_locations(&self, holiday_id: HolidayId) -> EngineResult<Vec<LocationScope>> {
        self.store.location_scopes(holiday_id)
    }

    /// Company offices a holiday is scoped to.
    pub fn list_companies(&self, holiday_id: HolidayId) -> EngineResult<Vec<CompanyLocationId>> {
        self.store.company_scopes(holiday_id)
    }

    /// Holidays in `window` that apply to the employee.
    ///
    /// Empty when the employee's work location cannot be resolved.
    pub fn get_employee_holidays(
        &self,
        employee_id: EmployeeId,
        window: &DateWindow,
    ) -> EngineResult<Vec<Holiday>> {
        match employee_location(&self.store, employee_id)? {
            Some(location) => resolve_holidays(&self.store, &location, window),
            None => Ok(Vec::new()),
        }
    }

    /// Dates in `window` covered by a holiday that applies to the employee,
    /// in ascending order without duplicates.
    pub fn get_employee_holiday_dates(
        &self,
        employee_id: EmployeeId,
        window: &DateWindow,
    ) -> EngineResult<Vec<NaiveDate>> {
        let location = employee_location(&self.store, employee_id)?;
        Ok(holiday_dates(&self.store, location.as_ref(), window)?
            .into_iter()
            .collect())
    }

    /// Number of holiday dates in `window` for the employee.
    pub fn count_employee_holidays(
        &self,
        employee_id: EmployeeId,
        window: &DateWindow,
    ) -> EngineResult<u32> {
        Ok(self.get_employee_holiday_dates(employee_id, window)?.len() as u32)
    }

    /// Working days in `window` for the employee, excluding weekends and the
    /// holidays that apply to them.
    pub fn calculate_leave_days_with_holidays(
        &self,
        employee_id: EmployeeId,
        window: &DateWindow,
        policy: Option<&LeavePolicy>,
    ) -> EngineResult<u32> {
        let location = employee_location(&self.store, employee_id)?;
        working_days(
            &self.store,
            location.as_ref(),
            window,
            self.weekends_for(policy),
        )
    }

    /// Per-day classification behind
    /// [`calculate_leave_days_with_holidays`](Self::calculate_leave_days_with_holidays).
    pub fn leave_day_breakdown(
        &self,
        employee_id: EmployeeId,
        window: &DateWindow,
        policy: Option<&LeavePolicy>,
    ) -> EngineResult<Vec<ClassifiedDay>> {
        let location = employee_location(&self.store, employee_id)?;
        working_day_breakdown(
            &self.store,
            location.as_ref(),
            window,
            self.weekends_for(policy),
        )
    }

    /// Validates a leave request, returning the working days it consumes.
    pub fn validate_leave_request_with_holidays(
        &self,
        args: &LeaveRequestArgs,
    ) -> EngineResult<u32> {
        validate_leave_request(&self.store, args, &self.default_weekends)
    }

    /// Looks up a leave policy.
    pub fn policy(&self, policy_id: u64) -> EngineResult<Option<LeavePolicy>> {
        self.store.policy(policy_id)
    }

    /// States of a country, keyed by state code.
    pub fn states_for_country(&self, code: &str) -> EngineResult<BTreeMap<String, String>> {
        let code = code.trim();
        if code.is_empty() {
            return Err(EngineError::InvalidCountry {
                code: code.to_string(),
            });
        }
        Ok(self
            .store
            .country(&code.to_ascii_uppercase())?
            .map(|c| c.states)
            .unwrap_or_default())
    }

    /// Installs the scope tables and repairs missing work locations, each at
    /// most once.
    pub fn run_updates(&self) -> EngineResult<MigrationReport> {
        let report = migration::run_holiday_location_updates(&self.store, &self.table_prefix)?;
        info!(
            tables_created = report.tables_created,
            employees_fixed = report.employees_fixed,
            "Holiday location updates finished"
        );
        Ok(report)
    }

    /// Updates that have not been applied yet.
    pub fn pending_updates(&self) -> EngineResult<Vec<PendingUpdate>> {
        migration::pending_updates(&self.store)
    }

    fn weekends_for<'a>(&'a self, policy: Option<&'a LeavePolicy>) -> &'a [Weekday] {
        match policy {
            Some(policy) => policy.weekends_or(&self.default_weekends),
            None => &self.default_weekends,
        }
    }
}

/// Trims and upper-cases a country code, which must be two ASCII letters.
pub(crate) fn normalize_country(country: &str) -> EngineResult<String> {
    let code = country.trim().to_ascii_uppercase();
    if code.len() != 2 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(EngineError::InvalidCountry {
            code: country.to_string(),
        });
    }
    Ok(code)
}

/// Trims a state; a blank state means country-wide.
pub(crate) fn normalize_state(state: Option<&str>) -> Option<&str> {
    state.map(str::trim).filter(|s| !s.is_empty())
}
