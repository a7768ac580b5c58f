//! Holiday applicability resolution.
//!
//! A holiday applies to an employee when it has no scopes at all, when one of
//! its location scopes covers the employee's office country (and state, for a
//! state-specific scope), or when one of its company scopes names the
//! employee's office. Location and company scopes are alternatives: matching
//! either kind is enough.

use std::collections::{BTreeSet, HashSet};

use chrono::NaiveDate;
use tracing::debug;

use crate::error::EngineResult;
use crate::models::{CompanyLocationId, DateWindow, EmployeeLocation, Holiday, LocationScope};
use crate::storage::HolidayRepository;

/// Decides whether a holiday with the given scopes applies to an employee.
///
/// # Example
///
/// ```
/// use holiday_engine::calculation::holiday_applies;
/// use holiday_engine::models::{EmployeeLocation, LocationScope};
///
/// let employee = EmployeeLocation {
///     company_id: 4,
///     country: Some("US".to_string()),
///     state: Some("NJ".to_string()),
/// };
/// let new_york_only = LocationScope {
///     id: 1,
///     holiday_id: 9,
///     country: "US".to_string(),
///     state: Some("NY".to_string()),
/// };
///
/// assert!(holiday_applies(&[], &[], &employee)); // global
/// assert!(!holiday_applies(&[new_york_only], &[], &employee));
/// assert!(holiday_applies(&[], &[4], &employee));
/// ```
pub fn holiday_applies(
    locations: &[LocationScope],
    companies: &[CompanyLocationId],
    employee: &EmployeeLocation,
) -> bool {
    if locations.is_empty() && companies.is_empty() {
        return true;
    }

    let in_scoped_region = employee.country.as_deref().is_some_and(|country| {
        locations
            .iter()
            .any(|scope| scope.country == country && state_matches(scope, employee))
    });

    in_scoped_region || companies.contains(&employee.company_id)
}

fn state_matches(scope: &LocationScope, employee: &EmployeeLocation) -> bool {
    match scope.state_code() {
        None => true,
        Some(state) => employee.state.as_deref().map(str::trim) == Some(state),
    }
}

/// Returns every holiday intersecting `window` that applies to `employee`.
///
/// Each holiday appears once, ordered by start date (ties by id).
pub fn resolve_holidays<R>(
    store: &R,
    employee: &EmployeeLocation,
    window: &DateWindow,
) -> EngineResult<Vec<Holiday>>
where
    R: HolidayRepository + ?Sized,
{
    let candidates = store.holidays_overlapping(window)?;
    let candidate_count = candidates.len();

    let mut seen = HashSet::new();
    let mut applicable = Vec::new();
    for holiday in candidates {
        if !seen.insert(holiday.id) {
            continue;
        }
        let locations = store.location_scopes(holiday.id)?;
        let companies = store.company_scopes(holiday.id)?;
        if holiday_applies(&locations, &companies, employee) {
            applicable.push(holiday);
        }
    }
    applicable.sort_by_key(|h| (h.start, h.id));

    debug!(
        company_id = employee.company_id,
        start = %window.start,
        end = %window.end,
        candidates = candidate_count,
        applicable = applicable.len(),
        "Resolved holidays"
    );

    Ok(applicable)
}

/// Expands holidays into the individual dates they cover inside `window`.
///
/// # Example
///
/// ```
/// use holiday_engine::calculation::expand_to_dates;
/// use holiday_engine::models::{DateWindow, Holiday};
/// use chrono::NaiveDate;
///
/// let d = |day| NaiveDate::from_ymd_opt(2025, 12, day).unwrap();
/// let christmas = Holiday { id: 1, title: "Christmas".to_string(), start: d(24), end: d(26) };
/// let window = DateWindow::new(d(25), d(31)).unwrap();
///
/// let dates = expand_to_dates(&[christmas], &window);
/// assert_eq!(dates.into_iter().collect::<Vec<_>>(), vec![d(25), d(26)]);
/// ```
pub fn expand_to_dates(holidays: &[Holiday], window: &DateWindow) -> BTreeSet<NaiveDate> {
    holidays
        .iter()
        .filter_map(|h| window.clip(h.start, h.end))
        .flat_map(|clipped| clipped.days())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryStore;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn holiday(id: u64, start: NaiveDate, end: NaiveDate) -> Holiday {
        Holiday {
            id,
            title: format!("Holiday {id}"),
            start,
            end,
        }
    }

    fn scope(country: &str, state: Option<&str>) -> LocationScope {
        LocationScope {
            id: 1,
            holiday_id: 1,
            country: country.to_string(),
            state: state.map(str::to_string),
        }
    }

    fn located(company_id: u64, country: &str, state: Option<&str>) -> EmployeeLocation {
        EmployeeLocation {
            company_id,
            country: Some(country.to_string()),
            state: state.map(str::to_string),
        }
    }

    #[test]
    fn test_country_wide_scope_matches_any_state() {
        let scopes = [scope("US", None)];
        assert!(holiday_applies(&scopes, &[], &located(1, "US", Some("NY"))));
        assert!(holiday_applies(&scopes, &[], &located(1, "US", Some("TX"))));
        assert!(holiday_applies(&scopes, &[], &located(1, "US", None)));
        assert!(!holiday_applies(&scopes, &[], &located(1, "CA", None)));
    }

    #[test]
    fn test_state_scope_matches_only_that_state() {
        let scopes = [scope("US", Some("NY"))];
        assert!(holiday_applies(&scopes, &[], &located(1, "US", Some("NY"))));
        assert!(!holiday_applies(&scopes, &[], &located(1, "US", Some("NJ"))));
        assert!(!holiday_applies(&scopes, &[], &located(1, "US", None)));
        assert!(!holiday_applies(&scopes, &[], &located(1, "CA", Some("NY"))));
    }

    #[test]
    fn test_blank_state_scope_is_country_wide() {
        let scopes = [scope("US", Some("")), scope("AU", Some("  "))];
        assert!(holiday_applies(&scopes, &[], &located(1, "US", Some("NY"))));
        assert!(holiday_applies(&scopes, &[], &located(1, "AU", None)));
        assert!(!holiday_applies(&scopes, &[], &located(1, "GB", None)));
    }

    #[test]
    fn test_resolve_stored_blank_state_scope() {
        let store = InMemoryStore::new().with_holiday(holiday(
            1,
            date(2025, 7, 4),
            date(2025, 7, 4),
        ));
        store.insert_location_scope(1, "US", Some("")).unwrap();

        let window = DateWindow::single(date(2025, 7, 4));
        let result = resolve_holidays(&store, &located(1, "US", Some("NY")), &window).unwrap();
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_company_scope_ignores_country() {
        assert!(holiday_applies(&[], &[7], &located(7, "DE", None)));
        assert!(!holiday_applies(&[], &[7], &located(8, "DE", None)));
    }

    #[test]
    fn test_location_and_company_scopes_are_alternatives() {
        let scopes = [scope("US", None)];
        // Company match without region match.
        assert!(holiday_applies(&scopes, &[3], &located(3, "GB", None)));
        // Region match without company match.
        assert!(holiday_applies(&scopes, &[3], &located(9, "US", Some("CA"))));
        // Neither.
        assert!(!holiday_applies(&scopes, &[3], &located(9, "GB", None)));
    }

    #[test]
    fn test_office_without_country_only_sees_global_and_company() {
        let employee = EmployeeLocation {
            company_id: 2,
            country: None,
            state: None,
        };
        assert!(holiday_applies(&[], &[], &employee));
        assert!(!holiday_applies(&[scope("US", None)], &[], &employee));
        assert!(holiday_applies(&[scope("US", None)], &[2], &employee));
    }

    #[test]
    fn test_resolve_filters_by_window_and_scope() {
        let store = InMemoryStore::new()
            .with_holiday(holiday(1, date(2025, 12, 25), date(2025, 12, 25)))
            .with_holiday(holiday(2, date(2025, 11, 27), date(2025, 11, 27)))
            .with_holiday(holiday(3, date(2025, 12, 26), date(2025, 12, 26)))
            .with_holiday(holiday(4, date(2026, 3, 1), date(2026, 3, 1)));
        store.insert_location_scope(2, "US", None).unwrap();
        store.insert_location_scope(3, "GB", None).unwrap();

        let window = DateWindow::new(date(2025, 11, 1), date(2025, 12, 31)).unwrap();
        let us = resolve_holidays(&store, &located(1, "US", Some("NY")), &window).unwrap();
        let ids: Vec<_> = us.iter().map(|h| h.id).collect();
        assert_eq!(ids, vec![2, 1]);

        let gb = resolve_holidays(&store, &located(1, "GB", None), &window).unwrap();
        let ids: Vec<_> = gb.iter().map(|h| h.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_resolve_returns_each_holiday_once() {
        let store = InMemoryStore::new().with_holiday(holiday(
            1,
            date(2025, 7, 4),
            date(2025, 7, 4),
        ));
        store.insert_location_scope(1, "US", None).unwrap();
        store.insert_location_scope(1, "US", Some("NY")).unwrap();
        store.insert_company_scope(1, 5).unwrap();

        let window = DateWindow::single(date(2025, 7, 4));
        let result = resolve_holidays(&store, &located(5, "US", Some("NY")), &window).unwrap();
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_resolve_disjoint_window_is_empty() {
        let store = InMemoryStore::new().with_holiday(holiday(
            1,
            date(2025, 12, 25),
            date(2025, 12, 25),
        ));
        let window = DateWindow::new(date(2026, 1, 1), date(2026, 1, 31)).unwrap();
        assert!(
            resolve_holidays(&store, &located(1, "US", None), &window)
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn test_expand_deduplicates_overlapping_holidays() {
        let holidays = [
            holiday(1, date(2025, 12, 24), date(2025, 12, 26)),
            holiday(2, date(2025, 12, 26), date(2025, 12, 27)),
        ];
        let window = DateWindow::new(date(2025, 12, 20), date(2025, 12, 31)).unwrap();
        let dates: Vec<_> = expand_to_dates(&holidays, &window).into_iter().collect();
        assert_eq!(
            dates,
            vec![
                date(2025, 12, 24),
                date(2025, 12, 25),
                date(2025, 12, 26),
                date(2025, 12, 27)
            ]
        );
    }

    #[test]
    fn test_expand_clips_both_ends() {
        let holidays = [holiday(1, date(2025, 12, 20), date(2026, 1, 10))];
        let window = DateWindow::new(date(2025, 12, 30), date(2026, 1, 2)).unwrap();
        assert_eq!(expand_to_dates(&holidays, &window).len(), 4);
    }
}
