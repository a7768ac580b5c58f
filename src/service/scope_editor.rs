//! Holiday scope editing for the admin holiday form and list table.

use tracing::info;

use crate::error::EngineResult;
use crate::models::{HolidayApplicability, HolidayId};
use crate::storage::Store;

use super::{HolidayService, normalize_country};

/// What the holiday admin screens need from the engine.
pub trait HolidayScopeEditor {
    /// Replaces a holiday's scopes with the submitted applicability.
    ///
    /// The submitted country is checked before anything is removed, so a
    /// rejected submission leaves the stored scopes as they were. Otherwise
    /// existing location and company scopes are always removed first. Holiday
    /// id `0` (an unsaved holiday) is ignored.
    fn save_scope(
        &self,
        holiday_id: HolidayId,
        applicability: &HolidayApplicability,
    ) -> EngineResult<()>;

    /// The applicability to pre-select when the holiday form is opened.
    fn load_scope(&self, holiday_id: HolidayId) -> EngineResult<HolidayApplicability>;

    /// Text for the "Applies To" column of the holiday list.
    fn scope_label(&self, holiday_id: HolidayId) -> EngineResult<String>;
}

impl<S: Store> HolidayScopeEditor for HolidayService<S> {
    fn save_scope(
        &self,
        holiday_id: HolidayId,
        applicability: &HolidayApplicability,
    ) -> EngineResult<()> {
        if holiday_id == 0 {
            return Ok(());
        }

        match applicability {
            HolidayApplicability::Location { country, .. } if !country.trim().is_empty() => {
                normalize_country(country)?;
            }
            _ => {}
        }

        let removed_locations = self.remove_all_locations(holiday_id)?;
        let removed_companies = self.remove_all_companies(holiday_id)?;

        let mut added = 0usize;
        match applicability {
            HolidayApplicability::Global => {}
            HolidayApplicability::Location { country, state } => {
                if !country.trim().is_empty() {
                    self.add_location(holiday_id, country, state.as_deref())?;
                    added += 1;
                }
            }
            HolidayApplicability::Companies { ids } => {
                let mut seen = Vec::with_capacity(ids.len());
                for &company_id in ids {
                    if company_id == 0 || seen.contains(&company_id) {
                        continue;
                    }
                    seen.push(company_id);
                    self.add_company(holiday_id, company_id)?;
                    added += 1;
                }
            }
        }

        info!(
            holiday_id,
            mode = applicability.mode(),
            removed_locations,
            removed_companies,
            added,
            "Replaced holiday scope"
        );
        Ok(())
    }

    fn load_scope(&self, holiday_id: HolidayId) -> EngineResult<HolidayApplicability> {
        if let Some(first) = self.list_locations(holiday_id)?.into_iter().next() {
            return Ok(HolidayApplicability::Location {
                state: first.state_code().map(str::to_string),
                country: first.country,
            });
        }

        let ids = self.list_companies(holiday_id)?;
        if !ids.is_empty() {
            return Ok(HolidayApplicability::Companies { ids });
        }

        Ok(HolidayApplicability::Global)
    }

    fn scope_label(&self, holiday_id: HolidayId) -> EngineResult<String> {
        if let Some(first) = self.list_locations(holiday_id)?.into_iter().next() {
            let country_name = self
                .store()
                .country(&first.country)?
                .map_or_else(|| first.country.clone(), |c| c.name);
            return Ok(match first.state_code() {
                Some(state) => format!("{country_name} - {state}"),
                None => country_name,
            });
        }

        let ids = self.list_companies(holiday_id)?;
        if !ids.is_empty() {
            let names: Vec<String> = self
                .store()
                .company_locations()?
                .into_iter()
                .filter(|l| ids.contains(&l.id))
                .map(|l| l.name)
                .collect();

            if names.len() > 2 {
                return Ok(format!("{} +{} more", names[0], names.len() - 1));
            }
            return Ok(names.join(", "));
        }

        Ok("All Locations".to_string())
    }
}
