//! SQL schema for the scope tables.
//!
//! Hosts backed by a relational database run these statements through
//! [`SettingsRepository::apply_schema`](super::SettingsRepository::apply_schema).
//! Every statement is safe to run more than once.

/// Pre-existing holiday table (owned by the host).
pub const HOLIDAY_TABLE: &str = "erp_hr_holiday";
/// Location scope table.
pub const LOCATIONS_TABLE: &str = "erp_hr_holiday_locations";
/// Company scope table.
pub const COMPANIES_TABLE: &str = "erp_hr_holiday_companies";

/// Fully qualified names of the two scope tables for a table prefix.
pub fn scope_table_names(prefix: &str) -> [String; 2] {
    [
        format!("{prefix}{LOCATIONS_TABLE}"),
        format!("{prefix}{COMPANIES_TABLE}"),
    ]
}

/// Renders the DDL for the scope tables and the holiday date-range index.
///
/// # Example
///
/// ```
/// use holiday_engine::storage::scope_table_statements;
///
/// let statements = scope_table_statements("wp_");
/// assert_eq!(statements.len(), 3);
/// assert!(statements[0].contains("wp_erp_hr_holiday_locations"));
/// ```
pub fn scope_table_statements(prefix: &str) -> Vec<String> {
    let [locations, companies] = scope_table_names(prefix);
    let holiday = format!("{prefix}{HOLIDAY_TABLE}");

    vec![
        format!(
            "CREATE TABLE IF NOT EXISTS `{locations}` (
    `id` bigint(20) unsigned NOT NULL AUTO_INCREMENT,
    `holiday_id` bigint(20) unsigned NOT NULL,
    `country` varchar(2) DEFAULT NULL,
    `state` varchar(100) DEFAULT NULL,
    `created_at` timestamp NULL DEFAULT CURRENT_TIMESTAMP,
    PRIMARY KEY (`id`),
    KEY `holiday_id` (`holiday_id`),
    KEY `country_state` (`country`, `state`)
)"
        ),
        format!(
            "CREATE TABLE IF NOT EXISTS `{companies}` (
    `id` bigint(20) unsigned NOT NULL AUTO_INCREMENT,
    `holiday_id` bigint(20) unsigned NOT NULL,
    `company_id` bigint(20) unsigned NOT NULL,
    `created_at` timestamp NULL DEFAULT CURRENT_TIMESTAMP,
    PRIMARY KEY (`id`),
    KEY `holiday_id` (`holiday_id`),
    KEY `company_id` (`company_id`),
    UNIQUE KEY `holiday_company` (`holiday_id`, `company_id`)
)"
        ),
        format!("ALTER TABLE `{holiday}` ADD INDEX IF NOT EXISTS `date_range` (`start`, `end`)"),
    ]
}
