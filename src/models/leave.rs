//! Leave policy, balance and request models.

use chrono::{NaiveDate, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{EmployeeId, PolicyId};

/// Weekend days used when neither the policy nor the configuration names any.
pub const DEFAULT_WEEKENDS: [Weekday; 2] = [Weekday::Sat, Weekday::Sun];

/// A leave policy defined by the host.
///
/// # Example
///
/// ```
/// use holiday_engine::models::LeavePolicy;
/// use chrono::Weekday;
///
/// let json = r#"{"id": 1, "name": "Annual", "weekends": ["Fri", "Sat"]}"#;
/// let policy: LeavePolicy = serde_json::from_str(json).unwrap();
/// assert_eq!(policy.weekends, Some(vec![Weekday::Fri, Weekday::Sat]));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeavePolicy {
    /// Identifier of the policy.
    pub id: PolicyId,
    /// Display name of the policy.
    pub name: String,
    /// Weekend days for this policy; `None` uses the configured default.
    #[serde(default)]
    pub weekends: Option<Vec<Weekday>>,
}

impl LeavePolicy {
    /// Returns the policy's weekend days, or `default` when the policy has none.
    pub fn weekends_or<'a>(&'a self, default: &'a [Weekday]) -> &'a [Weekday] {
        self.weekends.as_deref().unwrap_or(default)
    }
}

/// An employee's entitlement under one policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct LeaveBalance {
    /// Total days granted.
    pub entitlement: Decimal,
    /// Days already booked.
    pub scheduled: Decimal,
}

impl LeaveBalance {
    /// Days still available to request.
    pub fn available(&self) -> Decimal {
        self.entitlement - self.scheduled
    }
}

/// The arguments of a leave request as received from a form or API call.
///
/// Every field is optional so that incomplete submissions reach validation
/// instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct LeaveRequestArgs {
    /// The employee requesting leave.
    #[serde(default)]
    pub employee_id: Option<EmployeeId>,
    /// First day of leave.
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// Last day of leave.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// The leave policy the request is made under.
    #[serde(default)]
    pub policy_id: Option<PolicyId>,
}
