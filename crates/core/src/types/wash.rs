//! Wash transaction records.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{ServiceId, WashId};

/// The car a wash record was taken for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarDetails {
    pub make: String,
    pub model: String,
    pub year: i32,
    pub condition: String,
}

/// One completed or booked car-wash transaction.
///
/// `total_cost` is fixed at the time of the last save: the sum of the
/// selected services' prices at that moment, less the discount. It is never
/// recomputed retroactively when catalog prices change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WashRecord {
    pub wash_id: WashId,
    pub customer_name: String,
    pub car: CarDetails,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_preferences: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_notes: Option<String>,
    pub selected_services: Vec<ServiceId>,
    pub total_cost: Decimal,
    /// Percentage in `[0, 100]`. New submissions always store 0; discounts
    /// are owner-applied corrections through the edit flow.
    #[serde(default)]
    pub discount_percentage: Decimal,
    pub created_at: DateTime<Utc>,
}
