//! The owner-managed service catalog.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ServiceId;

/// A purchasable wash or detailing offering.
///
/// Referenced by ID from [`crate::WashRecord::selected_services`]. Deleting
/// a service leaves those references in place; consumers fall back to the
/// raw ID string when a referenced service no longer exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: ServiceId,
    pub name: String,
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category: ServiceCategory,
}

/// Catalog grouping for services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceCategory {
    Wash,
    Detailing,
    Additional,
    Package,
}

impl ServiceCategory {
    /// All categories, in catalog display order.
    pub const ALL: [Self; 4] = [Self::Wash, Self::Detailing, Self::Additional, Self::Package];

    /// Stable string form (matches the wire representation).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Wash => "Wash",
            Self::Detailing => "Detailing",
            Self::Additional => "Additional",
            Self::Package => "Package",
        }
    }
}

impl std::fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::dec;

    use super::*;

    #[test]
    fn test_category_serde_matches_catalog_names() {
        assert_eq!(
            serde_json::to_string(&ServiceCategory::Detailing).unwrap(),
            "\"Detailing\""
        );
        assert_eq!(
            serde_json::from_str::<ServiceCategory>("\"Package\"").unwrap(),
            ServiceCategory::Package
        );
    }

    #[test]
    fn test_service_omits_missing_description() {
        let service = Service {
            id: ServiceId::new("tire_shine"),
            name: "Tire Shine".to_owned(),
            price: dec!(10),
            description: None,
            category: ServiceCategory::Additional,
        };

        let json = serde_json::to_value(&service).unwrap();
        assert!(json.get("description").is_none());
    }
}
