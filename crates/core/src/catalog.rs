//! The default service catalog.
//!
//! Seeded into a fresh data directory; owners manage the live catalog from
//! there.

use rust_decimal::dec;

use crate::types::{Service, ServiceCategory, ServiceId};

/// Build the default nine-service catalog.
#[must_use]
pub fn default_catalog() -> Vec<Service> {
    fn service(
        id: &str,
        name: &str,
        price: rust_decimal::Decimal,
        description: &str,
        category: ServiceCategory,
    ) -> Service {
        Service {
            id: ServiceId::new(id),
            name: name.to_owned(),
            price,
            description: Some(description.to_owned()),
            category,
        }
    }

    vec![
        service(
            "basic_wash",
            "Basic Wash",
            dec!(15),
            "Exterior wash and dry.",
            ServiceCategory::Wash,
        ),
        service(
            "premium_wash",
            "Premium Wash",
            dec!(30),
            "Includes basic wash, interior vacuum, and underbody cleaning.",
            ServiceCategory::Wash,
        ),
        service(
            "detailing_wax",
            "Detailing: Wax",
            dec!(50),
            "Hand wax application for shine and protection.",
            ServiceCategory::Detailing,
        ),
        service(
            "detailing_polish",
            "Detailing: Polish",
            dec!(60),
            "Machine polish to remove minor scratches and restore gloss.",
            ServiceCategory::Detailing,
        ),
        service(
            "detailing_engine",
            "Detailing: Engine Bay Cleaning",
            dec!(40),
            "Safe cleaning of the engine bay.",
            ServiceCategory::Detailing,
        ),
        service(
            "ceramic_coating",
            "Ceramic Coating",
            dec!(150),
            "Long-lasting protective coating for paint.",
            ServiceCategory::Additional,
        ),
        service(
            "tire_shine",
            "Tire Shine",
            dec!(10),
            "Application of tire dressing for a glossy finish.",
            ServiceCategory::Additional,
        ),
        // Package prices are below the sum of their parts on purpose.
        service(
            "package_basic_plus",
            "Package: Basic Wash + Tire Shine",
            dec!(22),
            "Basic wash with tire shine application.",
            ServiceCategory::Package,
        ),
        service(
            "package_premium_detail",
            "Package: Premium Wash + Wax",
            dec!(75),
            "Premium wash combined with hand wax application.",
            ServiceCategory::Package,
        ),
    ]
}
