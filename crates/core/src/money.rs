//! Decimal subtotal and discount arithmetic.
//!
//! All money passes through [`rust_decimal::Decimal`]; nothing here touches
//! floating point.

use rust_decimal::Decimal;

use crate::types::{Service, ServiceId};

/// Sum the catalog prices of the selected services.
///
/// Service IDs with no catalog entry contribute nothing: historical records
/// may reference services that have since been deleted, and those references
/// are deliberately preserved rather than cleaned up.
#[must_use]
pub fn subtotal(selected: &[ServiceId], catalog: &[Service]) -> Decimal {
    selected
        .iter()
        .filter_map(|id| catalog.iter().find(|s| &s.id == id))
        .map(|s| s.price)
        .sum()
}

/// Apply a percentage discount: `subtotal - subtotal * (pct / 100)`.
///
/// Callers are responsible for validating `pct` into `[0, 100]` first; this
/// is plain arithmetic.
#[must_use]
pub fn discounted_total(subtotal: Decimal, pct: Decimal) -> Decimal {
    subtotal - subtotal * pct / Decimal::ONE_HUNDRED
}
