//! Generated document IDs.
//!
//! IDs follow the `PREFIX-<millis>-<RAND5>` convention the collections
//! already use (`WASH-...`, `BR-...`), so generated and historical IDs sort
//! and display the same way.

use chrono::Utc;
use rand::Rng;
use rand::distr::Alphanumeric;

/// Prefix for wash record IDs.
pub const WASH_PREFIX: &str = "WASH";
/// Prefix for billing change request IDs.
pub const REQUEST_PREFIX: &str = "BR";
/// Prefix for service IDs created at runtime (seeded services use slugs).
pub const SERVICE_PREFIX: &str = "SRV";
/// Prefix for notification IDs.
pub const NOTIFICATION_PREFIX: &str = "NTF";

/// Generate a new document ID with the given prefix.
#[must_use]
pub fn generate(prefix: &str) -> String {
    let millis = Utc::now().timestamp_millis();
    let suffix: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(5)
        .map(|c| char::from(c).to_ascii_uppercase())
        .collect();
    format!("{prefix}-{millis}-{suffix}")
}
