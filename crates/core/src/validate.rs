//! Per-form field validation.
//!
//! Each form the application accepts has its own input struct and check,
//! mirroring the independent per-form schemas the UI enforces. A failed
//! validation reports every offending field at once and the operation is
//! never attempted.

use chrono::{Datelike, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{ServiceCategory, ServiceId, WashId};

/// Earliest accepted model year.
pub const MIN_CAR_YEAR: i32 = 1900;

/// A single field constraint violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Wire name of the offending field (camelCase).
    pub field: &'static str,
    pub message: String,
}

/// One or more field constraint violations for a submitted form.
#[derive(Debug, Clone, Error, Serialize)]
#[error("validation failed: {}", .errors.iter().map(|e| format!("{}: {}", e.field, e.message)).collect::<Vec<_>>().join("; "))]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

/// Collects field errors and produces a result.
#[derive(Debug, Default)]
struct Checker {
    errors: Vec<FieldError>,
}

impl Checker {
    fn require(&mut self, ok: bool, field: &'static str, message: impl Into<String>) {
        if !ok {
            self.errors.push(FieldError {
                field,
                message: message.into(),
            });
        }
    }

    fn finish(self) -> Result<(), ValidationError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError {
                errors: self.errors,
            })
        }
    }
}

/// Staff/owner submission of a new wash.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WashForm {
    pub customer_name: String,
    pub car_make: String,
    pub car_model: String,
    pub car_year: i32,
    pub car_condition: String,
    #[serde(default)]
    pub customer_preferences: Option<String>,
    #[serde(default)]
    pub owner_notes: Option<String>,
    pub selected_services: Vec<ServiceId>,
}

impl WashForm {
    /// Check every field constraint.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] listing all violated fields.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut check = Checker::default();
        validate_wash_fields(&mut check, self);
        check.finish()
    }
}

/// Owner edit of an existing wash, including a discount.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditWashForm {
    #[serde(flatten)]
    pub wash: WashForm,
    /// Percentage in `[0, 100]`.
    #[serde(default)]
    pub discount_percentage: Decimal,
}

impl EditWashForm {
    /// Check every field constraint, including the discount range.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] listing all violated fields.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut check = Checker::default();
        validate_wash_fields(&mut check, &self.wash);
        check.require(
            self.discount_percentage >= Decimal::ZERO,
            "discountPercentage",
            "Discount cannot be negative.",
        );
        check.require(
            self.discount_percentage <= Decimal::ONE_HUNDRED,
            "discountPercentage",
            "Discount cannot exceed 100%.",
        );
        check.finish()
    }
}

fn validate_wash_fields(check: &mut Checker, form: &WashForm) {
    let max_year = Utc::now().year() + 1;

    check.require(
        form.customer_name.trim().len() >= 2,
        "customerName",
        "Customer name must be at least 2 characters.",
    );
    check.require(
        form.car_make.trim().len() >= 2,
        "carMake",
        "Car make must be at least 2 characters.",
    );
    check.require(
        !form.car_model.trim().is_empty(),
        "carModel",
        "Car model is required.",
    );
    check.require(
        (MIN_CAR_YEAR..=max_year).contains(&form.car_year),
        "carYear",
        "Invalid year.",
    );
    check.require(
        form.car_condition.trim().len() >= 5,
        "carCondition",
        "Condition description is too short.",
    );
    check.require(
        !form.selected_services.is_empty(),
        "selectedServices",
        "You have to select at least one service.",
    );
}

/// Owner creation or edit of a catalog service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceForm {
    pub name: String,
    pub price: Decimal,
    #[serde(default)]
    pub description: Option<String>,
    pub category: ServiceCategory,
}

impl ServiceForm {
    /// Check every field constraint.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] listing all violated fields.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut check = Checker::default();
        check.require(
            self.name.trim().len() >= 3,
            "name",
            "Service name must be at least 3 characters.",
        );
        check.require(
            self.price >= Decimal::ZERO,
            "price",
            "Price cannot be negative.",
        );
        check.finish()
    }
}

/// Staff submission of a billing change request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingRequestForm {
    pub wash_id: WashId,
    pub request_details: String,
}

impl BillingRequestForm {
    /// Check every field constraint.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] listing all violated fields.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut check = Checker::default();
        check.require(
            !self.wash_id.as_str().trim().is_empty(),
            "washId",
            "Original Wash ID is required.",
        );
        check.require(
            self.request_details.trim().len() >= 10,
            "requestDetails",
            "Please provide detailed reasons for the change (min 10 characters).",
        );
        check.finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::dec;

    use super::*;

    fn valid_wash_form() -> WashForm {
        WashForm {
            customer_name: "John Doe".to_owned(),
            car_make: "Toyota".to_owned(),
            car_model: "Camry".to_owned(),
            car_year: 2020,
            car_condition: "Moderately dirty, bird droppings on hood".to_owned(),
            customer_preferences: None,
            owner_notes: None,
            selected_services: vec![ServiceId::new("basic_wash")],
        }
    }

    #[test]
    fn test_valid_wash_form_passes() {
        assert!(valid_wash_form().validate().is_ok());
    }

    #[test]
    fn test_wash_form_reports_all_violations() {
        let form = WashForm {
            customer_name: "J".to_owned(),
            car_make: "T".to_owned(),
            car_model: String::new(),
            car_year: 1850,
            car_condition: "ok".to_owned(),
            customer_preferences: None,
            owner_notes: None,
            selected_services: vec![],
        };

        let err = form.validate().unwrap_err();
        let fields: Vec<_> = err.errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![
                "customerName",
                "carMake",
                "carModel",
                "carYear",
                "carCondition",
                "selectedServices"
            ]
        );
    }

    #[test]
    fn test_wash_form_rejects_future_year() {
        let mut form = valid_wash_form();
        form.car_year = Utc::now().year() + 2;
        assert!(form.validate().is_err());

        form.car_year = Utc::now().year() + 1;
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_edit_form_discount_range() {
        let ok = EditWashForm {
            wash: valid_wash_form(),
            discount_percentage: dec!(10),
        };
        assert!(ok.validate().is_ok());

        let negative = EditWashForm {
            wash: valid_wash_form(),
            discount_percentage: dec!(-1),
        };
        assert!(negative.validate().is_err());

        let over = EditWashForm {
            wash: valid_wash_form(),
            discount_percentage: dec!(100.5),
        };
        assert!(over.validate().is_err());
    }

    #[test]
    fn test_service_form_constraints() {
        let ok = ServiceForm {
            name: "Basic Wash".to_owned(),
            price: dec!(15),
            description: None,
            category: ServiceCategory::Wash,
        };
        assert!(ok.validate().is_ok());

        let bad = ServiceForm {
            name: "ab".to_owned(),
            price: dec!(-5),
            description: None,
            category: ServiceCategory::Wash,
        };
        let err = bad.validate().unwrap_err();
        assert_eq!(err.errors.len(), 2);
    }

    #[test]
    fn test_billing_request_form_constraints() {
        let ok = BillingRequestForm {
            wash_id: WashId::new("WASH-123"),
            request_details: "Customer was double charged for wax.".to_owned(),
        };
        assert!(ok.validate().is_ok());

        let bad = BillingRequestForm {
            wash_id: WashId::new("  "),
            request_details: "too short".to_owned(),
        };
        let err = bad.validate().unwrap_err();
        assert_eq!(err.errors.len(), 2);
    }
}
