use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{AppError, FieldErrors};
use crate::models::{Order, OrderElement};

pub const MIN_QUANTITY: i32 = 1;
pub const MAX_QUANTITY: i32 = 25;

// Column widths from the orders table.
pub const MAX_ADDRESS_LEN: usize = 200;
pub const MAX_NAME_LEN: usize = 50;
pub const MAX_PHONE_LEN: usize = 32;

#[derive(Debug, Deserialize, ToSchema)]
pub struct OrderedProduct {
    pub product: Uuid,
    pub quantity: i32,
}

/// Storefront order registration payload.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterOrderRequest {
    pub address: String,
    pub firstname: String,
    pub lastname: String,
    pub phonenumber: String,
    pub products: Vec<OrderedProduct>,
}

impl RegisterOrderRequest {
    /// Shape validation; referenced products are checked against the
    /// database later, inside the registration transaction.
    pub fn validate(&self) -> Result<(), AppError> {
        let mut errors = FieldErrors::new();

        for (field, value, max_len) in [
            ("address", &self.address, MAX_ADDRESS_LEN),
            ("firstname", &self.firstname, MAX_NAME_LEN),
            ("lastname", &self.lastname, MAX_NAME_LEN),
        ] {
            if value.trim().is_empty() {
                errors.push(field, "This field must not be blank.");
            } else if value.chars().count() > max_len {
                errors.push(
                    field,
                    format!("Ensure this field has no more than {max_len} characters."),
                );
            }
        }

        if self.phonenumber.trim().is_empty() {
            errors.push("phonenumber", "This field must not be blank.");
        } else if self.phonenumber.chars().count() > MAX_PHONE_LEN {
            errors.push(
                "phonenumber",
                format!("Ensure this field has no more than {MAX_PHONE_LEN} characters."),
            );
        } else if !is_plausible_phone(&self.phonenumber) {
            errors.push("phonenumber", "Enter a valid phone number.");
        }

        if self.products.is_empty() {
            errors.push("products", "This list must not be empty.");
        }
        for item in &self.products {
            if !(MIN_QUANTITY..=MAX_QUANTITY).contains(&item.quantity) {
                errors.push(
                    "products",
                    format!(
                        "Quantity must be between {MIN_QUANTITY} and {MAX_QUANTITY}, got {}.",
                        item.quantity
                    ),
                );
            }
        }

        errors.into_result()
    }
}

/// Digits with optional leading `+`, ignoring common separators.
fn is_plausible_phone(raw: &str) -> bool {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
        .collect();
    let digits = cleaned.strip_prefix('+').unwrap_or(&cleaned);
    (10..=15).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit())
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderWithElements {
    pub order: Order,
    pub elements: Vec<OrderElement>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> RegisterOrderRequest {
        RegisterOrderRequest {
            address: "1 Main street".into(),
            firstname: "Ivan".into(),
            lastname: "Petrov".into(),
            phonenumber: "+7 999 123-45-67".into(),
            products: vec![OrderedProduct {
                product: Uuid::new_v4(),
                quantity: 2,
            }],
        }
    }

    #[test]
    fn valid_payload_passes() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn empty_products_rejected() {
        let mut req = valid_request();
        req.products.clear();
        let err = req.validate().unwrap_err();
        match err {
            AppError::Validation(errors) => assert!(errors.0.contains_key("products")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn quantity_bounds_enforced() {
        let mut req = valid_request();
        req.products[0].quantity = 0;
        assert!(req.validate().is_err());

        req.products[0].quantity = 26;
        assert!(req.validate().is_err());

        req.products[0].quantity = 25;
        assert!(req.validate().is_ok());
    }

    #[test]
    fn phone_numbers_checked() {
        assert!(is_plausible_phone("+79991234567"));
        assert!(is_plausible_phone("8 (999) 123-45-67"));
        assert!(!is_plausible_phone("not-a-phone"));
        assert!(!is_plausible_phone("123"));

        let mut req = valid_request();
        req.phonenumber = "abc".into();
        assert!(req.validate().is_err());
    }

    #[test]
    fn overlong_address_rejected_before_the_database_sees_it() {
        let mut req = valid_request();
        req.address = "a".repeat(MAX_ADDRESS_LEN + 100);
        match req.validate().unwrap_err() {
            AppError::Validation(errors) => assert!(errors.0.contains_key("address")),
            other => panic!("expected validation error, got {other:?}"),
        }

        req.address = "a".repeat(MAX_ADDRESS_LEN);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn overlong_names_rejected() {
        let mut req = valid_request();
        req.firstname = "x".repeat(MAX_NAME_LEN + 1);
        req.lastname = "y".repeat(MAX_NAME_LEN + 1);
        match req.validate().unwrap_err() {
            AppError::Validation(errors) => {
                assert!(errors.0.contains_key("firstname"));
                assert!(errors.0.contains_key("lastname"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn separator_padded_phone_cannot_exceed_the_column_width() {
        // Plausible digits, but the raw string is wider than the column.
        let padded = "1 - 2 - 3 - 4 - 5 - 6 - 7 - 8 - 9 - 0 - 1 - 2";
        assert!(padded.len() > MAX_PHONE_LEN);

        let mut req = valid_request();
        req.phonenumber = padded.into();
        match req.validate().unwrap_err() {
            AppError::Validation(errors) => assert!(errors.0.contains_key("phonenumber")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn blank_fields_collected_together() {
        let mut req = valid_request();
        req.address = "  ".into();
        req.firstname = String::new();
        match req.validate().unwrap_err() {
            AppError::Validation(errors) => {
                assert!(errors.0.contains_key("address"));
                assert!(errors.0.contains_key("firstname"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
