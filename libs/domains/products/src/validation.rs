//! Request payload validation.
//!
//! The rules run in a fixed order and the first failing rule wins, so a
//! payload with several bad fields always reports the same error.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product};

/// Pattern an expiration value must contain. Matched as a substring, not
/// anchored to the whole value: `"xx01/01/2020yy"` passes.
static EXPIRATION_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{2}/\d{2}/\d{4}").expect("expiration pattern is valid"));

impl CreateProduct {
    /// Validate the payload before it reaches the repository.
    pub fn validate(&self) -> ProductResult<()> {
        validate_fields(
            &self.name,
            self.quantity,
            &self.code_value,
            &self.expiration,
            self.price,
        )
    }
}

impl Product {
    /// Re-validate a full record, e.g. after merging a partial update.
    pub fn validate(&self) -> ProductResult<()> {
        validate_fields(
            &self.name,
            self.quantity,
            &self.code_value,
            &self.expiration,
            self.price,
        )
    }
}

fn validate_fields(
    name: &str,
    quantity: i64,
    code_value: &str,
    expiration: &str,
    price: f64,
) -> ProductResult<()> {
    if name.is_empty() {
        return Err(ProductError::validation("name", "The name is required"));
    }
    if quantity < 0 {
        return Err(ProductError::validation(
            "quantity",
            "The quantity is not valid",
        ));
    }
    if code_value.is_empty() {
        return Err(ProductError::validation(
            "code_value",
            "The code value is required",
        ));
    }
    if expiration.is_empty() {
        return Err(ProductError::validation(
            "expiration",
            "The expiration date is required",
        ));
    }
    if !EXPIRATION_PATTERN.is_match(expiration) {
        return Err(ProductError::validation(
            "expiration",
            "The expiration date is not valid",
        ));
    }
    if price < 0.0 {
        return Err(ProductError::validation("price", "The price is not valid"));
    }
    Ok(())
}
