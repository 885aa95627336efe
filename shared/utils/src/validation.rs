use rust_decimal::Decimal;
use std::collections::HashMap;

pub struct AmountValidator;

impl AmountValidator {
    /// Validates that amount is positive
    pub fn is_positive(amount: Decimal) -> bool {
        amount > Decimal::ZERO
    }

    /// Validates that amount is not negative
    pub fn is_non_negative(amount: Decimal) -> bool {
        amount >= Decimal::ZERO
    }

    /// Validates amount precision (max decimal places)
    pub fn validate_precision(amount: Decimal, max_decimals: u32) -> bool {
        let scale = amount.scale();
        scale <= max_decimals
    }

    /// Validates amount range
    pub fn validate_range(amount: Decimal, min: Option<Decimal>, max: Option<Decimal>) -> bool {
        if let Some(min_val) = min {
            if amount < min_val {
                return false;
            }
        }

        if let Some(max_val) = max {
            if amount > max_val {
                return false;
            }
        }

        true
    }
}

#[derive(Debug)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
        }
    }

    pub fn add_error(&mut self, field: &str, message: &str) {
        self.is_valid = false;
        self.errors.push(ValidationError {
            field: field.to_string(),
            message: message.to_string(),
        });
    }

    pub fn combine(&mut self, other: ValidationResult) {
        if !other.is_valid {
            self.is_valid = false;
            self.errors.extend(other.errors);
        }
    }
}

pub fn validate_required_fields(data: &HashMap<String, Option<String>>) -> ValidationResult {
    let mut result = ValidationResult::new();

    for (field, value) in data {
        if value.is_none() || value.as_ref().unwrap().trim().is_empty() {
            result.add_error(field, "This field is required");
        }
    }

    result
}
