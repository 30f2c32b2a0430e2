//! Input validation used by the identity endpoints

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static USERNAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_]{3,20}$").unwrap());

static PASSWORD_CHARSET_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z\d@$!%*?&]{8,}$").unwrap());

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap());

// E.164, leading plus optional
static PHONE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+?[1-9]\d{1,14}$").unwrap());

/// Characters accepted as the "special" class of a password
pub const PASSWORD_SPECIAL_CHARS: &str = "@$!%*?&";

/// Minimum age in years for registration
pub const MINIMUM_AGE_YEARS: i32 = 18;

/// Validation error with field-level details
#[derive(Debug, Clone, Serialize)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub code: String,
}

impl ValidationError {
    pub fn new(
        field: impl Into<String>,
        message: impl Into<String>,
        code: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            code: code.into(),
        }
    }
}

/// Collection of validation errors
#[derive(Debug, Default)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_error(
        &mut self,
        field: impl Into<String>,
        message: impl Into<String>,
        code: impl Into<String>,
    ) {
        self.add(ValidationError::new(field, message, code));
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// `field: message` pairs joined with commas
    pub fn summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// `Ok(())` when nothing was collected
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

/// Trait for types that can be validated
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationErrors>;
}

/// Common validation functions
pub mod validators {
    use super::*;

    /// Check if a string is not empty
    pub fn not_empty(value: &str) -> bool {
        !value.trim().is_empty()
    }

    /// 3-20 characters of letters, digits and underscores
    pub fn is_valid_username(username: &str) -> bool {
        USERNAME_REGEX.is_match(username)
    }

    /// At least 8 characters with a lowercase letter, an uppercase letter,
    /// a digit and one of `@$!%*?&`, and nothing outside those classes
    pub fn is_strong_password(password: &str) -> bool {
        PASSWORD_CHARSET_REGEX.is_match(password)
            && password.chars().any(|c| c.is_ascii_lowercase())
            && password.chars().any(|c| c.is_ascii_uppercase())
            && password.chars().any(|c| c.is_ascii_digit())
            && password.chars().any(|c| PASSWORD_SPECIAL_CHARS.contains(c))
    }

    pub fn is_valid_email(email: &str) -> bool {
        EMAIL_REGEX.is_match(email)
    }

    pub fn is_valid_phone(phone: &str) -> bool {
        PHONE_REGEX.is_match(phone)
    }

    /// Whole years between `birthday` and `today`
    pub fn age_in_years(birthday: NaiveDate, today: NaiveDate) -> i32 {
        let mut years = today.year() - birthday.year();
        if (today.month(), today.day()) < (birthday.month(), birthday.day()) {
            years -= 1;
        }
        years
    }

    /// Checks a birthday against `today`, returning the message to show
    pub fn check_birthday(birthday: NaiveDate, today: NaiveDate) -> Result<(), &'static str> {
        if birthday > today {
            return Err("Birthday cannot be in the future");
        }
        if age_in_years(birthday, today) < MINIMUM_AGE_YEARS {
            return Err("User must be at least 18 years old");
        }
        Ok(())
    }
}
