use ag_core::TokenData;
use ag_shared::validation::{validators, Validate, ValidationErrors};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Body of `POST /api/auth/register`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub password: String,

    #[serde(default)]
    pub email: String,

    /// ISO date, `YYYY-MM-DD`
    pub birthday: Option<NaiveDate>,

    pub phone_number: Option<String>,
}

impl RegistrationRequest {
    /// Phone number if one was actually supplied
    pub fn phone(&self) -> Option<&str> {
        self.phone_number
            .as_deref()
            .map(str::trim)
            .filter(|phone| !phone.is_empty())
    }

    /// Validate against a fixed date
    pub fn validate_as_of(&self, today: NaiveDate) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        check_credentials(&self.username, &self.password, &mut errors);

        if !validators::not_empty(&self.email) {
            errors.add_error("email", "Email is required", "required");
        } else if !validators::is_valid_email(&self.email) {
            errors.add_error("email", "Email format is invalid", "invalid_format");
        }

        match self.birthday {
            None => errors.add_error("birthday", "Birthday is required", "required"),
            Some(birthday) => {
                if let Err(message) = validators::check_birthday(birthday, today) {
                    errors.add_error("birthday", message, "invalid_birthday");
                }
            }
        }

        if let Some(phone) = self.phone() {
            if !validators::is_valid_phone(phone) {
                errors.add_error(
                    "phoneNumber",
                    "Phone number format is invalid",
                    "invalid_format",
                );
            }
        }

        errors.into_result()
    }
}

impl Validate for RegistrationRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        self.validate_as_of(Utc::now().date_naive())
    }
}

/// Body of `POST /api/auth/login`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub password: String,
}

impl Validate for LoginRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_credentials(&self.username, &self.password, &mut errors);
        errors.into_result()
    }
}

fn check_credentials(username: &str, password: &str, errors: &mut ValidationErrors) {
    if !validators::not_empty(username) {
        errors.add_error("username", "Username is required", "required");
    } else if !validators::is_valid_username(username) {
        errors.add_error(
            "username",
            "Username must be 3-20 characters and contain only letters, numbers, and underscores",
            "invalid_format",
        );
    }

    if !validators::not_empty(password) {
        errors.add_error("password", "Password is required", "required");
    } else if !validators::is_strong_password(password) {
        errors.add_error(
            "password",
            "Password must be at least 8 characters and contain uppercase, lowercase, digit, and special character",
            "weak_password",
        );
    }
}

/// Data returned after a successful registration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationData {
    pub user_id: i64,
    pub username: String,
    pub email: String,
    pub registered_at: NaiveDate,
    pub token: String,
}

/// Data returned after a successful login
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginData {
    pub token: String,
    pub username: String,
    /// Token lifetime in seconds
    pub expires_in: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshTokenResponse {
    pub success: bool,
    pub message: String,
    pub token: String,
}

/// Caller identity as carried by their token
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentSessionResponse {
    #[serde(flatten)]
    pub token: TokenData,
    pub remaining_seconds: i64,
}

impl From<TokenData> for CurrentSessionResponse {
    fn from(token: TokenData) -> Self {
        let remaining_seconds = token.remaining_seconds();
        Self {
            token,
            remaining_seconds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn valid_registration() -> RegistrationRequest {
        RegistrationRequest {
            username: "testuser".to_string(),
            password: "Test123!@".to_string(),
            email: "test@example.com".to_string(),
            birthday: Some(date(2000, 1, 1)),
            phone_number: Some("+380501234567".to_string()),
        }
    }

    #[test]
    fn test_valid_registration() {
        assert!(valid_registration().validate_as_of(date(2024, 6, 1)).is_ok());
    }

    #[test]
    fn test_registration_collects_every_error() {
        let request = RegistrationRequest {
            username: "a b".to_string(),
            password: String::new(),
            email: "nope".to_string(),
            birthday: None,
            phone_number: Some("0000".to_string()),
        };

        let errors = request.validate_as_of(date(2024, 6, 1)).unwrap_err();
        let fields: Vec<&str> = errors.errors().iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            vec!["username", "password", "email", "birthday", "phoneNumber"]
        );
    }

    #[test]
    fn test_registration_rejects_minor() {
        let mut request = valid_registration();
        request.birthday = Some(date(2010, 1, 1));

        let errors = request.validate_as_of(date(2024, 6, 1)).unwrap_err();
        assert_eq!(errors.errors()[0].message, "User must be at least 18 years old");
    }

    #[test]
    fn test_blank_phone_is_ignored() {
        let mut request = valid_registration();
        request.phone_number = Some("   ".to_string());

        assert_eq!(request.phone(), None);
        assert!(request.validate_as_of(date(2024, 6, 1)).is_ok());
    }

    #[test]
    fn test_registration_deserializes_camel_case() {
        let request: RegistrationRequest = serde_json::from_value(serde_json::json!({
            "username": "testuser",
            "password": "Test123!@",
            "email": "test@example.com",
            "birthday": "2000-01-01",
            "phoneNumber": "+380501234567"
        }))
        .unwrap();

        assert_eq!(request.birthday, Some(date(2000, 1, 1)));
        assert_eq!(request.phone(), Some("+380501234567"));
    }

    #[test]
    fn test_login_validation() {
        let ok = LoginRequest {
            username: "testuser".to_string(),
            password: "Test123!@".to_string(),
        };
        assert!(ok.validate().is_ok());

        let errors = LoginRequest::default().validate().unwrap_err();
        assert_eq!(errors.errors().len(), 2);
        assert_eq!(
            errors.summary(),
            "username: Username is required, password: Password is required"
        );
    }
}
