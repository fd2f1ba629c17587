//! Authentication DTOs

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

/// Minimum accepted password length at registration
pub const MIN_PASSWORD_LENGTH: u64 = 8;

/// Body of `POST /auth/register`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterUser {
    pub email: String,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    pub password: String,
}

/// Registration input as typed by the user
///
/// Carries the password confirmation, which never goes over the wire.
#[derive(Debug, Clone, Validate)]
pub struct RegistrationForm {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    pub full_name: Option<String>,

    #[validate(length(min = MIN_PASSWORD_LENGTH, message = "Password must be at least 8 characters"))]
    pub password: String,

    #[validate(must_match(other = "password", message = "Passwords do not match"))]
    pub confirm_password: String,
}

impl RegistrationForm {
    /// Validate the form and turn it into the request body
    pub fn into_request(self) -> Result<RegisterUser, ValidationErrors> {
        self.validate()?;

        Ok(RegisterUser {
            email: self.email,
            username: self.username,
            full_name: self.full_name.filter(|name| !name.trim().is_empty()),
            password: self.password,
        })
    }
}

/// Form-encoded body of `POST /auth/login`
#[derive(Debug, Clone, Serialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(password: &str, confirm: &str) -> RegistrationForm {
        RegistrationForm {
            email: "ana@example.com".to_string(),
            username: "ana".to_string(),
            full_name: Some("  ".to_string()),
            password: password.to_string(),
            confirm_password: confirm.to_string(),
        }
    }

    #[test]
    fn test_valid_form_becomes_request() {
        let req = form("correct-horse", "correct-horse").into_request().unwrap();
        assert_eq!(req.username, "ana");
        assert!(req.full_name.is_none());
    }

    #[test]
    fn test_password_mismatch_rejected() {
        let errors = form("correct-horse", "correct-hose")
            .into_request()
            .unwrap_err();
        assert!(errors.field_errors().contains_key("confirm_password"));
    }

    #[test]
    fn test_short_password_rejected() {
        let errors = form("short", "short").into_request().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("password"));
        assert!(!fields.contains_key("confirm_password"));
    }

    #[test]
    fn test_exactly_min_length_accepted() {
        let password = "x".repeat(MIN_PASSWORD_LENGTH as usize);
        assert!(form(&password, &password).into_request().is_ok());

        let password = "x".repeat(MIN_PASSWORD_LENGTH as usize - 1);
        let errors = form(&password, &password).into_request().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn test_invalid_email_rejected() {
        let mut form = form("correct-horse", "correct-horse");
        form.email = "not-an-email".to_string();
        assert!(form.into_request().is_err());
    }

    #[test]
    fn test_register_body_omits_confirmation() {
        let req = form("correct-horse", "correct-horse").into_request().unwrap();
        let body = serde_json::to_value(&req).unwrap();
        assert!(body.get("confirm_password").is_none());
        assert!(body.get("full_name").is_none());
    }
}
