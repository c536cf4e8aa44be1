use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

const MAX_NAME_LENGTH: usize = 100;
const MAX_EMAIL_LENGTH: usize = 100;

// Anchored at the start only: anything after the first `x@y.z` is accepted.
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^@]+@[^@]+\.[^@]+").expect("email pattern is valid")
});

static PHONE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+?[0-9\s-]{7,15}$").expect("phone pattern is valid")
});

// ───── Database Models ───────────────────────────────────────────────

#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct ContactMessage {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContactInsert {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
}

// ───── API Models ───────────────────────────────────────────────────

/// Raw `POST /contact_form` body. Missing and null fields read as empty.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ContactResponse {
    pub message: String,
}

/// Trimmed form values; every rule is checked so all failing fields are reported together.
#[derive(Debug, Validate)]
pub struct ContactSubmission {
    #[validate(custom(function = "validate_name"))]
    pub name: String,

    #[validate(custom(function = "validate_email"))]
    pub email: String,

    #[validate(custom(function = "validate_phone"))]
    pub phone: String,

    #[validate(length(min = 1, message = "Message cannot be empty."))]
    pub message: String,
}

impl From<ContactForm> for ContactSubmission {
    fn from(form: ContactForm) -> Self {
        fn trimmed(value: Option<String>) -> String {
            value.as_deref().map(str::trim).unwrap_or_default().to_string()
        }

        Self {
            name: trimmed(form.name),
            email: trimmed(form.email),
            phone: trimmed(form.phone),
            message: trimmed(form.message),
        }
    }
}

impl ContactSubmission {
    pub fn prepare_for_insert(self) -> ContactInsert {
        ContactInsert {
            name: self.name,
            email: self.email,
            phone: Some(self.phone).filter(|p| !p.is_empty()),
            message: self.message,
        }
    }
}

// ───── Helper Functions ─────────────────────────────────────────────

fn field_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(field_error("required", "Name is required."));
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(field_error("length", "Name must be at most 100 characters."));
    }
    Ok(())
}

fn validate_email(email: &str) -> Result<(), ValidationError> {
    if !EMAIL_PATTERN.is_match(email) {
        return Err(field_error("email", "A valid email is required."));
    }
    if email.chars().count() > MAX_EMAIL_LENGTH {
        return Err(field_error("length", "Email must be at most 100 characters."));
    }
    Ok(())
}

fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if !phone.is_empty() && !PHONE_PATTERN.is_match(phone) {
        return Err(field_error("phone", "Enter a valid phone number."));
    }
    Ok(())
}
