//! Contact form validation.

use crate::error::{RelayError, Result};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

pub const NAME_ERROR: &str = "Name must be at least 2 characters";
pub const EMAIL_ERROR: &str = "A valid email address is required";
pub const MESSAGE_ERROR: &str = "Message must be at least 10 characters";

const MIN_NAME_CHARS: usize = 2;
const MIN_MESSAGE_CHARS: usize = 10;

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

/// A submission that passed validation. Every field is trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

fn trimmed_field<'a>(body: &'a Value, key: &str) -> Option<&'a str> {
    body.get(key).and_then(Value::as_str).map(str::trim)
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Checks a request body. Missing and non-string fields fail their check;
/// all failures are collected rather than stopping at the first.
pub fn validate(body: &Value) -> Result<ContactMessage> {
    let name = trimmed_field(body, "name");
    let email = trimmed_field(body, "email");
    let message = trimmed_field(body, "message");

    let mut errors = Vec::new();
    if !name.is_some_and(|n| n.chars().count() >= MIN_NAME_CHARS) {
        errors.push(NAME_ERROR.to_string());
    }
    if !email.is_some_and(is_valid_email) {
        errors.push(EMAIL_ERROR.to_string());
    }
    if !message.is_some_and(|m| m.chars().count() >= MIN_MESSAGE_CHARS) {
        errors.push(MESSAGE_ERROR.to_string());
    }

    match (name, email, message) {
        (Some(name), Some(email), Some(message)) if errors.is_empty() => Ok(ContactMessage {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
        }),
        _ => Err(RelayError::Validation(errors)),
    }
}
