//! Reject-early input validation helpers.
//!
//! Request bodies are deserialized with every field optional, then validated
//! explicitly before any business logic runs, so that missing and malformed
//! fields produce one 400 response naming every offending field.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

use crate::error::ApiError;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex"));

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Non-empty, trimmed view of an optional field.
pub fn non_empty(value: &Option<String>) -> Option<&str> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Some(v),
        _ => None,
    }
}

/// Accumulates per-field validation failures.
#[derive(Debug, Default)]
pub struct FieldErrors {
    errors: HashMap<String, String>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the field as required when missing or empty; otherwise hand
    /// back the trimmed value.
    pub fn require<'a>(&mut self, name: &str, value: &'a Option<String>) -> Option<&'a str> {
        match non_empty(value) {
            Some(v) => Some(v),
            None => {
                self.reject(name, "This field is required");
                None
            }
        }
    }

    pub fn reject(&mut self, name: &str, message: impl Into<String>) {
        self.errors.insert(name.to_string(), message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_error(self) -> ApiError {
        ApiError::validation_error("Missing or invalid fields", Some(self.errors))
    }

    pub fn check(self) -> Result<(), ApiError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self.into_error())
        }
    }
}
