//! Field-level validation of everything the site submits.
//!
//! Each validator turns a raw payload into a typed value or returns every
//! problem it found, keyed by the payload's (camelCase) field name so the
//! form can show the message next to the right input.

pub mod contact;
pub mod estimate;
pub mod phone;

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// One or more rejected fields, in the order the form lays them out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("invalid submission: {}", join(.0))]
pub struct ValidationErrors(pub Vec<FieldError>);

fn join(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(
        &mut self,
        field: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.0.push(FieldError::new(field, message));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> &[FieldError] {
        &self.0
    }

    /// Message recorded for `field`, if it was rejected.
    pub fn get(
        &self,
        field: &str,
    ) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn contains(
        &self,
        field: &str,
    ) -> bool {
        self.get(field).is_some()
    }

    /// `Ok(value)` when nothing was recorded, otherwise `Err(self)`.
    pub fn into_result<T>(
        self,
        value: T,
    ) -> Result<T, Self> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

/// Trims an optional string, mapping blank values to `None`.
pub(crate) fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn empty_errors_convert_to_ok() {
        assert_eq!(ValidationErrors::new().into_result(7), Ok(7));
    }

    #[test]
    fn recorded_errors_convert_to_err() {
        let mut errors = ValidationErrors::new();
        errors.push("email", "Email is required");

        let result = errors.into_result(());

        assert_eq!(
            result,
            Err(ValidationErrors(vec![FieldError::new("email", "Email is required")]))
        );
    }

    #[test]
    fn display_lists_every_field() {
        let mut errors = ValidationErrors::new();
        errors.push("name", "Name is required");
        errors.push("message", "Message is required");

        assert_eq!(
            errors.to_string(),
            "invalid submission: name: Name is required, message: Message is required"
        );
    }

    #[test]
    fn get_finds_message_by_field() {
        let mut errors = ValidationErrors::new();
        errors.push("email", "Email is invalid");

        assert_eq!(errors.get("email"), Some("Email is invalid"));
        assert_eq!(errors.get("name"), None);
        assert!(errors.contains("email"));
    }

    #[test]
    fn non_blank_trims_and_drops_empty() {
        assert_eq!(non_blank(Some("  3-6 months ")), Some("3-6 months".to_string()));
        assert_eq!(non_blank(Some("   ")), None);
        assert_eq!(non_blank(None), None);
    }
}
