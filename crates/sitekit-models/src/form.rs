use std::collections::BTreeMap;

use serde::Serialize;
use validator::ValidationErrors;

pub const REQUIRED: &str = "This field is required.";
pub const ALREADY_EXISTS: &str = "Already exists.";
pub const INVALID_EMAIL: &str = "Invalid email address.";

/// Per-field error messages of a submitted form, ordered by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormErrors(BTreeMap<String, Vec<String>>);

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects the messages of a `validator` run.
    pub fn from_validation(result: Result<(), ValidationErrors>) -> Self {
        let mut errors = Self::new();
        let Err(validation) = result else {
            return errors;
        };

        for (field, items) in validation.field_errors() {
            for item in items.iter() {
                let message = item
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{field} is invalid"));
                errors.add(field.to_string(), message);
            }
        }
        errors
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    /// A blank required field reports only that it is required.
    pub fn require(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.0.insert(field.to_string(), vec![REQUIRED.to_string()]);
        }
    }

    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has(&self, field: &str) -> bool {
        !self.get(field).is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(field, messages)| (field.as_str(), messages.as_slice()))
    }
}
