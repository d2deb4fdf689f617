use serde::{Deserialize, Serialize};
use sitekit_core::serde::deserialize_checkbox;
use sitekit_db::{Entity, Fields};
use sqlx::FromRow;
use validator::Validate;

use crate::form::FormErrors;

/// A contact-notification recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Email {
    pub id: i64,
    pub email: String,
    pub is_active: bool,
}

impl Entity for Email {
    const TABLE: &'static str = "emails";
    const COLUMNS: &'static [&'static str] = &["id", "email", "is_active"];

    fn id(&self) -> i64 {
        self.id
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct EmailForm {
    #[validate(
        email(message = "Invalid email address."),
        length(max = 255, message = "Field cannot be longer than 255 characters.")
    )]
    pub email: String,
    #[serde(deserialize_with = "deserialize_checkbox")]
    pub is_active: bool,
}

impl EmailForm {
    pub fn from_email(email: &Email) -> Self {
        Self {
            email: email.email.clone(),
            is_active: email.is_active,
        }
    }

    pub fn check(&self) -> FormErrors {
        let mut errors = FormErrors::from_validation(self.validate());
        errors.require("email", &self.email);
        errors
    }

    pub fn to_fields(&self) -> Fields {
        Fields::new()
            .set("email", self.email.trim())
            .set("is_active", self.is_active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unchecked_checkbox_is_inactive() {
        let form: EmailForm = serde_json::from_str(r#"{"email": "list@example.com"}"#).unwrap();
        assert!(!form.is_active);
        assert!(form.check().is_empty());
    }

    #[test]
    fn test_checked_checkbox() {
        let form: EmailForm =
            serde_json::from_str(r#"{"email": "list@example.com", "is_active": "on"}"#).unwrap();
        assert!(form.is_active);
        assert_eq!(
            form.to_fields().get("is_active"),
            Some(&sitekit_db::Value::Bool(Some(true)))
        );
    }

    #[test]
    fn test_email_is_required() {
        assert!(EmailForm::default().check().has("email"));
    }
}
