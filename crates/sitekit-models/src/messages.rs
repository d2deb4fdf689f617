use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sitekit_core::phone::{INVALID_PHONE_MESSAGE, check_phone_number};
use sitekit_core::serde::deserialize_optional_string;
use sitekit_db::{Entity, Fields};
use sqlx::FromRow;
use validator::Validate;

use crate::form::FormErrors;

/// A contact-form submission. Read-only once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Message {
    pub id: i64,
    pub fullname: String,
    pub company_name: Option<String>,
    pub email: String,
    pub phone_number: Option<String>,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Entity for Message {
    const TABLE: &'static str = "messages";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "fullname",
        "company_name",
        "email",
        "phone_number",
        "title",
        "body",
        "created_at",
        "updated_at",
    ];
    const TOUCH_ON_UPDATE: Option<&'static str> = Some("updated_at");

    fn id(&self) -> i64 {
        self.id
    }
}

/// The public contact form on the home page.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct ContactForm {
    #[validate(length(max = 255, message = "Field cannot be longer than 255 characters."))]
    pub fullname: String,
    #[serde(deserialize_with = "deserialize_optional_string")]
    #[validate(length(max = 255, message = "Field cannot be longer than 255 characters."))]
    pub company_name: Option<String>,
    #[validate(
        length(min = 6, max = 100, message = "Field must be between 6 and 100 characters long."),
        email(message = "Invalid email address.")
    )]
    pub email: String,
    #[serde(deserialize_with = "deserialize_optional_string")]
    pub phone_number: Option<String>,
    #[validate(length(max = 255, message = "Field cannot be longer than 255 characters."))]
    pub title: String,
    pub body: String,
}

impl ContactForm {
    pub fn check(&self) -> FormErrors {
        let mut errors = FormErrors::from_validation(self.validate());
        if let Some(phone) = &self.phone_number {
            if check_phone_number(phone).is_none() {
                errors.add("phone_number", INVALID_PHONE_MESSAGE);
            }
        }
        errors.require("fullname", &self.fullname);
        errors.require("email", &self.email);
        errors.require("title", &self.title);
        errors.require("body", &self.body);
        errors
    }

    /// Phone numbers are stored in international format.
    pub fn to_fields(&self) -> Fields {
        let phone_number = self
            .phone_number
            .as_deref()
            .map(|raw| check_phone_number(raw).unwrap_or_else(|| raw.to_string()));

        Fields::new()
            .set("fullname", self.fullname.trim())
            .set("company_name", self.company_name.clone())
            .set("email", self.email.trim())
            .set("phone_number", phone_number)
            .set("title", self.title.trim())
            .set("body", self.body.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::REQUIRED;

    fn valid() -> ContactForm {
        ContactForm {
            fullname: "Ada Lovelace".to_string(),
            company_name: None,
            email: "ada@example.com".to_string(),
            phone_number: None,
            title: "Hello".to_string(),
            body: "I would like a quote.".to_string(),
        }
    }

    #[test]
    fn test_valid_form() {
        assert!(valid().check().is_empty());
    }

    #[test]
    fn test_required_fields() {
        let errors = ContactForm::default().check();
        for field in ["fullname", "email", "title", "body"] {
            assert_eq!(errors.get(field), &[REQUIRED.to_string()], "{field}");
        }
        assert!(!errors.has("company_name"));
        assert!(!errors.has("phone_number"));
    }

    #[test]
    fn test_invalid_phone_number() {
        let form = ContactForm {
            phone_number: Some("12345".to_string()),
            ..valid()
        };
        assert_eq!(form.check().get("phone_number"), &[INVALID_PHONE_MESSAGE.to_string()]);
    }

    #[test]
    fn test_phone_number_is_normalized() {
        let form = ContactForm {
            phone_number: Some("+16502530000".to_string()),
            ..valid()
        };
        assert!(form.check().is_empty());
        let fields = form.to_fields();
        let stored = fields.get("phone_number").and_then(|v| v.as_str()).unwrap();
        assert!(stored.starts_with("+1 "));
    }

    #[test]
    fn test_blank_optional_fields_are_null() {
        let form: ContactForm = serde_json::from_str(
            r#"{"fullname": "Ada", "email": "ada@example.com", "title": "t", "body": "b", "company_name": "", "phone_number": " "}"#,
        )
        .unwrap();
        assert!(form.check().is_empty());
        assert!(form.to_fields().get("company_name").unwrap().is_null());
        assert!(form.to_fields().get("phone_number").unwrap().is_null());
    }

    #[test]
    fn test_short_email() {
        let form = ContactForm {
            email: "a@b.c".to_string(),
            ..valid()
        };
        assert!(form.check().has("email"));
    }
}
