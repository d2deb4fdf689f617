use serde::{Deserialize, Serialize};
use sitekit_core::serde::deserialize_optional_string;
use sitekit_db::{Entity, Fields};
use sqlx::FromRow;
use validator::Validate;

use crate::form::FormErrors;

/// A dashboard account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing)]
    pub hashed_password: String,
}

impl Entity for User {
    const TABLE: &'static str = "users";
    const COLUMNS: &'static [&'static str] = &["id", "email", "hashed_password"];

    fn id(&self) -> i64 {
        self.id
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct LoginForm {
    #[validate(length(min = 6, max = 100, message = "Field must be between 6 and 100 characters long."))]
    pub email: String,
    #[validate(length(min = 1, max = 100, message = "Field must be between 1 and 100 characters long."))]
    pub password: String,
}

impl LoginForm {
    pub fn check(&self) -> FormErrors {
        let mut errors = FormErrors::from_validation(self.validate());
        errors.require("email", &self.email);
        errors.require("password", &self.password);
        errors
    }
}

/// Dashboard form creating a user; both fields are required.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct UserForm {
    #[validate(
        email(message = "Invalid email address."),
        length(max = 255, message = "Field cannot be longer than 255 characters.")
    )]
    pub email: String,
    #[validate(length(max = 100, message = "Field cannot be longer than 100 characters."))]
    pub password: String,
}

impl UserForm {
    pub fn check(&self) -> FormErrors {
        let mut errors = FormErrors::from_validation(self.validate());
        errors.require("email", &self.email);
        errors.require("password", &self.password);
        errors
    }

    /// Carries the plaintext `password`; the user repository hashes it.
    pub fn to_fields(&self) -> Fields {
        Fields::new()
            .set("email", self.email.trim())
            .set("password", self.password.as_str())
    }
}

/// Dashboard form editing a user; a blank password keeps the current one.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct UserUpdateForm {
    #[validate(
        email(message = "Invalid email address."),
        length(max = 255, message = "Field cannot be longer than 255 characters.")
    )]
    pub email: String,
    #[serde(deserialize_with = "deserialize_optional_string")]
    #[validate(length(max = 100, message = "Field cannot be longer than 100 characters."))]
    pub password: Option<String>,
}

impl UserUpdateForm {
    pub fn from_user(user: &User) -> Self {
        Self {
            email: user.email.clone(),
            password: None,
        }
    }

    pub fn check(&self) -> FormErrors {
        let mut errors = FormErrors::from_validation(self.validate());
        errors.require("email", &self.email);
        errors
    }

    pub fn to_fields(&self) -> Fields {
        let mut fields = Fields::new().set("email", self.email.trim());
        if let Some(password) = &self.password {
            fields.insert("password", password.as_str());
        }
        fields
    }
}
