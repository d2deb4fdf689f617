use serde::{Deserialize, Serialize};
use sitekit_core::phone::{INVALID_PHONE_MESSAGE, check_phone_number};
use sitekit_core::serde::deserialize_optional_string;
use sitekit_db::{Entity, Fields};
use sqlx::FromRow;
use validator::Validate;

use crate::form::FormErrors;

/// The single row of site-wide settings shown on the public pages.
///
/// The table carries a `singleton` column constrained to one `TRUE` value;
/// it is not mapped here since nothing ever writes it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, FromRow)]
pub struct SiteConfig {
    pub id: i64,
    pub company_name: String,
    pub site_name: String,
    pub seo_description: String,
    pub email: String,
    pub phone_number: String,
    pub address: String,
    pub location: String,
    pub counter_line_name_1: String,
    pub counter_line_value_1: String,
    pub counter_line_name_2: String,
    pub counter_line_value_2: String,
    pub counter_line_name_3: String,
    pub counter_line_value_3: String,
    pub counter_line_name_4: String,
    pub counter_line_value_4: String,
}

impl Entity for SiteConfig {
    const TABLE: &'static str = "site_config";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "company_name",
        "site_name",
        "seo_description",
        "email",
        "phone_number",
        "address",
        "location",
        "counter_line_name_1",
        "counter_line_value_1",
        "counter_line_name_2",
        "counter_line_value_2",
        "counter_line_name_3",
        "counter_line_value_3",
        "counter_line_name_4",
        "counter_line_value_4",
    ];

    fn id(&self) -> i64 {
        self.id
    }
}

impl SiteConfig {
    /// Counter lines that have a name, as `(name, value)`.
    pub fn counters(&self) -> Vec<(&str, &str)> {
        [
            (&self.counter_line_name_1, &self.counter_line_value_1),
            (&self.counter_line_name_2, &self.counter_line_value_2),
            (&self.counter_line_name_3, &self.counter_line_value_3),
            (&self.counter_line_name_4, &self.counter_line_value_4),
        ]
        .into_iter()
        .filter(|(name, _)| !name.trim().is_empty())
        .map(|(name, value)| (name.as_str(), value.as_str()))
        .collect()
    }

    /// Text for the `<meta name="description">` tag.
    pub fn meta_description(&self) -> &str {
        if self.seo_description.trim().is_empty() {
            &self.site_name
        } else {
            &self.seo_description
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct ConfigForm {
    #[validate(length(max = 255, message = "Field cannot be longer than 255 characters."))]
    pub company_name: String,
    #[validate(length(max = 255, message = "Field cannot be longer than 255 characters."))]
    pub site_name: String,
    #[validate(length(max = 255, message = "Field cannot be longer than 255 characters."))]
    pub seo_description: String,
    #[serde(deserialize_with = "deserialize_optional_string")]
    #[validate(email(message = "Invalid email address."))]
    pub email: Option<String>,
    #[serde(deserialize_with = "deserialize_optional_string")]
    pub phone_number: Option<String>,
    #[validate(length(max = 255, message = "Field cannot be longer than 255 characters."))]
    pub address: String,
    #[validate(length(max = 255, message = "Field cannot be longer than 255 characters."))]
    pub location: String,
    pub counter_line_name_1: String,
    pub counter_line_value_1: String,
    pub counter_line_name_2: String,
    pub counter_line_value_2: String,
    pub counter_line_name_3: String,
    pub counter_line_value_3: String,
    pub counter_line_name_4: String,
    pub counter_line_value_4: String,
}

impl ConfigForm {
    pub fn from_config(config: &SiteConfig) -> Self {
        let optional = |s: &str| Some(s.to_string()).filter(|s| !s.is_empty());
        Self {
            company_name: config.company_name.clone(),
            site_name: config.site_name.clone(),
            seo_description: config.seo_description.clone(),
            email: optional(&config.email),
            phone_number: optional(&config.phone_number),
            address: config.address.clone(),
            location: config.location.clone(),
            counter_line_name_1: config.counter_line_name_1.clone(),
            counter_line_value_1: config.counter_line_value_1.clone(),
            counter_line_name_2: config.counter_line_name_2.clone(),
            counter_line_value_2: config.counter_line_value_2.clone(),
            counter_line_name_3: config.counter_line_name_3.clone(),
            counter_line_value_3: config.counter_line_value_3.clone(),
            counter_line_name_4: config.counter_line_name_4.clone(),
            counter_line_value_4: config.counter_line_value_4.clone(),
        }
    }

    pub fn check(&self) -> FormErrors {
        let mut errors = FormErrors::from_validation(self.validate());
        if let Some(phone) = &self.phone_number {
            if check_phone_number(phone).is_none() {
                errors.add("phone_number", INVALID_PHONE_MESSAGE);
            }
        }
        errors
    }

    /// Every column is written; blank optional values are stored as empty text.
    pub fn to_fields(&self) -> Fields {
        let phone_number = self
            .phone_number
            .as_deref()
            .map(|raw| check_phone_number(raw).unwrap_or_else(|| raw.to_string()))
            .unwrap_or_default();

        Fields::new()
            .set("company_name", self.company_name.trim())
            .set("site_name", self.site_name.trim())
            .set("seo_description", self.seo_description.trim())
            .set("email", self.email.clone().unwrap_or_default())
            .set("phone_number", phone_number)
            .set("address", self.address.trim())
            .set("location", self.location.trim())
            .set("counter_line_name_1", self.counter_line_name_1.trim())
            .set("counter_line_value_1", self.counter_line_value_1.trim())
            .set("counter_line_name_2", self.counter_line_name_2.trim())
            .set("counter_line_value_2", self.counter_line_value_2.trim())
            .set("counter_line_name_3", self.counter_line_name_3.trim())
            .set("counter_line_value_3", self.counter_line_value_3.trim())
            .set("counter_line_name_4", self.counter_line_name_4.trim())
            .set("counter_line_value_4", self.counter_line_value_4.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_form_is_valid() {
        assert!(ConfigForm::default().check().is_empty());
    }

    #[test]
    fn test_invalid_contact_details() {
        let form = ConfigForm {
            email: Some("nope".to_string()),
            phone_number: Some("123".to_string()),
            ..Default::default()
        };
        let errors = form.check();
        assert!(errors.has("email"));
        assert_eq!(errors.get("phone_number"), &[INVALID_PHONE_MESSAGE.to_string()]);
    }

    #[test]
    fn test_blank_optionals_store_empty_text() {
        let fields = ConfigForm::default().to_fields();
        assert_eq!(fields.get("email").and_then(|v| v.as_str()), Some(""));
        assert_eq!(fields.get("phone_number").and_then(|v| v.as_str()), Some(""));
        assert_eq!(fields.len(), SiteConfig::COLUMNS.len() - 1);
    }

    #[test]
    fn test_counters_skip_unnamed_lines() {
        let config = SiteConfig {
            counter_line_name_1: "Clients".to_string(),
            counter_line_value_1: "120".to_string(),
            counter_line_value_2: "7".to_string(),
            counter_line_name_4: "Years".to_string(),
            counter_line_value_4: "12".to_string(),
            ..Default::default()
        };
        assert_eq!(config.counters(), vec![("Clients", "120"), ("Years", "12")]);
    }

    #[test]
    fn test_meta_description_falls_back_to_site_name() {
        let mut config = SiteConfig {
            site_name: "Acme".to_string(),
            ..Default::default()
        };
        assert_eq!(config.meta_description(), "Acme");
        config.seo_description = "We build things".to_string();
        assert_eq!(config.meta_description(), "We build things");
    }
}
