//! Deserializers for `application/x-www-form-urlencoded` bodies.
//!
//! Browsers submit blank inputs as empty strings and omit unchecked
//! checkboxes entirely, which neither maps cleanly onto `Option` nor `bool`.

use serde::{Deserialize, Deserializer};

/// Empty or whitespace-only strings become `None`; other values are trimmed.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    Ok(opt
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty()))
}

/// Checked checkboxes arrive as `on` (or `true`/`1` from scripted clients).
/// Use together with `#[serde(default)]` so an absent field reads as `false`.
pub fn deserialize_checkbox<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    Ok(matches!(
        opt.as_deref().map(str::trim).map(str::to_ascii_lowercase).as_deref(),
        Some("on" | "true" | "1" | "yes")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Form {
        #[serde(default, deserialize_with = "deserialize_optional_string")]
        company: Option<String>,
        #[serde(default, deserialize_with = "deserialize_checkbox")]
        is_active: bool,
    }

    #[test]
    fn test_blank_string_is_none() {
        let form: Form = serde_json::from_str(r#"{"company": "   "}"#).unwrap();
        assert_eq!(form.company, None);
        assert!(!form.is_active);
    }

    #[test]
    fn test_value_is_trimmed() {
        let form: Form = serde_json::from_str(r#"{"company": " Acme "}"#).unwrap();
        assert_eq!(form.company.as_deref(), Some("Acme"));
    }

    #[test]
    fn test_checkbox_values() {
        for (raw, expected) in [("on", true), ("true", true), ("1", true), ("off", false), ("", false)] {
            let json = format!(r#"{{"is_active": "{raw}"}}"#);
            let form: Form = serde_json::from_str(&json).unwrap();
            assert_eq!(form.is_active, expected, "checkbox value {raw:?}");
        }
    }
}
