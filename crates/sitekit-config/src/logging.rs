use crate::{env_flag, env_optional, env_string};

/// Where logs go and how verbose the console is.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogConfig {
    /// Directory of the daily-rolling error and JSON files
    pub dir: String,
    /// `EnvFilter` directives for the console; `RUST_LOG` wins when set
    pub filter: String,
    /// Whether the structured JSON file is written at all
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            dir: "storage/logs".to_string(),
            filter: "sitekit=info,sitekit_db=info,sqlx=warn".to_string(),
            json: true,
        }
    }
}

impl LogConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            dir: env_string("LOG_DIR", &defaults.dir),
            filter: env_optional("RUST_LOG").unwrap_or(defaults.filter),
            json: env_flag("LOG_JSON", defaults.json),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_keep_app_crates_at_info() {
        let config = LogConfig::default();
        assert_eq!(config.dir, "storage/logs");
        assert!(config.filter.contains("sitekit=info"));
        assert!(config.filter.contains("sqlx=warn"));
        assert!(config.json);
    }
}
