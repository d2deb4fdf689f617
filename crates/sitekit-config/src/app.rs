use crate::{env_flag, env_optional, env_parse, env_string};

pub const DEFAULT_PAGINATION_MAX_SIZE: i64 = 25;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub project_name: String,
    pub debug: bool,
    pub host: String,
    pub port: u16,
    pub site_url: String,
    /// Default page size of dashboard lists
    pub pagination_max_size: i64,
    pub first_superuser: Option<String>,
    pub first_superuser_password: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            project_name: "sitekit".to_string(),
            debug: false,
            host: "0.0.0.0".to_string(),
            port: 8000,
            site_url: "http://localhost:8000".to_string(),
            pagination_max_size: DEFAULT_PAGINATION_MAX_SIZE,
            first_superuser: None,
            first_superuser_password: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            project_name: env_string("PROJECT_NAME", &defaults.project_name),
            debug: env_flag("DEBUG", defaults.debug),
            host: env_string("HOST", &defaults.host),
            port: env_parse("PORT", defaults.port),
            site_url: env_string("SITE_URL", &defaults.site_url),
            pagination_max_size: env_parse("PAGINATION_MAX_SIZE", defaults.pagination_max_size)
                .max(1),
            first_superuser: env_optional("FIRST_SUPERUSER"),
            first_superuser_password: env_optional("FIRST_SUPERUSER_PASSWORD"),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
