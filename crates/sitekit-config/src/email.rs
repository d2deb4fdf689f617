use crate::{env_flag, env_optional, env_parse, env_string};

#[derive(Clone, Debug)]
pub struct EmailConfig {
    pub enabled: bool,
    pub smtp_host: String,
    pub smtp_port: u16,
    /// Upgrade the connection with STARTTLS
    pub smtp_tls: bool,
    pub smtp_username: String,
    pub smtp_password: String,
    pub from_email: String,
    pub from_name: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            smtp_host: "localhost".to_string(),
            smtp_port: 587,
            smtp_tls: true,
            smtp_username: String::new(),
            smtp_password: String::new(),
            from_email: "noreply@localhost".to_string(),
            from_name: "sitekit".to_string(),
        }
    }
}

impl EmailConfig {
    /// `project_name` is the sender name unless `EMAILS_FROM_NAME` is set.
    pub fn from_env(project_name: &str) -> Self {
        let defaults = Self::default();
        Self {
            enabled: env_flag("EMAILS_ENABLED", defaults.enabled),
            smtp_host: env_string("SMTP_HOST", &defaults.smtp_host),
            smtp_port: env_parse("SMTP_PORT", defaults.smtp_port),
            smtp_tls: env_flag("SMTP_TLS", defaults.smtp_tls),
            smtp_username: env_string("SMTP_USER", ""),
            smtp_password: env_string("SMTP_PASSWORD", ""),
            from_email: env_string("EMAILS_FROM_EMAIL", &defaults.from_email),
            from_name: env_optional("EMAILS_FROM_NAME").unwrap_or_else(|| project_name.to_string()),
        }
    }

    pub fn has_credentials(&self) -> bool {
        !self.smtp_username.is_empty()
    }
}
