use std::env;

#[derive(Clone, Debug, Default)]
pub struct CorsConfig {
    /// Origins allowed to make credentialed cross-origin requests; empty disables CORS
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    pub fn from_env() -> Self {
        let allowed_origins = env::var("BACKEND_CORS_ORIGINS")
            .map(|raw| parse_origins(&raw))
            .unwrap_or_default();

        Self { allowed_origins }
    }

    pub fn is_enabled(&self) -> bool {
        !self.allowed_origins.is_empty()
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().trim_end_matches('/').to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
