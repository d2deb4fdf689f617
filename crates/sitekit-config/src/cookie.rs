use crate::{env_parse, env_string};

/// Settings of the cookie that carries the session token.
#[derive(Clone, Debug)]
pub struct CookieConfig {
    pub token_name: String,
    pub path: String,
    /// Max-age of the token cookie, in seconds
    pub expire: i64,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            token_name: "Authorization".to_string(),
            path: "/".to_string(),
            expire: 60 * 60 * 24 * 30,
        }
    }
}

impl CookieConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            token_name: env_string("COOKIE_TOKEN_NAME", &defaults.token_name),
            path: env_string("COOKIE_PATH", &defaults.path),
            expire: env_parse("COOKIE_EXPIRE", defaults.expire),
        }
    }
}
