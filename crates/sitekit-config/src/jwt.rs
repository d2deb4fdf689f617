use data_encoding::BASE64URL_NOPAD;
use rand::RngCore;
use tracing::warn;

use crate::{env_flag, env_optional, env_parse, env_string};

#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    /// Algorithm name as understood by `jsonwebtoken` (`HS256`, `RS256`, ...)
    pub algorithm: String,
    /// PEM encoded keys, used instead of `secret` for asymmetric algorithms
    pub private_key: Option<String>,
    pub public_key: Option<String>,
    /// Lifetime of an issued token, in seconds
    pub access_token_expiry: i64,
    /// Clock skew tolerated when checking `exp`, in seconds
    pub leeway: u64,
    pub verify_expiration: bool,
    pub audience: Option<String>,
    pub issuer: Option<String>,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: generate_secret(),
            algorithm: "HS256".to_string(),
            private_key: None,
            public_key: None,
            access_token_expiry: 300,
            leeway: 0,
            verify_expiration: true,
            audience: None,
            issuer: None,
        }
    }
}

impl JwtConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let secret = match env_optional("JWT_SECRET_KEY") {
            Some(secret) => secret,
            None => {
                warn!("JWT_SECRET_KEY is not set; using a random secret, sessions will not survive a restart");
                defaults.secret
            }
        };

        Self {
            secret,
            algorithm: env_string("JWT_ALGORITHM", &defaults.algorithm),
            private_key: env_optional("JWT_PRIVATE_KEY"),
            public_key: env_optional("JWT_PUBLIC_KEY"),
            access_token_expiry: env_parse("JWT_EXPIRATION_SECONDS", defaults.access_token_expiry),
            leeway: env_parse("JWT_LEEWAY", defaults.leeway),
            verify_expiration: env_flag("JWT_VERIFY_EXPIRATION", defaults.verify_expiration),
            audience: env_optional("JWT_AUDIENCE"),
            issuer: env_optional("JWT_ISSUER"),
        }
    }
}

/// 32 random bytes, URL-safe base64 without padding.
pub fn generate_secret() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    BASE64URL_NOPAD.encode(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_secrets_are_url_safe_and_unique() {
        let a = generate_secret();
        let b = generate_secret();

        assert_eq!(a.len(), 43);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
        assert_ne!(a, b);
    }

    #[test]
    fn test_defaults() {
        let config = JwtConfig::default();
        assert_eq!(config.algorithm, "HS256");
        assert_eq!(config.access_token_expiry, 300);
        assert_eq!(config.leeway, 0);
        assert!(config.verify_expiration);
    }
}
