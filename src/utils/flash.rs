//! One-shot messages carried across a redirect.
//!
//! Messages are queued in a signed cookie by the handler that redirects and
//! consumed by the next handler that renders a page. The cookie is signed with
//! a key derived from the JWT secret, so clients cannot forge messages.

use std::convert::Infallible;

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum::response::{IntoResponseParts, ResponseParts};
use axum_extra::extract::cookie::{Cookie, Key, SameSite, SignedCookieJar};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha512};

pub const FLASH_COOKIE: &str = "_flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Info,
    Warning,
    Error,
}

impl FlashLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlashLevel::Success => "success",
            FlashLevel::Info => "info",
            FlashLevel::Warning => "warning",
            FlashLevel::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashMessage {
    pub level: FlashLevel,
    pub message: String,
}

/// Signing key for the flash cookie; SHA-512 stretches any secret to the 64 bytes `Key` needs.
pub fn derive_flash_key(secret: &str) -> Key {
    let digest = Sha512::digest(secret.as_bytes());
    Key::from(digest.as_slice())
}

pub struct Flash {
    jar: SignedCookieJar,
}

impl Flash {
    /// Messages queued for this request.
    pub fn messages(&self) -> Vec<FlashMessage> {
        self.jar
            .get(FLASH_COOKIE)
            .and_then(|cookie| serde_json::from_str(cookie.value()).ok())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn push(self, level: FlashLevel, message: impl Into<String>) -> Self {
        let mut messages = self.messages();
        messages.push(FlashMessage {
            level,
            message: message.into(),
        });
        let value = serde_json::to_string(&messages).unwrap_or_else(|_| "[]".to_string());

        let cookie = Cookie::build((FLASH_COOKIE, value))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax);
        Self {
            jar: self.jar.add(cookie),
        }
    }

    #[must_use]
    pub fn success(self, message: impl Into<String>) -> Self {
        self.push(FlashLevel::Success, message)
    }

    #[must_use]
    pub fn info(self, message: impl Into<String>) -> Self {
        self.push(FlashLevel::Info, message)
    }

    #[must_use]
    pub fn warning(self, message: impl Into<String>) -> Self {
        self.push(FlashLevel::Warning, message)
    }

    /// Reads the queued messages and clears them from the client.
    pub fn take(self) -> (Self, Vec<FlashMessage>) {
        let messages = self.messages();
        if self.jar.get(FLASH_COOKIE).is_none() {
            return (self, messages);
        }
        let jar = self.jar.remove(Cookie::build(FLASH_COOKIE).path("/"));
        (Self { jar }, messages)
    }
}

impl<S> FromRequestParts<S> for Flash
where
    S: Send + Sync,
    Key: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = SignedCookieJar::<Key>::from_request_parts(parts, state).await?;
        Ok(Self { jar })
    }
}

impl IntoResponseParts for Flash {
    type Error = Infallible;

    fn into_response_parts(self, res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        self.jar.into_response_parts(res)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderMap;

    fn flash_from(headers: &HeaderMap, key: &Key) -> Flash {
        Flash {
            jar: SignedCookieJar::from_headers(headers, key.clone()),
        }
    }

    fn set_cookie_header(flash: Flash) -> String {
        use axum::response::IntoResponse;
        let response = (flash, "").into_response();
        response
            .headers()
            .get_all(axum::http::header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .map(|v| v.split(';').next().unwrap_or_default().to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }

    #[test]
    fn test_messages_survive_a_round_trip() {
        let key = derive_flash_key("flash-test-secret");
        let flash = flash_from(&HeaderMap::new(), &key)
            .success("User successfully created")
            .warning("Careful");
        let cookie = set_cookie_header(flash);

        let mut headers = HeaderMap::new();
        headers.insert(axum::http::header::COOKIE, cookie.parse().unwrap());
        let (_, messages) = flash_from(&headers, &key).take();

        assert_eq!(
            messages,
            vec![
                FlashMessage {
                    level: FlashLevel::Success,
                    message: "User successfully created".to_string(),
                },
                FlashMessage {
                    level: FlashLevel::Warning,
                    message: "Careful".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_tampered_cookie_is_ignored() {
        let key = derive_flash_key("flash-test-secret");
        let other = derive_flash_key("some-other-secret");
        let cookie = set_cookie_header(flash_from(&HeaderMap::new(), &other).info("forged"));

        let mut headers = HeaderMap::new();
        headers.insert(axum::http::header::COOKIE, cookie.parse().unwrap());
        assert!(flash_from(&headers, &key).messages().is_empty());
    }

    #[test]
    fn test_take_without_cookie_sets_nothing() {
        let key = derive_flash_key("flash-test-secret");
        let (flash, messages) = flash_from(&HeaderMap::new(), &key).take();

        assert!(messages.is_empty());
        assert_eq!(set_cookie_header(flash), "");
    }
}
