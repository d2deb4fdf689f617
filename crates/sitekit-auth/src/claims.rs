use serde::{Deserialize, Serialize};

/// Payload of a session token.
///
/// `iat` and `exp` are Unix timestamps in seconds. `aud` and `iss` are only
/// present when the corresponding settings are configured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: i64,
    #[serde(default)]
    pub iat: i64,
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
}
