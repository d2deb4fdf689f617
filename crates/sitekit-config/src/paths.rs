use crate::env_string;

/// Well-known URLs of the login flow and the dashboard mount point.
#[derive(Clone, Debug)]
pub struct PathConfig {
    pub dashboard_prefix: String,
    pub login_url: String,
    /// Where a successful sign-in lands when no `next_url` is given
    pub login_redirect: String,
    pub logout_redirect: String,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            dashboard_prefix: "/admin".to_string(),
            login_url: "/auth/login/".to_string(),
            login_redirect: "/admin/user/".to_string(),
            logout_redirect: "/auth/login/".to_string(),
        }
    }
}

impl PathConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            dashboard_prefix: normalize_prefix(&env_string(
                "DASHBOARD_PATH_PREFIX",
                &defaults.dashboard_prefix,
            )),
            login_url: env_string("LOGIN_URL", &defaults.login_url),
            login_redirect: env_string("LOGIN_REDIRECT", &defaults.login_redirect),
            logout_redirect: env_string("LOGOUT_REDIRECT", &defaults.logout_redirect),
        }
    }

    /// Absolute dashboard URL for a path relative to the prefix, e.g. `user/` → `/admin/user/`.
    pub fn dashboard(&self, path: &str) -> String {
        format!("{}/{}", self.dashboard_prefix, path.trim_start_matches('/'))
    }
}

/// `admin/` → `/admin`. The dashboard cannot share the root with the home page,
/// so an empty prefix falls back to `/admin`.
fn normalize_prefix(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        PathConfig::default().dashboard_prefix
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}
