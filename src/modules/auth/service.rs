use axum_extra::extract::cookie::{Cookie, SameSite};
use sitekit_auth::{bearer_value, create_access_token};
use sitekit_config::{CookieConfig, JwtConfig, PathConfig};
use sitekit_core::AppError;
use sitekit_db::PgPool;
use sitekit_models::User;
use tracing::{info, instrument, warn};

use crate::modules::users::repository::UserRepository;
use crate::utils::redirect::is_safe_redirect;

pub struct AuthService;

impl AuthService {
    /// Checks credentials and issues an access token for the user.
    ///
    /// `Ok(None)` means the email is unknown or the password does not match.
    #[instrument(skip(db, password, jwt_config))]
    pub async fn login(
        db: &PgPool,
        email: &str,
        password: &str,
        jwt_config: &JwtConfig,
    ) -> Result<Option<(User, String)>, AppError> {
        let Some(user) = UserRepository::authenticate(db, email, password).await? else {
            warn!("Failed sign-in attempt");
            return Ok(None);
        };

        let token = create_access_token(user.id, jwt_config)?;
        info!(user.id = user.id, "User signed in");
        Ok(Some((user, token)))
    }

    /// The session cookie carrying `Bearer <token>`.
    pub fn token_cookie(token: &str, config: &CookieConfig) -> Cookie<'static> {
        Cookie::build((config.token_name.clone(), bearer_value(token)))
            .path(config.path.clone())
            .http_only(true)
            .same_site(SameSite::Lax)
            .max_age(time::Duration::seconds(config.expire))
            .build()
    }

    /// Cookie matching [`Self::token_cookie`] by name and path, for removal.
    pub fn removal_cookie(config: &CookieConfig) -> Cookie<'static> {
        Cookie::build(config.token_name.clone())
            .path(config.path.clone())
            .build()
    }

    /// Where to go after signing in: a local `next_url`, or the configured default.
    pub fn next_url(next_url: Option<&str>, paths: &PathConfig) -> String {
        match next_url {
            Some(next) if is_safe_redirect(next) => next.to_string(),
            _ => paths.login_redirect.clone(),
        }
    }
}
