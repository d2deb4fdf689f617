//! Per-request authentication.
//!
//! [`authenticate`] runs on every request: it picks the bearer token from the
//! `Authorization` header or the token cookie, verifies it, loads the user and
//! stores the outcome as a [`Session`] request extension. Handlers then use
//! [`AuthUser`] (dashboard pages) or [`MaybeUser`] (public pages).

use std::convert::Infallible;

use anyhow::anyhow;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use sitekit_auth::{AuthFailure, TokenSource, authenticate_bearer, select_bearer};
use sitekit_core::AppError;
use sitekit_models::User;
use tracing::{debug, warn};

use crate::logging::RequestUser;
use crate::modules::users::repository::UserRepository;
use crate::state::AppState;

#[derive(Debug, Clone, Default)]
pub enum Session {
    #[default]
    Anonymous,
    Authenticated(User),
}

impl Session {
    pub fn user(&self) -> Option<&User> {
        match self {
            Session::Anonymous => None,
            Session::Authenticated(user) => Some(user),
        }
    }
}

pub async fn authenticate(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let jar = CookieJar::from_headers(req.headers());
    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let cookie_value = jar
        .get(&state.cookie_config.token_name)
        .map(|cookie| cookie.value().to_owned());

    let session = match select_bearer(header_value.as_deref(), cookie_value.as_deref()) {
        None => Session::Anonymous,
        Some(bearer) => match authenticate_bearer(bearer.token, &state.jwt_config) {
            Ok(identity) => match UserRepository::get_by_id(&state.db, identity.user_id).await {
                Ok(Some(user)) => Session::Authenticated(user),
                Ok(None) => {
                    warn!(user_id = identity.user_id, "Token refers to a user that no longer exists");
                    Session::Anonymous
                }
                Err(e) => return e.into_response(),
            },
            Err(failure) => {
                return reject(failure, bearer.source, jar, &state);
            }
        },
    };

    let user_id = session.user().map(|user| user.id);
    req.extensions_mut().insert(session);
    let mut response = next.run(req).await;
    if let Some(id) = user_id {
        response.extensions_mut().insert(RequestUser(id));
    }
    response
}

fn reject(failure: AuthFailure, source: TokenSource, jar: CookieJar, state: &AppState) -> Response {
    debug!(?failure, ?source, "Rejected bearer token");
    let error = AppError::unauthorized(anyhow!("Could not validate credentials"));

    match source {
        TokenSource::Header => error.into_response(),
        TokenSource::Cookie => {
            let jar = jar.remove(
                Cookie::build(state.cookie_config.token_name.clone())
                    .path(state.cookie_config.path.clone()),
            );
            (jar, error).into_response()
        }
    }
}

/// Rejection of [`AuthUser`]: the browser is sent to the login page.
#[derive(Debug)]
pub struct Unauthenticated {
    pub login_url: String,
}

impl IntoResponse for Unauthenticated {
    fn into_response(self) -> Response {
        Redirect::to(&self.login_url).into_response()
    }
}

/// The signed-in user; gates every dashboard handler.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = Unauthenticated;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<Session>() {
            Some(Session::Authenticated(user)) => Ok(AuthUser(user.clone())),
            _ => Err(Unauthenticated {
                login_url: state.paths.login_url.clone(),
            }),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<User>);

impl<S> FromRequestParts<S> for MaybeUser
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<Session>()
            .and_then(Session::user)
            .cloned();
        Ok(MaybeUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{Request as HttpRequest, StatusCode};

    fn user() -> User {
        User {
            id: 1,
            email: "admin@example.com".to_string(),
            hashed_password: "x".to_string(),
        }
    }

    #[tokio::test]
    async fn test_maybe_user_reads_session() {
        let (mut parts, _) = HttpRequest::new(()).into_parts();
        parts.extensions.insert(Session::Authenticated(user()));

        let MaybeUser(found) = MaybeUser::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(found.map(|u| u.id), Some(1));
    }

    #[tokio::test]
    async fn test_maybe_user_without_session_is_none() {
        let (mut parts, _) = HttpRequest::new(()).into_parts();

        let MaybeUser(found) = MaybeUser::from_request_parts(&mut parts, &()).await.unwrap();
        assert!(found.is_none());
    }

    #[test]
    fn test_unauthenticated_redirects_to_login() {
        let response = Unauthenticated {
            login_url: "/auth/login/".to_string(),
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/auth/login/");
    }
}
