use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use sitekit_core::AppError;
use sitekit_models::{FormErrors, LoginForm};
use tracing::instrument;

use crate::middleware::auth::MaybeUser;
use crate::modules::auth::service::AuthService;
use crate::state::AppState;
use crate::utils::flash::Flash;
use crate::utils::redirect::{found, is_safe_redirect, see_other};
use crate::validator::HtmlForm;
use crate::views::{FormView, LoginTemplate, Page, render};

const BAD_CREDENTIALS: &str = "Incorrect email or password";

#[derive(Debug, Default, Deserialize)]
pub struct LoginQuery {
    pub next_url: Option<String>,
}

fn login_view(
    state: &AppState,
    flash: Flash,
    query: &LoginQuery,
    form: &LoginForm,
    errors: &FormErrors,
) -> Result<Response, AppError> {
    let action = match query.next_url.as_deref() {
        Some(next) if is_safe_redirect(next) => format!("{}?next_url={next}", state.paths.login_url),
        _ => state.paths.login_url.clone(),
    };
    let form = FormView::new(action, "Sign in")
        .email("email", "Email", &form.email)
        .required()
        .password("password", "Password")
        .required()
        .errors(errors);

    let (flash, messages) = flash.take();
    let page = Page::public("Sign in", "", state, None, messages);
    Ok((flash, render(&LoginTemplate { page, form })?).into_response())
}

pub async fn login_form(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    flash: Flash,
    Query(query): Query<LoginQuery>,
) -> Result<Response, AppError> {
    if user.is_some() {
        return Ok(see_other(&AuthService::next_url(query.next_url.as_deref(), &state.paths)));
    }
    login_view(&state, flash, &query, &LoginForm::default(), &FormErrors::new())
}

#[instrument(skip_all, fields(email = %form.email))]
pub async fn login(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    jar: CookieJar,
    flash: Flash,
    Query(query): Query<LoginQuery>,
    HtmlForm(form): HtmlForm<LoginForm>,
) -> Result<Response, AppError> {
    let next = AuthService::next_url(query.next_url.as_deref(), &state.paths);
    if user.is_some() {
        return Ok(see_other(&next));
    }

    let mut errors = form.check();
    if !errors.is_empty() {
        return login_view(&state, flash, &query, &form, &errors);
    }

    let Some((_, token)) =
        AuthService::login(&state.db, form.email.trim(), &form.password, &state.jwt_config).await?
    else {
        errors.add("email", BAD_CREDENTIALS);
        return login_view(&state, flash, &query, &form, &errors);
    };

    let jar = jar.add(AuthService::token_cookie(&token, &state.cookie_config));
    Ok((jar, flash.success("You are signed in"), found(&next)).into_response())
}

pub async fn logout(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    jar: CookieJar,
    flash: Flash,
) -> Response {
    if user.is_none() {
        return see_other(&state.paths.logout_redirect);
    }

    let jar = jar.remove(AuthService::removal_cookie(&state.cookie_config));
    (jar, flash.info("You are logged out"), see_other(&state.paths.logout_redirect)).into_response()
}
