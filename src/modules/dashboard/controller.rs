use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use sitekit_core::AppError;
use sitekit_models::User;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::utils::flash::Flash;
use crate::utils::redirect::see_other;
use crate::views::{
    DetailTemplate, DetailView, FormTemplate, FormView, ListTemplate, ListView, Page, render,
};

/// `GET /admin` lands on the user list.
pub async fn index(State(state): State<AppState>, _user: AuthUser) -> Response {
    see_other(&state.paths.dashboard("user/"))
}

pub fn render_list(
    state: &AppState,
    current: &User,
    flash: Flash,
    title: &str,
    list: ListView,
) -> Result<Response, AppError> {
    let (flash, messages) = flash.take();
    let page = Page::dashboard(title, state, current, messages);
    Ok((flash, render(&ListTemplate { page, list })?).into_response())
}

pub fn render_detail(
    state: &AppState,
    current: &User,
    flash: Flash,
    title: &str,
    detail: DetailView,
) -> Result<Response, AppError> {
    let (flash, messages) = flash.take();
    let page = Page::dashboard(title, state, current, messages);
    Ok((flash, render(&DetailTemplate { page, detail })?).into_response())
}

pub fn render_form(
    state: &AppState,
    current: &User,
    flash: Flash,
    title: &str,
    form: FormView,
) -> Result<Response, AppError> {
    let (flash, messages) = flash.take();
    let page = Page::dashboard(title, state, current, messages);
    Ok((flash, render(&FormTemplate { page, form })?).into_response())
}
