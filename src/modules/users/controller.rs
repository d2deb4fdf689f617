use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use sitekit_core::{AppError, PaginationParams};
use sitekit_db::OrderBy;
use sitekit_models::form::ALREADY_EXISTS;
use sitekit_models::{FormErrors, User, UserForm, UserUpdateForm};
use tracing::{info, instrument};

use crate::middleware::auth::AuthUser;
use crate::modules::dashboard::controller::{render_detail, render_form, render_list};
use crate::modules::dashboard::service::DashboardService;
use crate::modules::users::repository::UserRepository;
use crate::state::AppState;
use crate::utils::flash::Flash;
use crate::utils::redirect::{found, path_segment};
use crate::validator::{HtmlForm, unique_to_form_error};
use crate::views::{DetailView, FormView, ListView, PaginationView, RowView};

const NOT_FOUND: &str = "User does not exist";

fn list_url(state: &AppState) -> String {
    state.paths.dashboard("user/")
}

fn user_url(state: &AppState, email: &str, action: &str) -> String {
    state.paths.dashboard(&format!("user/{}/{action}/", path_segment(email)))
}

fn create_form(state: &AppState, form: &UserForm, errors: &FormErrors) -> FormView {
    FormView::new(state.paths.dashboard("user/create/"), "Create")
        .email("email", "Email", &form.email)
        .required()
        .password("password", "Password")
        .required()
        .errors(errors)
}

fn update_form(
    state: &AppState,
    email: &str,
    form: &UserUpdateForm,
    errors: &FormErrors,
) -> FormView {
    FormView::new(user_url(state, email, "update"), "Save")
        .email("email", "Email", &form.email)
        .required()
        .password("password", "New password")
        .errors(errors)
}

#[instrument(skip_all)]
pub async fn list_users(
    State(state): State<AppState>,
    AuthUser(current): AuthUser,
    flash: Flash,
    Query(params): Query<PaginationParams>,
) -> Result<Response, AppError> {
    let (users, meta) = DashboardService::paginate::<User>(
        &state.db,
        &params,
        state.page_size(),
        &[OrderBy::asc("id")],
    )
    .await?;

    let list = ListView {
        columns: vec!["ID", "Email"],
        rows: users
            .iter()
            .map(|user| RowView {
                cells: vec![user.id.to_string(), user.email.clone()],
                url: user_url(&state, &user.email, "detail"),
            })
            .collect(),
        create_url: state.paths.dashboard("user/create/"),
        pagination: PaginationView::new(&meta, &list_url(&state), params.order_by.as_deref()),
    };

    render_list(&state, &current, flash, "Users", list)
}

pub async fn create_user_form(
    State(state): State<AppState>,
    AuthUser(current): AuthUser,
    flash: Flash,
) -> Result<Response, AppError> {
    let form = create_form(&state, &UserForm::default(), &FormErrors::new());
    render_form(&state, &current, flash, "Create user", form)
}

#[instrument(skip_all, fields(email = %form.email))]
pub async fn create_user(
    State(state): State<AppState>,
    AuthUser(current): AuthUser,
    flash: Flash,
    HtmlForm(form): HtmlForm<UserForm>,
) -> Result<Response, AppError> {
    let mut errors = form.check();
    if !errors.has("email") && UserRepository::email_taken(&state.db, form.email.trim(), None).await? {
        errors.add("email", ALREADY_EXISTS);
    }

    if errors.is_empty() {
        match UserRepository::create(&state.db, form.to_fields()).await {
            Ok(user) => {
                info!(user.id = user.id, "User created");
                let target = user_url(&state, &user.email, "update");
                return Ok((flash.success("User successfully created"), found(&target)).into_response());
            }
            Err(e) => unique_to_form_error(e, "email", &mut errors)?,
        }
    }

    render_form(&state, &current, flash, "Create user", create_form(&state, &form, &errors))
}

pub async fn user_detail(
    State(state): State<AppState>,
    AuthUser(current): AuthUser,
    flash: Flash,
    Path(email): Path<String>,
) -> Result<Response, AppError> {
    let Some(user) = UserRepository::get_by_email(&state.db, &email).await? else {
        return Ok(DashboardService::missing(flash, NOT_FOUND, &list_url(&state)));
    };

    let detail = DetailView::default()
        .row("ID", user.id.to_string())
        .row("Email", user.email.clone())
        .action("Update", user_url(&state, &user.email, "update"))
        .danger("Delete", user_url(&state, &user.email, "delete"))
        .action("Back to list", list_url(&state));

    render_detail(&state, &current, flash, "User", detail)
}

pub async fn update_user_form(
    State(state): State<AppState>,
    AuthUser(current): AuthUser,
    flash: Flash,
    Path(email): Path<String>,
) -> Result<Response, AppError> {
    let Some(user) = UserRepository::get_by_email(&state.db, &email).await? else {
        return Ok(DashboardService::missing(flash, NOT_FOUND, &list_url(&state)));
    };

    let form = update_form(
        &state,
        &user.email,
        &UserUpdateForm::from_user(&user),
        &FormErrors::new(),
    );
    render_form(&state, &current, flash, "Update user", form)
}

#[instrument(skip_all, fields(email = %email))]
pub async fn update_user(
    State(state): State<AppState>,
    AuthUser(current): AuthUser,
    flash: Flash,
    Path(email): Path<String>,
    HtmlForm(form): HtmlForm<UserUpdateForm>,
) -> Result<Response, AppError> {
    let Some(user) = UserRepository::get_by_email(&state.db, &email).await? else {
        return Ok(DashboardService::missing(flash, NOT_FOUND, &list_url(&state)));
    };

    let mut errors = form.check();
    if !errors.has("email")
        && UserRepository::email_taken(&state.db, form.email.trim(), Some(user.id)).await?
    {
        errors.add("email", ALREADY_EXISTS);
    }

    if errors.is_empty() {
        match UserRepository::update(&state.db, &user, form.to_fields()).await {
            Ok(updated) => {
                info!(user.id = updated.id, "User updated");
                let target = user_url(&state, &updated.email, "detail");
                return Ok((flash.success("User successfully updated"), found(&target)).into_response());
            }
            Err(e) => unique_to_form_error(e, "email", &mut errors)?,
        }
    }

    let view = update_form(&state, &user.email, &form, &errors);
    render_form(&state, &current, flash, "Update user", view)
}

#[instrument(skip_all, fields(email = %email))]
pub async fn delete_user(
    State(state): State<AppState>,
    AuthUser(current): AuthUser,
    flash: Flash,
    Path(email): Path<String>,
) -> Result<Response, AppError> {
    let Some(user) = UserRepository::get_by_email(&state.db, &email).await? else {
        return Ok(DashboardService::missing(flash, NOT_FOUND, &list_url(&state)));
    };

    if user.id == current.id {
        return Ok((flash.warning("You can't delete yourself"), found(&list_url(&state))).into_response());
    }

    let deleted = UserRepository::delete(&state.db, user).await?;
    info!(user.id = deleted.id, "User deleted");

    Ok((flash.success("User successfully deleted"), found(&list_url(&state))).into_response())
}
