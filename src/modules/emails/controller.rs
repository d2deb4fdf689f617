use anyhow::Context;
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use sitekit_core::{AppError, PaginationParams};
use sitekit_db::{Fields, OrderBy, PgPool};
use sitekit_models::form::ALREADY_EXISTS;
use sitekit_models::{Email, EmailForm, FormErrors};
use tracing::{info, instrument};

use crate::middleware::auth::AuthUser;
use crate::modules::dashboard::controller::{render_detail, render_form, render_list};
use crate::modules::dashboard::service::DashboardService;
use crate::modules::emails::EmailRepository;
use crate::state::AppState;
use crate::utils::flash::Flash;
use crate::utils::redirect::{found, path_segment};
use crate::validator::{HtmlForm, unique_to_form_error};
use crate::views::{DetailView, FormView, ListView, PaginationView, RowView};

const NOT_FOUND: &str = "Email does not exist";

fn list_url(state: &AppState) -> String {
    state.paths.dashboard("email/")
}

fn email_url(state: &AppState, email: &str, action: &str) -> String {
    state.paths.dashboard(&format!("email/{}/{action}/", path_segment(email)))
}

fn email_form(action: String, submit: &'static str, form: &EmailForm, errors: &FormErrors) -> FormView {
    FormView::new(action, submit)
        .email("email", "Email", &form.email)
        .required()
        .checkbox("is_active", "Active", form.is_active)
        .errors(errors)
}

async fn find(db: &PgPool, email: &str) -> Result<Option<Email>, AppError> {
    EmailRepository::get_by_params(db, &Fields::new().set("email", email))
        .await
        .context("Failed to fetch email")
        .map_err(AppError::database)
}

async fn taken(db: &PgPool, email: &str, exclude_id: Option<i64>) -> Result<bool, AppError> {
    EmailRepository::exists(db, &Fields::new().set("email", email), exclude_id)
        .await
        .context("Failed to check email")
        .map_err(AppError::database)
}

#[instrument(skip_all)]
pub async fn list_emails(
    State(state): State<AppState>,
    AuthUser(current): AuthUser,
    flash: Flash,
    Query(params): Query<PaginationParams>,
) -> Result<Response, AppError> {
    let (emails, meta) = DashboardService::paginate::<Email>(
        &state.db,
        &params,
        state.page_size(),
        &[OrderBy::asc("id")],
    )
    .await?;

    let list = ListView {
        columns: vec!["ID", "Email", "Active"],
        rows: emails
            .iter()
            .map(|email| RowView {
                cells: vec![
                    email.id.to_string(),
                    email.email.clone(),
                    if email.is_active { "Yes" } else { "No" }.to_string(),
                ],
                url: email_url(&state, &email.email, "detail"),
            })
            .collect(),
        create_url: state.paths.dashboard("email/create/"),
        pagination: PaginationView::new(&meta, &list_url(&state), params.order_by.as_deref()),
    };

    render_list(&state, &current, flash, "Emails", list)
}

pub async fn create_email_form(
    State(state): State<AppState>,
    AuthUser(current): AuthUser,
    flash: Flash,
) -> Result<Response, AppError> {
    let initial = EmailForm {
        is_active: true,
        ..Default::default()
    };
    let form = email_form(
        state.paths.dashboard("email/create/"),
        "Create",
        &initial,
        &FormErrors::new(),
    );
    render_form(&state, &current, flash, "Create email", form)
}

#[instrument(skip_all, fields(email = %form.email))]
pub async fn create_email(
    State(state): State<AppState>,
    AuthUser(current): AuthUser,
    flash: Flash,
    HtmlForm(form): HtmlForm<EmailForm>,
) -> Result<Response, AppError> {
    let mut errors = form.check();
    if !errors.has("email") && taken(&state.db, form.email.trim(), None).await? {
        errors.add("email", ALREADY_EXISTS);
    }

    if errors.is_empty() {
        match EmailRepository::create(&state.db, &form.to_fields())
            .await
            .context("Failed to insert email")
        {
            Ok(email) => {
                info!(email.id = email.id, "Email created");
                let target = email_url(&state, &email.email, "detail");
                return Ok((flash.success("Email successfully created"), found(&target)).into_response());
            }
            Err(e) => unique_to_form_error(AppError::database(e), "email", &mut errors)?,
        }
    }

    let view = email_form(state.paths.dashboard("email/create/"), "Create", &form, &errors);
    render_form(&state, &current, flash, "Create email", view)
}

pub async fn email_detail(
    State(state): State<AppState>,
    AuthUser(current): AuthUser,
    flash: Flash,
    Path(email): Path<String>,
) -> Result<Response, AppError> {
    let Some(email) = find(&state.db, &email).await? else {
        return Ok(DashboardService::missing(flash, NOT_FOUND, &list_url(&state)));
    };

    let detail = DetailView::default()
        .row("ID", email.id.to_string())
        .row("Email", email.email.clone())
        .row("Active", if email.is_active { "Yes" } else { "No" })
        .action("Update", email_url(&state, &email.email, "update"))
        .danger("Delete", email_url(&state, &email.email, "delete"))
        .action("Back to list", list_url(&state));

    render_detail(&state, &current, flash, "Email", detail)
}

pub async fn update_email_form(
    State(state): State<AppState>,
    AuthUser(current): AuthUser,
    flash: Flash,
    Path(email): Path<String>,
) -> Result<Response, AppError> {
    let Some(email) = find(&state.db, &email).await? else {
        return Ok(DashboardService::missing(flash, NOT_FOUND, &list_url(&state)));
    };

    let form = email_form(
        email_url(&state, &email.email, "update"),
        "Save",
        &EmailForm::from_email(&email),
        &FormErrors::new(),
    );
    render_form(&state, &current, flash, "Update email", form)
}

#[instrument(skip_all, fields(email = %email))]
pub async fn update_email(
    State(state): State<AppState>,
    AuthUser(current): AuthUser,
    flash: Flash,
    Path(email): Path<String>,
    HtmlForm(form): HtmlForm<EmailForm>,
) -> Result<Response, AppError> {
    let Some(existing) = find(&state.db, &email).await? else {
        return Ok(DashboardService::missing(flash, NOT_FOUND, &list_url(&state)));
    };

    let mut errors = form.check();
    if !errors.has("email") && taken(&state.db, form.email.trim(), Some(existing.id)).await? {
        errors.add("email", ALREADY_EXISTS);
    }

    if errors.is_empty() {
        match EmailRepository::update(&state.db, &existing, &form.to_fields())
            .await
            .context("Failed to update email")
        {
            Ok(updated) => {
                info!(email.id = updated.id, "Email updated");
                let target = email_url(&state, &updated.email, "update");
                return Ok((flash.success("Email successfully updated"), found(&target)).into_response());
            }
            Err(e) => unique_to_form_error(AppError::database(e), "email", &mut errors)?,
        }
    }

    let view = email_form(email_url(&state, &existing.email, "update"), "Save", &form, &errors);
    render_form(&state, &current, flash, "Update email", view)
}

#[instrument(skip_all, fields(email = %email))]
pub async fn delete_email(
    State(state): State<AppState>,
    AuthUser(_current): AuthUser,
    flash: Flash,
    Path(email): Path<String>,
) -> Result<Response, AppError> {
    let Some(existing) = find(&state.db, &email).await? else {
        return Ok(DashboardService::missing(flash, NOT_FOUND, &list_url(&state)));
    };

    let deleted = EmailRepository::delete(&state.db, existing)
        .await
        .context("Failed to delete email")
        .map_err(AppError::database)?;
    info!(email.id = deleted.id, "Email deleted");

    Ok((flash.success("Email successfully deleted"), found(&list_url(&state))).into_response())
}
