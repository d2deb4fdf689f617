use anyhow::Context;
use axum::{
    extract::{Path, Query, State},
    response::Response,
};
use sitekit_core::{AppError, PaginationParams};
use sitekit_db::OrderBy;
use sitekit_models::Message;
use tracing::instrument;

use crate::middleware::auth::AuthUser;
use crate::modules::dashboard::controller::{render_detail, render_list};
use crate::modules::dashboard::service::DashboardService;
use crate::modules::messages::MessageRepository;
use crate::state::AppState;
use crate::utils::flash::Flash;
use crate::views::{DetailView, ListView, PaginationView, RowView};

const NOT_FOUND: &str = "Message does not exist";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

fn list_url(state: &AppState) -> String {
    state.paths.dashboard("message/")
}

#[instrument(skip_all)]
pub async fn list_messages(
    State(state): State<AppState>,
    AuthUser(current): AuthUser,
    flash: Flash,
    Query(params): Query<PaginationParams>,
) -> Result<Response, AppError> {
    let (messages, meta) = DashboardService::paginate::<Message>(
        &state.db,
        &params,
        state.page_size(),
        &[OrderBy::desc("created_at")],
    )
    .await?;

    let list = ListView {
        columns: vec!["ID", "Full name", "Email", "Title", "Received"],
        rows: messages
            .iter()
            .map(|message| RowView {
                cells: vec![
                    message.id.to_string(),
                    message.fullname.clone(),
                    message.email.clone(),
                    message.title.clone(),
                    message.created_at.format(TIMESTAMP_FORMAT).to_string(),
                ],
                url: state.paths.dashboard(&format!("message/{}/detail/", message.id)),
            })
            .collect(),
        create_url: String::new(),
        pagination: PaginationView::new(&meta, &list_url(&state), params.order_by.as_deref()),
    };

    render_list(&state, &current, flash, "Messages", list)
}

pub async fn message_detail(
    State(state): State<AppState>,
    AuthUser(current): AuthUser,
    flash: Flash,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let message = match id.parse::<i64>() {
        Ok(id) => MessageRepository::get_by_id(&state.db, id)
            .await
            .context("Failed to fetch message")
            .map_err(AppError::database)?,
        Err(_) => None,
    };
    let Some(message) = message else {
        return Ok(DashboardService::missing(flash, NOT_FOUND, &list_url(&state)));
    };

    let detail = DetailView::default()
        .row("ID", message.id.to_string())
        .row("Full name", message.fullname.clone())
        .row("Company", message.company_name.clone().unwrap_or_default())
        .row("Email", message.email.clone())
        .row("Phone number", message.phone_number.clone().unwrap_or_default())
        .row("Title", message.title.clone())
        .row("Message", message.body.clone())
        .row("Received", message.created_at.format(TIMESTAMP_FORMAT).to_string())
        .action("Back to list", list_url(&state));

    render_detail(&state, &current, flash, "Message", detail)
}
