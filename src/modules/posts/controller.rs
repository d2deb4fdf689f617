use anyhow::Context;
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use sitekit_core::{AppError, PaginationParams};
use sitekit_db::{Fields, OrderBy, PgPool};
use sitekit_models::form::ALREADY_EXISTS;
use sitekit_models::{FormErrors, Post, PostForm};
use tracing::{info, instrument};

use crate::middleware::auth::AuthUser;
use crate::modules::dashboard::controller::{render_detail, render_form, render_list};
use crate::modules::dashboard::service::DashboardService;
use crate::modules::posts::PostRepository;
use crate::state::AppState;
use crate::utils::flash::Flash;
use crate::utils::redirect::{found, path_segment};
use crate::validator::{HtmlForm, unique_to_form_error};
use crate::views::{DetailView, FormView, ListView, PaginationView, RowView};

const NOT_FOUND: &str = "Post does not exist";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

fn list_url(state: &AppState) -> String {
    state.paths.dashboard("post/")
}

fn post_url(state: &AppState, slug: &str, action: &str) -> String {
    state.paths.dashboard(&format!("post/{}/{action}/", path_segment(slug)))
}

fn post_form(action: String, submit: &'static str, form: &PostForm, errors: &FormErrors) -> FormView {
    FormView::new(action, submit)
        .text("slug", "Slug", &form.slug)
        .required()
        .text("title", "Title", &form.title)
        .required()
        .textarea("content", "Content", &form.content)
        .errors(errors)
}

async fn find(db: &PgPool, slug: &str) -> Result<Option<Post>, AppError> {
    PostRepository::get_by_params(db, &Fields::new().set("slug", slug))
        .await
        .context("Failed to fetch post")
        .map_err(AppError::database)
}

async fn slug_taken(db: &PgPool, slug: &str, exclude_id: Option<i64>) -> Result<bool, AppError> {
    PostRepository::exists(db, &Fields::new().set("slug", slug), exclude_id)
        .await
        .context("Failed to check post slug")
        .map_err(AppError::database)
}

#[instrument(skip_all)]
pub async fn list_posts(
    State(state): State<AppState>,
    AuthUser(current): AuthUser,
    flash: Flash,
    Query(params): Query<PaginationParams>,
) -> Result<Response, AppError> {
    let (posts, meta) = DashboardService::paginate::<Post>(
        &state.db,
        &params,
        state.page_size(),
        &[OrderBy::desc("created_at")],
    )
    .await?;

    let list = ListView {
        columns: vec!["ID", "Slug", "Title", "Created"],
        rows: posts
            .iter()
            .map(|post| RowView {
                cells: vec![
                    post.id.to_string(),
                    post.slug.clone(),
                    post.title.clone(),
                    post.created_at.format(TIMESTAMP_FORMAT).to_string(),
                ],
                url: post_url(&state, &post.slug, "detail"),
            })
            .collect(),
        create_url: state.paths.dashboard("post/create/"),
        pagination: PaginationView::new(&meta, &list_url(&state), params.order_by.as_deref()),
    };

    render_list(&state, &current, flash, "Posts", list)
}

pub async fn create_post_form(
    State(state): State<AppState>,
    AuthUser(current): AuthUser,
    flash: Flash,
) -> Result<Response, AppError> {
    let form = post_form(
        state.paths.dashboard("post/create/"),
        "Create",
        &PostForm::default(),
        &FormErrors::new(),
    );
    render_form(&state, &current, flash, "Create post", form)
}

#[instrument(skip_all, fields(slug = %form.slug))]
pub async fn create_post(
    State(state): State<AppState>,
    AuthUser(current): AuthUser,
    flash: Flash,
    HtmlForm(form): HtmlForm<PostForm>,
) -> Result<Response, AppError> {
    let mut errors = form.check();
    if !errors.has("slug") && slug_taken(&state.db, form.slug.trim(), None).await? {
        errors.add("slug", ALREADY_EXISTS);
    }

    if errors.is_empty() {
        match PostRepository::create(&state.db, &form.to_fields())
            .await
            .context("Failed to insert post")
        {
            Ok(post) => {
                info!(post.id = post.id, "Post created");
                let target = post_url(&state, &post.slug, "detail");
                return Ok((flash.success("Post successfully created"), found(&target)).into_response());
            }
            Err(e) => unique_to_form_error(AppError::database(e), "slug", &mut errors)?,
        }
    }

    let view = post_form(state.paths.dashboard("post/create/"), "Create", &form, &errors);
    render_form(&state, &current, flash, "Create post", view)
}

pub async fn post_detail(
    State(state): State<AppState>,
    AuthUser(current): AuthUser,
    flash: Flash,
    Path(slug): Path<String>,
) -> Result<Response, AppError> {
    let Some(post) = find(&state.db, &slug).await? else {
        return Ok(DashboardService::missing(flash, NOT_FOUND, &list_url(&state)));
    };

    let detail = DetailView::default()
        .row("ID", post.id.to_string())
        .row("Slug", post.slug.clone())
        .row("Title", post.title.clone())
        .row("Content", post.content.clone())
        .row("Created", post.created_at.format(TIMESTAMP_FORMAT).to_string())
        .row(
            "Updated",
            post.updated_at
                .map(|at| at.format(TIMESTAMP_FORMAT).to_string())
                .unwrap_or_default(),
        )
        .action("Update", post_url(&state, &post.slug, "update"))
        .danger("Delete", post_url(&state, &post.slug, "delete"))
        .action("Back to list", list_url(&state));

    render_detail(&state, &current, flash, "Post", detail)
}

pub async fn update_post_form(
    State(state): State<AppState>,
    AuthUser(current): AuthUser,
    flash: Flash,
    Path(slug): Path<String>,
) -> Result<Response, AppError> {
    let Some(post) = find(&state.db, &slug).await? else {
        return Ok(DashboardService::missing(flash, NOT_FOUND, &list_url(&state)));
    };

    let form = post_form(
        post_url(&state, &post.slug, "update"),
        "Save",
        &PostForm::from_post(&post),
        &FormErrors::new(),
    );
    render_form(&state, &current, flash, "Update post", form)
}

#[instrument(skip_all, fields(slug = %slug))]
pub async fn update_post(
    State(state): State<AppState>,
    AuthUser(current): AuthUser,
    flash: Flash,
    Path(slug): Path<String>,
    HtmlForm(form): HtmlForm<PostForm>,
) -> Result<Response, AppError> {
    let Some(existing) = find(&state.db, &slug).await? else {
        return Ok(DashboardService::missing(flash, NOT_FOUND, &list_url(&state)));
    };

    let mut errors = form.check();
    if !errors.has("slug") && slug_taken(&state.db, form.slug.trim(), Some(existing.id)).await? {
        errors.add("slug", ALREADY_EXISTS);
    }

    if errors.is_empty() {
        match PostRepository::update(&state.db, &existing, &form.to_fields())
            .await
            .context("Failed to update post")
        {
            Ok(updated) => {
                info!(post.id = updated.id, "Post updated");
                let target = post_url(&state, &updated.slug, "detail");
                return Ok((flash.success("Post successfully updated"), found(&target)).into_response());
            }
            Err(e) => unique_to_form_error(AppError::database(e), "slug", &mut errors)?,
        }
    }

    let view = post_form(post_url(&state, &existing.slug, "update"), "Save", &form, &errors);
    render_form(&state, &current, flash, "Update post", view)
}

#[instrument(skip_all, fields(slug = %slug))]
pub async fn delete_post(
    State(state): State<AppState>,
    AuthUser(_current): AuthUser,
    flash: Flash,
    Path(slug): Path<String>,
) -> Result<Response, AppError> {
    let Some(existing) = find(&state.db, &slug).await? else {
        return Ok(DashboardService::missing(flash, NOT_FOUND, &list_url(&state)));
    };

    let deleted = PostRepository::delete(&state.db, existing)
        .await
        .context("Failed to delete post")
        .map_err(AppError::database)?;
    info!(post.id = deleted.id, "Post deleted");

    Ok((flash.success("Post successfully deleted"), found(&list_url(&state))).into_response())
}
