//! Askama page models.
//!
//! Templates live under `templates/`. Every page embeds a [`Page`] (title,
//! flashes, navigation) and one of the generic bodies below, so the dashboard
//! needs only four templates for all of its entities.

pub mod form;
pub mod list;

use askama::Template;
use axum::response::Html;
use sitekit_core::AppError;
use sitekit_models::{SiteConfig, User};

use crate::state::AppState;
use crate::utils::flash::FlashMessage;

pub use form::{FieldView, FormView};
pub use list::{ActionView, DetailRow, DetailView, ListView, PaginationView, RowView};

pub fn render<T: Template>(template: &T) -> Result<Html<String>, AppError> {
    Ok(Html(template.render().map_err(AppError::internal)?))
}

/// Chrome shared by every page.
#[derive(Debug, Clone)]
pub struct Page {
    pub title: String,
    pub description: String,
    pub flashes: Vec<FlashMessage>,
    /// Empty for anonymous visitors, which also hides the dashboard navigation
    pub user_email: String,
    pub dashboard_prefix: String,
}

impl Page {
    pub fn dashboard(
        title: impl Into<String>,
        state: &AppState,
        user: &User,
        flashes: Vec<FlashMessage>,
    ) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            flashes,
            user_email: user.email.clone(),
            dashboard_prefix: state.paths.dashboard_prefix.clone(),
        }
    }

    pub fn public(
        title: impl Into<String>,
        description: impl Into<String>,
        state: &AppState,
        user: Option<&User>,
        flashes: Vec<FlashMessage>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            flashes,
            user_email: user.map(|u| u.email.clone()).unwrap_or_default(),
            dashboard_prefix: state.paths.dashboard_prefix.clone(),
        }
    }

    pub fn signed_in(&self) -> bool {
        !self.user_email.is_empty()
    }
}

#[derive(Template)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub page: Page,
    pub form: FormView,
}

#[derive(Template)]
#[template(path = "dashboard/list.html")]
pub struct ListTemplate {
    pub page: Page,
    pub list: ListView,
}

#[derive(Template)]
#[template(path = "dashboard/detail.html")]
pub struct DetailTemplate {
    pub page: Page,
    pub detail: DetailView,
}

#[derive(Template)]
#[template(path = "dashboard/form.html")]
pub struct FormTemplate {
    pub page: Page,
    pub form: FormView,
}

#[derive(Debug, Clone)]
pub struct CounterView {
    pub name: String,
    pub value: String,
}

#[derive(Template)]
#[template(path = "home/index.html")]
pub struct HomeTemplate {
    pub page: Page,
    pub config: SiteConfig,
    pub counters: Vec<CounterView>,
    pub form: FormView,
}

impl HomeTemplate {
    pub fn new(page: Page, config: SiteConfig, form: FormView) -> Self {
        let counters = config
            .counters()
            .into_iter()
            .map(|(name, value)| CounterView {
                name: name.to_string(),
                value: value.to_string(),
            })
            .collect();
        Self {
            page,
            config,
            counters,
            form,
        }
    }
}
