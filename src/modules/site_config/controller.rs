use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use sitekit_core::AppError;
use sitekit_models::{ConfigForm, FormErrors, SiteConfig};
use tracing::{info, instrument};

use crate::middleware::auth::AuthUser;
use crate::modules::dashboard::controller::{render_detail, render_form};
use crate::modules::site_config::SiteConfigRepository;
use crate::state::AppState;
use crate::utils::flash::Flash;
use crate::utils::redirect::found;
use crate::validator::HtmlForm;
use crate::views::{DetailView, FormView};

fn config_form(state: &AppState, form: &ConfigForm, errors: &FormErrors) -> FormView {
    FormView::new(state.paths.dashboard("config/update/"), "Save")
        .text("company_name", "Company name", &form.company_name)
        .text("site_name", "Site name", &form.site_name)
        .text("seo_description", "SEO description", &form.seo_description)
        .email("email", "Email", form.email.as_deref().unwrap_or_default())
        .text("phone_number", "Phone number", form.phone_number.as_deref().unwrap_or_default())
        .text("address", "Address", &form.address)
        .text("location", "Location", &form.location)
        .text("counter_line_name_1", "Counter 1 name", &form.counter_line_name_1)
        .text("counter_line_value_1", "Counter 1 value", &form.counter_line_value_1)
        .text("counter_line_name_2", "Counter 2 name", &form.counter_line_name_2)
        .text("counter_line_value_2", "Counter 2 value", &form.counter_line_value_2)
        .text("counter_line_name_3", "Counter 3 name", &form.counter_line_name_3)
        .text("counter_line_value_3", "Counter 3 value", &form.counter_line_value_3)
        .text("counter_line_name_4", "Counter 4 name", &form.counter_line_name_4)
        .text("counter_line_value_4", "Counter 4 value", &form.counter_line_value_4)
        .errors(errors)
}

fn config_detail_view(state: &AppState, config: &SiteConfig) -> DetailView {
    let mut detail = DetailView::default()
        .row("Company name", config.company_name.clone())
        .row("Site name", config.site_name.clone())
        .row("SEO description", config.seo_description.clone())
        .row("Email", config.email.clone())
        .row("Phone number", config.phone_number.clone())
        .row("Address", config.address.clone())
        .row("Location", config.location.clone());
    for (name, value) in config.counters() {
        detail = detail.row("Counter", format!("{value} {name}"));
    }
    detail.action("Update", state.paths.dashboard("config/update/"))
}

pub async fn config_detail(
    State(state): State<AppState>,
    AuthUser(current): AuthUser,
    flash: Flash,
) -> Result<Response, AppError> {
    let config = SiteConfigRepository::load(&state.db).await?;
    let detail = config_detail_view(&state, &config);
    render_detail(&state, &current, flash, "Site configuration", detail)
}

pub async fn update_config_form(
    State(state): State<AppState>,
    AuthUser(current): AuthUser,
    flash: Flash,
) -> Result<Response, AppError> {
    let config = SiteConfigRepository::load(&state.db).await?;
    let form = config_form(&state, &ConfigForm::from_config(&config), &FormErrors::new());
    render_form(&state, &current, flash, "Update site configuration", form)
}

#[instrument(skip_all)]
pub async fn update_config(
    State(state): State<AppState>,
    AuthUser(current): AuthUser,
    flash: Flash,
    HtmlForm(form): HtmlForm<ConfigForm>,
) -> Result<Response, AppError> {
    let errors = form.check();
    if !errors.is_empty() {
        let view = config_form(&state, &form, &errors);
        return render_form(&state, &current, flash, "Update site configuration", view);
    }

    let config = SiteConfigRepository::update(&state.db, &form.to_fields()).await?;
    info!(config.id = config.id, "Site configuration updated");

    Ok((
        flash.success("Site configuration successfully updated"),
        found(&state.paths.dashboard("config/")),
    )
        .into_response())
}
