use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use sitekit_core::AppError;
use sitekit_models::{ContactForm, FormErrors, User};

use crate::middleware::auth::MaybeUser;
use crate::modules::home::service::HomeService;
use crate::modules::site_config::SiteConfigRepository;
use crate::state::AppState;
use crate::utils::flash::Flash;
use crate::utils::redirect::found;
use crate::validator::HtmlForm;
use crate::views::{FormView, HomeTemplate, Page, render};

fn contact_form(form: &ContactForm, errors: &FormErrors) -> FormView {
    FormView::new("/", "Send")
        .text("fullname", "Full name", &form.fullname)
        .required()
        .text("company_name", "Company", form.company_name.as_deref().unwrap_or_default())
        .email("email", "Email", &form.email)
        .required()
        .text("phone_number", "Phone number", form.phone_number.as_deref().unwrap_or_default())
        .text("title", "Title", &form.title)
        .required()
        .textarea("body", "Message", &form.body)
        .required()
        .errors(errors)
}

async fn home_page(
    state: &AppState,
    user: Option<&User>,
    flash: Flash,
    form: FormView,
) -> Result<Response, AppError> {
    let config = SiteConfigRepository::load(&state.db).await?;
    let (flash, messages) = flash.take();
    let page = Page::public(
        config.company_name.clone(),
        config.meta_description().to_string(),
        state,
        user,
        messages,
    );
    Ok((flash, render(&HomeTemplate::new(page, config, form))?).into_response())
}

pub async fn home(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    flash: Flash,
) -> Result<Response, AppError> {
    let form = contact_form(&ContactForm::default(), &FormErrors::new());
    home_page(&state, user.as_ref(), flash, form).await
}

pub async fn submit_contact(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    flash: Flash,
    HtmlForm(form): HtmlForm<ContactForm>,
) -> Result<Response, AppError> {
    let errors = form.check();
    if !errors.is_empty() {
        return home_page(&state, user.as_ref(), flash, contact_form(&form, &errors)).await;
    }

    HomeService::submit_contact(&state.db, &state.email_queue, &form).await?;
    Ok((flash.success("Message successfully sent"), found("/")).into_response())
}
