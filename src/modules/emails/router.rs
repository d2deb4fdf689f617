use crate::modules::emails::controller::{
    create_email, create_email_form, delete_email, email_detail, list_emails, update_email,
    update_email_form,
};
use crate::state::AppState;
use axum::{Router, routing::get};

pub fn init_emails_router() -> Router<AppState> {
    Router::new()
        .route("/email/", get(list_emails))
        .route("/email/create/", get(create_email_form).post(create_email))
        .route("/email/{email}/detail/", get(email_detail))
        .route("/email/{email}/update/", get(update_email_form).post(update_email))
        .route("/email/{email}/delete/", get(delete_email))
}
