use anyhow::anyhow;
use axum::{
    Form,
    extract::{FromRequest, Request, rejection::FormRejection},
};
use serde::de::DeserializeOwned;
use sitekit_core::AppError;
use sitekit_db::RepoError;
use sitekit_models::FormErrors;
use sitekit_models::form::ALREADY_EXISTS;

/// An urlencoded form body.
///
/// Only malformed bodies are rejected here. Field-level problems are left to
/// the form's own `check()` so the page can be re-rendered with them.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlForm<T>(pub T);

impl<T, S> FromRequest<S> for HtmlForm<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(value) = Form::<T>::from_request(req, state)
            .await
            .map_err(|rejection| match rejection {
                FormRejection::InvalidFormContentType(_) => AppError::bad_request(anyhow!(
                    "Missing 'Content-Type: application/x-www-form-urlencoded' header"
                )),
                FormRejection::FailedToDeserializeForm(_)
                | FormRejection::FailedToDeserializeFormBody(_) => {
                    AppError::bad_request(anyhow!("Invalid field type in form"))
                }
                _ => AppError::bad_request(anyhow!("Invalid request body")),
            })?;

        Ok(HtmlForm(value))
    }
}

/// Whether `err` came from a unique constraint rejecting the write.
pub fn is_unique_violation(err: &AppError) -> bool {
    err.error
        .downcast_ref::<RepoError>()
        .is_some_and(RepoError::is_unique_violation)
}

/// Records a unique-constraint race on `field` as a form error.
///
/// Any other error is handed back to the caller.
pub fn unique_to_form_error(
    err: AppError,
    field: &str,
    errors: &mut FormErrors,
) -> Result<(), AppError> {
    if is_unique_violation(&err) {
        errors.add(field, ALREADY_EXISTS);
        Ok(())
    } else {
        Err(err)
    }
}
