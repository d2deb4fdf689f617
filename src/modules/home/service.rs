use anyhow::Context;
use sitekit_core::AppError;
use sitekit_db::PgPool;
use sitekit_models::{ContactForm, Message};
use tracing::{info, instrument};

use crate::modules::messages::MessageRepository;
use crate::utils::email::{EmailJob, EmailQueue};

pub struct HomeService;

impl HomeService {
    /// Stores a validated contact message and queues its delivery to the mailing list.
    #[instrument(skip_all, fields(email = %form.email))]
    pub async fn submit_contact(
        db: &PgPool,
        queue: &EmailQueue,
        form: &ContactForm,
    ) -> Result<Message, AppError> {
        let message = MessageRepository::create(db, &form.to_fields())
            .await
            .context("Failed to store contact message")
            .map_err(AppError::database)?;

        info!(message.id = message.id, "Contact message received");
        queue.enqueue(EmailJob::ContactMessage(message.clone()));
        Ok(message)
    }
}
