//! Outbound mail.
//!
//! Handlers never talk SMTP themselves: they enqueue an [`EmailJob`] and return.
//! A single worker task drains the queue, looks up the recipients and sends.

use askama::Template;
use lettre::message::{MultiPart, SinglePart, header};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message as MailMessage, SmtpTransport, Transport};
use sitekit_config::EmailConfig;
use sitekit_core::AppError;
use sitekit_db::{Fields, OrderBy, PgPool, Repository};
use sitekit_models::{Email, Message, SiteConfig};
use tokio::sync::mpsc;
use tracing::{error, info, instrument, warn};

use crate::modules::site_config::SiteConfigRepository;

#[derive(Debug, Clone)]
pub enum EmailJob {
    /// Fan a new contact-form message out to every active mailing-list address.
    ContactMessage(Message),
}

#[derive(Clone)]
pub struct EmailQueue {
    sender: mpsc::UnboundedSender<EmailJob>,
}

impl EmailQueue {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<EmailJob>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }

    pub fn enqueue(&self, job: EmailJob) {
        if self.sender.send(job).is_err() {
            warn!("Email worker is gone, dropping job");
        }
    }
}

#[derive(Template)]
#[template(path = "email/contact_message.html")]
struct ContactMessageEmail<'a> {
    site_name: &'a str,
    message: &'a Message,
    company: &'a str,
    phone: &'a str,
}

impl<'a> ContactMessageEmail<'a> {
    fn new(site_name: &'a str, message: &'a Message) -> Self {
        Self {
            site_name,
            message,
            company: message.company_name.as_deref().unwrap_or("-"),
            phone: message.phone_number.as_deref().unwrap_or("-"),
        }
    }
}

pub struct EmailService {
    config: EmailConfig,
}

impl EmailService {
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    #[instrument(skip(self, message, site), fields(message.id = message.id))]
    pub async fn send_contact_message(
        &self,
        to_email: &str,
        message: &Message,
        site: &SiteConfig,
    ) -> Result<(), AppError> {
        let site_name = if site.site_name.is_empty() {
            self.config.from_name.as_str()
        } else {
            site.site_name.as_str()
        };
        let subject = format!("{site_name} - contact messages");

        let html_body = ContactMessageEmail::new(site_name, message)
            .render()
            .map_err(AppError::internal)?;
        let text_body = contact_message_text(message);

        self.send_email(to_email, &subject, &text_body, &html_body)
            .await
    }

    #[instrument(skip(self, html_body, text_body))]
    async fn send_email(
        &self,
        to_email: &str,
        subject: &str,
        text_body: &str,
        html_body: &str,
    ) -> Result<(), AppError> {
        let from = format!("{} <{}>", self.config.from_name, self.config.from_email);

        let email = MailMessage::builder()
            .from(
                from.parse()
                    .map_err(|e| AppError::internal(anyhow::anyhow!("Invalid from email: {e}")))?,
            )
            .to(to_email
                .parse()
                .map_err(|e| AppError::internal(anyhow::anyhow!("Invalid to email: {e}")))?)
            .subject(subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(header::ContentType::TEXT_PLAIN)
                            .body(text_body.to_string()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(header::ContentType::TEXT_HTML)
                            .body(html_body.to_string()),
                    ),
            )
            .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to build email: {e}")))?;

        let mailer = self.transport()?;

        tokio::task::spawn_blocking(move || mailer.send(&email))
            .await
            .map_err(|e| AppError::internal(anyhow::anyhow!("Task join error: {e}")))?
            .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to send email: {e}")))?;

        Ok(())
    }

    fn transport(&self) -> Result<SmtpTransport, AppError> {
        let builder = if self.config.smtp_tls {
            SmtpTransport::starttls_relay(&self.config.smtp_host).map_err(|e| {
                AppError::internal(anyhow::anyhow!("Failed to create SMTP relay: {e}"))
            })?
        } else {
            SmtpTransport::builder_dangerous(&self.config.smtp_host)
        };
        let builder = builder.port(self.config.smtp_port);

        let builder = if self.config.has_credentials() {
            builder.credentials(Credentials::new(
                self.config.smtp_username.clone(),
                self.config.smtp_password.clone(),
            ))
        } else {
            builder
        };

        Ok(builder.build())
    }
}

fn contact_message_text(message: &Message) -> String {
    format!(
        "Full name: {}\n\
         Company: {}\n\
         Email: {}\n\
         Phone number: {}\n\
         Title: {}\n\n\
         {}\n",
        message.fullname,
        message.company_name.as_deref().unwrap_or("-"),
        message.email,
        message.phone_number.as_deref().unwrap_or("-"),
        message.title,
        message.body,
    )
}

/// Drains the queue until every [`EmailQueue`] handle is dropped.
pub fn spawn_email_worker(
    mut receiver: mpsc::UnboundedReceiver<EmailJob>,
    db: PgPool,
    config: EmailConfig,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let service = EmailService::new(config.clone());
        while let Some(job) = receiver.recv().await {
            if !config.enabled {
                info!(?job, "Emails disabled, skipping job");
                continue;
            }
            match job {
                EmailJob::ContactMessage(message) => {
                    if let Err(e) = deliver_contact_message(&service, &db, &message).await {
                        error!(message.id = message.id, error = ?e.error, "Failed to deliver contact message");
                    }
                }
            }
        }
        info!("Email worker stopped");
    })
}

async fn deliver_contact_message(
    service: &EmailService,
    db: &PgPool,
    message: &Message,
) -> Result<(), AppError> {
    let site = SiteConfigRepository::load(db).await?;
    let recipients = Repository::<Email>::get_all(
        db,
        &Fields::new().set("is_active", true),
        &[OrderBy::asc("id")],
        None,
        0,
    )
    .await?;

    if recipients.is_empty() {
        warn!(message.id = message.id, "No active mailing-list addresses");
        return Ok(());
    }

    // One failed recipient must not stop the rest.
    for recipient in &recipients {
        if let Err(e) = service
            .send_contact_message(&recipient.email, message, &site)
            .await
        {
            error!(to = %recipient.email, error = ?e.error, "Failed to send contact message");
        }
    }

    info!(message.id = message.id, recipients = recipients.len(), "Contact message delivered");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn message() -> Message {
        Message {
            id: 7,
            fullname: "Ada Lovelace".to_string(),
            company_name: None,
            email: "ada@example.com".to_string(),
            phone_number: Some("+44 20 7946 0958".to_string()),
            title: "Engines".to_string(),
            body: "<b>Hello</b>".to_string(),
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[test]
    fn test_text_body_lists_every_field() {
        let text = contact_message_text(&message());

        assert!(text.contains("Full name: Ada Lovelace"));
        assert!(text.contains("Company: -"));
        assert!(text.contains("Phone number: +44 20 7946 0958"));
        assert!(text.ends_with("<b>Hello</b>\n"));
    }

    #[test]
    fn test_html_body_escapes_message() {
        let message = message();
        let html = ContactMessageEmail::new("Acme", &message).render().unwrap();

        assert!(html.contains("&lt;b&gt;Hello&lt;/b&gt;"));
        assert!(!html.contains("<b>Hello</b>"));
    }

    #[tokio::test]
    async fn test_queue_delivers_jobs_in_order() {
        let (queue, mut receiver) = EmailQueue::new();
        queue.enqueue(EmailJob::ContactMessage(message()));

        match receiver.recv().await {
            Some(EmailJob::ContactMessage(m)) => assert_eq!(m.id, 7),
            None => panic!("queue was empty"),
        }
    }
}
