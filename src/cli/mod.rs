//! Administrative tasks shared by the server startup and `sitekit-cli`.

use anyhow::{Context, bail};
use sitekit_config::AppConfig;
use sitekit_db::{Fields, PgPool, Repository, run_migrations};
use sitekit_models::{Email, User, UserForm};
use tracing::{debug, info};

use crate::modules::site_config::SiteConfigRepository;
use crate::modules::users::repository::UserRepository;

/// Creates a dashboard user. Fails if the email is invalid or already taken.
pub async fn create_superuser(db: &PgPool, email: &str, password: &str) -> anyhow::Result<User> {
    let form = UserForm {
        email: email.trim().to_string(),
        password: password.to_string(),
    };
    let errors = form.check();
    if !errors.is_empty() {
        let details = errors
            .iter()
            .map(|(field, messages)| format!("{field}: {}", messages.join(" ")))
            .collect::<Vec<_>>()
            .join("; ");
        bail!("Invalid user: {details}");
    }

    if UserRepository::get_by_email(db, &form.email)
        .await
        .map_err(|e| e.error)?
        .is_some()
    {
        bail!("User with this email already exists");
    }

    let user = UserRepository::create(db, form.to_fields())
        .await
        .map_err(|e| e.error)?;
    info!(user.id = user.id, "Superuser created");
    Ok(user)
}

/// Creates `FIRST_SUPERUSER` unless it exists already or is not configured.
pub async fn ensure_first_superuser(db: &PgPool, config: &AppConfig) -> anyhow::Result<()> {
    let (Some(email), Some(password)) = (&config.first_superuser, &config.first_superuser_password)
    else {
        debug!("FIRST_SUPERUSER not configured, skipping");
        return Ok(());
    };

    let existing = UserRepository::get_by_email(db, email)
        .await
        .map_err(|e| e.error)?;
    if existing.is_some() {
        debug!(email = %email, "First superuser already exists");
        return Ok(());
    }

    create_superuser(db, email, password).await?;
    Ok(())
}

/// Brings a database to a usable state: schema, site configuration row, first superuser.
pub async fn init_db(db: &PgPool, config: &AppConfig) -> anyhow::Result<()> {
    run_migrations(db).await.context("Failed to run migrations")?;
    SiteConfigRepository::ensure(db).await.map_err(|e| e.error)?;
    ensure_first_superuser(db, config).await?;

    // Fresh installs have no mailing list; contact messages are still stored.
    if Repository::<Email>::count(db, &Fields::new())
        .await
        .context("Failed to count emails")?
        == 0
    {
        info!("Mailing list is empty; contact messages will not be emailed");
    }
    Ok(())
}
