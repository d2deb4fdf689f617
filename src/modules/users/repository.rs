use anyhow::Context;
use sitekit_core::{AppError, hash_password, verify_password};
use sitekit_db::{Fields, PgPool, Repository};
use sitekit_models::User;
use tracing::{instrument, warn};

/// User storage on top of the generic repository.
///
/// Writes accept a plaintext `password` field and persist its bcrypt hash in
/// `hashed_password`. A missing or empty password leaves the stored hash alone.
pub struct UserRepository;

impl UserRepository {
    pub async fn get_by_id(db: &PgPool, id: i64) -> Result<Option<User>, AppError> {
        Repository::<User>::get_by_id(db, id)
            .await
            .context("Failed to fetch user")
            .map_err(AppError::database)
    }

    pub async fn get_by_email(db: &PgPool, email: &str) -> Result<Option<User>, AppError> {
        Repository::<User>::get_by_params(db, &Fields::new().set("email", email))
            .await
            .context("Failed to fetch user by email")
            .map_err(AppError::database)
    }

    /// Whether another user (not `exclude_id`) already has `email`.
    pub async fn email_taken(
        db: &PgPool,
        email: &str,
        exclude_id: Option<i64>,
    ) -> Result<bool, AppError> {
        Repository::<User>::exists(db, &Fields::new().set("email", email), exclude_id)
            .await
            .context("Failed to check user email")
            .map_err(AppError::database)
    }

    #[instrument(skip_all)]
    pub async fn create(db: &PgPool, mut fields: Fields) -> Result<User, AppError> {
        hash_password_field(&mut fields)?;
        Repository::<User>::create(db, &fields)
            .await
            .context("Failed to insert user")
            .map_err(AppError::database)
    }

    #[instrument(skip_all, fields(user.id = user.id))]
    pub async fn update(db: &PgPool, user: &User, mut fields: Fields) -> Result<User, AppError> {
        hash_password_field(&mut fields)?;
        Repository::<User>::update(db, user, &fields)
            .await
            .context("Failed to update user")
            .map_err(AppError::database)
    }

    #[instrument(skip_all, fields(user.id = user.id))]
    pub async fn delete(db: &PgPool, user: User) -> Result<User, AppError> {
        Repository::<User>::delete(db, user)
            .await
            .context("Failed to delete user")
            .map_err(AppError::database)
    }

    /// The user owning `email` if `password` matches; `None` on bad credentials.
    #[instrument(skip(db, password))]
    pub async fn authenticate(
        db: &PgPool,
        email: &str,
        password: &str,
    ) -> Result<Option<User>, AppError> {
        let Some(user) = Self::get_by_email(db, email).await? else {
            return Ok(None);
        };

        match verify_password(password, &user.hashed_password) {
            Ok(true) => Ok(Some(user)),
            Ok(false) => Ok(None),
            Err(e) => {
                warn!(user.id = user.id, error = %e.error, "Stored password hash is malformed");
                Ok(None)
            }
        }
    }
}

fn hash_password_field(fields: &mut Fields) -> Result<(), AppError> {
    if let Some(value) = fields.remove("password") {
        if let Some(plain) = value.as_str().filter(|p| !p.is_empty()) {
            fields.insert("hashed_password", hash_password(plain)?);
        }
    }
    Ok(())
}
