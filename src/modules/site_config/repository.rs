use anyhow::{Context, anyhow};
use sitekit_core::AppError;
use sitekit_db::{Fields, PgPool, Repository};
use sitekit_models::SiteConfig;
use tracing::{debug, instrument};

/// Access to the single `site_config` row.
///
/// The row is guarded by a unique `singleton` column, so `ensure` is an
/// idempotent upsert and concurrent first access cannot create two rows.
pub struct SiteConfigRepository;

impl SiteConfigRepository {
    #[instrument(skip_all)]
    pub async fn ensure(db: &PgPool) -> Result<(), AppError> {
        let result = sqlx::query("INSERT INTO site_config DEFAULT VALUES ON CONFLICT (singleton) DO NOTHING")
            .execute(db)
            .await
            .context("Failed to create site configuration")
            .map_err(AppError::database)?;

        debug!(created = result.rows_affected() == 1, "Site configuration ensured");
        Ok(())
    }

    pub async fn load(db: &PgPool) -> Result<SiteConfig, AppError> {
        Self::ensure(db).await?;
        Repository::<SiteConfig>::get_by_params(db, &Fields::new())
            .await
            .context("Failed to load site configuration")
            .map_err(AppError::database)?
            .ok_or_else(|| AppError::internal(anyhow!("Site configuration row is missing")))
    }

    #[instrument(skip_all)]
    pub async fn update(db: &PgPool, fields: &Fields) -> Result<SiteConfig, AppError> {
        let current = Self::load(db).await?;
        Repository::<SiteConfig>::update(db, &current, fields)
            .await
            .context("Failed to update site configuration")
            .map_err(AppError::database)
    }
}
