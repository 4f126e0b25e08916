use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

use crate::models::site_settings::{SiteSettings, SiteSettingsRevision};
use crate::repositories::SettingsRepository;
use crate::utils::error::AppError;

pub struct SqliteSettingsRepo {
    pool: SqlitePool,
}

impl SqliteSettingsRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SettingsRepository for SqliteSettingsRepo {
    async fn current(&self) -> Result<Option<SiteSettings>, AppError> {
        let settings = sqlx::query_as::<_, SiteSettings>(
            "SELECT site_name, site_description FROM site_settings WHERE id = 1",
        )
        .fetch_optional(&self.pool)
        .await?;
        Ok(settings)
    }

    async fn save(
        &self,
        settings: &SiteSettings,
        changed_by: Option<i64>,
    ) -> Result<SiteSettings, AppError> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let saved = sqlx::query_as::<_, SiteSettings>(
            "INSERT INTO site_settings (id, site_name, site_description, updated_at)
             VALUES (1, ?, ?, ?)
             ON CONFLICT (id) DO UPDATE SET
                 site_name = excluded.site_name,
                 site_description = excluded.site_description,
                 updated_at = excluded.updated_at
             RETURNING site_name, site_description",
        )
        .bind(&settings.site_name)
        .bind(&settings.site_description)
        .bind(now)
        .fetch_all(&mut *tx)
        .await?
        .into_iter()
        .next()
        .ok_or(sqlx::Error::RowNotFound)?;

        sqlx::query(
            "INSERT INTO site_settings_history (site_name, site_description, changed_by, changed_at)
             VALUES (?, ?, ?, ?)",
        )
        .bind(&settings.site_name)
        .bind(&settings.site_description)
        .bind(changed_by)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(saved)
    }

    async fn history(&self, limit: i64) -> Result<Vec<SiteSettingsRevision>, AppError> {
        let revisions = sqlx::query_as::<_, SiteSettingsRevision>(
            "SELECT * FROM site_settings_history ORDER BY id DESC LIMIT ?",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(revisions)
    }
}
