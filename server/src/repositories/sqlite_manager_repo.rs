use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

use crate::models::manager::Manager;
use crate::repositories::ManagerRepository;
use crate::utils::error::AppError;

pub struct SqliteManagerRepo {
    pool: SqlitePool,
}

impl SqliteManagerRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ManagerRepository for SqliteManagerRepo {
    async fn create(
        &self,
        name: &str,
        password_hash: &str,
        unique_name: bool,
    ) -> Result<Option<Manager>, AppError> {
        let now = Utc::now();

        // fetch_all steps each RETURNING statement to completion, so the row is committed
        // before the caller redirects to a page that reads it
        let created = if unique_name {
            // check and insert in one statement so two registrations cannot both win
            sqlx::query_as::<_, Manager>(
                "INSERT INTO managers (name, password_hash, created_at)
                 SELECT ?, ?, ?
                 WHERE NOT EXISTS (SELECT 1 FROM managers WHERE name = ?)
                 RETURNING *",
            )
            .bind(name)
            .bind(password_hash)
            .bind(now)
            .bind(name)
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .next()
        } else {
            let managers = sqlx::query_as::<_, Manager>(
                "INSERT INTO managers (name, password_hash, created_at) VALUES (?, ?, ?) RETURNING *",
            )
            .bind(name)
            .bind(password_hash)
            .bind(now)
            .fetch_all(&self.pool)
            .await?;
            managers.into_iter().next()
        };

        Ok(created)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Manager>, AppError> {
        let manager = sqlx::query_as::<_, Manager>("SELECT * FROM managers WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(manager)
    }

    async fn find_by_name(&self, name: &str) -> Result<Vec<Manager>, AppError> {
        let managers =
            sqlx::query_as::<_, Manager>("SELECT * FROM managers WHERE name = ? ORDER BY id")
                .bind(name)
                .fetch_all(&self.pool)
                .await?;
        Ok(managers)
    }
}
