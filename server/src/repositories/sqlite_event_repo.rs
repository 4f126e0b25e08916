use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::config::BookingsOnDelete;
use crate::models::event::{Event, EventDetails};
use crate::repositories::EventRepository;
use crate::utils::error::AppError;

pub struct SqliteEventRepo {
    pool: SqlitePool,
}

impl SqliteEventRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventRepository for SqliteEventRepo {
    async fn create(&self, details: &EventDetails, now: DateTime<Utc>) -> Result<Event, AppError> {
        // RETURNING rows are drained with fetch_all: the statement must run to completion
        // (and autocommit) before the caller answers the request
        let event = sqlx::query_as::<_, Event>(
            "INSERT INTO events (name, description, event_date, venue, tickets_available, ticket_price, is_published, publish_date)
             VALUES (?, ?, ?, ?, ?, ?, 0, ?)
             RETURNING *",
        )
        .bind(&details.name)
        .bind(&details.description)
        .bind(&details.event_date)
        .bind(&details.venue)
        .bind(details.tickets_available)
        .bind(details.ticket_price.to_string())
        .bind(now)
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .next()
        .ok_or(sqlx::Error::RowNotFound)?;
        Ok(event)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Event>, AppError> {
        let event = sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(event)
    }

    async fn find_published(&self, id: i64) -> Result<Option<Event>, AppError> {
        let event =
            sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = ? AND is_published = 1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(event)
    }

    async fn list_all(&self) -> Result<Vec<Event>, AppError> {
        let events =
            sqlx::query_as::<_, Event>("SELECT * FROM events ORDER BY publish_date DESC, id DESC")
                .fetch_all(&self.pool)
                .await?;
        Ok(events)
    }

    async fn list_published(&self) -> Result<Vec<Event>, AppError> {
        let events = sqlx::query_as::<_, Event>(
            "SELECT * FROM events WHERE is_published = 1 ORDER BY publish_date DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(events)
    }

    async fn update(&self, id: i64, details: &EventDetails) -> Result<Option<Event>, AppError> {
        // a blank venue on the edit form keeps the current one
        let event = sqlx::query_as::<_, Event>(
            "UPDATE events
             SET name = ?, description = ?, event_date = ?, venue = COALESCE(?, venue),
                 tickets_available = ?, ticket_price = ?
             WHERE id = ?
             RETURNING *",
        )
        .bind(&details.name)
        .bind(&details.description)
        .bind(&details.event_date)
        .bind(&details.venue)
        .bind(details.tickets_available)
        .bind(details.ticket_price.to_string())
        .bind(id)
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .next();
        Ok(event)
    }

    async fn publish(&self, id: i64, at: DateTime<Utc>) -> Result<u64, AppError> {
        let result =
            sqlx::query("UPDATE events SET is_published = 1, publish_date = ? WHERE id = ?")
                .bind(at)
                .bind(id)
                .execute(&self.pool)
                .await?;
        Ok(result.rows_affected())
    }

    async fn unpublish(&self, id: i64) -> Result<u64, AppError> {
        let result = sqlx::query("UPDATE events SET is_published = 0 WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn delete(
        &self,
        id: i64,
        only_published: bool,
        bookings: BookingsOnDelete,
    ) -> Result<u64, AppError> {
        let (delete_sql, delete_unbooked_sql) = if only_published {
            (
                "DELETE FROM events WHERE id = ? AND is_published = 1",
                "DELETE FROM events WHERE id = ? AND is_published = 1
                 AND NOT EXISTS (SELECT 1 FROM bookings WHERE event_id = ?)",
            )
        } else {
            (
                "DELETE FROM events WHERE id = ?",
                "DELETE FROM events WHERE id = ?
                 AND NOT EXISTS (SELECT 1 FROM bookings WHERE event_id = ?)",
            )
        };

        match bookings {
            BookingsOnDelete::Retain => {
                let result = sqlx::query(delete_sql).bind(id).execute(&self.pool).await?;
                Ok(result.rows_affected())
            }
            BookingsOnDelete::Cascade => {
                let mut tx = self.pool.begin().await?;
                let removed = sqlx::query(delete_sql)
                    .bind(id)
                    .execute(&mut *tx)
                    .await?
                    .rows_affected();

                if removed > 0 {
                    let dropped = sqlx::query("DELETE FROM bookings WHERE event_id = ?")
                        .bind(id)
                        .execute(&mut *tx)
                        .await?
                        .rows_affected();
                    tracing::info!(event_id = id, bookings = dropped, "Cascaded booking delete");
                }

                tx.commit().await?;
                Ok(removed)
            }
            BookingsOnDelete::Restrict => {
                let removed = sqlx::query(delete_unbooked_sql)
                    .bind(id)
                    .bind(id)
                    .execute(&self.pool)
                    .await?
                    .rows_affected();

                if removed == 0 {
                    let target = if only_published {
                        self.find_published(id).await?
                    } else {
                        self.find_by_id(id).await?
                    };
                    if target.is_some() {
                        return Err(AppError::Conflict(
                            "Event has bookings and cannot be deleted.".to_string(),
                        ));
                    }
                }
                Ok(removed)
            }
        }
    }
}
