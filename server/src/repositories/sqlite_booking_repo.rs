use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

use crate::models::booking::{Booking, Reservation};
use crate::repositories::BookingRepository;
use crate::utils::error::AppError;

pub struct SqliteBookingRepo {
    pool: SqlitePool,
}

impl SqliteBookingRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingRepository for SqliteBookingRepo {
    async fn reserve(
        &self,
        event_id: i64,
        attendee_name: &str,
        quantity: i64,
    ) -> Result<Reservation, AppError> {
        let mut tx = self.pool.begin().await?;

        // check and decrement in one statement: concurrent buyers never both pass
        let claimed = sqlx::query(
            "UPDATE events SET tickets_available = tickets_available - ?
             WHERE id = ? AND is_published = 1 AND tickets_available >= ?",
        )
        .bind(quantity)
        .bind(event_id)
        .bind(quantity)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if claimed == 0 {
            let available: Option<i64> = sqlx::query_scalar(
                "SELECT tickets_available FROM events WHERE id = ? AND is_published = 1",
            )
            .bind(event_id)
            .fetch_optional(&mut *tx)
            .await?;
            tx.rollback().await?;

            return Ok(match available {
                Some(available) => Reservation::Insufficient { available },
                None => Reservation::EventMissing,
            });
        }

        // any error from here on drops `tx`, which rolls the decrement back
        let booking = sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings (event_id, attendee_name, tickets_booked, booked_at)
             VALUES (?, ?, ?, ?)
             RETURNING *",
        )
        .bind(event_id)
        .bind(attendee_name)
        .bind(quantity)
        .bind(Utc::now())
        .fetch_all(&mut *tx)
        .await?
        .into_iter()
        .next()
        .ok_or(sqlx::Error::RowNotFound)?;

        tx.commit().await?;
        Ok(Reservation::Booked(booking))
    }

    async fn list_by_event(&self, event_id: i64) -> Result<Vec<Booking>, AppError> {
        let bookings =
            sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE event_id = ? ORDER BY id")
                .bind(event_id)
                .fetch_all(&self.pool)
                .await?;
        Ok(bookings)
    }
}
