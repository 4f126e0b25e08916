use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Booking {
    pub id: i64,
    pub event_id: i64,
    pub attendee_name: String,
    pub tickets_booked: i64,
    pub booked_at: DateTime<Utc>,
}

/// Result of trying to claim tickets against an event's inventory.
#[derive(Debug)]
pub enum Reservation {
    Booked(Booking),
    Insufficient { available: i64 },
    EventMissing,
}
