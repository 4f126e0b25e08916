//! Storage ports and their SQLite implementations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::config::BookingsOnDelete;
use crate::models::{
    booking::{Booking, Reservation},
    event::{Event, EventDetails},
    manager::Manager,
    site_settings::{SiteSettings, SiteSettingsRevision},
};
use crate::utils::error::AppError;

pub mod sqlite_booking_repo;
pub mod sqlite_event_repo;
pub mod sqlite_manager_repo;
pub mod sqlite_settings_repo;

pub use sqlite_booking_repo::SqliteBookingRepo;
pub use sqlite_event_repo::SqliteEventRepo;
pub use sqlite_manager_repo::SqliteManagerRepo;
pub use sqlite_settings_repo::SqliteSettingsRepo;

#[async_trait]
pub trait ManagerRepository: Send + Sync {
    /// Inserts a manager. With `unique_name` set, nothing is written and `None`
    /// is returned when the name is already taken.
    async fn create(
        &self,
        name: &str,
        password_hash: &str,
        unique_name: bool,
    ) -> Result<Option<Manager>, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Manager>, AppError>;
    async fn find_by_name(&self, name: &str) -> Result<Vec<Manager>, AppError>;
}

#[async_trait]
pub trait SettingsRepository: Send + Sync {
    async fn current(&self) -> Result<Option<SiteSettings>, AppError>;
    async fn save(
        &self,
        settings: &SiteSettings,
        changed_by: Option<i64>,
    ) -> Result<SiteSettings, AppError>;
    /// Most recent revisions first.
    async fn history(&self, limit: i64) -> Result<Vec<SiteSettingsRevision>, AppError>;
}

#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn create(&self, details: &EventDetails, now: DateTime<Utc>) -> Result<Event, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Event>, AppError>;
    async fn find_published(&self, id: i64) -> Result<Option<Event>, AppError>;
    /// Every event, most recently published first.
    async fn list_all(&self) -> Result<Vec<Event>, AppError>;
    /// Published events, most recently published first.
    async fn list_published(&self) -> Result<Vec<Event>, AppError>;
    async fn update(&self, id: i64, details: &EventDetails) -> Result<Option<Event>, AppError>;
    async fn publish(&self, id: i64, at: DateTime<Utc>) -> Result<u64, AppError>;
    async fn unpublish(&self, id: i64) -> Result<u64, AppError>;
    /// Deletes the event; with `only_published` an unpublished event is left alone.
    /// Returns the number of events removed.
    async fn delete(
        &self,
        id: i64,
        only_published: bool,
        bookings: BookingsOnDelete,
    ) -> Result<u64, AppError>;
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Claims `quantity` tickets of a published event and records the booking,
    /// all or nothing.
    async fn reserve(
        &self,
        event_id: i64,
        attendee_name: &str,
        quantity: i64,
    ) -> Result<Reservation, AppError>;
    async fn list_by_event(&self, event_id: i64) -> Result<Vec<Booking>, AppError>;
}
