use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};

use crate::utils::error::AppError;

pub const INVALID_EVENT_MESSAGE: &str = "All fields are required and must have valid values.";

#[derive(Debug, Clone, Serialize)]
pub struct Event {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub event_date: Option<String>,
    pub venue: Option<String>,
    pub tickets_available: i64,
    pub ticket_price: Decimal,
    pub is_published: bool,
    pub publish_date: DateTime<Utc>,
}

impl Event {
    /// Date as shown to attendees, e.g. `Jun 1, 2025`.
    pub fn display_date(&self) -> String {
        format_event_date(self.event_date.as_deref())
    }
}

// ticket_price is stored as TEXT so the decimal survives SQLite untouched
impl<'r> FromRow<'r, SqliteRow> for Event {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let raw_price: String = row.try_get("ticket_price")?;
        let ticket_price =
            Decimal::from_str(&raw_price).map_err(|e| sqlx::Error::ColumnDecode {
                index: "ticket_price".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            event_date: row.try_get("event_date")?,
            venue: row.try_get("venue")?,
            tickets_available: row.try_get("tickets_available")?,
            ticket_price,
            is_published: row.try_get("is_published")?,
            publish_date: row.try_get("publish_date")?,
        })
    }
}

/// Raw create/edit form, named after the HTML form fields.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct EventForm {
    pub event_name: String,
    pub event_description: String,
    pub event_date: String,
    pub venue: Option<String>,
    pub tickets_available: String,
    pub ticket_price: String,
}

/// Validated event fields, ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct EventDetails {
    pub name: String,
    pub description: String,
    pub event_date: String,
    pub venue: Option<String>,
    pub tickets_available: i64,
    pub ticket_price: Decimal,
}

impl TryFrom<EventForm> for EventDetails {
    type Error = AppError;

    fn try_from(form: EventForm) -> Result<Self, Self::Error> {
        let name = form.event_name.trim();
        let description = form.event_description.trim();
        let event_date = form.event_date.trim();

        let tickets_available = form.tickets_available.trim().parse::<i64>().ok();
        let ticket_price = Decimal::from_str(form.ticket_price.trim()).ok();

        match (tickets_available, ticket_price) {
            (Some(tickets), Some(price))
                if !name.is_empty()
                    && !description.is_empty()
                    && !event_date.is_empty()
                    && tickets >= 0
                    && !price.is_sign_negative() =>
            {
                Ok(Self {
                    name: name.to_string(),
                    description: description.to_string(),
                    event_date: event_date.to_string(),
                    venue: form
                        .venue
                        .map(|v| v.trim().to_string())
                        .filter(|v| !v.is_empty()),
                    tickets_available: tickets,
                    ticket_price: price,
                })
            }
            _ => {
                tracing::debug!(
                    event_name = !name.is_empty(),
                    event_description = !description.is_empty(),
                    event_date = !event_date.is_empty(),
                    tickets_available = ?tickets_available,
                    ticket_price = ?ticket_price,
                    "Event form failed validation"
                );
                Err(AppError::ValidationError(INVALID_EVENT_MESSAGE.to_string()))
            }
        }
    }
}

/// Formats a stored event date in en-US medium style, `TBD` when absent.
/// Values that are not a recognisable date are returned as entered.
pub fn format_event_date(raw: Option<&str>) -> String {
    let raw = match raw.map(str::trim) {
        Some(value) if !value.is_empty() => value,
        _ => return "TBD".to_string(),
    };

    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M")
                .ok()
                .map(|dt| dt.date())
        })
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.date_naive())
        });

    match date {
        Some(date) => date.format("%b %-d, %Y").to_string(),
        None => raw.to_string(),
    }
}
