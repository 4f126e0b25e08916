use std::sync::Arc;

use tracing::{info, warn};

use crate::models::booking::{Booking, Reservation};
use crate::repositories::BookingRepository;
use crate::utils::error::AppError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PurchaseRejection {
    MissingAttendee,
    InvalidQuantity,
    InsufficientTickets { requested: i64, available: i64 },
}

#[derive(Debug)]
pub enum PurchaseOutcome {
    Confirmed(Booking),
    Rejected(PurchaseRejection),
}

/// Validates purchase requests and turns them into bookings against live inventory.
pub struct TicketPurchaseEngine {
    bookings: Arc<dyn BookingRepository>,
}

impl TicketPurchaseEngine {
    pub fn new(bookings: Arc<dyn BookingRepository>) -> Self {
        Self { bookings }
    }

    /// Rejections leave the store untouched. A missing (or unpublished) event is
    /// `AppError::NotFound`; a store failure rolls the whole purchase back.
    pub async fn purchase(
        &self,
        event_id: i64,
        attendee_name: &str,
        quantity: &str,
    ) -> Result<PurchaseOutcome, AppError> {
        let (attendee_name, quantity) = match validate(attendee_name, quantity) {
            Ok(valid) => valid,
            Err(rejection) => {
                warn!(event_id, ?rejection, "Invalid purchase request");
                return Ok(PurchaseOutcome::Rejected(rejection));
            }
        };

        match self
            .bookings
            .reserve(event_id, attendee_name, quantity)
            .await?
        {
            Reservation::Booked(booking) => {
                info!(
                    event_id,
                    booking_id = booking.id,
                    tickets = quantity,
                    "Tickets purchased"
                );
                Ok(PurchaseOutcome::Confirmed(booking))
            }
            Reservation::Insufficient { available } => {
                warn!(
                    event_id,
                    requested = quantity,
                    available,
                    "Not enough tickets"
                );
                Ok(PurchaseOutcome::Rejected(
                    PurchaseRejection::InsufficientTickets {
                        requested: quantity,
                        available,
                    },
                ))
            }
            Reservation::EventMissing => Err(AppError::NotFound("Event not found.".to_string())),
        }
    }
}

fn validate<'a>(
    attendee_name: &'a str,
    quantity: &str,
) -> Result<(&'a str, i64), PurchaseRejection> {
    let attendee_name = attendee_name.trim();
    if attendee_name.is_empty() {
        return Err(PurchaseRejection::MissingAttendee);
    }

    match quantity.trim().parse::<i64>() {
        Ok(quantity) if quantity > 0 => Ok((attendee_name, quantity)),
        _ => Err(PurchaseRejection::InvalidQuantity),
    }
}
