use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::utils::response::success;

pub mod attendee;
pub mod auth;
pub mod events;
pub mod organiser;
pub mod settings;

#[derive(Serialize)]
struct HealthPayload {
    status: &'static str,
    service: &'static str,
}

pub async fn health_check() -> Response {
    let payload = HealthPayload {
        status: "ok",
        service: "ticketbooth",
    };

    success(payload, "Health check successful").into_response()
}
