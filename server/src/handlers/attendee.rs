use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::{Html, Redirect};
use axum::Form;
use serde::Deserialize;

use crate::services::PurchaseOutcome;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::views::{AttendeeView, BuyTicketView};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PurchaseForm {
    pub name: String,
    pub quantity: String,
}

pub async fn attendee_page(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    let events = state.events.list_published().await?;
    let settings = state.settings.current().await?.unwrap_or_default();

    state
        .views
        .render("attendee.html", &AttendeeView::new(settings, events))
}

pub async fn buy_tickets_page(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Html<String>, AppError> {
    let event = state
        .events
        .find_published(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;

    state.views.render(
        "buy-ticket.html",
        &BuyTicketView {
            event: event.into(),
        },
    )
}

pub async fn purchase(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Form(form): Form<PurchaseForm>,
) -> Result<Redirect, AppError> {
    match state
        .purchases
        .purchase(id, &form.name, &form.quantity)
        .await?
    {
        PurchaseOutcome::Confirmed(_) => Ok(Redirect::to("/purchase/success")),
        PurchaseOutcome::Rejected(_) => Ok(Redirect::to("/purchase/fail")),
    }
}

pub async fn purchase_success_page(
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>, AppError> {
    state.views.render_static("purchase-pass.html")
}

pub async fn purchase_fail_page(
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>, AppError> {
    state.views.render_static("purchase-fail.html")
}
