use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::{Html, Redirect};
use axum::Form;
use chrono::Utc;
use serde::Deserialize;
use tracing::{debug, info};

use crate::extractors::OrganiserSession;
use crate::models::event::{EventDetails, EventForm};
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::views::EditEventView;

fn event_not_found() -> AppError {
    AppError::NotFound("Event not found.".to_string())
}

pub async fn create_event_page(
    State(state): State<Arc<AppState>>,
    _session: OrganiserSession,
) -> Result<Html<String>, AppError> {
    state.views.render_static("create-event.html")
}

pub async fn create_event(
    State(state): State<Arc<AppState>>,
    session: OrganiserSession,
    Form(form): Form<EventForm>,
) -> Result<Redirect, AppError> {
    let details = EventDetails::try_from(form)?;
    let event = state.events.create(&details, Utc::now()).await?;

    info!(event_id = event.id, manager_id = session.manager.id, "Event created");
    Ok(Redirect::to("/organiser"))
}

pub async fn edit_event_page(
    State(state): State<Arc<AppState>>,
    _session: OrganiserSession,
    Path(id): Path<i64>,
) -> Result<Html<String>, AppError> {
    let event = state
        .events
        .find_by_id(id)
        .await?
        .ok_or_else(event_not_found)?;
    let bookings = state.bookings.list_by_event(id).await?;

    state
        .views
        .render("edit-event.html", &EditEventView::new(event, bookings))
}

pub async fn edit_event(
    State(state): State<Arc<AppState>>,
    session: OrganiserSession,
    Path(id): Path<i64>,
    Form(form): Form<EventForm>,
) -> Result<Redirect, AppError> {
    let details = EventDetails::try_from(form)?;
    state
        .events
        .update(id, &details)
        .await?
        .ok_or_else(event_not_found)?;

    info!(event_id = id, manager_id = session.manager.id, "Event updated");
    Ok(Redirect::to("/organiser"))
}

pub async fn delete_event(
    State(state): State<Arc<AppState>>,
    session: OrganiserSession,
    Path(id): Path<i64>,
) -> Result<Redirect, AppError> {
    let removed = state
        .events
        .delete(id, false, state.config.bookings_on_delete)
        .await?;
    if removed == 0 {
        return Err(event_not_found());
    }

    info!(event_id = id, manager_id = session.manager.id, "Event deleted");
    Ok(Redirect::to("/organiser"))
}

pub async fn delete_published_event(
    State(state): State<Arc<AppState>>,
    session: OrganiserSession,
    Path(id): Path<i64>,
) -> Result<Redirect, AppError> {
    let removed = state
        .events
        .delete(id, true, state.config.bookings_on_delete)
        .await?;

    if removed == 0 {
        debug!(event_id = id, "Not a published event, nothing deleted");
    } else {
        info!(event_id = id, manager_id = session.manager.id, "Published event deleted");
    }
    Ok(Redirect::to("/organiser"))
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PublishForm {
    pub id: String,
}

pub async fn publish_event(
    State(state): State<Arc<AppState>>,
    session: OrganiserSession,
    Path(id): Path<i64>,
) -> Result<Redirect, AppError> {
    publish(&state, &session, id).await
}

/// Dashboard form variant of `publish_event`: the event id comes in the body.
pub async fn publish_event_form(
    State(state): State<Arc<AppState>>,
    session: OrganiserSession,
    Form(form): Form<PublishForm>,
) -> Result<Redirect, AppError> {
    let id = form
        .id
        .trim()
        .parse::<i64>()
        .map_err(|_| AppError::ValidationError("A valid event id is required.".to_string()))?;
    publish(&state, &session, id).await
}

async fn publish(
    state: &AppState,
    session: &OrganiserSession,
    id: i64,
) -> Result<Redirect, AppError> {
    if state.events.publish(id, Utc::now()).await? == 0 {
        return Err(event_not_found());
    }

    info!(event_id = id, manager_id = session.manager.id, "Event published");
    Ok(Redirect::to("/organiser"))
}

pub async fn unpublish_event(
    State(state): State<Arc<AppState>>,
    session: OrganiserSession,
    Path(id): Path<i64>,
) -> Result<Redirect, AppError> {
    if state.events.unpublish(id).await? == 0 {
        return Err(event_not_found());
    }

    info!(event_id = id, manager_id = session.manager.id, "Event unpublished");
    Ok(Redirect::to("/organiser"))
}
