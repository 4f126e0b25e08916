use std::sync::Arc;

use axum::extract::State;
use axum::response::Html;

use crate::extractors::OrganiserSession;
use crate::models::manager::ManagerIdentity;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::views::DashboardView;

pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    session: OrganiserSession,
) -> Result<Html<String>, AppError> {
    render_dashboard(&state, session.manager).await
}

/// Shared by the dashboard route and a successful login.
pub(crate) async fn render_dashboard(
    state: &AppState,
    manager: ManagerIdentity,
) -> Result<Html<String>, AppError> {
    let events = state.events.list_all().await?;
    let settings = state.settings.current().await?.unwrap_or_default();

    state
        .views
        .render("organiser.html", &DashboardView::new(manager, settings, events))
}
