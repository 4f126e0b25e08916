use std::sync::Arc;

use axum::extract::State;
use axum::response::{Html, IntoResponse, Redirect};
use axum::{Form, Json};
use serde::Deserialize;
use tracing::info;

use crate::extractors::OrganiserSession;
use crate::models::site_settings::SiteSettings;
use crate::state::AppState;
use crate::utils::error::{ApiError, AppError};
use crate::utils::response::success;
use crate::views::SettingsView;

const HISTORY_SHOWN: i64 = 10;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SettingsForm {
    pub site_name: String,
    pub site_description: String,
}

impl TryFrom<SettingsForm> for SiteSettings {
    type Error = AppError;

    fn try_from(form: SettingsForm) -> Result<Self, Self::Error> {
        let site_name = form.site_name.trim();
        let site_description = form.site_description.trim();
        if site_name.is_empty() || site_description.is_empty() {
            return Err(AppError::ValidationError(
                "Both site name and description are required".to_string(),
            ));
        }
        Ok(SiteSettings {
            site_name: site_name.to_string(),
            site_description: site_description.to_string(),
        })
    }
}

pub async fn settings_page(
    State(state): State<Arc<AppState>>,
    _session: OrganiserSession,
) -> Result<Html<String>, AppError> {
    let current = state.settings.current().await?.unwrap_or_default();
    let history = state.settings.history(HISTORY_SHOWN).await?;

    state.views.render(
        "site-setting.html",
        &SettingsView {
            site_name: current.site_name,
            site_description: current.site_description,
            history,
        },
    )
}

pub async fn update_settings(
    State(state): State<Arc<AppState>>,
    session: OrganiserSession,
    Form(form): Form<SettingsForm>,
) -> Result<Redirect, AppError> {
    let settings = SiteSettings::try_from(form)?;
    state
        .settings
        .save(&settings, Some(session.manager.id))
        .await?;

    info!(manager_id = session.manager.id, "Site settings updated");
    Ok(Redirect::to("/organiser"))
}

pub async fn api_get_settings(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let settings = state.settings.current().await?.unwrap_or_default();
    Ok(success(settings, "Site settings"))
}

pub async fn api_update_settings(
    State(state): State<Arc<AppState>>,
    session: Option<OrganiserSession>,
    Json(form): Json<SettingsForm>,
) -> Result<impl IntoResponse, ApiError> {
    let session =
        session.ok_or_else(|| AppError::AuthError("Organiser login required".to_string()))?;
    let settings = SiteSettings::try_from(form)?;
    let saved = state
        .settings
        .save(&settings, Some(session.manager.id))
        .await?;

    info!(manager_id = session.manager.id, "Site settings updated via API");
    Ok(success(saved, "Site settings updated"))
}
