use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use serde::Deserialize;
use tower_cookies::Cookies;
use tracing::{error, info};

use crate::extractors::{clear_session_cookie, set_session_cookie};
use crate::handlers::organiser::render_dashboard;
use crate::models::manager::ManagerIdentity;
use crate::state::AppState;
use crate::utils::error::AppError;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

pub async fn login_page(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    state.views.render_static("login.html")
}

pub async fn auth_fail_page(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    state.views.render_static("auth-fail.html")
}

pub async fn register_page(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    state.views.render_static("register.html")
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
    Form(credentials): Form<Credentials>,
) -> Result<Response, AppError> {
    let Some(manager) = state
        .auth
        .authenticate(&credentials.username, &credentials.password)
        .await?
    else {
        return Ok(Redirect::to("/auth-fail").into_response());
    };

    // never carry a pre-login session token over
    if let Some(previous) = cookies.get(&state.config.session_cookie_name) {
        state.sessions.remove(previous.value()).await;
    }

    let identity = ManagerIdentity::from(&manager);
    let token = state.sessions.create(identity.clone()).await;
    set_session_cookie(&cookies, &state.config, token);

    info!(manager_id = manager.id, "Manager logged in");
    Ok(render_dashboard(&state, identity).await?.into_response())
}

pub async fn register(
    State(state): State<Arc<AppState>>,
    Form(credentials): Form<Credentials>,
) -> Result<Response, AppError> {
    match state
        .auth
        .register(&credentials.username, &credentials.password)
        .await
    {
        Ok(_) => Ok(Redirect::to("/login").into_response()),
        Err(AppError::DatabaseError(e)) => {
            error!(error = ?e, "Failed to store manager");
            Ok((StatusCode::INTERNAL_SERVER_ERROR, "Registration failed").into_response())
        }
        Err(e) => Err(e),
    }
}

pub async fn logout(State(state): State<Arc<AppState>>, cookies: Cookies) -> Redirect {
    if let Some(cookie) = cookies.get(&state.config.session_cookie_name) {
        if let Some(identity) = state.sessions.remove(cookie.value()).await {
            info!(manager_id = identity.id, "Manager logged out");
        }
    }
    clear_session_cookie(&cookies, &state.config);
    Redirect::to("/login")
}
