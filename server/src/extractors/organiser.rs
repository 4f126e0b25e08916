use std::sync::Arc;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use tower_cookies::cookie::SameSite;
use tower_cookies::{Cookie, Cookies};
use tracing::{error, warn, Span};

use crate::config::Config;
use crate::models::manager::ManagerIdentity;
use crate::state::AppState;

/// Rejection for organiser-only routes: send the visitor to the login page.
#[derive(Debug)]
pub struct LoginRedirect;

impl IntoResponse for LoginRedirect {
    fn into_response(self) -> Response {
        Redirect::to("/login").into_response()
    }
}

/// The logged-in organiser. Extracting it is the access gate: the session must
/// exist and the manager it names must still exist in the store.
#[derive(Debug, Clone)]
pub struct OrganiserSession {
    pub manager: ManagerIdentity,
    pub token: String,
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for OrganiserSession {
    type Rejection = LoginRedirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let Some(cookies) = parts.extensions.get::<Cookies>().cloned() else {
            error!("Cookie layer missing, cannot read sessions");
            return Err(LoginRedirect);
        };

        let token = cookies
            .get(&state.config.session_cookie_name)
            .map(|cookie| cookie.value().to_string())
            .ok_or(LoginRedirect)?;

        let Some(identity) = state.sessions.get(&token).await else {
            clear_session_cookie(&cookies, &state.config);
            return Err(LoginRedirect);
        };

        let manager = match state.managers.find_by_id(identity.id).await {
            Ok(Some(manager)) => ManagerIdentity::from(&manager),
            Ok(None) => {
                warn!(
                    manager_id = identity.id,
                    "Session names a manager that no longer exists"
                );
                state.sessions.remove(&token).await;
                clear_session_cookie(&cookies, &state.config);
                return Err(LoginRedirect);
            }
            Err(e) => {
                warn!(
                    error = ?e,
                    manager_id = identity.id,
                    "Manager lookup failed, using session identity"
                );
                identity
            }
        };

        Span::current().record("manager_id", manager.id);
        Ok(OrganiserSession { manager, token })
    }
}

pub fn set_session_cookie(cookies: &Cookies, config: &Config, token: String) {
    let cookie = Cookie::build((config.session_cookie_name.clone(), token))
        .path("/")
        .http_only(true)
        .secure(config.secure_cookies)
        .same_site(SameSite::Lax)
        .build();
    cookies.add(cookie);
}

pub fn clear_session_cookie(cookies: &Cookies, config: &Config) {
    cookies.remove(
        Cookie::build((config.session_cookie_name.clone(), ""))
            .path("/")
            .build(),
    );
}
