use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::routing::{get, post};
use axum::Router;
use tower_cookies::CookieManagerLayer;
use tower_http::classify::ServerErrorsFailureClass;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::{error, info, info_span, Span};
use uuid::Uuid;

use crate::config::{create_cors_layer, create_security_headers_layer};
use crate::handlers::{attendee, auth, events, health_check, organiser, settings};
use crate::state::AppState;

pub fn create_routes(state: Arc<AppState>) -> Router {
    let static_dir = state.config.static_dir.clone();
    let img_dir = state.config.img_dir.clone();
    let include_hsts = state.config.secure_cookies;
    let cors = create_cors_layer(&state.config.cors_allowed_origins);

    Router::new()
        .route("/health", get(health_check))
        // Organiser
        .route("/organiser", get(organiser::dashboard))
        .route("/site-settings", get(settings::settings_page))
        .route("/update-settings", post(settings::update_settings))
        .route(
            "/create-event",
            get(events::create_event_page).post(events::create_event),
        )
        .route(
            "/edit-event/:id",
            get(events::edit_event_page).post(events::edit_event),
        )
        .route("/delete-event/:id", post(events::delete_event))
        .route(
            "/delete-published-event/:id",
            post(events::delete_published_event),
        )
        .route("/publish-event/:id", post(events::publish_event))
        .route("/organiser/publish", post(events::publish_event_form))
        .route("/unpublish-event/:id", post(events::unpublish_event))
        // Attendee
        .route("/attendee", get(attendee::attendee_page))
        .route("/buy-tickets/:id", get(attendee::buy_tickets_page))
        .route("/purchase/:id", post(attendee::purchase))
        .route("/purchase/success", get(attendee::purchase_success_page))
        .route("/purchase/fail", get(attendee::purchase_fail_page))
        // Auth
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/auth-fail", get(auth::auth_fail_page))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/logout", post(auth::logout))
        // JSON
        .route(
            "/api/settings",
            get(settings::api_get_settings).post(settings::api_update_settings),
        )
        // Static
        .route_service("/", ServeFile::new(static_dir.join("home.html")))
        .nest_service("/js", ServeDir::new(static_dir.join("js")))
        .nest_service("/img", ServeDir::new(img_dir))
        .fallback_service(ServeDir::new(static_dir))
        .layer(CookieManagerLayer::new())
        .layer(create_security_headers_layer(include_hsts))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        manager_id = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished request"
                    );
                })
                .on_failure(
                    |failure: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                        error!("request failed: {:?}", failure);
                    },
                ),
        )
        .with_state(state)
}
