use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, Response, StatusCode},
    Router,
};
use serde_json::Value;
use sqlx::SqlitePool;
use tempfile::TempDir;
use tower::ServiceExt;

use ticketbooth_server::{config::Config, db, routes::create_routes, state::AppState};

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
    pub state: Arc<AppState>,
    // keeps the database file alive for the lifetime of the app
    _dir: TempDir,
}

#[allow(dead_code)]
impl TestApp {
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    pub async fn with_config(customise: impl FnOnce(&mut Config)) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_path = dir.path().join("test.db");

        let manifest = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        let mut config = Config {
            database_url: format!("sqlite://{}", db_path.display()),
            static_dir: manifest.join("public"),
            img_dir: manifest.join("img"),
            ..Config::default()
        };
        customise(&mut config);

        let pool = db::connect(&config.database_url)
            .await
            .expect("Failed to connect to test db");
        db::migrate(&pool).await.expect("Failed to migrate test db");

        let state = Arc::new(AppState::new(config, pool.clone()).expect("Failed to build state"));
        let router = create_routes(state.clone());

        Self {
            router,
            pool,
            state,
            _dir: dir,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn post_form(&self, uri: &str, form: &str, cookie: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::from(form.to_string())).unwrap())
            .await
    }

    pub async fn post_json(&self, uri: &str, body: &Value, cookie: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }

    pub async fn register(&self, username: &str, password: &str) -> Response<Body> {
        self.post_form(
            "/register",
            &format!("username={username}&password={password}"),
            None,
        )
        .await
    }

    /// Registers and logs in, returning the `Cookie` header value for the session.
    pub async fn organiser(&self, username: &str, password: &str) -> String {
        let response = self.register(username, password).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        self.login(username, password).await
    }

    pub async fn login(&self, username: &str, password: &str) -> String {
        let response = self
            .post_form(
                "/login",
                &format!("username={username}&password={password}"),
                None,
            )
            .await;
        if response.status() != StatusCode::OK {
            panic!("Login failed in test helper: status {}", response.status());
        }
        session_cookie(&response).expect("No session cookie returned")
    }

    /// Creates an event and publishes it, returning its id.
    pub async fn published_event(&self, cookie: &str, name: &str, tickets: i64) -> i64 {
        let id = self.draft_event(cookie, name, tickets).await;
        let response = self
            .post_form(&format!("/publish-event/{id}"), "", Some(cookie))
            .await;
        assert_eq!(location(&response), Some("/organiser"));
        id
    }

    pub async fn draft_event(&self, cookie: &str, name: &str, tickets: i64) -> i64 {
        let form = format!(
            "event_name={name}&event_description=Live&event_date=2025-06-01\
             &venue=Hall&tickets_available={tickets}&ticket_price=25.00"
        );
        let response = self.post_form("/create-event", &form, Some(cookie)).await;
        assert_eq!(location(&response), Some("/organiser"));

        sqlx::query_scalar("SELECT id FROM events WHERE name = ? ORDER BY id DESC LIMIT 1")
            .bind(name)
            .fetch_one(&self.pool)
            .await
            .unwrap()
    }

    pub async fn tickets_available(&self, event_id: i64) -> Option<i64> {
        sqlx::query_scalar("SELECT tickets_available FROM events WHERE id = ?")
            .bind(event_id)
            .fetch_optional(&self.pool)
            .await
            .unwrap()
    }

    pub async fn tickets_booked(&self, event_id: i64) -> i64 {
        sqlx::query_scalar(
            "SELECT COALESCE(SUM(tickets_booked), 0) FROM bookings WHERE event_id = ?",
        )
        .bind(event_id)
        .fetch_one(&self.pool)
        .await
        .unwrap()
    }

    pub async fn purchase(&self, event_id: i64, name: &str, quantity: &str) -> Response<Body> {
        self.post_form(
            &format!("/purchase/{event_id}"),
            &format!("name={name}&quantity={quantity}"),
            None,
        )
        .await
    }
}

#[allow(dead_code)]
pub fn location(response: &Response<Body>) -> Option<&str> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
}

/// The `name=value` pair of the session cookie set by a response, if any.
#[allow(dead_code)]
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .find(|c| c.starts_with("ticketbooth_sid=") && !c.starts_with("ticketbooth_sid=;"))
        .map(|c| c.split(';').next().unwrap_or_default().to_string())
}

#[allow(dead_code)]
pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[allow(dead_code)]
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
