use std::sync::Arc;

use axum::Router;
use dotenvy::dotenv;
use tokio::net::TcpListener;

use ticketbooth_server::config::Config;
use ticketbooth_server::routes::create_routes;
use ticketbooth_server::state::AppState;
use ticketbooth_server::{db, init_logging};

#[tokio::main]
async fn main() {
    dotenv().ok();
    init_logging();

    let config = Config::from_env();

    let pool = match db::connect(&config.database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!(error = %e, "Failed to connect to database");
            std::process::exit(1);
        }
    };
    tracing::info!("Successfully connected to database");

    if let Err(e) = db::migrate(&pool).await {
        tracing::error!(error = %e, "Failed to run migrations");
        std::process::exit(1);
    }
    tracing::info!("Migrations run successfully");

    let addr = config.bind_addr;
    let state = match AppState::new(config, pool) {
        Ok(state) => Arc::new(state),
        Err(e) => {
            tracing::error!(error = %e, "Failed to load templates");
            std::process::exit(1);
        }
    };

    let app: Router = create_routes(state);

    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, %addr, "Failed to bind address");
            std::process::exit(1);
        }
    };
    tracing::info!("Server running at http://{}", addr);

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "Server failed");
        std::process::exit(1);
    }
}
