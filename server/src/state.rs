use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::Config;
use crate::repositories::{
    BookingRepository, EventRepository, ManagerRepository, SettingsRepository, SqliteBookingRepo,
    SqliteEventRepo, SqliteManagerRepo, SqliteSettingsRepo,
};
use crate::services::{AuthService, TicketPurchaseEngine};
use crate::session::SessionStore;
use crate::views::Views;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub managers: Arc<dyn ManagerRepository>,
    pub events: Arc<dyn EventRepository>,
    pub bookings: Arc<dyn BookingRepository>,
    pub settings: Arc<dyn SettingsRepository>,
    pub auth: Arc<AuthService>,
    pub purchases: Arc<TicketPurchaseEngine>,
    pub sessions: SessionStore,
    pub views: Arc<Views>,
}

impl AppState {
    /// Wires every repository and service over one shared pool.
    pub fn new(config: Config, pool: SqlitePool) -> Result<Self, tera::Error> {
        let managers: Arc<dyn ManagerRepository> = Arc::new(SqliteManagerRepo::new(pool.clone()));
        let bookings: Arc<dyn BookingRepository> = Arc::new(SqliteBookingRepo::new(pool.clone()));

        Ok(Self {
            auth: Arc::new(AuthService::new(
                managers.clone(),
                config.unique_manager_names,
            )),
            purchases: Arc::new(TicketPurchaseEngine::new(bookings.clone())),
            sessions: SessionStore::new(config.session_ttl),
            views: Arc::new(Views::new()?),
            events: Arc::new(SqliteEventRepo::new(pool.clone())),
            settings: Arc::new(SqliteSettingsRepo::new(pool)),
            managers,
            bookings,
            config,
        })
    }
}
