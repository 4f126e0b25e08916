use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// An organiser account.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Manager {
    pub id: i64,
    pub name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// The identity shown on organiser pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManagerIdentity {
    pub id: i64,
    pub name: String,
}

impl From<&Manager> for ManagerIdentity {
    fn from(manager: &Manager) -> Self {
        Self {
            id: manager.id,
            name: manager.name.clone(),
        }
    }
}
