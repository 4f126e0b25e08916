use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub const DEFAULT_SITE_NAME: &str = "Default Site Name";
pub const DEFAULT_SITE_DESCRIPTION: &str = "Default description.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct SiteSettings {
    pub site_name: String,
    pub site_description: String,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            site_name: DEFAULT_SITE_NAME.to_string(),
            site_description: DEFAULT_SITE_DESCRIPTION.to_string(),
        }
    }
}

/// One entry of the settings audit log.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct SiteSettingsRevision {
    pub id: i64,
    pub site_name: String,
    pub site_description: String,
    pub changed_by: Option<i64>,
    pub changed_at: DateTime<Utc>,
}
