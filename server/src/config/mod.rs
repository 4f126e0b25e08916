use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub mod cors;
pub mod security;

pub use cors::create_cors_layer;
pub use security::create_security_headers_layer;

const DEFAULT_DATABASE_URL: &str = "sqlite://database.db";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_SESSION_COOKIE: &str = "ticketbooth_sid";
const DEFAULT_SESSION_TTL_SECS: u64 = 86_400;
/// The server renders its own pages, so by default only its own origin is allowed.
pub(crate) const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000";

/// What happens to an event's bookings when the event itself is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingsOnDelete {
    /// Keep the booking rows; they outlive the event.
    Retain,
    /// Delete the bookings together with the event.
    Cascade,
    /// Refuse to delete an event that has bookings.
    Restrict,
}

impl FromStr for BookingsOnDelete {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "retain" => Ok(Self::Retain),
            "cascade" => Ok(Self::Cascade),
            "restrict" => Ok(Self::Restrict),
            other => Err(format!("unknown booking delete policy '{other}'")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub session_cookie_name: String,
    pub session_ttl: Duration,
    pub secure_cookies: bool,
    pub unique_manager_names: bool,
    pub bookings_on_delete: BookingsOnDelete,
    pub static_dir: PathBuf,
    pub img_dir: PathBuf,
    /// Comma-separated list of origins allowed to make credentialed requests.
    pub cors_allowed_origins: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            bind_addr: SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)),
            session_cookie_name: DEFAULT_SESSION_COOKIE.to_string(),
            session_ttl: Duration::from_secs(DEFAULT_SESSION_TTL_SECS),
            secure_cookies: false,
            unique_manager_names: true,
            bookings_on_delete: BookingsOnDelete::Retain,
            static_dir: PathBuf::from("public"),
            img_dir: PathBuf::from("img"),
            cors_allowed_origins: DEFAULT_ALLOWED_ORIGINS.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source. Invalid values are
    /// logged and replaced by their defaults.
    pub fn from_vars<F>(var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = var("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = parse_or("PORT", var("PORT"), DEFAULT_PORT);
        let bind_addr = format!("{host}:{port}").parse().unwrap_or_else(|e| {
            tracing::warn!("Config: invalid HOST '{}': {}, using default", host, e);
            defaults.bind_addr
        });

        let is_production = var("RUST_ENV")
            .map(|v| v.to_lowercase() == "production")
            .unwrap_or(false);

        Self {
            database_url: var("DATABASE_URL").unwrap_or(defaults.database_url),
            bind_addr,
            session_cookie_name: var("SESSION_COOKIE_NAME")
                .filter(|name| !name.trim().is_empty())
                .unwrap_or(defaults.session_cookie_name),
            session_ttl: Duration::from_secs(parse_or(
                "SESSION_TTL_SECS",
                var("SESSION_TTL_SECS"),
                DEFAULT_SESSION_TTL_SECS,
            )),
            secure_cookies: is_production,
            unique_manager_names: parse_or(
                "UNIQUE_MANAGER_NAMES",
                var("UNIQUE_MANAGER_NAMES"),
                defaults.unique_manager_names,
            ),
            bookings_on_delete: parse_or(
                "BOOKINGS_ON_EVENT_DELETE",
                var("BOOKINGS_ON_EVENT_DELETE"),
                defaults.bookings_on_delete,
            ),
            static_dir: var("STATIC_DIR").map(PathBuf::from).unwrap_or(defaults.static_dir),
            img_dir: var("IMG_DIR").map(PathBuf::from).unwrap_or(defaults.img_dir),
            cors_allowed_origins: var("CORS_ALLOWED_ORIGINS")
                .unwrap_or(defaults.cors_allowed_origins),
        }
    }
}

fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> T
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        None => default,
        Some(value) => value.trim().parse().unwrap_or_else(|e| {
            tracing::warn!("Config: invalid {} '{}': {}, using default", key, value, e);
            default
        }),
    }
}
