use std::sync::Arc;

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use rand::rngs::OsRng;
use tracing::{info, warn};

use crate::models::manager::Manager;
use crate::repositories::ManagerRepository;
use crate::utils::error::AppError;

pub struct AuthService {
    managers: Arc<dyn ManagerRepository>,
    unique_names: bool,
}

impl AuthService {
    pub fn new(managers: Arc<dyn ManagerRepository>, unique_names: bool) -> Self {
        Self {
            managers,
            unique_names,
        }
    }

    pub async fn register(&self, username: &str, password: &str) -> Result<Manager, AppError> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(AppError::ValidationError(
                "Username and password are required".to_string(),
            ));
        }

        let password_hash = hash_password(password.to_string()).await?;

        let manager = self
            .managers
            .create(username, &password_hash, self.unique_names)
            .await?
            .ok_or_else(|| AppError::Conflict("Username already taken".to_string()))?;

        info!(manager_id = manager.id, "Registered manager");
        Ok(manager)
    }

    /// Returns the manager whose name and password match, if any.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<Manager>, AppError> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Ok(None);
        }

        // names are not necessarily unique, so every candidate gets a chance
        for candidate in self.managers.find_by_name(username).await? {
            if verify_password(password.to_string(), candidate.password_hash.clone()).await? {
                return Ok(Some(candidate));
            }
        }

        warn!("Failed login attempt");
        Ok(None)
    }
}

/// Hashes a password with argon2 and a fresh random salt, off the async runtime.
pub async fn hash_password(password: String) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::InternalServerError(format!("password hashing failed: {e}")))
    })
    .await
    .map_err(|e| AppError::InternalServerError(format!("hashing task failed: {e}")))?
}

/// Checks a password against a stored PHC hash string.
pub async fn verify_password(password: String, stored_hash: String) -> Result<bool, AppError> {
    tokio::task::spawn_blocking(move || {
        let parsed = PasswordHash::new(&stored_hash)
            .map_err(|e| AppError::InternalServerError(format!("stored hash is invalid: {e}")))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    })
    .await
    .map_err(|e| AppError::InternalServerError(format!("verification task failed: {e}")))?
}
