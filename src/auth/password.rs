use bcrypt::{hash, verify, DEFAULT_COST};

use crate::errors::{AppError, AppResult};

/// Cost used when none is configured.
pub const BCRYPT_COST: u32 = DEFAULT_COST;

/// Lowest cost bcrypt accepts. Only suitable for tests.
pub const MIN_BCRYPT_COST: u32 = 4;

/// Hashes a password with bcrypt on the blocking pool. The returned string
/// embeds its own salt and cost.
pub async fn hash_password(password: &str, cost: Option<u32>) -> AppResult<String> {
    let password = password.to_string();
    let cost = cost.unwrap_or(BCRYPT_COST);

    tokio::task::spawn_blocking(move || {
        hash(password, cost).map_err(|e| AppError::InternalError(format!("Password hashing failed: {}", e)))
    })
    .await
    .map_err(|e| AppError::InternalError(format!("Password hashing task failed: {}", e)))?
}

/// `Ok(false)` for a wrong password; `Err` only when the stored hash is unusable.
pub async fn verify_password(password: &str, password_hash: &str) -> AppResult<bool> {
    let password = password.to_string();
    let password_hash = password_hash.to_string();

    tokio::task::spawn_blocking(move || {
        verify(password, &password_hash)
            .map_err(|e| AppError::InternalError(format!("Password verification failed: {}", e)))
    })
    .await
    .map_err(|e| AppError::InternalError(format!("Password verification task failed: {}", e)))?
}
