use crate::error::AppError;
use bcrypt::{hash, verify};

/// bcrypt cost factor used for every stored credential.
pub const PASSWORD_COST: u32 = 14;

/// Hashes a plaintext password with a fresh random salt.
///
/// The result embeds algorithm, cost and salt (`$2b$14$...`) and can be stored as is.
/// A failure of the underlying primitive is returned as `AppError::HashingError`
/// and must abort whatever operation needed the hash.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash_with_cost(password, PASSWORD_COST)
}

pub(crate) fn hash_with_cost(password: &str, cost: u32) -> Result<String, AppError> {
    hash(password, cost).map_err(|e| {
        log::error!("Failed to hash password: {}", e);
        AppError::HashingError(format!("Failed to hash password: {}", e))
    })
}

/// Checks a plaintext candidate against a stored hash.
///
/// Returns `false` for a mismatch and also for a malformed stored hash, so callers
/// cannot tell a wrong password from a corrupted credential.
pub fn verify_password(password: &str, hashed_password: &str) -> bool {
    match verify(password, hashed_password) {
        Ok(matches) => matches,
        Err(e) => {
            log::warn!("Stored password hash could not be verified: {}", e);
            false
        }
    }
}
