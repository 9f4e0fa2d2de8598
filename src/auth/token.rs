use crate::{config::Config, error::AppError, models::UserId};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Represents the claims encoded within a JWT (JSON Web Token).
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject of the token: the authenticated user's identifier.
    pub sub: UserId,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: usize,
    /// Expiration timestamp (seconds since epoch).
    pub exp: usize,
}

/// Generates a signed JWT for the given user.
///
/// The token expires after `Config::token_ttl_hours`.
///
/// # Returns
/// The encoded token, or `AppError::InternalServerError` if the expiry cannot be
/// computed or encoding fails.
pub fn generate_token(user_id: &UserId, config: &Config) -> Result<String, AppError> {
    let now = chrono::Utc::now();
    let expiration = chrono::Duration::try_hours(config.token_ttl_hours)
        .and_then(|ttl| now.checked_add_signed(ttl))
        .ok_or_else(|| AppError::InternalServerError("Token expiry out of range".into()))?;

    let claims = Claims {
        sub: *user_id,
        iat: now.timestamp() as usize,
        exp: expiration.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .map_err(|e| AppError::InternalServerError(format!("Failed to generate token: {}", e)))
}

/// Verifies a JWT string and decodes its claims.
///
/// Default validation applies (signature, expiration). Any failure, including a
/// subject that is not a valid user id, is `AppError::Unauthorized`.
pub fn verify_token(token: &str, config: &Config) -> Result<Claims, AppError> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(data.claims)
}
