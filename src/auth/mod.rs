pub mod extractors;
pub mod password;
pub mod token;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::config::Config;
use crate::error::AppError;
use crate::models::{LoginUserDto, PublicUser, User};

// Re-export necessary items
pub use extractors::AuthenticatedUser;
pub use password::{hash_password, verify_password, PASSWORD_COST};
pub use token::{generate_token, verify_token, Claims};

const INVALID_CREDENTIALS: &str = "Invalid credentials";

lazy_static! {
    // Checked against when the username is unknown, so that path costs a full bcrypt round too.
    static ref DUMMY_HASH: Option<String> = hash_password("muchtodo-dummy-password").ok();
}

/// Computes the dummy hash used for unknown usernames.
///
/// Call once at startup; otherwise the first failed lookup pays for it on top of
/// its own verification.
pub fn init() {
    lazy_static::initialize(&DUMMY_HASH);
}

/// Response structure after a successful login.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    /// The JWT for subsequent requests.
    pub token: String,
    /// The authenticated user, without credentials.
    pub user: PublicUser,
}

/// Checks a login attempt against the user the store found for its username.
///
/// `found` is `None` when no user has that username. Unknown usernames and wrong
/// passwords both fail with the same `AppError::Unauthorized`.
pub fn authenticate(
    found: Option<&User>,
    credentials: &LoginUserDto,
) -> Result<PublicUser, AppError> {
    credentials.validate()?;

    match found {
        Some(user) if user.username() == credentials.username => {
            if user.check_password(&credentials.password) {
                log::debug!("User {} authenticated", user.username());
                Ok(user.public())
            } else {
                log::warn!("Failed login attempt for username {}", credentials.username);
                Err(AppError::Unauthorized(INVALID_CREDENTIALS.into()))
            }
        }
        _ => {
            if let Some(dummy) = DUMMY_HASH.as_deref() {
                verify_password(&credentials.password, dummy);
            }
            log::warn!("Failed login attempt for username {}", credentials.username);
            Err(AppError::Unauthorized(INVALID_CREDENTIALS.into()))
        }
    }
}

/// Authenticates and issues an access token for the user.
pub fn login(
    found: Option<&User>,
    credentials: &LoginUserDto,
    config: &Config,
) -> Result<AuthResponse, AppError> {
    let user = authenticate(found, credentials)?;
    let user_id = user
        .id
        .ok_or_else(|| AppError::InternalServerError("User has not been stored yet".into()))?;
    let token = generate_token(&user_id, config)?;

    Ok(AuthResponse { token, user })
}
