use crate::error::AppError;
use std::env;

/// Default lifetime of an issued access token.
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;

#[derive(Debug, Clone)]
pub struct Config {
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
}

impl Config {
    /// Reads configuration from the environment, loading a `.env` file first if present.
    pub fn from_env() -> Result<Self, AppError> {
        dotenv::dotenv().ok();

        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| AppError::InternalServerError("JWT_SECRET must be set".into()))?;

        let token_ttl_hours = match env::var("JWT_TTL_HOURS") {
            Ok(raw) => raw
                .parse::<i64>()
                .ok()
                .filter(|hours| *hours > 0)
                .ok_or_else(|| {
                    AppError::InternalServerError(
                        "JWT_TTL_HOURS must be a positive number".into(),
                    )
                })?,
            Err(_) => DEFAULT_TOKEN_TTL_HOURS,
        };

        Ok(Self {
            jwt_secret,
            token_ttl_hours,
        })
    }

    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            token_ttl_hours: DEFAULT_TOKEN_TTL_HOURS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        env::set_var("JWT_SECRET", "test-secret");
        env::remove_var("JWT_TTL_HOURS");

        let config = Config::from_env().unwrap();
        assert_eq!(config.jwt_secret, "test-secret");
        assert_eq!(config.token_ttl_hours, DEFAULT_TOKEN_TTL_HOURS);

        env::set_var("JWT_TTL_HOURS", "2");
        let config = Config::from_env().unwrap();
        assert_eq!(config.token_ttl_hours, 2);

        for bad in ["two", "0", "-5"] {
            env::set_var("JWT_TTL_HOURS", bad);
            assert!(
                matches!(Config::from_env(), Err(AppError::InternalServerError(_))),
                "JWT_TTL_HOURS={} should be rejected",
                bad
            );
        }

        env::remove_var("JWT_TTL_HOURS");
    }
}
