pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use serde::Deserialize;
use validator::Validate;

use crate::config::Config;

pub use extractors::AuthenticatedUserId;
pub use middleware::AuthMiddleware;
pub use password::{hash_password, verify_password};
pub use token::{Claims, TokenKeys};

/// Shared authentication settings, registered as `web::Data<AuthConfig>`.
#[derive(Clone)]
pub struct AuthConfig {
    pub tokens: TokenKeys,
    /// bcrypt work factor used when hashing new passwords.
    pub bcrypt_cost: u32,
}

impl AuthConfig {
    pub fn new(jwt_secret: &str, jwt_ttl_hours: i64, bcrypt_cost: u32) -> Self {
        Self {
            tokens: TokenKeys::new(jwt_secret, jwt_ttl_hours),
            bcrypt_cost,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.jwt_secret, config.jwt_ttl_hours, config.bcrypt_cost)
    }
}

/// Represents the payload for a user login request.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Represents the payload for a new user signup request.
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    /// Login key; must be a valid email address and unique across users.
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
    /// Display name used by user search. Not required to be unique.
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}
