pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use actix_web::cookie::{time::Duration as CookieDuration, Cookie, SameSite};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::UserSummary;

// Re-export necessary items
pub use extractors::AuthenticatedUser;
pub use middleware::AuthMiddleware;
pub use password::{hash_password, verify_password, MAX_PASSWORD_BYTES};
pub use token::{Claims, IssuedToken, SessionTokens, TokenError, SESSION_TTL_HOURS};

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "token";

pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

fn within_password_limit(value: &str) -> Result<(), ValidationError> {
    not_blank(value)?;
    if value.len() > MAX_PASSWORD_BYTES {
        return Err(ValidationError::new("password_too_long"));
    }
    Ok(())
}

/// Represents the payload for a user login request.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(custom = "not_blank")]
    pub email: String,
    #[validate(custom = "not_blank")]
    pub password: String,
}

/// Represents the payload for a new user registration request.
/// Only presence is checked; format rules are left to the client. The
/// password must also fit in [`MAX_PASSWORD_BYTES`].
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(custom = "not_blank")]
    pub email: String,
    #[validate(custom = "within_password_limit")]
    pub password: String,
    #[validate(custom = "not_blank")]
    pub name: String,
}

/// Body returned by register and login. The session token itself only
/// travels in the cookie.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub message: String,
    pub user: UserSummary,
}

/// Builds the HTTP-only, secure, strict same-site cookie that carries `issued`.
pub fn session_cookie(issued: &IssuedToken) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, issued.token.clone())
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Strict)
        .max_age(CookieDuration::hours(SESSION_TTL_HOURS))
        .finish()
}
