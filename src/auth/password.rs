use crate::error::AppError;
use bcrypt::{hash, verify, DEFAULT_COST};
use lazy_static::lazy_static;

lazy_static! {
    // Stand-in hash checked when a login names an unknown email, so that path
    // costs one bcrypt verification just like a wrong password does.
    static ref DUMMY_HASH: Option<String> = hash("taskboard-timing-equalizer", DEFAULT_COST).ok();
}

/// bcrypt only reads this many bytes of input; anything after is ignored.
pub const MAX_PASSWORD_BYTES: usize = 72;

pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, DEFAULT_COST)
        .map_err(|e| AppError::InternalServerError(format!("Failed to hash password: {}", e)))
}

/// Returns `Ok(false)` on mismatch; errors only when `hashed_password` is not a bcrypt hash.
pub fn verify_password(password: &str, hashed_password: &str) -> Result<bool, AppError> {
    verify(password, hashed_password)
        .map_err(|e| AppError::InternalServerError(format!("Failed to verify password: {}", e)))
}

/// Burns one verification's worth of work and always reports a mismatch.
pub fn verify_against_dummy(password: &str) -> bool {
    if let Some(dummy) = DUMMY_HASH.as_deref() {
        let _ = verify(password, dummy);
    }
    false
}
