//! Request-independent business logic. Handlers parse HTTP input, call one
//! service method and map the result to a response.

pub mod auth;
pub mod tasks;

pub use auth::AuthService;
pub use tasks::TaskService;

use crate::error::AppError;

/// Runs CPU-bound work (bcrypt) on the blocking pool.
pub(crate) async fn run_blocking<T, F>(work: F) -> Result<T, AppError>
where
    F: FnOnce() -> Result<T, AppError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| AppError::InternalServerError(format!("Blocking task failed: {}", e)))?
}
