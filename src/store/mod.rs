//! Persistence for users and tasks.
//!
//! Services never talk to a backend directly: they get a [`Store`], built once
//! at startup, which owns the backend and bounds every call with a deadline.
//! [`PgStore`] is the production backend; [`MemoryStore`] keeps everything in
//! process and backs the test suite.

mod memory;
mod postgres;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Comment, Task, TaskInput, TaskStatus, User};

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Deadline applied to each store call unless configured otherwise.
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store call timed out after {0:?}")]
    Timeout(Duration),

    /// A uniqueness constraint rejected the write.
    #[error("duplicate record: {0}")]
    Duplicate(String),

    #[error("failed to decode stored record: {0}")]
    Decode(String),

    #[error("store backend error: {0}")]
    Backend(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(error: sqlx::Error) -> Self {
        match &error {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                StoreError::Duplicate(db.message().to_string())
            }
            sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
                StoreError::Decode(error.to_string())
            }
            _ => StoreError::Backend(error.to_string()),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Credential store.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Looks a user up by an already-normalized email.
    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    /// Inserts a new user; fails with [`StoreError::Duplicate`] when the email is taken.
    async fn insert_user(&self, user: &User) -> StoreResult<()>;
}

/// Task document store. Mutations return whether a task with `id` existed.
#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn insert_task(&self, task: &Task) -> StoreResult<()>;

    async fn list_tasks(&self) -> StoreResult<Vec<Task>>;

    async fn list_tasks_assigned_to(&self, user_id: Uuid) -> StoreResult<Vec<Task>>;

    async fn find_task(&self, id: Uuid) -> StoreResult<Option<Task>>;

    async fn update_task(
        &self,
        id: Uuid,
        input: &TaskInput,
        updated_at: DateTime<Utc>,
    ) -> StoreResult<bool>;

    async fn update_task_status(
        &self,
        id: Uuid,
        status: TaskStatus,
        updated_at: DateTime<Utc>,
    ) -> StoreResult<bool>;

    async fn append_comment(&self, id: Uuid, comment: &Comment) -> StoreResult<bool>;

    async fn delete_task(&self, id: Uuid) -> StoreResult<bool>;

    /// Cheap round trip used by the health check.
    async fn ping(&self) -> StoreResult<()>;
}

/// The connection provider handed to every service.
#[derive(Clone)]
pub struct Store {
    users: Arc<dyn UserStore>,
    tasks: Arc<dyn TaskStore>,
    timeout: Duration,
}

impl Store {
    pub fn new<B>(backend: B, timeout: Duration) -> Self
    where
        B: UserStore + TaskStore + 'static,
    {
        let backend = Arc::new(backend);
        Self {
            users: backend.clone(),
            tasks: backend,
            timeout,
        }
    }

    /// A fresh, empty in-process store with the default deadline.
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::default(), DEFAULT_STORE_TIMEOUT)
    }

    pub fn users(&self) -> &dyn UserStore {
        self.users.as_ref()
    }

    pub fn tasks(&self) -> &dyn TaskStore {
        self.tasks.as_ref()
    }

    /// Runs one store call under the configured deadline. There is no retry.
    pub async fn bounded<T, F>(&self, call: F) -> StoreResult<T>
    where
        F: Future<Output = StoreResult<T>>,
    {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(StoreError::Timeout(self.timeout)),
        }
    }
}
