use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{StoreError, StoreResult, TaskStore, UserStore};
use crate::models::{Comment, Task, TaskInput, TaskStatus, User};

/// In-process backend. Lists come back in insertion order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: Mutex<Vec<User>>,
    tasks: Mutex<Vec<Task>>,
}

fn lock<T>(mutex: &Mutex<T>) -> StoreResult<MutexGuard<'_, T>> {
    mutex
        .lock()
        .map_err(|_| StoreError::Backend("memory store lock poisoned".into()))
}

impl MemoryStore {
    fn with_task<F>(&self, id: Uuid, change: F) -> StoreResult<bool>
    where
        F: FnOnce(&mut Task),
    {
        let mut tasks = lock(&self.tasks)?;
        match tasks.iter_mut().find(|task| task.id == id) {
            Some(task) => {
                change(task);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let users = lock(&self.users)?;
        Ok(users.iter().find(|user| user.email == email).cloned())
    }

    async fn insert_user(&self, user: &User) -> StoreResult<()> {
        let mut users = lock(&self.users)?;
        if users.iter().any(|existing| existing.email == user.email) {
            return Err(StoreError::Duplicate(format!(
                "email {} already registered",
                user.email
            )));
        }
        users.push(user.clone());
        Ok(())
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn insert_task(&self, task: &Task) -> StoreResult<()> {
        lock(&self.tasks)?.push(task.clone());
        Ok(())
    }

    async fn list_tasks(&self) -> StoreResult<Vec<Task>> {
        Ok(lock(&self.tasks)?.clone())
    }

    async fn list_tasks_assigned_to(&self, user_id: Uuid) -> StoreResult<Vec<Task>> {
        let tasks = lock(&self.tasks)?;
        Ok(tasks
            .iter()
            .filter(|task| task.is_assigned_to(user_id))
            .cloned()
            .collect())
    }

    async fn find_task(&self, id: Uuid) -> StoreResult<Option<Task>> {
        let tasks = lock(&self.tasks)?;
        Ok(tasks.iter().find(|task| task.id == id).cloned())
    }

    async fn update_task(
        &self,
        id: Uuid,
        input: &TaskInput,
        updated_at: DateTime<Utc>,
    ) -> StoreResult<bool> {
        self.with_task(id, |task| task.apply_update(input, updated_at))
    }

    async fn update_task_status(
        &self,
        id: Uuid,
        status: TaskStatus,
        updated_at: DateTime<Utc>,
    ) -> StoreResult<bool> {
        self.with_task(id, |task| {
            task.status = status;
            task.updated_at = updated_at;
        })
    }

    async fn append_comment(&self, id: Uuid, comment: &Comment) -> StoreResult<bool> {
        self.with_task(id, |task| {
            task.comments.push(comment.clone());
            task.updated_at = comment.created_at;
        })
    }

    async fn delete_task(&self, id: Uuid) -> StoreResult<bool> {
        let mut tasks = lock(&self.tasks)?;
        let before = tasks.len();
        tasks.retain(|task| task.id != id);
        Ok(tasks.len() != before)
    }

    async fn ping(&self) -> StoreResult<()> {
        lock(&self.tasks).map(|_| ())
    }
}
