use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::error::AppError;
use crate::models::{Comment, CommentInput, StatusUpdate, Task, TaskInput};
use crate::store::Store;

const TASK_NOT_FOUND: &str = "Task not found";

/// Parses a task id taken from the URL.
pub fn parse_task_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw.trim()).map_err(|_| AppError::BadRequest("Invalid task ID".into()))
}

/// Task CRUD over the task store.
///
/// Tasks live in one shared workspace: any authenticated caller may read,
/// update or delete any task. The caller's identity only matters for the
/// assigned-to-me listing and as the author of comments.
#[derive(Clone)]
pub struct TaskService {
    store: Store,
}

impl TaskService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Stores a new task. Whatever status the input carries, it starts `pending`.
    pub async fn create(&self, input: TaskInput) -> Result<Task, AppError> {
        input.validate()?;

        let task = Task::new(input);
        self.store
            .bounded(self.store.tasks().insert_task(&task))
            .await?;
        Ok(task)
    }

    pub async fn list_all(&self) -> Result<Vec<Task>, AppError> {
        Ok(self.store.bounded(self.store.tasks().list_tasks()).await?)
    }

    pub async fn list_assigned(&self, user_id: Uuid) -> Result<Vec<Task>, AppError> {
        Ok(self
            .store
            .bounded(self.store.tasks().list_tasks_assigned_to(user_id))
            .await?)
    }

    pub async fn get(&self, id: &str) -> Result<Task, AppError> {
        let id = parse_task_id(id)?;
        self.store
            .bounded(self.store.tasks().find_task(id))
            .await?
            .ok_or_else(|| AppError::NotFound(TASK_NOT_FOUND.into()))
    }

    /// Replaces the task's editable fields. `created_at` and comments are kept,
    /// and the status only changes when the input names one.
    pub async fn update(&self, id: &str, input: TaskInput) -> Result<(), AppError> {
        let id = parse_task_id(id)?;
        input.validate()?;

        let found = self
            .store
            .bounded(self.store.tasks().update_task(id, &input, Utc::now()))
            .await?;
        if !found {
            return Err(AppError::NotFound(TASK_NOT_FOUND.into()));
        }
        Ok(())
    }

    pub async fn update_status(&self, id: &str, update: StatusUpdate) -> Result<(), AppError> {
        let id = parse_task_id(id)?;

        let found = self
            .store
            .bounded(
                self.store
                    .tasks()
                    .update_task_status(id, update.status, Utc::now()),
            )
            .await?;
        if !found {
            return Err(AppError::NotFound(TASK_NOT_FOUND.into()));
        }
        Ok(())
    }

    /// Removes the task if it exists. Deleting an absent task is not an error.
    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        let id = parse_task_id(id)?;

        let found = self
            .store
            .bounded(self.store.tasks().delete_task(id))
            .await?;
        if !found {
            log::debug!("Delete of absent task {}", id);
        }
        Ok(())
    }

    pub async fn add_comment(
        &self,
        id: &str,
        author: Uuid,
        input: CommentInput,
    ) -> Result<Comment, AppError> {
        let id = parse_task_id(id)?;
        input.validate()?;

        let text = input.text.trim().to_string();
        if text.is_empty() {
            return Err(AppError::ValidationError("text: required".into()));
        }

        let comment = Comment {
            user_id: author,
            text,
            created_at: Utc::now(),
        };
        let found = self
            .store
            .bounded(self.store.tasks().append_comment(id, &comment))
            .await?;
        if !found {
            return Err(AppError::NotFound(TASK_NOT_FOUND.into()));
        }
        Ok(comment)
    }
}
