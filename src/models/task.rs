use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Represents the priority of a task.
/// Corresponds to the `task_priority` SQL enum.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "task_priority", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    /// Used when a task is created without a priority.
    #[default]
    Medium,
    High,
    Urgent,
}

/// Represents the status of a task.
/// Corresponds to the `task_status` SQL enum.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "task_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Every task starts here.
    #[default]
    Pending,
    InProgress,
    Completed,
}

/// A note left on a task. Comments are only ever appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    /// Author of the comment.
    pub user_id: Uuid,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// Input structure for creating or updating a task.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TaskInput {
    /// The title of the task. Must be between 3 and 100 characters.
    #[validate(length(min = 3, max = 100, message = "title must be between 3 and 100 characters"))]
    pub title: String,

    pub description: Option<String>,

    /// Ignored on creation, where the status is always `pending`.
    /// On update, `None` keeps the current status.
    pub status: Option<TaskStatus>,

    #[serde(default)]
    pub priority: TaskPriority,

    /// Users this task is assigned to. Duplicates are kept as given.
    #[serde(default)]
    pub assigned_to: Vec<Uuid>,

    pub due_date: Option<DateTime<Utc>>,
}

/// Body of a status-only update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: TaskStatus,
}

/// Body of a new comment.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CommentInput {
    #[validate(length(min = 1, message = "text is required"))]
    pub text: String,
}

/// Represents a task document as stored and returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub assigned_to: Vec<Uuid>,
    pub comments: Vec<Comment>,
    pub due_date: Option<DateTime<Utc>>,
    /// Set once at creation.
    pub created_at: DateTime<Utc>,
    /// Refreshed on every mutation.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new `Task` from `TaskInput` with a fresh id and both
    /// timestamps set to now. Any status in the input is discarded.
    pub fn new(input: TaskInput) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: input.title,
            description: input.description,
            status: TaskStatus::Pending,
            priority: input.priority,
            assigned_to: input.assigned_to,
            comments: Vec::new(),
            due_date: input.due_date,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces the mutable fields with `input`. `created_at` and the
    /// comment list are left alone.
    pub fn apply_update(&mut self, input: &TaskInput, updated_at: DateTime<Utc>) {
        self.title = input.title.clone();
        self.description = input.description.clone();
        if let Some(status) = input.status {
            self.status = status;
        }
        self.priority = input.priority;
        self.assigned_to = input.assigned_to.clone();
        self.due_date = input.due_date;
        self.updated_at = updated_at;
    }

    pub fn is_assigned_to(&self, user_id: Uuid) -> bool {
        self.assigned_to.contains(&user_id)
    }
}
