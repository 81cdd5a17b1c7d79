pub mod task;
pub mod user;

pub use task::{Comment, CommentInput, StatusUpdate, Task, TaskInput, TaskPriority, TaskStatus};
pub use user::{normalize_email, User, UserSummary};
