use crate::{
    auth::AuthenticatedUser,
    error::AppError,
    models::{CommentInput, StatusUpdate, TaskInput},
    services::TaskService,
};
use actix_web::{delete, get, patch, post, put, web, HttpResponse, Responder};
use serde_json::json;

/// Lists every task in the workspace.
///
/// ## Responses:
/// - `200 OK`: JSON array of `Task` objects, in creation order.
/// - `401 Unauthorized`: missing or invalid session token.
/// - `500 Internal Server Error`: store failure or timeout.
#[get("")]
pub async fn get_tasks(
    tasks: web::Data<TaskService>,
    _user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let all = tasks.list_all().await?;
    Ok(HttpResponse::Ok().json(all))
}

/// Lists the tasks whose assignees include the caller.
#[get("/assigned")]
pub async fn get_assigned_tasks(
    tasks: web::Data<TaskService>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let assigned = tasks.list_assigned(user.0).await?;
    Ok(HttpResponse::Ok().json(assigned))
}

/// Creates a new task.
///
/// ## Request Body:
/// A JSON object matching `TaskInput`:
/// - `title`: 3 to 100 characters (required).
/// - `description` (optional).
/// - `priority` (optional): `low`, `medium`, `high` or `urgent`. Defaults to `medium`.
/// - `assigned_to` (optional): list of user ids.
/// - `due_date` (optional).
///
/// A `status` in the body is accepted but ignored; new tasks are `pending`.
///
/// ## Responses:
/// - `201 Created`: the stored `Task`.
/// - `400 Bad Request`: malformed body or failed validation.
/// - `401 Unauthorized`: missing or invalid session token.
/// - `500 Internal Server Error`: store failure or timeout.
#[post("")]
pub async fn create_task(
    tasks: web::Data<TaskService>,
    task_data: web::Json<TaskInput>,
    _user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let task = tasks.create(task_data.into_inner()).await?;
    Ok(HttpResponse::Created().json(task))
}

/// Retrieves a task by id. A malformed id is a `400`, an unknown one a `404`.
#[get("/{id}")]
pub async fn get_task(
    tasks: web::Data<TaskService>,
    task_id: web::Path<String>,
    _user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let task = tasks.get(&task_id).await?;
    Ok(HttpResponse::Ok().json(task))
}

/// Replaces a task's editable fields.
///
/// Title, description, priority, assignees and due date are overwritten; the
/// status only changes when the body names one. `created_at` and comments are
/// kept.
#[put("/{id}")]
pub async fn update_task(
    tasks: web::Data<TaskService>,
    task_id: web::Path<String>,
    task_data: web::Json<TaskInput>,
    _user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    tasks.update(&task_id, task_data.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "Task updated successfully" })))
}

#[patch("/{id}/status")]
pub async fn update_task_status(
    tasks: web::Data<TaskService>,
    task_id: web::Path<String>,
    status_data: web::Json<StatusUpdate>,
    _user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    tasks
        .update_status(&task_id, status_data.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "Task status updated successfully" })))
}

/// Appends a comment authored by the caller and returns it.
#[post("/{id}/comments")]
pub async fn add_comment(
    tasks: web::Data<TaskService>,
    task_id: web::Path<String>,
    comment_data: web::Json<CommentInput>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let comment = tasks
        .add_comment(&task_id, user.0, comment_data.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(comment))
}

/// Deletes a task. Succeeds whether or not the task existed.
#[delete("/{id}")]
pub async fn delete_task(
    tasks: web::Data<TaskService>,
    task_id: web::Path<String>,
    _user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    tasks.delete(&task_id).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "Task deleted successfully" })))
}
