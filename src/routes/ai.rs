use crate::{error::AppError, llm::LlmClient};
use actix_web::{post, web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use serde_json::json;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct ProjectRequest {
    #[validate(custom = "crate::auth::not_blank")]
    pub project_description: String,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TaskDescriptionRequest {
    #[validate(custom = "crate::auth::not_blank")]
    pub task_description: String,
}

/// Asks the model for a list of tasks for a project description.
#[post("/suggest-tasks")]
pub async fn suggest_tasks(
    llm: web::Data<LlmClient>,
    body: web::Json<ProjectRequest>,
) -> Result<impl Responder, AppError> {
    body.validate()?;
    let suggestions = llm.suggest_tasks(&body.project_description).await?;
    Ok(HttpResponse::Ok().json(json!({ "suggestions": suggestions })))
}

#[post("/improve-task")]
pub async fn improve_task(
    llm: web::Data<LlmClient>,
    body: web::Json<TaskDescriptionRequest>,
) -> Result<impl Responder, AppError> {
    body.validate()?;
    let improved_task = llm.improve_task(&body.task_description).await?;
    Ok(HttpResponse::Ok().json(json!({ "improved_task": improved_task })))
}

/// The priority is the model's free-text answer.
#[post("/assign-priority")]
pub async fn assign_priority(
    llm: web::Data<LlmClient>,
    body: web::Json<TaskDescriptionRequest>,
) -> Result<impl Responder, AppError> {
    body.validate()?;
    let priority = llm.assign_priority(&body.task_description).await?;
    Ok(HttpResponse::Ok().json(json!({ "priority": priority })))
}
