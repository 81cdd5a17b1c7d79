pub mod ai;
pub mod auth;
pub mod health;
pub mod tasks;

use actix_web::web;

use crate::auth::AuthMiddleware;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(auth::register)
            .service(auth::login),
    )
    .service(
        // `/assigned` must be registered before `/{id}`.
        web::scope("/tasks")
            .wrap(AuthMiddleware)
            .service(tasks::get_assigned_tasks)
            .service(tasks::get_tasks)
            .service(tasks::create_task)
            .service(tasks::get_task)
            .service(tasks::update_task)
            .service(tasks::update_task_status)
            .service(tasks::add_comment)
            .service(tasks::delete_task),
    )
    .service(
        web::scope("/ai")
            .service(ai::suggest_tasks)
            .service(ai::improve_task)
            .service(ai::assign_priority),
    )
    .service(health::health);
}
