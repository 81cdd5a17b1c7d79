//! Shared application state and the app wiring used by both `main` and the
//! integration tests.

use actix_cors::Cors;
use actix_web::{http::header, web};

use crate::auth::SessionTokens;
use crate::error::AppError;
use crate::llm::LlmClient;
use crate::routes;
use crate::services::{AuthService, TaskService};
use crate::store::Store;

/// Everything handlers reach through `web::Data`, built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub auth: web::Data<AuthService>,
    pub tasks: web::Data<TaskService>,
    pub llm: web::Data<LlmClient>,
    pub tokens: web::Data<SessionTokens>,
    pub store: web::Data<Store>,
}

impl AppState {
    pub fn new(store: Store, tokens: SessionTokens, llm: LlmClient) -> Self {
        Self {
            auth: web::Data::new(AuthService::new(store.clone(), tokens.clone())),
            tasks: web::Data::new(TaskService::new(store.clone())),
            llm: web::Data::new(llm),
            tokens: web::Data::new(tokens),
            store: web::Data::new(store),
        }
    }

    /// Registers the shared state, the JSON body settings and every route.
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(self.auth.clone())
            .app_data(self.tasks.clone())
            .app_data(self.llm.clone())
            .app_data(self.tokens.clone())
            .app_data(self.store.clone())
            .app_data(json_config())
            .configure(routes::config);
    }
}

/// Malformed or incomplete JSON bodies become a 400 with the usual error body.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        AppError::BadRequest(format!("Invalid request payload: {}", err)).into()
    })
}

/// Cross-origin policy. Without an allowed origin only same-origin requests work.
pub fn cors(allowed_origin: Option<&str>) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE"])
        .allowed_headers(vec![header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .supports_credentials()
        .max_age(3600);

    match allowed_origin {
        Some(origin) => cors.allowed_origin(origin),
        None => cors,
    }
}
