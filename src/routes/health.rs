use actix_web::{get, web, HttpResponse, Responder};
use chrono::Utc;
use serde_json::json;

use crate::store::Store;

/// Health check endpoint
///
/// Pings the store under its usual deadline. Answers `200` when it responds
/// and `503` otherwise.
#[get("/health")]
pub async fn health(store: web::Data<Store>) -> impl Responder {
    match store.bounded(store.tasks().ping()).await {
        Ok(()) => HttpResponse::Ok().json(json!({
            "status": "ok",
            "store": "ok",
            "timestamp": Utc::now()
        })),
        Err(e) => {
            log::error!("Health check failed: {}", e);
            HttpResponse::ServiceUnavailable().json(json!({
                "status": "degraded",
                "store": "unavailable",
                "timestamp": Utc::now()
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test;

    #[actix_web::test]
    async fn test_health_endpoint() {
        let app = test::init_service(
            actix_web::App::new()
                .app_data(web::Data::new(Store::in_memory()))
                .service(health),
        )
        .await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let resp = test::call_service(&app, req).await;

        assert!(resp.status().is_success());

        let body = test::read_body(resp).await;
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(json["status"], "ok");
        assert_eq!(json["store"], "ok");
        assert!(json["timestamp"].is_string());
    }
}
