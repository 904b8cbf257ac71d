use actix_web::{web, HttpResponse, Responder};
use serde_json::Value;
use uuid::Uuid;

use crate::handlers::{self, AppState};
use crate::models::{HealthResponse, IngestResponse};

/// Configure all ingest routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/triggers", web::post().to(ingest_trigger));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let store_healthy = state.store.health_check().await.unwrap_or(false);

    let status = if store_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Trigger ingest endpoint
///
/// POST /api/v1/triggers
///
/// Accepts either a change batch (`{"records": [...]}`) or a scheduled
/// payload (`{"source": "..."}`). Processing runs before the response, so
/// the body reports how the payload was classified.
async fn ingest_trigger(state: web::Data<AppState>, payload: web::Json<Value>) -> impl Responder {
    let invocation = Uuid::new_v4();

    tracing::info!("Invocation {} received trigger", invocation);

    let trigger = handlers::dispatch(&state, &payload).await;

    tracing::info!("Invocation {} handled as {}", invocation, trigger);

    HttpResponse::Ok().json(IngestResponse {
        invocation: invocation.to_string(),
        trigger: trigger.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_check_response() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            version: "0.1.0".to_string(),
            timestamp: chrono::Utc::now(),
        };

        assert_eq!(response.status, "healthy");
    }
}
