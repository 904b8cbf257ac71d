mod config;
mod core;
mod handlers;
mod models;
mod routes;
mod services;

use actix_cors::Cors;
use actix_web::{http::StatusCode, middleware, web, App, HttpResponse, HttpServer};
use std::sync::Arc;
use tracing::{error, info};

use crate::config::Settings;
use crate::handlers::AppState;
use crate::services::{ChatNotifier, Mailer, ProfileStore, SearchClient};

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl actix_web::error::ResponseError for JsonError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST),
        )
        .content_type("application/json")
        .body(serde_json::to_string(self).unwrap())
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(
    err: actix_web::error::JsonPayloadError,
    req: &actix_web::HttpRequest,
) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Initialize logging
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(log_level))
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting UniWEP notification service...");

    // Load configuration
    let settings = Settings::load().unwrap_or_else(|e| {
        error!("Failed to load configuration: {}", e);
        panic!("Configuration error: {}", e);
    });

    info!("Configuration loaded successfully");

    let posting_index = settings.posting_index();
    let profile_index = settings.profile_index();
    let profile_table = settings.profile_table();
    let environment = settings.deployment.environment.clone();

    // Initialize search client
    let search = Arc::new(SearchClient::new(
        settings.search.endpoint,
        settings.search.username,
        settings.search.password,
        posting_index,
        profile_index,
    ));

    info!("Search client initialized");

    // Initialize profile store client
    let store = Arc::new(
        ProfileStore::from_settings(
            &settings.store.url,
            profile_table,
            settings.store.max_connections,
            settings.store.min_connections,
        )
        .await
        .unwrap_or_else(|e| {
            error!("Failed to connect to the profile store: {}", e);
            panic!("Profile store connection error: {}", e);
        }),
    );

    info!("Profile store initialized");

    // Initialize mail relay and chat clients
    let mailer = Arc::new(Mailer::new(
        settings.mail.endpoint,
        settings.mail.api_key,
        settings.mail.sender,
    ));

    let chat = Arc::new(ChatNotifier::new(
        settings.chat.new_posting_webhook,
        settings.chat.send_summary_webhook,
    ));

    info!("Mail relay and chat clients initialized");

    // Build application state
    let app_state = AppState {
        search,
        store,
        mailer,
        chat,
        environment,
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
