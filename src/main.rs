mod config;
mod error;
mod handlers;
mod middleware;
mod models;
mod repositories;
mod routes;
mod services;
mod utils;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::Config;
use handlers::{not_found, root};
use middleware::ErrorLogging;
use repositories::{HistoryStore, JsonFileHistoryRepo};
use routes::api;
use services::{CatalogService, NasaClient, SearchService, TtlCache};

#[derive(Clone)]
pub struct AppState {
    pub search_service: SearchService,
    pub catalog_service: CatalogService,
    pub history: Arc<dyn HistoryStore>,
    pub config: Config,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let history: Arc<dyn HistoryStore> =
            Arc::new(JsonFileHistoryRepo::new(config.storage.history_file.clone()));
        let nasa = NasaClient::new(config.upstream.clone())?;
        let search_service = SearchService::new(Arc::new(nasa), history.clone());
        let catalog_service = CatalogService::new(
            config.storage.catalog_file.clone(),
            TtlCache::new(config.cache.ttl_seconds),
        );

        Ok(Self {
            search_service,
            catalog_service,
            history,
            config,
            start_time: Instant::now(),
        })
    }
}

fn cors(config: &Config) -> Cors {
    let cors = Cors::default()
        .allow_any_method()
        .allow_any_header()
        .supports_credentials()
        .max_age(3600);

    config
        .security
        .allowed_origins
        .iter()
        .fold(cors, |cors, origin| cors.allowed_origin(origin))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = match Config::from_env() {
        Ok(config) => {
            info!("Configuration loaded successfully");
            config
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    info!(
        "Starting Space Explorer API on port {}",
        config.server.port
    );

    let state = match AppState::new(config.clone()) {
        Ok(state) => state,
        Err(e) => {
            error!("Failed to initialize services: {:#}", e);
            std::process::exit(1);
        }
    };

    let server = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(web::JsonConfig::default().limit(state.config.server.max_json_payload_size))
            .wrap(cors(&state.config))
            .wrap(ErrorLogging)
            .wrap(Logger::default())
            .route("/", web::get().to(root))
            .service(api::config())
            .default_service(web::route().to(not_found))
    })
    .bind(format!("{}:{}", config.server.host, config.server.port))?;

    info!(
        "Server started successfully at http://{}:{}",
        config.server.host, config.server.port
    );

    server.workers(config.server.workers).run().await
}
