mod config;
mod handler;
mod recommender;
mod render;
mod scheduler;
mod service;
#[cfg(test)]
mod testing;

use axum::{
    routing::{get, post},
    Router,
};
use config::{ApiConfig, BoardConfig};
use connectors::{coingecko::CoinGeckoConnector, CoinGeckoConfig};
use handler::SharedService;
use service::MemeService;
use std::net::SocketAddr;
use std::sync::Arc;
use store::PageStore;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

fn router(service: SharedService) -> Router {
    // Create CORS middleware
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handler::page))
        .route("/api/v1/coins", get(handler::list_coins))
        .route("/api/v1/status", get(handler::status))
        .route("/api/v1/refresh", post(handler::refresh))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(service)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting meme board");

    // Load configuration from environment
    let api_config = ApiConfig::from_env();
    let board_config = BoardConfig::from_env()
        .map_err(|e| format!("Failed to load board configuration: {}", e))?;
    let profile = board_config.profile()?;
    let source_config = CoinGeckoConfig::from_env()
        .map_err(|e| format!("Failed to load CoinGecko configuration: {}", e))?;

    info!(
        "Chain: {}, filter: {:?}, enrich concurrency: {}",
        profile.chain, profile.filter, board_config.enrich_concurrency
    );

    // Create market data connector
    let coingecko = Arc::new(CoinGeckoConnector::new(source_config)?);

    // Create board service
    let service = Arc::new(MemeService::new(
        coingecko,
        profile,
        Arc::new(PageStore::new()),
        board_config.enrich_concurrency,
    ));

    // First refresh runs right away, then on every interval
    scheduler::spawn(service.clone(), board_config.refresh_interval);

    let app = router(service);

    // Start server
    let addr: SocketAddr = format!("{}:{}", api_config.host, api_config.port).parse()?;
    info!("Listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await?;

    Ok(())
}
