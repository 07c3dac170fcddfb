// ABOUTME: Server assembly: config, tracing, CORS, and the axum listener

use axum::http::Method;
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

pub mod config;

use config::Config;
use samrat_api::{DbOptions, DbState};

pub async fn run_server() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    tracing_subscriber::EnvFilter::new("samrat=info,tower_http=info")
                }),
        )
        .init();

    let config = Config::from_env()?;

    let db = DbState::init_with_options(DbOptions {
        database_path: config.database_path.clone(),
        blob_dir: config.blob_dir.clone(),
        max_upload_bytes: Some(config.max_upload_bytes),
        session_ttl_hours: Some(config.session_ttl_hours),
    })
    .await?;

    let cors = CorsLayer::new()
        .allow_origin(config.cors_origin.parse::<axum::http::HeaderValue>()?)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let app = samrat_api::create_router(db)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
