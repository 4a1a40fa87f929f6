use actix_web::{middleware, web, App, HttpServer};
use anyhow::{Context, Result};
use trending_client::TrendingClient;

pub mod config;
pub mod error;
pub mod handlers;

pub use config::ServerConfig;
pub use error::{ApiError, ErrorBody};
pub use handlers::{configure_routes, AppState};

/// Serve `/api/trending` until the process is stopped.
pub async fn run_server(config: ServerConfig) -> Result<()> {
    let client = TrendingClient::with_config(config.client.clone())
        .context("failed to build trending scraper")?;
    let state = web::Data::new(AppState::new(client));

    tracing::info!(
        target: "trending_server",
        host = %config.host,
        port = config.port,
        github = %config.client.base_url,
        "Starting trending server"
    );

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(middleware::Logger::default())
            .configure(configure_routes)
    })
    .bind((config.host.as_str(), config.port))
    .with_context(|| format!("failed to bind {}:{}", config.host, config.port))?
    .run()
    .await
    .context("trending server exited with an error")
}
