use actix_web::{http::header, web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};
use trending_client::{Since, TrendingClient};

use crate::error::ApiError;

pub const DEFAULT_LANGUAGE: &str = "python";
pub const CACHE_CONTROL_VALUE: &str = "public, max-age=300";

/// Shared across workers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub client: TrendingClient,
}

impl AppState {
    pub fn new(client: TrendingClient) -> Self {
        Self { client }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct TrendingQuery {
    pub language: Option<String>,
    pub since: Option<String>,
}

/// Missing and empty parameters both fall back to the default.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}

/// GET /api/trending
///
/// Query parameters:
/// - language: trending language slug. Default: python
/// - since: daily, weekly or monthly. Default: daily
pub async fn get_trending(
    state: web::Data<AppState>,
    query: web::Query<TrendingQuery>,
) -> Result<HttpResponse, ApiError> {
    let TrendingQuery { language, since } = query.into_inner();
    let language = non_empty(language).unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());
    let since = match non_empty(since) {
        Some(raw) => raw.parse::<Since>()?,
        None => Since::default(),
    };

    let response = state
        .client
        .fetch_response(&language, since)
        .await
        .map_err(|err| {
            error!(language = %language, %since, error = %err, "trending request failed");
            ApiError::from(err)
        })?;

    info!(
        language = %language,
        %since,
        count = response.repositories.len(),
        "served trending repositories"
    );
    Ok(HttpResponse::Ok()
        .insert_header((header::CACHE_CONTROL, CACHE_CONTROL_VALUE))
        .json(response))
}

pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

/// Undecodable query strings get the same JSON error body as other 400s.
fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| ApiError::from(err).into())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/trending")
            .app_data(query_config())
            .route(web::get().to(get_trending)),
    )
        .service(web::resource("/health").route(web::get().to(health)));
}
