use std::fmt;

use actix_web::{error::QueryPayloadError, http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use trending_client::ClientError;

pub const INVALID_SINCE_MESSAGE: &str = "Invalid since parameter";
pub const INVALID_QUERY_MESSAGE: &str = "Invalid query parameters";
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch trending repositories";

/// Errors surfaced by the HTTP handlers.
#[derive(Debug)]
pub enum ApiError {
    /// Caller supplied an unknown `since` window.
    Validation(String),
    /// The query string itself could not be decoded.
    InvalidQuery(String),
    /// Scraping GitHub failed.
    Upstream(String),
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub details: String,
}

impl ApiError {
    fn headline(&self) -> &'static str {
        match self {
            Self::Validation(_) => INVALID_SINCE_MESSAGE,
            Self::InvalidQuery(_) => INVALID_QUERY_MESSAGE,
            Self::Upstream(_) => FETCH_FAILED_MESSAGE,
        }
    }

    fn details(&self) -> &str {
        match self {
            Self::Validation(details) | Self::InvalidQuery(details) | Self::Upstream(details) => {
                details
            }
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.headline(), self.details())
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            Self::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.headline().to_string(),
            details: self.details().to_string(),
        })
    }
}

impl From<QueryPayloadError> for ApiError {
    fn from(error: QueryPayloadError) -> Self {
        Self::InvalidQuery(error.to_string())
    }
}

impl From<ClientError> for ApiError {
    fn from(error: ClientError) -> Self {
        if error.is_validation() {
            Self::Validation(error.to_string())
        } else {
            Self::Upstream(error.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_bad_request() {
        let error = ApiError::from(ClientError::InvalidSince("yearly".to_string()));
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(error.headline(), INVALID_SINCE_MESSAGE);
        assert!(error.details().contains("yearly"));
    }

    #[test]
    fn network_failures_map_to_server_error() {
        let error = ApiError::from(ClientError::Http("connection refused".to_string()));
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.headline(), FETCH_FAILED_MESSAGE);
        assert_eq!(error.details(), "HTTP request failed: connection refused");
    }
}
