use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use std::fmt;

use crate::feed::{fetcher::FetchError, parser::FeedParseError};

/// Why a refresh cycle produced no new result.
#[derive(Debug, thiserror::Error)]
pub enum RefreshError {
    #[error("error fetching feed: {0}")]
    Fetch(#[from] FetchError),
    #[error("error parsing feed: {0}")]
    Parse(#[from] FeedParseError),
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?} ({reason})")]
    Invalid {
        key: String,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    pub fn invalid(key: &str, value: &str, reason: impl fmt::Display) -> Self {
        ConfigError::Invalid {
            key: key.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Errors surfaced by the HTTP API
#[derive(Debug)]
pub enum AppError {
    /// No refresh has succeeded yet
    NoDataYet,
    ResourceNotFound { resource: String },
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NoDataYet => write!(f, "No warning data available yet - please try again shortly"),
            AppError::ResourceNotFound { resource } => write!(f, "{} not found", resource),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;
        match self {
            AppError::NoDataYet => StatusCode::SERVICE_UNAVAILABLE,
            AppError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error_code = match self {
            AppError::NoDataYet => "NO_DATA_YET",
            AppError::ResourceNotFound { .. } => "RESOURCE_NOT_FOUND",
        };

        log::info!("Client error: {:?}", self);

        HttpResponse::build(self.status_code()).json(json!({
            "error": {
                "code": error_code,
                "message": self.to_string()
            }
        }))
    }
}

/// Result type alias for API errors
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn resource_not_found(resource: &str) -> Self {
        AppError::ResourceNotFound {
            resource: resource.to_string(),
        }
    }
}
