//! Error types for exchange-export

use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

use crate::client::models::AssetCoordinates;

/// Result type alias for exchange-export operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Interactive prompt error: {0}")]
    Dialoguer(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failure that escaped the export loop, tagged with the asset being
    /// processed when it happened (`none` if no asset was reached).
    #[error("Failed to check or download files for {}: {source}", describe_asset(.asset.as_ref()))]
    Export {
        asset: Option<AssetCoordinates>,
        #[source]
        source: Box<Error>,
    },
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::Dialoguer(err.to_string())
    }
}

fn describe_asset(asset: Option<&AssetCoordinates>) -> String {
    asset.map_or_else(|| "none".to_string(), ToString::to_string)
}

/// API-related errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(
        "Authentication failed. Check your client id and secret, or run `exchange-export init`."
    )]
    Unauthorized,

    #[error("Access denied. You don't have permission to access this resource.")]
    Forbidden,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Rate limit exceeded. Retry after {0:?}")]
    RateLimit(Duration),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    #[error("Pagination exceeded {max_pages} pages without reaching an empty page")]
    PaginationExceeded { max_pages: usize },
}

impl ApiError {
    /// Map a non-success HTTP status to an error.
    ///
    /// `body` is the response text (used as detail where the status carries
    /// one) and `retry_after` the parsed `Retry-After` header in seconds.
    pub fn from_status(status: StatusCode, body: String, retry_after: Option<u64>) -> Self {
        match status {
            StatusCode::UNAUTHORIZED => ApiError::Unauthorized,
            StatusCode::FORBIDDEN => ApiError::Forbidden,
            StatusCode::NOT_FOUND => ApiError::NotFound(non_empty_or(body, "Resource not found")),
            StatusCode::TOO_MANY_REQUESTS => {
                ApiError::RateLimit(Duration::from_secs(retry_after.unwrap_or(60)))
            }
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                ApiError::BadRequest(non_empty_or(body, "Bad request"))
            }
            status if status.is_server_error() => {
                ApiError::ServerError(non_empty_or(body, &format!("Server error: {}", status)))
            }
            status => ApiError::InvalidResponse(format!("Unexpected status code: {}", status)),
        }
    }
}

fn non_empty_or(body: String, fallback: &str) -> String {
    if body.trim().is_empty() {
        fallback.to_string()
    } else {
        body
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Network("Request timed out".to_string())
        } else if err.is_connect() {
            ApiError::Network("Failed to connect to API".to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}. Run `exchange-export init` to create one.")]
    NotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),

    #[error(
        "Client credentials not configured. Set EXCHANGE_EXPORT_CLIENT_ID and EXCHANGE_EXPORT_CLIENT_SECRET, or run `exchange-export init`."
    )]
    MissingCredentials,
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
