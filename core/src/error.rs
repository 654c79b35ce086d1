//! Error types for the ordering client.
//!
//! # Design
//! Two layers. `ApiError` is the fine-grained cause produced while building
//! a request, moving it over a `Transport`, or decoding the response.
//! `OrderingError` is what `OrderingClient` hands back to UI callers: a
//! coarse `FetchFailed` / `SubmitFailed` outcome that keeps the cause as its
//! `source()` for logging, since the caller's recourse does not depend on it.
//! `ConfigError` only occurs while constructing a client.

use thiserror::Error;

/// Result type alias for `MenuApi` build/parse steps.
pub type ApiResult<T> = Result<T, ApiError>;

/// Result type alias for `OrderingClient` operations.
pub type OrderingResult<T> = Result<T, OrderingError>;

/// Failure reported by a `Transport` before any HTTP status was received.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection refused, DNS failure, reset, TLS failure.
    #[error("connection failed: {0}")]
    Connection(String),

    /// The transport's own deadline elapsed.
    #[error("request timed out")]
    Timeout,

    /// The response body could not be read to the end.
    #[error("failed to read response body: {0}")]
    Body(String),
}

/// Errors returned by `MenuApi` parse methods and the transport layer.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced an HTTP response.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// The response body could not be deserialized into the expected shape.
    #[error("deserialization failed: {0}")]
    Decode(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// A locator could not be resolved against the base origin.
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// The body of an image response is not a recognised image format.
    #[error("response body is not a supported image")]
    NotAnImage,

    /// No local asset is registered under this name.
    #[error("local asset not found: {0}")]
    AssetNotFound(String),
}

/// Outcome tags surfaced to UI collaborators.
#[derive(Debug, Error)]
pub enum OrderingError {
    /// `fetch_categories`, `fetch_menu_items` or `fetch_image` failed.
    #[error("fetch failed")]
    FetchFailed(#[source] ApiError),

    /// `submit_order` failed; the order must not be treated as placed.
    #[error("order submission failed")]
    SubmitFailed(#[source] ApiError),
}

impl OrderingError {
    /// The underlying cause.
    pub fn cause(&self) -> &ApiError {
        match self {
            OrderingError::FetchFailed(e) | OrderingError::SubmitFailed(e) => e,
        }
    }
}

/// Construction-time configuration failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The base origin does not parse or is not an http(s) URL with a host.
    #[error("invalid base url '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// The config file could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid TOML for `ClientConfig`.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// An environment override holds an unusable value.
    #[error("invalid value for {key}: '{value}'")]
    InvalidEnv { key: &'static str, value: String },
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

impl From<url::ParseError> for ApiError {
    fn from(err: url::ParseError) -> Self {
        ApiError::InvalidUrl(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn coarse_error_keeps_cause_as_source() {
        let err = OrderingError::FetchFailed(ApiError::HttpStatus {
            status: 500,
            body: "boom".into(),
        });
        assert_eq!(err.to_string(), "fetch failed");
        let source = err.source().unwrap().to_string();
        assert!(source.contains("500"));
        assert!(matches!(err.cause(), ApiError::HttpStatus { status: 500, .. }));
    }

    #[test]
    fn transport_error_converts_into_api_error() {
        let err: ApiError = TransportError::Timeout.into();
        assert!(matches!(err, ApiError::Transport(TransportError::Timeout)));
        assert_eq!(err.to_string(), "transport error: request timed out");
    }
}
