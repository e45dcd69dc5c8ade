use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Why a single provider call did not produce a usable body.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("provider answered with status {0}")]
    Status(StatusCode),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("{0}")]
    MissingParameter(&'static str),

    #[error("{0}")]
    InvalidParameter(&'static str),

    #[error("API key not set")]
    ApiKeyMissing,

    /// `message` is what the client sees; the source is only logged.
    #[error("{message}")]
    UpstreamFailure {
        message: &'static str,
        #[source]
        source: UpstreamError,
    },

    #[error("Malformed provider payload: {0}")]
    InvalidInput(String),
}

impl ProxyError {
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::MissingParameter(_) | ProxyError::InvalidParameter(_) => {
                StatusCode::BAD_REQUEST
            }
            ProxyError::ApiKeyMissing
            | ProxyError::UpstreamFailure { .. }
            | ProxyError::InvalidInput(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// True for errors caused by the caller's parameters.
    pub fn is_client_error(&self) -> bool {
        self.status().is_client_error()
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_parameter_is_bad_request() {
        let err = ProxyError::MissingParameter("Missing coordinates");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(err.is_client_error());
        assert_eq!(err.to_string(), "Missing coordinates");
    }

    #[test]
    fn test_upstream_failure_hides_source() {
        let err = ProxyError::UpstreamFailure {
            message: "Failed to fetch forecast",
            source: UpstreamError::Status(StatusCode::UNAUTHORIZED),
        };
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Failed to fetch forecast");
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_api_key_missing_message() {
        let response = ProxyError::ApiKeyMissing.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
