//! Error taxonomy for the generation endpoint.
//!
//! Malformed request bodies are rejected by the `Json` extractor before a
//! handler runs, so only the business-level and upstream failures live here.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// Syntactically valid request whose prompt is empty.
    #[error("No question provided!")]
    EmptyPrompt,

    /// The completion provider call failed in transit or returned an
    /// undecodable body.
    #[error("Upstream completion request failed: {0}")]
    Upstream(#[from] reqwest::Error),

    /// The completion provider answered with a non-success status.
    #[error("Upstream completion request returned {status}: {body}")]
    UpstreamStatus { status: reqwest::StatusCode, body: String },
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = match self {
            RelayError::EmptyPrompt => StatusCode::BAD_REQUEST,
            RelayError::Upstream(_) | RelayError::UpstreamStatus { .. } => StatusCode::BAD_GATEWAY,
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
