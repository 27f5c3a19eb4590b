//! HTTP surface: the single page and the single API route.

use std::sync::Arc;

use axum::extract::State;
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Json, Router};
use tracing::debug;

use crate::error::RelayError;
use crate::relay::{strip_completion_artifact, CompletionClient, GenerationRequest, GenerationResult};

#[derive(Clone)]
pub struct AppState {
    pub client: Arc<dyn CompletionClient>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/generate", post(generate))
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(include_str!("../static/index.html"))
}

/// `POST /api/generate`: validate, relay, post-process.
///
/// Schema validation (a body that is not `{"prompt": <string>}`) is rejected
/// by the `Json` extractor before this runs; the empty-prompt check is a
/// second, business-level guard on top of it.
async fn generate(
    State(state): State<AppState>,
    Json(request): Json<GenerationRequest>,
) -> Result<Json<GenerationResult>, RelayError> {
    if request.prompt.is_empty() {
        return Err(RelayError::EmptyPrompt);
    }

    debug!("relaying prompt ({} chars)", request.prompt.len());
    let raw = state.client.complete(&request.prompt).await?;
    let text = raw.map(|text| strip_completion_artifact(&text).to_string());

    Ok(Json(GenerationResult { text, error: None }))
}
