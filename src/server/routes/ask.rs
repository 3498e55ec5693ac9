//! Query endpoint: retrieval and context assembly

use axum::{extract::State, Json};
use std::time::Instant;

use crate::error::{Error, Result};
use crate::retrieval::build_context;
use crate::server::state::AppState;
use crate::types::{AskRequest, AskResponse};

/// POST /api/ask - Retrieve context for a question.
///
/// The answer-synthesis call against the retrieved context belongs to the
/// caller; this endpoint returns the ranked chunks and the assembled
/// context string. Querying before any successful upload is a structured
/// `empty_index` failure, never a silent empty answer.
pub async fn ask(
    State(state): State<AppState>,
    Json(request): Json<AskRequest>,
) -> Result<Json<AskResponse>> {
    let start = Instant::now();

    if request.prompt.trim().is_empty() {
        return Err(Error::Config("Prompt is required".to_string()));
    }

    tracing::info!("Query: \"{}\"", request.prompt);

    let pipeline = state.pipeline();
    let top_k = request.top_k;
    let prompt = request.prompt.clone();

    let chunks = tokio::task::spawn_blocking(move || pipeline.retrieve(&prompt, top_k))
        .await
        .map_err(|e| Error::internal(format!("Query task failed: {}", e)))??;

    let context = build_context(&chunks);
    let processing_time_ms = start.elapsed().as_millis() as u64;

    tracing::info!(
        "Query completed in {}ms, {} chunks retrieved",
        processing_time_ms,
        chunks.len()
    );

    Ok(Json(AskResponse {
        context,
        chunks,
        processing_time_ms,
    }))
}
