//! API routes for the RAG server

pub mod ask;
pub mod upload;

use axum::{
    extract::{DefaultBodyLimit, State},
    routing::{get, post},
    Json, Router,
};

use crate::server::state::AppState;

/// Build all API routes
pub fn api_routes(max_upload_size: usize) -> Router<AppState> {
    Router::new()
        // Upload - with larger body limit for file uploads
        .route(
            "/upload",
            post(upload::upload_document).layer(DefaultBodyLimit::max(max_upload_size)),
        )
        // Query
        .route("/ask", post(ask::ask))
        // Corpus status
        .route("/corpus", get(corpus))
        // Info
        .route("/info", get(info))
}

/// Current corpus endpoint
async fn corpus(State(state): State<AppState>) -> Json<serde_json::Value> {
    let pipeline = state.pipeline();
    Json(serde_json::json!({
        "document": pipeline.current_document(),
        "index_size": pipeline.size(),
    }))
}

/// API info endpoint
async fn info() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": "quicklearn-rag",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Document Q&A retrieval core",
        "endpoints": {
            "POST /api/upload": "Upload a document and rebuild the index",
            "POST /api/ask": "Retrieve ranked context for a question",
            "GET /api/corpus": "Currently active corpus document",
        }
    }))
}
