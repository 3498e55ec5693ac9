//! Document upload endpoint

use axum::{
    extract::{Multipart, State},
    Json,
};
use std::time::Instant;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::server::state::AppState;
use crate::types::IngestResponse;

/// POST /api/upload - Upload a document and rebuild the index from it
pub async fn upload_document(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<IngestResponse>> {
    let start = Instant::now();

    let mut file: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::internal(format!("Failed to read multipart field: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field
            .file_name()
            .map(|s| s.to_string())
            .unwrap_or_else(|| format!("file_{}.bin", Uuid::new_v4()));

        let data = field
            .bytes()
            .await
            .map_err(|e| Error::internal(format!("Failed to read file: {}", e)))?;

        file = Some((filename, data.to_vec()));
    }

    let (filename, data) =
        file.ok_or_else(|| Error::Config("No 'file' part in the request".to_string()))?;

    tracing::info!("Processing upload: {} ({} bytes)", filename, data.len());

    // Extraction and embedding are long-running; keep them off the request
    // thread.
    let pipeline = state.pipeline();
    let (document, chunk_count) =
        tokio::task::spawn_blocking(move || pipeline.ingest_file(&filename, &data))
            .await
            .map_err(|e| Error::internal(format!("Ingest task failed: {}", e)))??;

    let processing_time_ms = start.elapsed().as_millis() as u64;

    tracing::info!(
        "Ingested '{}': {} chunks in {}ms",
        document.id,
        chunk_count,
        processing_time_ms
    );

    Ok(Json(IngestResponse {
        document,
        chunk_count,
        processing_time_ms,
    }))
}
