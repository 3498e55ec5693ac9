//! Response types for the API layer

use serde::{Deserialize, Serialize};

use super::document::{Document, RetrievedChunk};

/// Response for a successful upload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestResponse {
    /// The ingested document
    pub document: Document,
    /// Number of chunks installed into the index
    pub chunk_count: usize,
    /// Processing time in milliseconds
    pub processing_time_ms: u64,
}

/// Response for a query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskResponse {
    /// Context string handed to the downstream answer-synthesis step:
    /// retrieved chunk texts in ranked order, joined by newlines
    pub context: String,
    /// The retrieved chunks, closest first
    pub chunks: Vec<RetrievedChunk>,
    /// Processing time in milliseconds
    pub processing_time_ms: u64,
}
