//! Error types for the retrieval core

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Result type alias for retrieval operations
pub type Result<T> = std::result::Result<T, Error>;

/// Retrieval core errors
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// File extension outside the allowed set
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// The document could not be parsed
    #[error("Failed to extract text from '{filename}': {message}")]
    Extraction { filename: String, message: String },

    /// Extraction succeeded but produced no chunkable text
    #[error("Document '{filename}' produced no chunkable text")]
    EmptyCorpus { filename: String },

    /// Embedding backend failure
    #[error("Embedding generation failed: {0}")]
    Embedding(String),

    /// Vector count and chunk metadata count disagree during rebuild
    #[error("Index rebuild rejected: {vectors} vectors but {chunks} chunk records")]
    IndexConsistency { vectors: usize, chunks: usize },

    /// A vector does not match the embedder's fixed dimension
    #[error("Embedding dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// Query before any successful ingest
    #[error("No document has been uploaded yet")]
    EmptyIndex,

    /// Every transcript language candidate was exhausted
    #[error("No transcript available for '{video_id}' in any of: {}", languages.join(", "))]
    NoTranscriptAvailable {
        video_id: String,
        languages: Vec<String>,
    },

    /// Model output could not be parsed as JSON, even after brace extraction
    #[error("Model output is not valid JSON")]
    MalformedModelOutput { raw: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request error
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create an extraction error
    pub fn extraction(filename: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Extraction {
            filename: filename.into(),
            message: message.into(),
        }
    }

    /// Create an embedding error
    pub fn embedding(message: impl Into<String>) -> Self {
        Self::Embedding(message.into())
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            Error::Config(msg) => (StatusCode::BAD_REQUEST, "config_error", msg.clone()),
            Error::UnsupportedFormat(ext) => (
                StatusCode::BAD_REQUEST,
                "unsupported_format",
                format!("Unsupported file format: {}", ext),
            ),
            Error::Extraction { filename, message } => (
                StatusCode::BAD_REQUEST,
                "extraction_error",
                format!("Failed to extract text from '{}': {}", filename, message),
            ),
            Error::EmptyCorpus { filename } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "empty_corpus",
                format!("Document '{}' produced no chunkable text", filename),
            ),
            Error::Embedding(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "embedding_error",
                msg.clone(),
            ),
            Error::IndexConsistency { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "index_consistency_error",
                self.to_string(),
            ),
            Error::DimensionMismatch { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "dimension_mismatch",
                self.to_string(),
            ),
            Error::EmptyIndex => (
                StatusCode::BAD_REQUEST,
                "empty_index",
                "No document has been uploaded yet".to_string(),
            ),
            Error::NoTranscriptAvailable { .. } => {
                (StatusCode::NOT_FOUND, "no_transcript", self.to_string())
            }
            Error::MalformedModelOutput { .. } => (
                StatusCode::BAD_GATEWAY,
                "malformed_model_output",
                self.to_string(),
            ),
            Error::Io(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "io_error",
                err.to_string(),
            ),
            Error::Json(err) => (StatusCode::BAD_REQUEST, "json_error", err.to_string()),
            Error::Http(err) => (StatusCode::BAD_GATEWAY, "http_error", err.to_string()),
            Error::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                msg.clone(),
            ),
        };

        let body = Json(json!({
            "error": {
                "type": error_type,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}
