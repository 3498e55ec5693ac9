//! Document and chunk types

use serde::{Deserialize, Serialize};

/// Supported source container formats
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    /// PDF document
    Pdf,
    /// PowerPoint presentation (.pptx)
    Pptx,
    /// Plain transcript text (no container format)
    Transcript,
    /// Unknown file type
    Unknown,
}

impl FileType {
    /// Detect file type from extension
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "pdf" => Self::Pdf,
            "pptx" => Self::Pptx,
            _ => Self::Unknown,
        }
    }

    /// Check if this format can be extracted
    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Unknown)
    }

    /// Get display name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Pdf => "PDF",
            Self::Pptx => "PowerPoint (.pptx)",
            Self::Transcript => "Transcript",
            Self::Unknown => "Unknown",
        }
    }
}

/// The currently active corpus document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Document identifier (original filename, or a caller-chosen id for
    /// transcript text)
    pub id: String,
    /// File type
    pub file_type: FileType,
    /// SHA-256 hash of the extracted text
    pub content_hash: String,
    /// Page count, when the container format has pages
    pub page_count: Option<u32>,
    /// Number of chunks produced from this document
    pub total_chunks: u32,
    /// Extraction timestamp
    pub ingested_at: chrono::DateTime<chrono::Utc>,
}

impl Document {
    /// Create a new document record
    pub fn new(id: String, file_type: FileType, content_hash: String) -> Self {
        Self {
            id,
            file_type,
            content_hash,
            page_count: None,
            total_chunks: 0,
            ingested_at: chrono::Utc::now(),
        }
    }
}

/// A contiguous, bounded-length span of a document's normalized text.
/// Immutable once created; replaced wholesale when the owning document is
/// superseded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    /// Owning document id (back-reference, not ownership)
    pub document_id: String,
    /// Position within the document, insertion order significant
    pub index: u32,
    /// Raw chunk text
    pub text: String,
}

impl Chunk {
    /// Create a new chunk
    pub fn new(document_id: String, index: u32, text: String) -> Self {
        Self {
            document_id,
            index,
            text,
        }
    }
}

/// A retrieved chunk paired with its distance to the query vector
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievedChunk {
    /// The retrieved chunk
    pub chunk: Chunk,
    /// Distance to the query vector (lower is closer)
    pub distance: f32,
}
