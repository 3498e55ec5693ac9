//! quicklearn-rag: document indexing and retrieval core for question answering
//!
//! Ingests PDF and PPTX documents (or transcript text) into normalized text,
//! splits it into sentence-respecting chunks, embeds the chunks with a local
//! ONNX model, and serves exact nearest-neighbor retrieval over an
//! atomically swapped flat index. The assembled context is handed to an
//! external answer-synthesis collaborator by the thin HTTP layer.

pub mod config;
pub mod embeddings;
pub mod error;
pub mod generation;
pub mod ingestion;
pub mod retrieval;
pub mod server;
pub mod transcript;
pub mod types;

pub use config::RagConfig;
pub use embeddings::Embedder;
pub use error::{Error, Result};
pub use retrieval::{DistanceMetric, RetrievalPipeline};
pub use types::{Chunk, Document, FileType, RetrievedChunk};
