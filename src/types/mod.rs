//! Core types for the retrieval pipeline

pub mod document;
pub mod query;
pub mod response;

pub use document::{Chunk, Document, FileType, RetrievedChunk};
pub use query::AskRequest;
pub use response::{AskResponse, IngestResponse};
