//! Document ingestion: extraction and chunking

mod chunker;
mod extractor;

pub use chunker::Chunker;
pub use extractor::{hash_content, normalize_whitespace, DocumentExtractor, ExtractedDocument};
