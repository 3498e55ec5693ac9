//! Vector index and retrieval orchestration

pub mod index;
pub mod pipeline;

pub use index::{DistanceMetric, FlatIndex, SearchHit};
pub use pipeline::{build_context, RetrievalPipeline};
