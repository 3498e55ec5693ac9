//! Embedding generation

mod onnx_embedder;

pub use onnx_embedder::OnnxEmbedder;

use crate::error::{Error, Result};

/// Maps text to fixed-dimension vectors.
///
/// The output dimension is constant for the lifetime of one instance and is
/// reported via [`dimension`](Embedder::dimension) so the index can size its
/// backing storage before any vectors arrive. Implementations are pure
/// functions of their input text plus fixed model configuration.
pub trait Embedder: Send + Sync {
    /// Fixed output dimension
    fn dimension(&self) -> usize;

    /// Embed a batch of texts. An empty batch is an [`Error::Embedding`];
    /// the pipeline never embeds an empty chunk list.
    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Embed a single query string
    fn embed_one(&self, text: &str) -> Result<Vec<f32>> {
        let mut vectors = self.embed_batch(std::slice::from_ref(&text.to_string()))?;
        vectors
            .pop()
            .ok_or_else(|| Error::embedding("Empty embedding result"))
    }
}

/// Compute cosine similarity between two embeddings
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}
