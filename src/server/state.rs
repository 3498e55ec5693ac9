//! Application state for the RAG server

use std::sync::Arc;

use crate::config::RagConfig;
use crate::embeddings::OnnxEmbedder;
use crate::error::Result;
use crate::retrieval::RetrievalPipeline;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Configuration
    config: RagConfig,
    /// Retrieval pipeline owning the vector index
    pipeline: Arc<RetrievalPipeline>,
}

impl AppState {
    /// Create new application state
    pub async fn new(config: RagConfig) -> Result<Self> {
        tracing::info!("Initializing application state...");

        let embedder = OnnxEmbedder::new(&config.embeddings).await?;
        tracing::info!("Embedder ready ({} dimensions)", config.embeddings.dimensions);

        let pipeline = Arc::new(RetrievalPipeline::new(
            &config.chunking,
            config.retrieval.clone(),
            Arc::new(embedder),
        ));
        tracing::info!("Retrieval pipeline initialized (empty index)");

        Ok(Self {
            inner: Arc::new(AppStateInner { config, pipeline }),
        })
    }

    /// Get configuration
    pub fn config(&self) -> &RagConfig {
        &self.inner.config
    }

    /// Get the retrieval pipeline
    pub fn pipeline(&self) -> Arc<RetrievalPipeline> {
        Arc::clone(&self.inner.pipeline)
    }
}
