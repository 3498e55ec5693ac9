//! RAG server binary
//!
//! Run with: cargo run --bin quicklearn-rag-server

use std::path::PathBuf;

use quicklearn_rag::{config::RagConfig, server::RagServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quicklearn_rag=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Optional TOML config; defaults otherwise.
    let config = match std::env::var_os("QUICKLEARN_RAG_CONFIG") {
        Some(path) => RagConfig::from_toml_file(&PathBuf::from(path))?,
        None => RagConfig::default(),
    };

    tracing::info!("Configuration loaded");
    tracing::info!("  - Embedding model: {}", config.embeddings.model);
    tracing::info!("  - Embedding dimensions: {}", config.embeddings.dimensions);
    tracing::info!("  - Chunk budget: {} chars", config.chunking.max_chars);
    tracing::info!("  - Default top_k: {}", config.retrieval.top_k);

    let server = RagServer::new(config).await?;

    println!("Server starting...");
    println!("  API: http://{}", server.address());
    println!("  Health: http://{}/health", server.address());
    println!("\nEndpoints:");
    println!("  POST /api/upload  - upload a PDF or PPTX");
    println!("  POST /api/ask     - retrieve context for a question");
    println!("  GET  /api/corpus  - currently active document");

    server.start().await?;

    Ok(())
}
