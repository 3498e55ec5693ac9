//! Query request types

use serde::{Deserialize, Serialize};

/// Request body for the ask endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskRequest {
    /// The user's question
    pub prompt: String,
    /// Retrieval breadth; falls back to the configured default
    #[serde(default)]
    pub top_k: Option<usize>,
}
