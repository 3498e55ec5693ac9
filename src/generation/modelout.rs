//! Best-effort JSON recovery from free-form model output
//!
//! Models asked for JSON often wrap it in prose or code fences. The contract
//! here is fixed: strict parse first, then one brace-delimited substring
//! extraction (first `{` to last `}`), then a typed failure carrying the raw
//! text. No further guessing.

use crate::error::{Error, Result};

/// Parse model output into a JSON value
pub fn parse_model_json(raw: &str) -> Result<serde_json::Value> {
    if let Ok(value) = serde_json::from_str(raw.trim()) {
        return Ok(value);
    }

    if let (Some(start), Some(end)) = (raw.find('{'), raw.rfind('}')) {
        if start < end {
            if let Ok(value) = serde_json::from_str(&raw[start..=end]) {
                return Ok(value);
            }
        }
    }

    Err(Error::MalformedModelOutput {
        raw: raw.to_string(),
    })
}
