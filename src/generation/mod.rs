//! Boundary utilities for the external answer-synthesis collaborator

pub mod modelout;

pub use modelout::parse_model_json;
