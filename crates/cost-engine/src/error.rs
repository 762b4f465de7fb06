//! Errors raised at the edges of the engine
//!
//! Cost computation itself never fails. These errors cover parsing snapshot
//! documents and normalizing stored runtime shapes before they reach the
//! calculators.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid JSON document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("runtime document is not an object")]
    NotAnObject,

    #[error("runtime `{id}` has an unrecognized shape: {reason}")]
    UnrecognizedRuntime { id: String, reason: String },

    #[error("project document has no `runtimes` array")]
    MissingRuntimes,
}

pub type Result<T> = std::result::Result<T, EngineError>;
