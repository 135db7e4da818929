//! Error types for Summit
//!
//! Centralized error handling using thiserror. Only data-integrity faults and
//! pipeline misuse are errors; capacity shortfalls and unmet preferences are
//! surfaced as report warnings instead.

use thiserror::Error;

/// All error types that can occur in Summit
#[derive(Debug, Error)]
pub enum SummitError {
    /// A participant ranked a talk id that is not in the talk table
    #[error("Unknown talk '{talk_id}' ranked by participant '{participant}'")]
    UnknownTalk { participant: String, talk_id: String },

    /// Block restriction outside {0, 1, 2}
    #[error("Invalid block restriction {value} for talk '{talk_id}' (expected 0, 1 or 2)")]
    InvalidBlockRestriction { talk_id: String, value: u8 },

    /// Max runs outside {1, 2}
    #[error("Invalid max runs {value} for talk '{talk_id}' (expected 1 or 2)")]
    InvalidMaxRuns { talk_id: String, value: u8 },

    /// Two talks share the same id
    #[error("Duplicate talk id: {0}")]
    DuplicateTalk(String),

    /// Two rooms share the same name
    #[error("Duplicate room name: {0}")]
    DuplicateRoom(String),

    /// Invalid state transition or operation
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Tunable out of range
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type alias for Summit operations
pub type Result<T> = std::result::Result<T, SummitError>;
