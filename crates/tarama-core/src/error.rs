//! Error types for the fallible edges of the engine
//!
//! Search operations themselves are total and never return these. Only
//! configuration loading, JSON bridging and pattern compilation do.

use thiserror::Error;

/// Common error type for tarama operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Highlight pattern failed to compile
    #[error("pattern error: {0}")]
    Pattern(#[from] regex::Error),
}

/// Result type alias using tarama Error.
pub type Result<T> = std::result::Result<T, Error>;
