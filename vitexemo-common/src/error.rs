//! Common error types for ViTexEmo

use thiserror::Error;

/// Common result type for ViTexEmo operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across ViTexEmo pipeline stages
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parse or write error (wraps csv::Error)
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON parse error (wraps serde_json::Error)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested file or resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid caller input (mismatched lengths, bad tolerance, unknown label)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Input file parsed but does not have the expected shape
    #[error("Malformed input: {0}")]
    Malformed(String),
}
