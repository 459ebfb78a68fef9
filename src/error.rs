use thiserror::Error;

/// Custom error types for posipick
#[derive(Debug, Error)]
pub enum PosipickError {
    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error("Invalid config: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
