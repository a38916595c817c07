//! Error types for the kyc-viewer library

use thiserror::Error;

/// Custom error type for registry reads and client setup
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Call reverted: {0}")]
    Reverted(String),
}

/// Result type for kyc-viewer operations
pub type Result<T> = std::result::Result<T, Error>;
