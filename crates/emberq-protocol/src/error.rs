//! Protocol error types

use thiserror::Error;

/// Protocol error types
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Deserialization error
    #[error("Deserialization error: {0}")]
    Deserialization(String),

    /// Unknown commit-or-rollback value on the wire
    #[error("Invalid transaction decision: {0}")]
    InvalidDecision(i32),

    /// Unknown response code on the wire
    #[error("Invalid response code: {0}")]
    InvalidResponseCode(i32),
}

impl From<postcard::Error> for ProtocolError {
    fn from(e: postcard::Error) -> Self {
        ProtocolError::Serialization(e.to_string())
    }
}

/// Result type for protocol operations
pub type Result<T> = std::result::Result<T, ProtocolError>;
