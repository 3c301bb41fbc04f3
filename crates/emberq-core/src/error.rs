use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Message not found at offset: {0}")]
    MessageNotFound(u64),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] bincode::Error),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, Error>;
