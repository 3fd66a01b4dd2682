use thiserror::Error;

pub type Result<T> = std::result::Result<T, FileStoreError>;

#[derive(Debug, Error)]
pub enum FileStoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File '{0}' not found.")]
    NotFound(String),

    #[error("invalid filename {name:?}: {reason}")]
    InvalidName { name: String, reason: String },
}
