use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum StoreError {
    #[error("key {0} not found in store")]
    KeyNotFound(String),

    #[error("key {0} already exists in store")]
    KeyAlreadyExists(String),

    #[error("store read failed: {0}")]
    ReadFailure(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
