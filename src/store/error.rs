use thiserror::Error;

pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{kind} with id \"{id}\" already exists")]
    DuplicateKey { kind: &'static str, id: String },

    /// Series still referenced by artworks
    #[error("Cannot delete: {count} artwork(s) use this series")]
    InUse { count: usize },

    /// A merged update no longer describes a valid record
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
