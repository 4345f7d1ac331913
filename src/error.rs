use thiserror::Error;

/// Failures of the bulk create pipeline itself.
///
/// Problems with the submitted orders are not errors at this level: they are
/// reported per row as [`crate::domain::errors::OrderBulkCreateError`].
#[derive(Error, Debug)]
pub enum BulkError {
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[cfg(feature = "storage-rocksdb")]
    #[error("Storage error: {0}")]
    StorageError(#[from] rocksdb::Error),
    #[error("Internal error: {0}")]
    InternalError(Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T> = std::result::Result<T, BulkError>;
