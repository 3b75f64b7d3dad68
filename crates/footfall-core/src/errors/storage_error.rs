//! Storage-layer errors for SQLite operations.

/// Errors that can occur in the storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    Sqlite { message: String },

    #[error("Migration failed at version {version}: {message}")]
    MigrationFailed { version: u32, message: String },

    #[error("Connection lock poisoned: {message}")]
    LockPoisoned { message: String },
}

impl From<rusqlite::Error> for StorageError {
    fn from(e: rusqlite::Error) -> Self {
        StorageError::Sqlite { message: e.to_string() }
    }
}

pub type StorageResult<T> = Result<T, StorageError>;
