//! ConnectionPool — writer + read pool with round-robin selection.
//!
//! The only place in the workspace that holds `Mutex<Connection>`.
//! The server reads through `with_reader`; the importer writes through
//! `with_writer`. Opening the pool runs pending schema migrations.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use rusqlite::Connection;

use footfall_core::errors::{StorageError, StorageResult};

use crate::{migrations, pragmas};

/// Default number of reader connections.
const DEFAULT_READ_POOL_SIZE: usize = 2;

/// Connection pool for the analytics database: 1 writer + N readers.
///
/// WAL mode is enabled on all connections.
/// Round-robin reader selection via atomic counter.
pub struct ConnectionPool {
    writer: Mutex<Connection>,
    readers: Vec<Mutex<Connection>>,
    read_index: AtomicUsize,
}

impl ConnectionPool {
    /// Open a file-backed connection pool.
    ///
    /// Applies PRAGMAs and runs migrations on the writer before any
    /// reader opens, so readers always see a fully migrated schema.
    pub fn open(path: &Path, read_pool_size: usize) -> StorageResult<Self> {
        let pool_size = if read_pool_size == 0 { DEFAULT_READ_POOL_SIZE } else { read_pool_size };

        let writer = Connection::open(path)
            .map_err(|e| StorageError::Sqlite { message: format!("open writer: {e}") })?;
        pragmas::configure_connection(&writer)?;
        migrations::migrate(&writer)?;

        let mut readers = Vec::with_capacity(pool_size);
        for i in 0..pool_size {
            let reader = Connection::open_with_flags(
                path,
                rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY
                    | rusqlite::OpenFlags::SQLITE_OPEN_NO_MUTEX,
            )
            .map_err(|e| StorageError::Sqlite { message: format!("open reader {i}: {e}") })?;
            pragmas::configure_readonly_connection(&reader)?;
            readers.push(Mutex::new(reader));
        }

        Ok(Self {
            writer: Mutex::new(writer),
            readers,
            read_index: AtomicUsize::new(0),
        })
    }

    /// Open an in-memory connection pool (tests).
    ///
    /// SQLite in-memory databases are not shared across separate
    /// connections, so no readers are opened; `with_reader` falls back to
    /// the single writer connection.
    pub fn open_in_memory() -> StorageResult<Self> {
        let writer = Connection::open_in_memory()
            .map_err(|e| StorageError::Sqlite { message: format!("open in-memory writer: {e}") })?;
        pragmas::configure_connection(&writer)?;
        migrations::migrate(&writer)?;

        Ok(Self {
            writer: Mutex::new(writer),
            readers: Vec::new(),
            read_index: AtomicUsize::new(0),
        })
    }

    /// Execute a closure with the writer connection.
    pub fn with_writer<F, T>(&self, f: F) -> StorageResult<T>
    where
        F: FnOnce(&Connection) -> StorageResult<T>,
    {
        let conn = self
            .writer
            .lock()
            .map_err(|e| StorageError::LockPoisoned { message: e.to_string() })?;
        f(&conn)
    }

    /// Execute a closure with a reader connection (round-robin).
    ///
    /// Falls back to the writer if no readers are available (in-memory mode).
    pub fn with_reader<F, T>(&self, f: F) -> StorageResult<T>
    where
        F: FnOnce(&Connection) -> StorageResult<T>,
    {
        if self.readers.is_empty() {
            return self.with_writer(f);
        }

        let index = self.read_index.fetch_add(1, Ordering::Relaxed) % self.readers.len();
        let conn = self.readers[index]
            .lock()
            .map_err(|e| StorageError::LockPoisoned { message: e.to_string() })?;
        f(&conn)
    }
}
