//! SQLite PRAGMA configuration.
//!
//! Must be called on every connection immediately after opening.

use rusqlite::Connection;

use footfall_core::errors::StorageResult;

/// Configure a SQLite connection for the analytics workload.
///
/// - WAL for concurrent readers while the importer writes
/// - busy_timeout for lock contention
/// - mmap for faster scans over the fact tables
/// - NORMAL synchronous as the WAL durability trade-off
pub fn configure_connection(conn: &Connection) -> StorageResult<()> {
    conn.execute_batch(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA foreign_keys = ON;
        PRAGMA busy_timeout = 5000;
        PRAGMA cache_size = -8000;
        PRAGMA mmap_size = 268435456;
        PRAGMA temp_store = MEMORY;
        ",
    )?;
    Ok(())
}

/// Configure a read-only connection.
/// Same PRAGMAs plus `query_only = ON` so an aggregation query can never
/// write through this connection.
pub fn configure_readonly_connection(conn: &Connection) -> StorageResult<()> {
    conn.execute_batch(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA foreign_keys = ON;
        PRAGMA busy_timeout = 5000;
        PRAGMA cache_size = -8000;
        PRAGMA mmap_size = 268435456;
        PRAGMA temp_store = MEMORY;
        PRAGMA query_only = ON;
        ",
    )?;
    Ok(())
}
