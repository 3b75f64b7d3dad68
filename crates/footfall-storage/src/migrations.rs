//! Schema versioning.
//!
//! A dedicated single-row `footfall_schema_version` table tracks the
//! version; each bump is a const SQL string applied in order.

use rusqlite::Connection;
use tracing::info;

use footfall_core::errors::{StorageError, StorageResult};

use crate::schema::FOOTFALL_TABLES_V1;

/// Current schema version. Bump this when adding new migrations.
pub const CURRENT_VERSION: u32 = 1;

/// Get the schema version recorded in the database. 0 = fresh database.
pub fn get_schema_version(conn: &Connection) -> StorageResult<u32> {
    let exists: bool = conn.query_row(
        "SELECT COUNT(*) > 0 FROM sqlite_master WHERE type='table' AND name='footfall_schema_version'",
        [],
        |row| row.get(0),
    )?;

    if !exists {
        return Ok(0);
    }

    match conn.query_row(
        "SELECT version FROM footfall_schema_version LIMIT 1",
        [],
        |row| row.get::<_, u32>(0),
    ) {
        Ok(version) => Ok(version),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(0),
        Err(e) => Err(e.into()),
    }
}

fn set_schema_version(conn: &Connection, version: u32) -> StorageResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS footfall_schema_version (
            version INTEGER NOT NULL
        ) STRICT;",
    )?;
    // Upsert: delete old row, insert new
    conn.execute("DELETE FROM footfall_schema_version", [])?;
    conn.execute(
        "INSERT INTO footfall_schema_version (version) VALUES (?1)",
        rusqlite::params![version],
    )?;
    Ok(())
}

/// Run all pending migrations to bring the database up to CURRENT_VERSION.
///
/// Returns the version the database was migrated to.
pub fn migrate(conn: &Connection) -> StorageResult<u32> {
    let current = get_schema_version(conn)?;

    if current >= CURRENT_VERSION {
        return Ok(current);
    }

    if current < 1 {
        info!("Migrating footfall schema: 0 → 1 (fact tables)");
        conn.execute_batch(FOOTFALL_TABLES_V1)
            .map_err(|e| StorageError::MigrationFailed {
                version: 1,
                message: e.to_string(),
            })?;
        set_schema_version(conn, 1)?;
    }

    let final_version = get_schema_version(conn)?;
    info!(from = current, to = final_version, "Schema migration complete");
    Ok(final_version)
}
