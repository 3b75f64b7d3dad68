//! Batch inserts used by the bulk importer.
//!
//! The aggregation engine never writes; these helpers exist only for the
//! one-shot CSV import. Callers wrap each file in a single transaction.

use rusqlite::Connection;

use footfall_core::errors::StorageResult;

use super::categorical::CategoryTable;

/// One row destined for a categorical fact table.
#[derive(Debug, Clone)]
pub struct CategoryFact {
    pub zone_id: String,
    pub recorded_at: String,
    pub hour: Option<String>,
    pub weekday: Option<String>,
    pub quarter: Option<String>,
    pub category: String,
    pub visitors: f64,
}

/// One row destined for the daily-frequency fact table.
#[derive(Debug, Clone)]
pub struct FrequencyFact {
    pub zone_id: String,
    pub recorded_at: String,
    pub visitors: f64,
    pub travel_type: Option<String>,
    pub travel_distance: Option<String>,
}

/// Insert a batch of categorical facts into the table `kind` describes.
pub fn insert_category_facts(
    conn: &Connection,
    kind: &CategoryTable,
    facts: &[CategoryFact],
) -> StorageResult<usize> {
    let sql = format!(
        "INSERT INTO {table}
         (zone_id, recorded_at, hour, weekday, quarter, {col}, visitors)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        table = kind.table,
        col = kind.category_column,
    );
    let mut stmt = conn.prepare_cached(&sql)?;

    let mut count = 0;
    for f in facts {
        stmt.execute(rusqlite::params![
            f.zone_id,
            f.recorded_at,
            f.hour,
            f.weekday,
            f.quarter,
            f.category,
            f.visitors,
        ])?;
        count += 1;
    }
    Ok(count)
}

/// Insert a batch of daily-frequency facts.
pub fn insert_frequency_facts(
    conn: &Connection,
    facts: &[FrequencyFact],
) -> StorageResult<usize> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO daily_frequency_data
         (zone_id, recorded_at, visitors, travel_type, travel_distance)
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )?;

    let mut count = 0;
    for f in facts {
        stmt.execute(rusqlite::params![
            f.zone_id,
            f.recorded_at,
            f.visitors,
            f.travel_type,
            f.travel_distance,
        ])?;
        count += 1;
    }
    Ok(count)
}
