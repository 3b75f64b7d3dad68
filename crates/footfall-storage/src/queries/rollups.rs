//! Calendar rollups over the daily-frequency fact table.

use chrono::NaiveDate;
use rusqlite::{Connection, ToSql};

use footfall_core::dates::to_sql_day;
use footfall_core::errors::StorageResult;

/// One calendar date and its visitor total.
#[derive(Debug, Clone, PartialEq)]
pub struct DayTotalRow {
    pub day: String,
    pub total: f64,
}

/// One hour-of-day (0–23) and its visitor total across all dates in range.
#[derive(Debug, Clone, PartialEq)]
pub struct HourTotalRow {
    pub hour: u8,
    pub total: f64,
}

/// Sum visitors for a zone grouped by calendar date, ordered ascending.
///
/// All supplied filters compose: exact date equality plus the inclusive
/// range endpoints, each compared against the truncated timestamp.
pub fn sum_by_day(
    conn: &Connection,
    zone_id: &str,
    day: Option<NaiveDate>,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> StorageResult<Vec<DayTotalRow>> {
    let mut sql = String::from(
        "SELECT date(recorded_at) AS day, SUM(visitors)
         FROM daily_frequency_data
         WHERE zone_id = ?",
    );
    let mut params: Vec<Box<dyn ToSql>> = vec![Box::new(zone_id.to_string())];

    if let Some(day) = day {
        sql.push_str(" AND date(recorded_at) = ?");
        params.push(Box::new(to_sql_day(day)));
    }
    if let Some(from) = from {
        sql.push_str(" AND date(recorded_at) >= ?");
        params.push(Box::new(to_sql_day(from)));
    }
    if let Some(to) = to {
        sql.push_str(" AND date(recorded_at) <= ?");
        params.push(Box::new(to_sql_day(to)));
    }
    sql.push_str(" GROUP BY day ORDER BY day ASC");

    let mut stmt = conn.prepare_cached(&sql)?;
    let param_refs: Vec<&dyn ToSql> = params.iter().map(|p| p.as_ref()).collect();
    let rows = stmt.query_map(param_refs.as_slice(), |row| {
        Ok(DayTotalRow {
            day: row.get(0)?,
            total: row.get(1)?,
        })
    })?;

    let mut result = Vec::new();
    for row in rows {
        result.push(row?);
    }
    Ok(result)
}

/// Sum visitors for a zone grouped by hour-of-day over an inclusive date
/// range, collapsing across all dates in range, ordered by hour ascending.
///
/// Both endpoints are required here; the HTTP boundary rejects requests
/// missing either before this query is reached. Hours with no rows are
/// omitted.
pub fn sum_by_hour(
    conn: &Connection,
    zone_id: &str,
    from: NaiveDate,
    to: NaiveDate,
) -> StorageResult<Vec<HourTotalRow>> {
    let mut stmt = conn.prepare_cached(
        "SELECT CAST(strftime('%H', recorded_at) AS INTEGER) AS hour_of_day, SUM(visitors)
         FROM daily_frequency_data
         WHERE zone_id = ?1
           AND date(recorded_at) >= ?2
           AND date(recorded_at) <= ?3
         GROUP BY hour_of_day
         ORDER BY hour_of_day ASC",
    )?;

    let rows = stmt.query_map(
        rusqlite::params![zone_id, to_sql_day(from), to_sql_day(to)],
        |row| {
            Ok(HourTotalRow {
                hour: row.get(0)?,
                total: row.get(1)?,
            })
        },
    )?;

    let mut result = Vec::new();
    for row in rows {
        result.push(row?);
    }
    Ok(result)
}
