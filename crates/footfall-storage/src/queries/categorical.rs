//! Filtered categorical aggregation.
//!
//! The per-kind fact tables (visitor type, age group, dwell time, gender)
//! share one shape, so one query parameterized by a table descriptor
//! serves all of them.

use chrono::NaiveDate;
use rusqlite::{Connection, ToSql};

use footfall_core::dates::to_sql_day;
use footfall_core::errors::StorageResult;

/// Descriptor for one categorical fact table.
///
/// `table` and `category_column` are compile-time constants from the
/// closed set below — never caller-supplied — so interpolating them into
/// SQL is safe.
#[derive(Debug, Clone, Copy)]
pub struct CategoryTable {
    pub table: &'static str,
    pub category_column: &'static str,
}

pub const VISITOR_TYPES: CategoryTable = CategoryTable {
    table: "visitor_type_data",
    category_column: "visitor_type",
};

pub const AGE_GROUPS: CategoryTable = CategoryTable {
    table: "age_data",
    category_column: "age_group",
};

pub const DWELL_TIMES: CategoryTable = CategoryTable {
    table: "dwell_time_data",
    category_column: "dwell_time",
};

pub const GENDERS: CategoryTable = CategoryTable {
    table: "gender_data",
    category_column: "gender",
};

/// One (calendar date, category) group and its visitor total.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotalRow {
    pub day: String,
    pub category: String,
    pub total: f64,
}

/// Sum visitors for a zone, grouped by (calendar date, category).
///
/// Optional filters: exact calendar date (matched against the truncated
/// timestamp) and category equality. Ordered by date ascending, then
/// category, so identical inputs yield identical output. Groups with no
/// matching rows are omitted; an empty result is a regular success.
pub fn sum_by_category(
    conn: &Connection,
    kind: &CategoryTable,
    zone_id: &str,
    day: Option<NaiveDate>,
    category: Option<&str>,
) -> StorageResult<Vec<CategoryTotalRow>> {
    let col = kind.category_column;
    let mut sql = format!(
        "SELECT date(recorded_at) AS day, {col}, SUM(visitors)
         FROM {table}
         WHERE zone_id = ?",
        table = kind.table,
    );
    let mut params: Vec<Box<dyn ToSql>> = vec![Box::new(zone_id.to_string())];

    if let Some(day) = day {
        sql.push_str(" AND date(recorded_at) = ?");
        params.push(Box::new(to_sql_day(day)));
    }
    if let Some(category) = category {
        sql.push_str(&format!(" AND {col} = ?"));
        params.push(Box::new(category.to_string()));
    }
    sql.push_str(&format!(" GROUP BY day, {col} ORDER BY day ASC, {col} ASC"));

    let mut stmt = conn.prepare_cached(&sql)?;
    let param_refs: Vec<&dyn ToSql> = params.iter().map(|p| p.as_ref()).collect();
    let rows = stmt.query_map(param_refs.as_slice(), |row| {
        Ok(CategoryTotalRow {
            day: row.get(0)?,
            category: row.get(1)?,
            total: row.get(2)?,
        })
    })?;

    let mut result = Vec::new();
    for row in rows {
        result.push(row?);
    }
    Ok(result)
}
