//! Aggregation and ingest queries over the fact tables.
//!
//! Every date comparison truncates the stored timestamp with SQLite's
//! `date()` so bare dates and date-times group the same way; the hourly
//! rollup extracts the hour-of-day component with `strftime('%H', ...)`.

pub mod categorical;
pub mod ingest;
pub mod rollups;

pub use categorical::{
    sum_by_category, CategoryTable, CategoryTotalRow, AGE_GROUPS, DWELL_TIMES, GENDERS,
    VISITOR_TYPES,
};
pub use rollups::{sum_by_day, sum_by_hour, DayTotalRow, HourTotalRow};
