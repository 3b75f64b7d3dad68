//! Schema SQL constants.
//! Used by migrations.rs; tests reference the table-name list.

/// V1 schema: 5 fact tables + their indexes.
///
/// `recorded_at` is TEXT holding either a bare date (`YYYY-MM-DD`) or a
/// date-time (`YYYY-MM-DD HH:MM:SS`), as produced upstream. The auxiliary
/// `hour`/`weekday`/`quarter` columns are carried from the source CSVs and
/// never read by the aggregation queries.
pub const FOOTFALL_TABLES_V1: &str = "
    CREATE TABLE IF NOT EXISTS visitor_type_data (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        zone_id TEXT NOT NULL,
        recorded_at TEXT NOT NULL,
        hour TEXT,
        weekday TEXT,
        quarter TEXT,
        visitor_type TEXT NOT NULL,
        visitors REAL NOT NULL
    ) STRICT;

    CREATE TABLE IF NOT EXISTS age_data (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        zone_id TEXT NOT NULL,
        recorded_at TEXT NOT NULL,
        hour TEXT,
        weekday TEXT,
        quarter TEXT,
        age_group TEXT NOT NULL,
        visitors REAL NOT NULL
    ) STRICT;

    CREATE TABLE IF NOT EXISTS dwell_time_data (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        zone_id TEXT NOT NULL,
        recorded_at TEXT NOT NULL,
        hour TEXT,
        weekday TEXT,
        quarter TEXT,
        dwell_time TEXT NOT NULL,
        visitors REAL NOT NULL
    ) STRICT;

    CREATE TABLE IF NOT EXISTS gender_data (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        zone_id TEXT NOT NULL,
        recorded_at TEXT NOT NULL,
        hour TEXT,
        weekday TEXT,
        quarter TEXT,
        gender TEXT NOT NULL,
        visitors REAL NOT NULL
    ) STRICT;

    CREATE TABLE IF NOT EXISTS daily_frequency_data (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        zone_id TEXT NOT NULL,
        recorded_at TEXT NOT NULL,
        visitors REAL NOT NULL,
        travel_type TEXT,
        travel_distance TEXT
    ) STRICT;

    CREATE INDEX IF NOT EXISTS idx_visitor_type_zone_recorded ON visitor_type_data(zone_id, recorded_at);
    CREATE INDEX IF NOT EXISTS idx_age_zone_recorded ON age_data(zone_id, recorded_at);
    CREATE INDEX IF NOT EXISTS idx_dwell_time_zone_recorded ON dwell_time_data(zone_id, recorded_at);
    CREATE INDEX IF NOT EXISTS idx_gender_zone_recorded ON gender_data(zone_id, recorded_at);
    CREATE INDEX IF NOT EXISTS idx_daily_frequency_zone_recorded ON daily_frequency_data(zone_id, recorded_at);

    CREATE INDEX IF NOT EXISTS idx_visitor_type_category ON visitor_type_data(visitor_type);
    CREATE INDEX IF NOT EXISTS idx_age_category ON age_data(age_group);
    CREATE INDEX IF NOT EXISTS idx_dwell_time_category ON dwell_time_data(dwell_time);
";

/// All 5 fact table names.
pub const FACT_TABLE_NAMES: [&str; 5] = [
    "visitor_type_data",
    "age_data",
    "dwell_time_data",
    "gender_data",
    "daily_frequency_data",
];
