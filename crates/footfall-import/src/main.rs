//! One-shot CSV bulk importer.
//!
//! Walks a data directory, routes each CSV to a fact table by a keyword
//! in its filename (`age`, `dwelltime`, `gender`, `visitortype`,
//! `dailyfrequency` — a site prefix like `Hamburg_` is ignored), and
//! inserts each file's rows in a single transaction. No retry and no
//! partial-failure recovery: any I/O or parse error aborts the run.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use footfall_core::StorageError;
use footfall_storage::queries::categorical::{
    CategoryTable, AGE_GROUPS, DWELL_TIMES, GENDERS, VISITOR_TYPES,
};
use footfall_storage::queries::ingest::{
    insert_category_facts, insert_frequency_facts, CategoryFact, FrequencyFact,
};
use footfall_storage::ConnectionPool;

#[derive(Debug, thiserror::Error)]
enum ImportError {
    #[error("I/O error on {path}: {source}")]
    Io { path: PathBuf, source: io::Error },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("{0}")]
    Storage(#[from] StorageError),

    #[error("Missing column '{column}' in {path}")]
    MissingColumn { path: PathBuf, column: String },

    #[error("Bad visitor count '{value}' in {path}")]
    BadCount { path: PathBuf, value: String },
}

/// Which fact table a CSV feeds, decided from its filename.
enum FileKind {
    Category {
        kind: &'static CategoryTable,
        /// Header of the categorical column in the upstream export.
        csv_category: &'static str,
    },
    Frequency,
}

fn classify_file(path: &Path) -> Option<FileKind> {
    let stem = path.file_stem()?.to_str()?.to_ascii_lowercase();
    for token in stem.split(['_', '-', '.']) {
        match token {
            "age" => {
                return Some(FileKind::Category { kind: &AGE_GROUPS, csv_category: "age_group" })
            }
            "dwelltime" => {
                return Some(FileKind::Category { kind: &DWELL_TIMES, csv_category: "DwellTime" })
            }
            "gender" => {
                return Some(FileKind::Category { kind: &GENDERS, csv_category: "gender" })
            }
            "visitortype" => {
                return Some(FileKind::Category {
                    kind: &VISITOR_TYPES,
                    csv_category: "VisitorType",
                })
            }
            "dailyfrequency" => return Some(FileKind::Frequency),
            _ => {}
        }
    }
    None
}

fn find_column(headers: &csv::StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h.trim().eq_ignore_ascii_case(name))
}

fn require_column(
    headers: &csv::StringRecord,
    name: &str,
    path: &Path,
) -> Result<usize, ImportError> {
    find_column(headers, name).ok_or_else(|| ImportError::MissingColumn {
        path: path.to_path_buf(),
        column: name.to_string(),
    })
}

fn optional_field(record: &csv::StringRecord, idx: Option<usize>) -> Option<String> {
    idx.and_then(|i| record.get(i))
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn required_field(record: &csv::StringRecord, idx: usize) -> String {
    record.get(idx).unwrap_or("").trim().to_string()
}

fn parse_count(raw: &str, path: &Path) -> Result<f64, ImportError> {
    raw.trim().parse::<f64>().map_err(|_| ImportError::BadCount {
        path: path.to_path_buf(),
        value: raw.to_string(),
    })
}

/// Read one categorical export into fact rows.
fn read_category_facts<R: io::Read>(
    reader: R,
    csv_category: &str,
    path: &Path,
) -> Result<Vec<CategoryFact>, ImportError> {
    let mut rdr = csv::Reader::from_reader(reader);
    let headers = rdr.headers()?.clone();

    let zone_idx = require_column(&headers, "zone_id", path)?;
    let date_idx = require_column(&headers, "date", path)?;
    let visitors_idx = require_column(&headers, "visitors", path)?;
    let category_idx = require_column(&headers, csv_category, path)?;
    let hour_idx = find_column(&headers, "hour");
    let weekday_idx = find_column(&headers, "weekday");
    let quarter_idx = find_column(&headers, "quarter");

    let mut facts = Vec::new();
    for record in rdr.records() {
        let record = record?;
        facts.push(CategoryFact {
            zone_id: required_field(&record, zone_idx),
            recorded_at: required_field(&record, date_idx),
            hour: optional_field(&record, hour_idx),
            weekday: optional_field(&record, weekday_idx),
            quarter: optional_field(&record, quarter_idx),
            category: required_field(&record, category_idx),
            visitors: parse_count(record.get(visitors_idx).unwrap_or(""), path)?,
        });
    }
    Ok(facts)
}

/// Read one daily-frequency export into fact rows.
/// Upstream exports name the measure either `Count` or `visitors`.
fn read_frequency_facts<R: io::Read>(
    reader: R,
    path: &Path,
) -> Result<Vec<FrequencyFact>, ImportError> {
    let mut rdr = csv::Reader::from_reader(reader);
    let headers = rdr.headers()?.clone();

    let zone_idx = require_column(&headers, "zone_id", path)?;
    let date_idx = require_column(&headers, "date", path)?;
    let visitors_idx = find_column(&headers, "count")
        .or_else(|| find_column(&headers, "visitors"))
        .ok_or_else(|| ImportError::MissingColumn {
            path: path.to_path_buf(),
            column: "count".to_string(),
        })?;
    let travel_type_idx = find_column(&headers, "travel_type");
    let travel_distance_idx = find_column(&headers, "travel_distance");

    let mut facts = Vec::new();
    for record in rdr.records() {
        let record = record?;
        facts.push(FrequencyFact {
            zone_id: required_field(&record, zone_idx),
            recorded_at: required_field(&record, date_idx),
            visitors: parse_count(record.get(visitors_idx).unwrap_or(""), path)?,
            travel_type: optional_field(&record, travel_type_idx),
            travel_distance: optional_field(&record, travel_distance_idx),
        });
    }
    Ok(facts)
}

fn import_file(pool: &ConnectionPool, path: &Path, kind: &FileKind) -> Result<usize, ImportError> {
    let file = fs::File::open(path).map_err(|source| ImportError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    match kind {
        FileKind::Category { kind, csv_category } => {
            let facts = read_category_facts(file, csv_category, path)?;
            let inserted = pool.with_writer(|conn| {
                let tx = conn.unchecked_transaction()?;
                let inserted = insert_category_facts(&tx, kind, &facts)?;
                tx.commit()?;
                Ok(inserted)
            })?;
            Ok(inserted)
        }
        FileKind::Frequency => {
            let facts = read_frequency_facts(file, path)?;
            let inserted = pool.with_writer(|conn| {
                let tx = conn.unchecked_transaction()?;
                let inserted = insert_frequency_facts(&tx, &facts)?;
                tx.commit()?;
                Ok(inserted)
            })?;
            Ok(inserted)
        }
    }
}

fn run(data_dir: &Path, db_path: &Path) -> Result<(), ImportError> {
    let pool = ConnectionPool::open(db_path, 1)?;

    let entries = fs::read_dir(data_dir).map_err(|source| ImportError::Io {
        path: data_dir.to_path_buf(),
        source,
    })?;

    let mut total = 0;
    for entry in entries {
        let entry = entry.map_err(|source| ImportError::Io {
            path: data_dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let size = entry
            .metadata()
            .map_err(|source| ImportError::Io { path: path.clone(), source })?
            .len();
        if size == 0 {
            warn!(file = %path.display(), "Skipping empty file");
            continue;
        }

        let Some(kind) = classify_file(&path) else {
            warn!(file = %path.display(), "No fact table matches this filename, skipping");
            continue;
        };

        let inserted = import_file(&pool, &path, &kind)?;
        info!(file = %path.display(), rows = inserted, "Imported");
        total += inserted;
    }

    info!(rows = total, "Import complete");
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let data_dir = args.next().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("data"));
    let db_path = args.next().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("footfall.db"));

    match run(&data_dir, &db_path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Import failed");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_files_by_keyword_token() {
        let category = |p: &str| match classify_file(Path::new(p)) {
            Some(FileKind::Category { kind, .. }) => Some(kind.table),
            Some(FileKind::Frequency) => Some("daily_frequency_data"),
            None => None,
        };

        assert_eq!(category("Hamburg_age_2024.csv"), Some("age_data"));
        assert_eq!(category("Hamburg_dwelltime.csv"), Some("dwell_time_data"));
        assert_eq!(category("hamburg_VisitorType_q1.csv"), Some("visitor_type_data"));
        assert_eq!(category("gender.csv"), Some("gender_data"));
        assert_eq!(category("Hamburg_dailyfrequency.csv"), Some("daily_frequency_data"));
        assert_eq!(category("Hamburg_ziporigin.csv"), None);
        assert_eq!(category("notes.txt"), None);
    }

    #[test]
    fn reads_category_rows_with_upstream_headers() {
        let csv = "\
id,zone_id,hour,weekday,quarter,visitors,date,age_group
1,Z1,08,Mon,Q1,4.5,2024-01-01,18-25
2,Z1,,Mon,Q1,2.0,2024-01-01 09:00:00,26-35
";
        let facts =
            read_category_facts(csv.as_bytes(), "age_group", Path::new("age.csv")).unwrap();
        assert_eq!(facts.len(), 2);
        assert_eq!(facts[0].zone_id, "Z1");
        assert_eq!(facts[0].recorded_at, "2024-01-01");
        assert_eq!(facts[0].category, "18-25");
        assert_eq!(facts[0].visitors, 4.5);
        assert_eq!(facts[1].hour, None);
    }

    #[test]
    fn reads_frequency_rows_accepting_count_header() {
        let csv = "\
zone_id,date,Count,travel_type,travel_distance
Z2,2024-02-01 08:00:00,10,commuter,0-5km
";
        let facts = read_frequency_facts(csv.as_bytes(), Path::new("freq.csv")).unwrap();
        assert_eq!(facts.len(), 1);
        assert_eq!(facts[0].visitors, 10.0);
        assert_eq!(facts[0].travel_type.as_deref(), Some("commuter"));
    }

    #[test]
    fn missing_category_column_is_an_error() {
        let csv = "zone_id,date,visitors\nZ1,2024-01-01,1.0\n";
        let result = read_category_facts(csv.as_bytes(), "age_group", Path::new("age.csv"));
        assert!(matches!(result, Err(ImportError::MissingColumn { .. })));
    }

    #[test]
    fn unparsable_count_is_an_error() {
        let csv = "zone_id,date,visitors,age_group\nZ1,2024-01-01,lots,18-25\n";
        let result = read_category_facts(csv.as_bytes(), "age_group", Path::new("age.csv"));
        assert!(matches!(result, Err(ImportError::BadCount { .. })));
    }
}
