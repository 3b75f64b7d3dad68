//! Aggregation query benchmarks over a seeded fact store.

use chrono::NaiveDate;
use criterion::{criterion_group, criterion_main, Criterion};
use tempfile::TempDir;

use footfall_storage::queries::ingest::{insert_frequency_facts, FrequencyFact};
use footfall_storage::queries::{sum_by_day, sum_by_hour};
use footfall_storage::ConnectionPool;

const ZONES: usize = 10;
const DAYS: usize = 90;
const ROWS_PER_DAY: usize = 24;

fn seeded_pool() -> (TempDir, ConnectionPool) {
    let dir = TempDir::new().unwrap();
    let pool = ConnectionPool::open(&dir.path().join("bench.db"), 2).unwrap();

    let mut facts = Vec::with_capacity(ZONES * DAYS * ROWS_PER_DAY);
    for zone in 0..ZONES {
        for day in 0..DAYS {
            for hour in 0..ROWS_PER_DAY {
                facts.push(FrequencyFact {
                    zone_id: format!("Z{zone}"),
                    recorded_at: format!("2024-01-{:02} {hour:02}:00:00", (day % 28) + 1),
                    visitors: (hour * day % 50) as f64,
                    travel_type: None,
                    travel_distance: None,
                });
            }
        }
    }
    pool.with_writer(|conn| {
        let tx = conn.unchecked_transaction()?;
        insert_frequency_facts(&tx, &facts)?;
        tx.commit()?;
        Ok(())
    })
    .unwrap();

    (dir, pool)
}

fn bench_rollups(c: &mut Criterion) {
    let (_dir, pool) = seeded_pool();
    let from: NaiveDate = "2024-01-01".parse().unwrap();
    let to: NaiveDate = "2024-01-28".parse().unwrap();

    c.bench_function("sum_by_day_full_month", |b| {
        b.iter(|| {
            pool.with_reader(|conn| sum_by_day(conn, "Z3", None, Some(from), Some(to)))
                .unwrap()
        })
    });

    c.bench_function("sum_by_hour_full_month", |b| {
        b.iter(|| {
            pool.with_reader(|conn| sum_by_hour(conn, "Z3", from, to))
                .unwrap()
        })
    });
}

criterion_group!(benches, bench_rollups);
criterion_main!(benches);
