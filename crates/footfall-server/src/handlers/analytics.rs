//! Aggregation endpoints.
//!
//! Each handler validates its parameters at extraction time (a missing or
//! malformed parameter never reaches storage), runs the blocking SQLite
//! read on the worker pool, and maps an empty result to 404.

use actix_web::{get, web, HttpResponse};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use footfall_core::errors::StorageResult;
use footfall_storage::queries::{
    sum_by_category, sum_by_day, sum_by_hour, AGE_GROUPS, DWELL_TIMES, VISITOR_TYPES,
};
use footfall_storage::rusqlite::Connection;
use footfall_storage::ConnectionPool;

use crate::errors::{ApiError, ApiResult};

/// Configure aggregation routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(visitor_types)
        .service(age_groups)
        .service(dwell_times)
        .service(daily_aggregated)
        .service(hourly);
}

/// Run a read query on the blocking worker pool.
async fn run_query<T, F>(pool: web::Data<ConnectionPool>, f: F) -> ApiResult<T>
where
    F: FnOnce(&Connection) -> StorageResult<T> + Send + 'static,
    T: Send + 'static,
{
    let result = web::block(move || pool.with_reader(f))
        .await
        .map_err(|_| ApiError::WorkerCanceled)?;
    Ok(result?)
}

#[derive(Serialize)]
struct DataResponse<T> {
    data: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct VisitorTypeQuery {
    zone_id: String,
    date: Option<NaiveDate>,
    visitor_type: Option<String>,
}

#[derive(Serialize)]
struct VisitorTypeRow {
    date: String,
    visitor_type: String,
    sum: f64,
}

/// Visitor totals grouped by (date, visitor type).
#[get("/visitor-types")]
async fn visitor_types(
    pool: web::Data<ConnectionPool>,
    query: web::Query<VisitorTypeQuery>,
) -> ApiResult<HttpResponse> {
    let q = query.into_inner();
    let rows = run_query(pool, move |conn| {
        sum_by_category(conn, &VISITOR_TYPES, &q.zone_id, q.date, q.visitor_type.as_deref())
    })
    .await?;

    if rows.is_empty() {
        return Err(ApiError::NoData);
    }
    Ok(HttpResponse::Ok().json(DataResponse {
        data: rows
            .into_iter()
            .map(|r| VisitorTypeRow { date: r.day, visitor_type: r.category, sum: r.total })
            .collect(),
    }))
}

#[derive(Debug, Deserialize)]
struct AgeGroupQuery {
    zone_id: String,
    date: Option<NaiveDate>,
    age_group: Option<String>,
}

#[derive(Serialize)]
struct AgeGroupRow {
    date: String,
    age_group: String,
    sum: f64,
}

/// Visitor totals grouped by (date, age group).
#[get("/ages")]
async fn age_groups(
    pool: web::Data<ConnectionPool>,
    query: web::Query<AgeGroupQuery>,
) -> ApiResult<HttpResponse> {
    let q = query.into_inner();
    let rows = run_query(pool, move |conn| {
        sum_by_category(conn, &AGE_GROUPS, &q.zone_id, q.date, q.age_group.as_deref())
    })
    .await?;

    if rows.is_empty() {
        return Err(ApiError::NoData);
    }
    Ok(HttpResponse::Ok().json(DataResponse {
        data: rows
            .into_iter()
            .map(|r| AgeGroupRow { date: r.day, age_group: r.category, sum: r.total })
            .collect(),
    }))
}

#[derive(Debug, Deserialize)]
struct DwellTimeQuery {
    zone_id: String,
    date: Option<NaiveDate>,
    dwell_bucket: Option<String>,
}

#[derive(Serialize)]
struct DwellTimeRow {
    date: String,
    dwell_bucket: String,
    sum: f64,
}

/// Visitor totals grouped by (date, dwell-time bucket).
#[get("/dwell-times")]
async fn dwell_times(
    pool: web::Data<ConnectionPool>,
    query: web::Query<DwellTimeQuery>,
) -> ApiResult<HttpResponse> {
    let q = query.into_inner();
    let rows = run_query(pool, move |conn| {
        sum_by_category(conn, &DWELL_TIMES, &q.zone_id, q.date, q.dwell_bucket.as_deref())
    })
    .await?;

    if rows.is_empty() {
        return Err(ApiError::NoData);
    }
    Ok(HttpResponse::Ok().json(DataResponse {
        data: rows
            .into_iter()
            .map(|r| DwellTimeRow { date: r.day, dwell_bucket: r.category, sum: r.total })
            .collect(),
    }))
}

#[derive(Debug, Deserialize)]
struct DailyQuery {
    zone_id: String,
    date: Option<NaiveDate>,
    date_from: Option<NaiveDate>,
    date_to: Option<NaiveDate>,
}

#[derive(Serialize)]
struct DayRow {
    date: String,
    sum: f64,
}

/// Visitor totals grouped by calendar date.
#[get("/daily-aggregated")]
async fn daily_aggregated(
    pool: web::Data<ConnectionPool>,
    query: web::Query<DailyQuery>,
) -> ApiResult<HttpResponse> {
    let q = query.into_inner();
    let rows = run_query(pool, move |conn| {
        sum_by_day(conn, &q.zone_id, q.date, q.date_from, q.date_to)
    })
    .await?;

    if rows.is_empty() {
        return Err(ApiError::NoData);
    }
    Ok(HttpResponse::Ok().json(DataResponse {
        data: rows
            .into_iter()
            .map(|r| DayRow { date: r.day, sum: r.total })
            .collect(),
    }))
}

/// Both range endpoints are required: extraction fails with 400 when
/// either is missing, so the engine is never invoked with a half-open
/// range.
#[derive(Debug, Deserialize)]
struct HourlyQuery {
    zone_id: String,
    date_from: NaiveDate,
    date_to: NaiveDate,
}

#[derive(Serialize)]
struct HourRow {
    hour: u8,
    sum: f64,
}

/// Visitor totals grouped by hour-of-day across the date range.
#[get("/hourly")]
async fn hourly(
    pool: web::Data<ConnectionPool>,
    query: web::Query<HourlyQuery>,
) -> ApiResult<HttpResponse> {
    let q = query.into_inner();
    let rows = run_query(pool, move |conn| {
        sum_by_hour(conn, &q.zone_id, q.date_from, q.date_to)
    })
    .await?;

    if rows.is_empty() {
        return Err(ApiError::NoData);
    }
    Ok(HttpResponse::Ok().json(DataResponse {
        data: rows
            .into_iter()
            .map(|r| HourRow { hour: r.hour, sum: r.total })
            .collect(),
    }))
}
