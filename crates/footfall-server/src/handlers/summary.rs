//! Static summary document endpoint.
//!
//! Unrelated to aggregation: serves the pre-generated all-locations
//! summary JSON from the configured static directory.

use actix_web::{get, web, HttpResponse};
use serde::Deserialize;

use footfall_core::ServerConfig;

use crate::errors::{ApiError, ApiResult};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(all_summary);
}

#[derive(Debug, Deserialize)]
struct SummaryQuery {
    format: Option<String>,
}

#[get("/locations/all_summary")]
async fn all_summary(
    config: web::Data<ServerConfig>,
    query: web::Query<SummaryQuery>,
) -> ApiResult<HttpResponse> {
    let format = query.format.as_deref().unwrap_or("json");
    if format != "json" {
        return Err(ApiError::UnsupportedFormat(format.to_string()));
    }

    let path = config.effective_static_dir().join("all_summary.json");
    let body = web::block(move || std::fs::read(&path))
        .await
        .map_err(|_| ApiError::WorkerCanceled)?
        .map_err(|_| ApiError::SummaryMissing)?;

    Ok(HttpResponse::Ok()
        .content_type("application/json")
        .body(body))
}
