//! HTTP boundary tests: status mapping, auth gate, response shapes.

use actix_web::{test, web, App};
use serde_json::Value;
use tempfile::TempDir;

use footfall_core::ServerConfig;
use footfall_server::handlers;
use footfall_server::middleware::auth::BearerAuth;
use footfall_storage::queries::ingest::{
    insert_category_facts, insert_frequency_facts, CategoryFact, FrequencyFact,
};
use footfall_storage::queries::VISITOR_TYPES;
use footfall_storage::ConnectionPool;

const TOKEN: &str = "test-secret";

struct TestContext {
    _dir: TempDir,
    pool: web::Data<ConnectionPool>,
    config: web::Data<ServerConfig>,
}

/// File-backed pool seeded with a small fact set, plus a static dir
/// holding the summary document.
fn seeded_context() -> TestContext {
    let dir = TempDir::new().unwrap();
    let pool = ConnectionPool::open(&dir.path().join("test.db"), 1).unwrap();

    pool.with_writer(|conn| {
        insert_category_facts(
            conn,
            &VISITOR_TYPES,
            &[
                CategoryFact {
                    zone_id: "Z1".to_string(),
                    recorded_at: "2024-01-01".to_string(),
                    hour: None,
                    weekday: None,
                    quarter: None,
                    category: "tourist".to_string(),
                    visitors: 5.0,
                },
                CategoryFact {
                    zone_id: "Z1".to_string(),
                    recorded_at: "2024-01-01".to_string(),
                    hour: None,
                    weekday: None,
                    quarter: None,
                    category: "local".to_string(),
                    visitors: 3.0,
                },
            ],
        )?;
        insert_frequency_facts(
            conn,
            &[
                FrequencyFact {
                    zone_id: "Z1".to_string(),
                    recorded_at: "2024-02-01 08:00:00".to_string(),
                    visitors: 10.0,
                    travel_type: None,
                    travel_distance: None,
                },
                FrequencyFact {
                    zone_id: "Z1".to_string(),
                    recorded_at: "2024-02-01 08:30:00".to_string(),
                    visitors: 4.0,
                    travel_type: None,
                    travel_distance: None,
                },
            ],
        )?;
        Ok(())
    })
    .unwrap();

    let static_dir = dir.path().join("static");
    std::fs::create_dir_all(&static_dir).unwrap();
    std::fs::write(static_dir.join("all_summary.json"), br#"{"locations":[]}"#).unwrap();

    let config = ServerConfig {
        static_dir: Some(static_dir),
        ..ServerConfig::default()
    };

    TestContext {
        _dir: dir,
        pool: web::Data::new(pool),
        config: web::Data::new(config),
    }
}

macro_rules! test_app {
    ($ctx:expr) => {
        test::init_service(
            App::new()
                .app_data($ctx.pool.clone())
                .app_data($ctx.config.clone())
                .wrap(BearerAuth::new(TOKEN.to_string()))
                .configure(handlers::analytics::configure)
                .configure(handlers::summary::configure),
        )
        .await
    };
}

fn authed(req: test::TestRequest) -> test::TestRequest {
    req.insert_header(("Authorization", format!("Bearer {TOKEN}")))
}

#[actix_web::test]
async fn visitor_types_returns_aggregated_rows() {
    let ctx = seeded_context();
    let app = test_app!(ctx);

    let req = authed(test::TestRequest::get().uri("/visitor-types?zone_id=Z1")).to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: Value = test::read_body_json(resp).await;
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    for row in data {
        assert_eq!(row["date"], "2024-01-01");
        assert!(row["sum"].is_f64() || row["sum"].is_u64());
    }
    let sums: Vec<(&str, f64)> = data
        .iter()
        .map(|r| (r["visitor_type"].as_str().unwrap(), r["sum"].as_f64().unwrap()))
        .collect();
    assert!(sums.contains(&("tourist", 5.0)));
    assert!(sums.contains(&("local", 3.0)));
}

#[actix_web::test]
async fn hourly_merges_same_hour_rows() {
    let ctx = seeded_context();
    let app = test_app!(ctx);

    let req = authed(test::TestRequest::get().uri(
        "/hourly?zone_id=Z1&date_from=2024-02-01&date_to=2024-02-01",
    ))
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: Value = test::read_body_json(resp).await;
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["hour"], 8);
    assert_eq!(data[0]["sum"], 14.0);
}

#[actix_web::test]
async fn empty_result_maps_to_404_not_400() {
    let ctx = seeded_context();
    let app = test_app!(ctx);

    let req = authed(test::TestRequest::get().uri("/visitor-types?zone_id=nowhere")).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 404);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "NO_DATA");
}

#[actix_web::test]
async fn hourly_missing_range_endpoint_is_400() {
    let ctx = seeded_context();
    let app = test_app!(ctx);

    let req = authed(test::TestRequest::get().uri("/hourly?zone_id=Z1&date_from=2024-02-01"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);
}

#[actix_web::test]
async fn malformed_date_is_400() {
    let ctx = seeded_context();
    let app = test_app!(ctx);

    let req = authed(test::TestRequest::get().uri("/visitor-types?zone_id=Z1&date=not-a-date"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);
}

#[actix_web::test]
async fn missing_authorization_header_is_401() {
    let ctx = seeded_context();
    let app = test_app!(ctx);

    let req = test::TestRequest::get().uri("/visitor-types?zone_id=Z1").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 401);
}

#[actix_web::test]
async fn wrong_token_is_403() {
    let ctx = seeded_context();
    let app = test_app!(ctx);

    let req = test::TestRequest::get()
        .uri("/visitor-types?zone_id=Z1")
        .insert_header(("Authorization", "Bearer wrong"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 403);
}

#[actix_web::test]
async fn daily_aggregated_returns_date_totals() {
    let ctx = seeded_context();
    let app = test_app!(ctx);

    let req = authed(test::TestRequest::get().uri(
        "/daily-aggregated?zone_id=Z1&date_from=2024-02-01&date_to=2024-02-28",
    ))
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: Value = test::read_body_json(resp).await;
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["date"], "2024-02-01");
    assert_eq!(data[0]["sum"], 14.0);
}

#[actix_web::test]
async fn summary_serves_static_json() {
    let ctx = seeded_context();
    let app = test_app!(ctx);

    let req = authed(test::TestRequest::get().uri("/locations/all_summary")).to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: Value = test::read_body_json(resp).await;
    assert!(body["locations"].is_array());
}

#[actix_web::test]
async fn summary_rejects_non_json_format() {
    let ctx = seeded_context();
    let app = test_app!(ctx);

    let req = authed(test::TestRequest::get().uri("/locations/all_summary?format=csv"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);
}
