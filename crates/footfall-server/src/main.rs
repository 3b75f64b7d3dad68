//! Footfall analytics server binary.

use std::io;
use std::path::PathBuf;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use tracing::info;
use tracing_subscriber::EnvFilter;

use footfall_core::ServerConfig;
use footfall_server::{handlers, middleware};
use footfall_storage::ConnectionPool;

#[actix_web::main]
async fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("footfall.toml"));
    let config = ServerConfig::load(&config_path).map_err(io::Error::other)?;
    let token = config.require_api_token().map_err(io::Error::other)?.to_string();

    let pool = ConnectionPool::open(
        &config.effective_database_path(),
        config.effective_read_pool_size(),
    )
    .map_err(io::Error::other)?;

    let bind_addr = config.effective_bind_addr();
    let pool = web::Data::new(pool);
    let config = web::Data::new(config);

    info!(addr = %bind_addr, "Starting footfall server");

    HttpServer::new(move || {
        // Wraps run in reverse registration order: logging → CORS → auth,
        // so preflight requests are answered before the token check.
        App::new()
            .app_data(pool.clone())
            .app_data(config.clone())
            .wrap(middleware::auth::BearerAuth::new(token.clone()))
            .wrap(Cors::permissive())
            .wrap(middleware::logging::RequestLog)
            .configure(handlers::analytics::configure)
            .configure(handlers::summary::configure)
    })
    .bind(&bind_addr)?
    .run()
    .await
}
