#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

use std::path::PathBuf;
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use charge_check_benchmark::BenchmarkEngine;
use charge_check_benchmark_models::BenchmarkConfig;
use charge_check_dataset::DatasetStore;
use charge_check_server::{AppState, handlers};

/// Reads the benchmark configuration, starting from the shipped
/// defaults and applying environment overrides.
fn config_from_env() -> BenchmarkConfig {
    let defaults = BenchmarkConfig::default();

    let env_or = |name: &str, default: f64| {
        std::env::var(name)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    };

    BenchmarkConfig {
        inflation_rate: env_or("INFLATION_RATE", defaults.inflation_rate),
        forecast_years: std::env::var("FORECAST_YEARS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.forecast_years),
        low_band: env_or("LOW_BAND", defaults.low_band),
        high_band: env_or("HIGH_BAND", defaults.high_band),
        min_sector_sample: std::env::var("MIN_SECTOR_SAMPLE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.min_sector_sample),
        excluded_reliability: std::env::var("EXCLUDE_RELIABILITY").map_or(
            defaults.excluded_reliability,
            |v| {
                v.split(',')
                    .map(|t| t.trim().to_uppercase())
                    .filter(|t| !t.is_empty())
                    .collect()
            },
        ),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let csv_path = PathBuf::from(
        std::env::var("DATASET_CSV").unwrap_or_else(|_| "ServiceCharge_Main.csv".to_string()),
    );

    let store = DatasetStore::load(&csv_path).expect("Failed to load dataset");
    let engine = BenchmarkEngine::new(store, config_from_env());

    let state = web::Data::new(AppState {
        engine: Arc::new(engine),
    });

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .service(
                web::scope("/api")
                    .route("/health", web::get().to(handlers::health))
                    .route("/benchmark", web::get().to(handlers::benchmark))
                    .route("/config", web::get().to(handlers::config)),
            )
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
