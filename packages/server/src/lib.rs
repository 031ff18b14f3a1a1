#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web server for the geohazard map dashboard.
//!
//! Loads the dataset registry and county boundaries once at startup,
//! then serves the dashboard views: HTML table fragments for the data
//! tabs and Plotly figure JSON for the map and trend tabs. The static
//! frontend under `app/` drives the selections and renders figures with
//! Plotly.js from CDN.

mod handlers;

use std::path::Path;
use std::sync::Arc;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpServer, middleware, web};
use geohazard_map_dataset::{Registry, loader};
use geojson::FeatureCollection;

/// Shared application state. Read-only after startup, so handlers can
/// query it concurrently without locking.
pub struct AppState {
    /// The immutable dataset registry.
    pub registry: Arc<Registry>,
    /// Georgia's county boundaries, pre-subset from the nationwide file.
    pub georgia: Arc<FeatureCollection>,
}

/// Starts the geohazard map server.
///
/// Loads every data table and the county boundary file from the
/// directory named by `DATA_DIR` (default `data`), then binds the HTTP
/// server at `BIND_ADDR`:`PORT`. This is a regular async function — the
/// caller provides the runtime (e.g. via `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind
/// or encounters a runtime error.
///
/// # Panics
///
/// Panics if the data directory cannot be loaded; a dashboard with no
/// data has nothing to serve.
#[allow(clippy::future_not_send)]
pub async fn run_server() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let data_dir = std::env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string());
    let data_dir = Path::new(&data_dir);

    log::info!("Loading dataset registry from {}...", data_dir.display());
    let registry = loader::load(data_dir).expect("Failed to load dataset registry");

    log::info!("Loading county boundaries...");
    let counties = geohazard_map_geography::load_counties(
        &data_dir.join(loader::COUNTIES_GEOJSON),
    )
    .expect("Failed to load county boundaries");
    let georgia = geohazard_map_geography::georgia_counties(&counties);

    let state = web::Data::new(AppState {
        registry: Arc::new(registry),
        georgia: Arc::new(georgia),
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
                    .route("/domains", web::get().to(handlers::domains))
                    .route("/datasets", web::get().to(handlers::datasets))
                    .route("/sites", web::get().to(handlers::sites))
                    .route("/county-stats", web::get().to(handlers::county_stats))
                    .route("/map", web::get().to(handlers::map_view))
                    .route("/trends", web::get().to(handlers::trends)),
            )
            // Serve the static dashboard frontend
            .service(Files::new("/", "app").index_file("index.html"))
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
