//! HTTP server for country decoding.
//!
//! Loads the country dataset once at startup and answers
//! `/v1/decode?point.lat=..&point.lon=..` lookups against it.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    extract::{Query, State},
    response::Json,
    routing::get,
    Router,
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use geodecoder::config::Config;
use geodecoder::source::GeoJsonSource;
use geodecoder::{Coordinate, CountryInfo, DecodeService};

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[derive(Parser, Debug)]
#[command(name = "serve")]
#[command(about = "Country decoding server")]
struct Args {
    /// TOML config file
    #[arg(short, long)]
    config: PathBuf,

    /// Listen address (overrides the config file)
    #[arg(short, long)]
    listen: Option<String>,
}

/// Application state shared across handlers
struct AppState {
    service: DecodeService,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = Config::load_from_file(&args.config)?;

    info!("Geodecoder Server");

    let source =
        GeoJsonSource::with_options(&config.dataset.path, config.dataset.geojson_options());
    let service = DecodeService::from_source(&source, config.decode.parallel)
        .with_context(|| format!("Failed to load {}", config.dataset.path.display()))?;

    let state = Arc::new(AppState { service });
    let app = router(state);

    let listen = args.listen.unwrap_or(config.server.listen);
    info!("Starting server on {}", listen);

    let listener = tokio::net::TcpListener::bind(&listen).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/v1/decode", get(decode_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint
async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: if state.service.is_empty() { "degraded" } else { "ok" },
        countries: state.service.len(),
    })
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    countries: usize,
}

/// Resolve the country containing a point
async fn decode_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DecodeQueryParams>,
) -> Json<DecodeResponse> {
    let coordinate = Coordinate::new(params.point_lat, params.point_lon);

    Json(DecodeResponse {
        country: state.service.lookup(coordinate).cloned(),
    })
}

#[derive(Deserialize)]
struct DecodeQueryParams {
    /// Point latitude
    #[serde(rename = "point.lat")]
    point_lat: f64,
    /// Point longitude
    #[serde(rename = "point.lon")]
    point_lon: f64,
}

#[derive(Serialize)]
struct DecodeResponse {
    country: Option<CountryInfo>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use geodecoder::{Country, Ring};

    fn state() -> Arc<AppState> {
        let monaco = Country::new(
            CountryInfo::new("MCO").with_name("Monaco"),
            vec![Ring::new(vec![
                Coordinate::new(43.72, 7.40),
                Coordinate::new(43.72, 7.44),
                Coordinate::new(43.76, 7.44),
                Coordinate::new(43.76, 7.40),
            ])],
        );
        Arc::new(AppState {
            service: DecodeService::new(vec![monaco]),
        })
    }

    #[tokio::test]
    async fn test_decode_match() {
        let Json(response) = decode_handler(
            State(state()),
            Query(DecodeQueryParams {
                point_lat: 43.730191,
                point_lon: 7.411283,
            }),
        )
        .await;

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            serde_json::json!({ "country": { "code": "MCO", "name": "Monaco" } })
        );
    }

    #[tokio::test]
    async fn test_decode_no_match() {
        let Json(response) = decode_handler(
            State(state()),
            Query(DecodeQueryParams {
                point_lat: 16.318157,
                point_lon: 62.543254,
            }),
        )
        .await;

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            serde_json::json!({ "country": null })
        );
    }

    #[tokio::test]
    async fn test_health() {
        let Json(health) = health_handler(State(state())).await;
        assert_eq!(health.status, "ok");
        assert_eq!(health.countries, 1);

        let empty = Arc::new(AppState {
            service: DecodeService::new(vec![]),
        });
        let Json(health) = health_handler(State(empty)).await;
        assert_eq!(health.status, "degraded");
    }

    #[test]
    fn test_query_param_names() {
        let params: DecodeQueryParams =
            serde_json::from_str(r#"{ "point.lat": 1.5, "point.lon": -2.5 }"#).unwrap();
        assert_eq!(params.point_lat, 1.5);
        assert_eq!(params.point_lon, -2.5);
    }
}
