//! One-shot country decoding from the command line.
//!
//! Loads a GeoJSON country dataset and resolves each `LAT,LON` argument
//! (or each stdin line when no arguments are given).

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use geodecoder::config::Config;
use geodecoder::source::{GeoJsonOptions, GeoJsonSource};
use geodecoder::{Coordinate, CountryInfo, DecodeService};

#[derive(Parser, Debug)]
#[command(name = "decode")]
#[command(about = "Resolve the country containing each coordinate")]
struct Args {
    /// GeoJSON country dataset (.geojson or .geojson.gz)
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// TOML config file; --data and --code-property take precedence
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Feature property holding the country code
    #[arg(long)]
    code_property: Option<String>,

    /// Scan countries in parallel
    #[arg(long)]
    parallel: bool,

    /// Print one JSON object per coordinate
    #[arg(long)]
    json: bool,

    /// Coordinates as "LAT,LON"; read from stdin when omitted
    points: Vec<String>,
}

#[derive(Serialize)]
struct DecodeLine<'a> {
    lat: f64,
    lon: f64,
    country: Option<&'a CountryInfo>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let (source, parallel) = resolve_source(&args)?;
    let service = DecodeService::from_source(&source, parallel)
        .with_context(|| format!("Failed to load {}", source.path().display()))?;

    info!("Decoding against {} countries", service.len());

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.points.is_empty() {
        for line in io::stdin().lock().lines() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let point = parse_point(trimmed)?;
            print_result(&mut out, &service, point, args.json)?;
        }
    } else {
        for raw in &args.points {
            let point = parse_point(raw)?;
            print_result(&mut out, &service, point, args.json)?;
        }
    }

    Ok(())
}

fn resolve_source(args: &Args) -> Result<(GeoJsonSource, bool)> {
    let config = args
        .config
        .as_ref()
        .map(Config::load_from_file)
        .transpose()?;

    let mut options = config
        .as_ref()
        .map(|c| c.dataset.geojson_options())
        .unwrap_or_else(GeoJsonOptions::default);
    if let Some(key) = &args.code_property {
        options.code_property = key.clone();
    }

    let path = match (&args.data, &config) {
        (Some(path), _) => path.clone(),
        (None, Some(config)) => config.dataset.path.clone(),
        (None, None) => bail!("Either --data or --config must be given"),
    };

    let parallel = args.parallel || config.map_or(false, |c| c.decode.parallel);

    Ok((GeoJsonSource::with_options(path, options), parallel))
}

fn print_result(
    out: &mut impl Write,
    service: &DecodeService,
    point: Coordinate,
    json: bool,
) -> Result<()> {
    let country = service.lookup(point);

    if json {
        let line = DecodeLine {
            lat: point.lat,
            lon: point.lon,
            country,
        };
        writeln!(out, "{}", serde_json::to_string(&line)?)?;
    } else {
        writeln!(out, "{}", country.map(|c| c.code.as_str()).unwrap_or("-"))?;
    }

    Ok(())
}

/// Parse "LAT,LON"
fn parse_point(raw: &str) -> Result<Coordinate> {
    let (lat, lon) = raw
        .split_once(',')
        .with_context(|| format!("Expected LAT,LON but got '{}'", raw))?;

    let lat: f64 = lat
        .trim()
        .parse()
        .with_context(|| format!("Invalid latitude in '{}'", raw))?;
    let lon: f64 = lon
        .trim()
        .parse()
        .with_context(|| format!("Invalid longitude in '{}'", raw))?;

    Ok(Coordinate::new(lat, lon))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_point() {
        let p = parse_point("43.730191, 7.411283").unwrap();
        assert_eq!(p, Coordinate::new(43.730191, 7.411283));
    }

    #[test]
    fn test_parse_point_rejects_garbage() {
        assert!(parse_point("43.73").is_err());
        assert!(parse_point("north,7.4").is_err());
        assert!(parse_point("43.7,east").is_err());
    }

    #[test]
    fn test_negative_values() {
        let p = parse_point("-33.86,-151.2").unwrap();
        assert_eq!(p, Coordinate::new(-33.86, -151.2));
    }
}
