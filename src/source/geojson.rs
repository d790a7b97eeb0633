//! GeoJSON country loader (datahub.io `countries.geojson` layout).
//!
//! Each feature becomes one country. A `Polygon` contributes its exterior
//! ring; a `MultiPolygon` contributes the exterior ring of every member
//! polygon. Interior rings are not loaded.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use super::{CountrySource, LoadError};
use crate::models::{Coordinate, Country, CountryInfo, Ring};

/// Which feature properties carry the country metadata
#[derive(Debug, Clone)]
pub struct GeoJsonOptions {
    /// Property holding the country code
    pub code_property: String,
    /// Optional property holding a display name
    pub name_property: Option<String>,
}

impl Default for GeoJsonOptions {
    fn default() -> Self {
        Self {
            code_property: "ISO_A3".to_string(),
            name_property: Some("ADMIN".to_string()),
        }
    }
}

/// GeoJSON file on disk. Paths ending in `.gz` are decompressed on the fly.
#[derive(Debug, Clone)]
pub struct GeoJsonSource {
    path: PathBuf,
    options: GeoJsonOptions,
}

impl GeoJsonSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_options(path, GeoJsonOptions::default())
    }

    pub fn with_options(path: impl Into<PathBuf>, options: GeoJsonOptions) -> Self {
        Self {
            path: path.into(),
            options,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CountrySource for GeoJsonSource {
    fn load(&self) -> Result<Vec<Country>, LoadError> {
        let file = File::open(&self.path)?;
        let reader: Box<dyn Read> = if self.path.extension().map_or(false, |e| e == "gz") {
            Box::new(GzDecoder::new(file))
        } else {
            Box::new(file)
        };

        parse_feature_collection(BufReader::new(reader), &self.options)
    }

    fn describe(&self) -> String {
        format!("GeoJSON file {}", self.path.display())
    }
}

#[derive(Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Deserialize)]
struct Feature {
    #[serde(default)]
    properties: Option<Map<String, Value>>,
    geometry: Option<Geometry>,
}

#[derive(Deserialize)]
struct Geometry {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    coordinates: Value,
}

type Position = Vec<f64>;
type PolygonCoords = Vec<Vec<Position>>;

/// Parse a GeoJSON `FeatureCollection` into countries, in feature order
pub fn parse_feature_collection<R: Read>(
    reader: R,
    options: &GeoJsonOptions,
) -> Result<Vec<Country>, LoadError> {
    let collection: FeatureCollection = serde_json::from_reader(reader)?;

    let mut countries = Vec::with_capacity(collection.features.len());

    for (index, feature) in collection.features.into_iter().enumerate() {
        let Some(geometry) = feature.geometry else {
            warn!("Skipping feature {} without geometry", index);
            continue;
        };

        let properties = feature.properties.unwrap_or_default();
        let info = country_info(index, &properties, options)?;
        let rings = country_rings(index, geometry)?;

        debug!("Loaded {} with {} rings", info.code, rings.len());
        countries.push(Country::new(info, rings));
    }

    info!("Loaded {} countries", countries.len());

    Ok(countries)
}

fn country_info(
    index: usize,
    properties: &Map<String, Value>,
    options: &GeoJsonOptions,
) -> Result<CountryInfo, LoadError> {
    let code = properties
        .get(&options.code_property)
        .and_then(Value::as_str)
        .ok_or_else(|| LoadError::MissingProperty {
            feature: index,
            key: options.code_property.clone(),
        })?;

    let name = options
        .name_property
        .as_ref()
        .and_then(|key| properties.get(key))
        .and_then(Value::as_str);

    let info = CountryInfo::new(code);
    Ok(match name {
        Some(name) => info.with_name(name),
        None => info,
    })
}

fn country_rings(index: usize, geometry: Geometry) -> Result<Vec<Ring>, LoadError> {
    match geometry.kind.as_str() {
        "Polygon" => {
            let polygon: PolygonCoords = serde_json::from_value(geometry.coordinates)?;
            Ok(vec![exterior_ring(index, polygon)?])
        }
        "MultiPolygon" => {
            let polygons: Vec<PolygonCoords> = serde_json::from_value(geometry.coordinates)?;
            if polygons.is_empty() {
                return Err(LoadError::EmptyGeometry { feature: index });
            }
            polygons
                .into_iter()
                .map(|polygon| exterior_ring(index, polygon))
                .collect()
        }
        other => Err(LoadError::UnsupportedGeometry {
            feature: index,
            kind: other.to_string(),
        }),
    }
}

fn exterior_ring(index: usize, polygon: PolygonCoords) -> Result<Ring, LoadError> {
    let exterior = polygon
        .into_iter()
        .next()
        .ok_or(LoadError::EmptyGeometry { feature: index })?;

    let points = exterior
        .iter()
        .map(|position| to_coordinate(index, position))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Ring::new(points))
}

/// GeoJSON positions are `[lon, lat, ...]`
fn to_coordinate(index: usize, position: &[f64]) -> Result<Coordinate, LoadError> {
    match position {
        [lon, lat, ..] => Ok(Coordinate::new(*lat, *lon)),
        _ => Err(LoadError::InvalidPosition {
            feature: index,
            len: position.len(),
        }),
    }
}
