//! Country boundary sources.
//!
//! The decoder only needs an ordered list of [`Country`] values; anything
//! that can produce one implements [`CountrySource`].

mod geojson;

pub use geojson::{parse_feature_collection, GeoJsonOptions, GeoJsonSource};

use thiserror::Error;

use crate::models::Country;

/// Errors raised while loading a boundary model
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read boundary data: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid GeoJSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("feature {feature}: missing string property '{key}'")]
    MissingProperty { feature: usize, key: String },

    #[error("feature {feature}: position has {len} components, expected at least 2")]
    InvalidPosition { feature: usize, len: usize },

    #[error("feature {feature}: geometry has no rings")]
    EmptyGeometry { feature: usize },

    #[error("feature {feature}: unsupported geometry type '{kind}'")]
    UnsupportedGeometry { feature: usize, kind: String },
}

/// Anything that produces the ordered country list consumed by the decoder
pub trait CountrySource {
    /// Load countries in scan order
    fn load(&self) -> Result<Vec<Country>, LoadError>;

    /// Human-readable description for logs
    fn describe(&self) -> String;
}

/// Already-built countries
impl CountrySource for Vec<Country> {
    fn load(&self) -> Result<Vec<Country>, LoadError> {
        Ok(self.clone())
    }

    fn describe(&self) -> String {
        format!("{} in-memory countries", self.len())
    }
}
