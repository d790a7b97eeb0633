//! Decode service for looking up the country of a point.

use tracing::{debug, info};

use super::{GeoDecoder, ParallelRayCastDecoder, RayCastDecoder};
use crate::models::{Coordinate, Country, CountryInfo};
use crate::source::{CountrySource, LoadError};

/// Country lookup service over a loaded boundary model
pub struct DecodeService {
    countries: Vec<Country>,
    decoder: Box<dyn GeoDecoder>,
}

impl DecodeService {
    /// Create a service with the sequential decoder
    pub fn new(countries: Vec<Country>) -> Self {
        Self::with_decoder(countries, Box::new(RayCastDecoder))
    }

    pub fn with_decoder(countries: Vec<Country>, decoder: Box<dyn GeoDecoder>) -> Self {
        let rings: usize = countries.iter().map(|c| c.rings.len()).sum();
        let vertices: usize = countries.iter().map(Country::vertex_count).sum();
        info!(
            "Decode service ready: {} countries, {} rings, {} vertices",
            countries.len(),
            rings,
            vertices
        );

        Self { countries, decoder }
    }

    /// Load countries from `source` and build a service
    pub fn from_source(source: &dyn CountrySource, parallel: bool) -> Result<Self, LoadError> {
        info!("Loading countries from {}", source.describe());
        let countries = source.load()?;

        let decoder: Box<dyn GeoDecoder> = if parallel {
            Box::new(ParallelRayCastDecoder)
        } else {
            Box::new(RayCastDecoder)
        };

        Ok(Self::with_decoder(countries, decoder))
    }

    /// Resolve the country containing a point
    pub fn lookup(&self, coordinate: Coordinate) -> Option<&CountryInfo> {
        let result = self.decoder.decode(coordinate, &self.countries);

        debug!(
            "Decode at {}: {}",
            coordinate,
            result.map(|info| info.code.as_str()).unwrap_or("no match")
        );

        result
    }

    /// Resolve a batch of points, preserving input order
    pub fn lookup_many(&self, coordinates: &[Coordinate]) -> Vec<Option<&CountryInfo>> {
        coordinates.iter().map(|c| self.lookup(*c)).collect()
    }

    pub fn countries(&self) -> &[Country] {
        &self.countries
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }
}
