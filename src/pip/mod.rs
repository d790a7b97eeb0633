//! Point-in-Polygon (PIP) country decoding.
//!
//! Ray casting over each ring with exact orientation predicates, a union
//! over a country's rings, and a first-match scan over the country list.

pub mod geometry;
mod decoder;
mod ring;
mod service;

pub use decoder::{decode, GeoDecoder, ParallelRayCastDecoder, RayCastDecoder};
pub use geometry::Orientation;
pub use ring::{contains_or_on_boundary, country_contains};
pub use service::DecodeService;
