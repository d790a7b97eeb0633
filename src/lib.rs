//! Geodecoder - resolve which country contains a coordinate
//!
//! This library provides the boundary model, the ray-casting decoder and the
//! boundary loaders shared by the `decode` and `serve` binaries.

pub mod config;
pub mod models;
pub mod pip;
pub mod source;

pub use models::{Coordinate, Country, CountryInfo, Ring};
pub use pip::{decode, DecodeService, GeoDecoder};
pub use source::{CountrySource, GeoJsonSource, LoadError};
