//! Boundary model: coordinates, rings and countries.

pub mod coordinate;
pub mod country;

pub use coordinate::Coordinate;
pub use country::{Country, CountryInfo, Ring};
