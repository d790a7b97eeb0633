//! Country boundary model consumed by the decoder.

use geo::{Coord, Rect};
use serde::{Deserialize, Serialize};

use super::Coordinate;

/// Identifying payload returned by a successful decode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryInfo {
    /// Country code (e.g., "MCO" for Monaco)
    pub code: String,

    /// Display name, when the source provides one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl CountryInfo {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// A single implicitly-closed boundary loop.
///
/// The last point connects back to the first. Points are kept exactly as
/// given: no re-winding and no removal of a repeated closing vertex.
#[derive(Debug, Clone)]
pub struct Ring {
    points: Vec<Coordinate>,
    envelope: Option<Rect<f64>>,
}

impl Ring {
    pub fn new(points: Vec<Coordinate>) -> Self {
        let envelope = envelope_of(&points);
        Self { points, envelope }
    }

    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Fewer than 3 points cannot enclose anything
    pub fn is_degenerate(&self) -> bool {
        self.points.len() < 3
    }

    /// Axis-aligned envelope (x = lon, y = lat). NaN components are ignored.
    pub fn envelope(&self) -> Option<Rect<f64>> {
        self.envelope
    }
}

impl From<Vec<Coordinate>> for Ring {
    fn from(points: Vec<Coordinate>) -> Self {
        Self::new(points)
    }
}

fn envelope_of(points: &[Coordinate]) -> Option<Rect<f64>> {
    let (min_lon, min_lat, max_lon, max_lat) = points.iter().fold(
        (f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        |(min_lon, min_lat, max_lon, max_lat), c| {
            (
                min_lon.min(c.lon),
                min_lat.min(c.lat),
                max_lon.max(c.lon),
                max_lat.max(c.lat),
            )
        },
    );

    if min_lon > max_lon || min_lat > max_lat {
        return None;
    }

    Some(Rect::new(
        Coord { x: min_lon, y: min_lat },
        Coord { x: max_lon, y: max_lat },
    ))
}

/// A country: identifying info plus one or more boundary rings.
///
/// Rings are unioned. A ring meant as a hole still counts as an
/// inclusion region; there is no subtraction.
#[derive(Debug, Clone)]
pub struct Country {
    pub info: CountryInfo,
    pub rings: Vec<Ring>,
}

impl Country {
    pub fn new(info: CountryInfo, rings: Vec<Ring>) -> Self {
        Self { info, rings }
    }

    /// Total number of vertices across all rings
    pub fn vertex_count(&self) -> usize {
        self.rings.iter().map(Ring::len).sum()
    }

    /// Bounding box covering every ring
    pub fn bbox(&self) -> Option<Rect<f64>> {
        self.rings
            .iter()
            .filter_map(Ring::envelope)
            .reduce(|a, b| {
                Rect::new(
                    Coord {
                        x: a.min().x.min(b.min().x),
                        y: a.min().y.min(b.min().y),
                    },
                    Coord {
                        x: a.max().x.max(b.max().x),
                        y: a.max().y.max(b.max().y),
                    },
                )
            })
    }
}
