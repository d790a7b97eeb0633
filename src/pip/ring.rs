//! Ray casting over a single ring, and union over a country's rings.

use crate::models::{Coordinate, Country, Ring};
use crate::pip::geometry::{on_segment, orientation, segments_intersect, Orientation};

/// Whether `point` lies strictly inside `ring` or exactly on its boundary.
///
/// Casts a ray from `point` towards increasing latitude at constant
/// longitude and counts edge crossings. An edge that is colinear with the
/// point decides the result immediately.
pub fn contains_or_on_boundary(point: Coordinate, ring: &Ring) -> bool {
    if ring.is_degenerate() {
        return false;
    }

    // The ray is vertical, so it can only meet edges spanning its longitude
    if let Some(envelope) = ring.envelope() {
        if point.lon < envelope.min().x || point.lon > envelope.max().x {
            return false;
        }
    }

    let bound = ring.points();
    let extreme = Coordinate::new(f64::MAX, point.lon);

    let mut count = 0usize;
    for current in 0..bound.len() {
        let start = bound[current];
        let finish = bound[(current + 1) % bound.len()];

        if segments_intersect(start, finish, point, extreme) {
            if orientation(start, point, finish) == Orientation::Colinear {
                return on_segment(point, start, finish);
            }
            count += 1;
        }
    }

    count % 2 == 1
}

/// Whether any of the country's rings contains (or bounds) `point`
pub fn country_contains(point: Coordinate, country: &Country) -> bool {
    country
        .rings
        .iter()
        .any(|ring| contains_or_on_boundary(point, ring))
}
