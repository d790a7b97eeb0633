//! Exact orientation and segment predicates.
//!
//! All comparisons are exact floating-point comparisons. A cross product of
//! exactly `0.0` (including `-0.0`) is colinear; there is no epsilon.

use crate::models::Coordinate;

/// Turn direction of an ordered triplet of points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Colinear,
    Clockwise,
    CounterClockwise,
}

/// Orientation of the ordered triplet (p1, p2, p3).
///
/// Anything that is neither exactly zero nor positive (including NaN)
/// is counter-clockwise.
pub fn orientation(p1: Coordinate, p2: Coordinate, p3: Coordinate) -> Orientation {
    let res = (p2.lon - p1.lon) * (p3.lat - p2.lat) - (p2.lat - p1.lat) * (p3.lon - p2.lon);

    if res == 0.0 {
        Orientation::Colinear
    } else if res > 0.0 {
        Orientation::Clockwise
    } else {
        Orientation::CounterClockwise
    }
}

/// Whether `point` falls inside the closed bounding box of `[start, finish]`.
///
/// Only a colinearity test when the caller already knows the three points
/// are colinear.
pub fn on_segment(point: Coordinate, start: Coordinate, finish: Coordinate) -> bool {
    point.lat <= start.lat.max(finish.lat)
        && point.lat >= start.lat.min(finish.lat)
        && point.lon <= start.lon.max(finish.lon)
        && point.lon >= start.lon.min(finish.lon)
}

/// Whether segment `[s1, f1]` intersects segment `[s2, f2]`
pub fn segments_intersect(s1: Coordinate, f1: Coordinate, s2: Coordinate, f2: Coordinate) -> bool {
    let o1 = orientation(s1, f1, s2);
    let o2 = orientation(s1, f1, f2);
    let o3 = orientation(s2, f2, s1);
    let o4 = orientation(s2, f2, f1);

    // General case
    if o1 != o2 && o3 != o4 {
        return true;
    }

    // Colinear endpoint lying within the other segment
    (o1 == Orientation::Colinear && on_segment(s2, s1, f1))
        || (o2 == Orientation::Colinear && on_segment(f2, s1, f1))
        || (o3 == Orientation::Colinear && on_segment(s1, s2, f2))
        || (o4 == Orientation::Colinear && on_segment(f1, s2, f2))
}
