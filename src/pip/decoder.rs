//! Country resolution over an ordered country list.

use rayon::prelude::*;

use crate::models::{Coordinate, Country, CountryInfo};
use crate::pip::ring::country_contains;

/// Resolves which country contains a coordinate.
///
/// Implementations must return the first country in list order whose
/// rings contain (or bound) the coordinate, and `None` otherwise.
pub trait GeoDecoder: Send + Sync {
    fn decode<'a>(&self, coordinate: Coordinate, countries: &'a [Country])
        -> Option<&'a CountryInfo>;
}

/// Sequential linear scan
#[derive(Debug, Clone, Copy, Default)]
pub struct RayCastDecoder;

impl GeoDecoder for RayCastDecoder {
    fn decode<'a>(
        &self,
        coordinate: Coordinate,
        countries: &'a [Country],
    ) -> Option<&'a CountryInfo> {
        countries
            .iter()
            .find(|country| country_contains(coordinate, country))
            .map(|country| &country.info)
    }
}

/// Scans countries on the rayon pool.
///
/// Picks the lowest-indexed match, so the result is identical to
/// [`RayCastDecoder`] regardless of which worker finishes first.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParallelRayCastDecoder;

impl GeoDecoder for ParallelRayCastDecoder {
    fn decode<'a>(
        &self,
        coordinate: Coordinate,
        countries: &'a [Country],
    ) -> Option<&'a CountryInfo> {
        countries
            .par_iter()
            .find_first(|country| country_contains(coordinate, country))
            .map(|country| &country.info)
    }
}

/// Resolve `coordinate` against `countries` with a sequential scan
pub fn decode(coordinate: Coordinate, countries: &[Country]) -> Option<&CountryInfo> {
    RayCastDecoder.decode(coordinate, countries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Ring;

    fn c(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon)
    }

    fn square(lat: f64, lon: f64, size: f64) -> Ring {
        Ring::new(vec![
            c(lat, lon),
            c(lat, lon + size),
            c(lat + size, lon + size),
            c(lat + size, lon),
        ])
    }

    fn country(code: &str, rings: Vec<Ring>) -> Country {
        Country::new(CountryInfo::new(code), rings)
    }

    fn code(result: Option<&CountryInfo>) -> Option<&str> {
        result.map(|info| info.code.as_str())
    }

    #[test]
    fn test_simple() {
        let countries = vec![country("A", vec![square(0.0, 0.0, 10.0)])];

        assert_eq!(code(decode(c(5.0, 5.0), &countries)), Some("A"));
        assert_eq!(code(decode(c(5.0, 0.0), &countries)), Some("A"));
        assert_eq!(code(decode(c(12.0, 13.0), &countries)), None);
    }

    #[test]
    fn test_country_with_multiple_polygons() {
        let countries = vec![country(
            "A",
            vec![square(0.0, 0.0, 10.0), square(15.0, 15.0, 10.0)],
        )];

        assert_eq!(code(decode(c(5.0, 5.0), &countries)), Some("A"));
        assert_eq!(code(decode(c(5.0, 0.0), &countries)), Some("A"));
        assert_eq!(code(decode(c(20.0, 20.0), &countries)), Some("A"));
        assert_eq!(code(decode(c(20.0, 15.0), &countries)), Some("A"));
        assert_eq!(code(decode(c(27.0, 28.0), &countries)), None);
    }

    #[test]
    fn test_multiple_countries() {
        let countries = vec![
            country("A", vec![square(0.0, 0.0, 10.0)]),
            country("B", vec![square(15.0, 15.0, 10.0)]),
        ];

        assert_eq!(code(decode(c(5.0, 5.0), &countries)), Some("A"));
        assert_eq!(code(decode(c(5.0, 0.0), &countries)), Some("A"));
        assert_eq!(code(decode(c(20.0, 20.0), &countries)), Some("B"));
        assert_eq!(code(decode(c(20.0, 15.0), &countries)), Some("B"));
        assert_eq!(code(decode(c(27.0, 28.0), &countries)), None);
    }

    #[test]
    fn test_overlap_resolves_to_first_in_list() {
        let a = country("A", vec![square(0.0, 0.0, 10.0)]);
        let b = country("B", vec![square(5.0, 5.0, 10.0)]);

        let ab = vec![a.clone(), b.clone()];
        let ba = vec![b, a];

        // (7,7) lies in both
        assert_eq!(code(decode(c(7.0, 7.0), &ab)), Some("A"));
        assert_eq!(code(decode(c(7.0, 7.0), &ba)), Some("B"));
        // (2,2) only in A, (12,12) only in B
        assert_eq!(code(decode(c(2.0, 2.0), &ba)), Some("A"));
        assert_eq!(code(decode(c(12.0, 12.0), &ab)), Some("B"));
    }

    #[test]
    fn test_idempotent() {
        let countries = vec![
            country("A", vec![square(0.0, 0.0, 10.0)]),
            country("B", vec![square(15.0, 15.0, 10.0)]),
        ];

        for p in [c(5.0, 5.0), c(20.0, 20.0), c(12.0, 12.0)] {
            assert_eq!(decode(p, &countries), decode(p, &countries));
        }
    }

    #[test]
    fn test_empty_inputs() {
        assert!(decode(c(0.0, 0.0), &[]).is_none());

        let degenerate = vec![
            country("X", vec![Ring::new(vec![])]),
            country("Y", vec![Ring::new(vec![c(1.0, 1.0)])]),
            country("Z", vec![Ring::new(vec![c(0.0, 0.0), c(2.0, 2.0)])]),
        ];
        for p in [c(0.0, 0.0), c(1.0, 1.0), c(2.0, 2.0)] {
            assert!(decode(p, &degenerate).is_none());
        }
    }

    #[test]
    fn test_parallel_agrees_with_sequential() {
        // Many overlapping squares so several workers find a match
        let countries: Vec<Country> = (0..64)
            .map(|i| {
                let offset = (i % 8) as f64;
                country(&format!("C{i:02}"), vec![square(offset, offset, 10.0)])
            })
            .collect();

        for lat in 0..20 {
            for lon in 0..20 {
                let p = c(lat as f64 + 0.5, lon as f64 + 0.5);
                assert_eq!(
                    ParallelRayCastDecoder.decode(p, &countries),
                    RayCastDecoder.decode(p, &countries),
                    "mismatch at {}",
                    p
                );
            }
        }
    }

    #[test]
    fn test_decoder_as_trait_object() {
        let decoders: Vec<Box<dyn GeoDecoder>> =
            vec![Box::new(RayCastDecoder), Box::new(ParallelRayCastDecoder)];
        let countries = vec![country("A", vec![square(0.0, 0.0, 10.0)])];

        for decoder in &decoders {
            assert_eq!(code(decoder.decode(c(5.0, 5.0), &countries)), Some("A"));
            assert_eq!(code(decoder.decode(c(50.0, 5.0), &countries)), None);
        }
    }
}
