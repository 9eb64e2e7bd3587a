//! Proximity ranking for drop-off locations.
//!
//! Great-circle distances via the haversine formula, rounded to whole meters,
//! plus the display formatting the location cards use. Ranking is generic over
//! the candidate type so API payloads can be annotated without copying.

use serde::{Deserialize, Serialize};

/// Mean Earth radius in meters.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A WGS84 coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// Haversine great-circle distance between two points, rounded to the
/// nearest meter.
#[must_use]
pub fn distance_meters(a: GeoPoint, b: GeoPoint) -> u64 {
    let lat_a = a.lat.to_radians();
    let lat_b = b.lat.to_radians();
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lng / 2.0).sin().powi(2);
    let central = 2.0 * h.sqrt().asin();

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    {
        (EARTH_RADIUS_M * central).round() as u64
    }
}

/// Formats a distance for display: whole meters under 1 km (`"950 m"`),
/// kilometers with one decimal from 1 km up (`"2.0 km"`).
///
/// The kilometer case rounds in integer tenths to keep ties like 1950 m →
/// `"2.0 km"` exact.
#[must_use]
pub fn format_distance(meters: u64) -> String {
    if meters < 1000 {
        return format!("{meters} m");
    }
    let tenths = (meters + 50) / 100;
    format!("{}.{} km", tenths / 10, tenths % 10)
}

/// A candidate annotated with its computed distance from the reference point.
#[derive(Debug, Clone, Serialize)]
pub struct Ranked<T> {
    #[serde(flatten)]
    pub item: T,
    /// Distance in whole meters; 0 when the candidate has no coordinates.
    pub distance_m: u64,
    /// Human-readable distance, e.g. `"950 m"` or `"2.0 km"`.
    pub distance: String,
    /// False when the candidate carried no coordinates. Such candidates get
    /// the 0-distance sentinel and sort first; callers that need a meaningful
    /// order must filter on this flag.
    pub has_location: bool,
}

/// Annotates each candidate with its distance from `origin` and returns them
/// ordered by ascending distance.
///
/// `location` extracts the candidate's coordinate; candidates without one are
/// treated as co-located with the origin (distance 0) and flagged via
/// [`Ranked::has_location`].
pub fn rank_by_distance<T, F>(origin: GeoPoint, candidates: Vec<T>, location: F) -> Vec<Ranked<T>>
where
    F: Fn(&T) -> Option<GeoPoint>,
{
    let mut ranked: Vec<Ranked<T>> = candidates
        .into_iter()
        .map(|item| {
            let point = location(&item);
            let distance_m = point.map_or(0, |p| distance_meters(origin, p));
            Ranked {
                distance_m,
                distance: format_distance(distance_m),
                has_location: point.is_some(),
                item,
            }
        })
        .collect();
    ranked.sort_by_key(|r| r.distance_m);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    // Two points in central Madrid, ~1.06 km apart.
    const CALLAO: GeoPoint = GeoPoint {
        lat: 40.4194,
        lng: -3.7057,
    };
    const ANTON_MARTIN: GeoPoint = GeoPoint {
        lat: 40.4114,
        lng: -3.6988,
    };

    #[test]
    fn distance_between_madrid_points() {
        let d = distance_meters(CALLAO, ANTON_MARTIN);
        assert!(
            (1050..=1080).contains(&d),
            "expected ~1064 m between the Madrid sample points, got {d}"
        );
    }

    #[test]
    fn distance_is_symmetric() {
        assert_eq!(
            distance_meters(CALLAO, ANTON_MARTIN),
            distance_meters(ANTON_MARTIN, CALLAO)
        );
    }

    #[test]
    fn distance_to_self_is_zero() {
        assert_eq!(distance_meters(CALLAO, CALLAO), 0);
    }

    #[test]
    fn format_distance_under_a_kilometer_uses_meters() {
        assert_eq!(format_distance(0), "0 m");
        assert_eq!(format_distance(470), "470 m");
        assert_eq!(format_distance(950), "950 m");
        assert_eq!(format_distance(999), "999 m");
    }

    #[test]
    fn format_distance_kilometers_one_decimal() {
        assert_eq!(format_distance(1000), "1.0 km");
        assert_eq!(format_distance(1049), "1.0 km");
        assert_eq!(format_distance(1950), "2.0 km");
        assert_eq!(format_distance(12_720), "12.7 km");
    }

    #[derive(Debug, Clone, serde::Serialize)]
    struct Candidate {
        name: &'static str,
        #[serde(skip)]
        point: Option<GeoPoint>,
    }

    fn candidate(name: &'static str, lat: f64, lng: f64) -> Candidate {
        Candidate {
            name,
            point: Some(GeoPoint { lat, lng }),
        }
    }

    #[test]
    fn rank_by_distance_orders_ascending() {
        let origin = GeoPoint {
            lat: 40.4167,
            lng: -3.7003,
        };
        let candidates = vec![
            candidate("far", 40.4846, -3.6851),
            candidate("near", 40.4186, -3.6926),
            candidate("mid", 40.4380, -3.6795),
            candidate("nearest", 40.4169, -3.7000),
            candidate("farther", 40.5000, -3.9000),
        ];

        let ranked = rank_by_distance(origin, candidates, |c| c.point);

        assert_eq!(ranked[0].item.name, "nearest");
        for pair in ranked.windows(2) {
            assert!(
                pair[0].distance_m <= pair[1].distance_m,
                "distances must be non-decreasing: {} then {}",
                pair[0].distance_m,
                pair[1].distance_m
            );
        }
    }

    #[test]
    fn rank_by_distance_missing_coordinates_sentinel() {
        let origin = GeoPoint {
            lat: 40.4167,
            lng: -3.7003,
        };
        let candidates = vec![
            candidate("located", 40.4846, -3.6851),
            Candidate {
                name: "unlocated",
                point: None,
            },
        ];

        let ranked = rank_by_distance(origin, candidates, |c| c.point);

        let unlocated = ranked
            .iter()
            .find(|r| r.item.name == "unlocated")
            .expect("unlocated candidate present");
        assert_eq!(unlocated.distance_m, 0);
        assert_eq!(unlocated.distance, "0 m");
        assert!(!unlocated.has_location);
    }

    #[test]
    fn ranked_serializes_flattened_with_annotations() {
        let origin = GeoPoint { lat: 0.0, lng: 0.0 };
        let ranked = rank_by_distance(origin, vec![candidate("only", 0.0, 0.0)], |c| c.point);
        let json = serde_json::to_value(&ranked[0]).expect("serialize");
        assert_eq!(json["name"], "only");
        assert_eq!(json["distance_m"], 0);
        assert_eq!(json["distance"], "0 m");
        assert_eq!(json["has_location"], true);
    }
}
