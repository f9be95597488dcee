//! Great-circle distance math plus the presentation helpers that share it.
//!
//! Validation is deliberately permissive: out-of-range or non-finite
//! coordinates degrade to a distance of `0.0` instead of failing. Callers
//! that need to distinguish "co-located" from "unusable input" must check
//! coordinate validity separately (see `ListingLocation::has_valid_coordinates`).

use super::domain::Coordinates;
use serde::Serialize;

const EARTH_RADIUS_MILES: f64 = 3959.0;
const EARTH_RADIUS_KM: f64 = 6371.0;

const FEET_PER_MILE: f64 = 5280.0;

/// Unit selector for [`distance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DistanceUnit {
    #[default]
    Miles,
    Kilometers,
}

impl DistanceUnit {
    const fn earth_radius(self) -> f64 {
        match self {
            DistanceUnit::Miles => EARTH_RADIUS_MILES,
            DistanceUnit::Kilometers => EARTH_RADIUS_KM,
        }
    }
}

fn valid_coordinate(latitude: f64, longitude: f64) -> bool {
    latitude.is_finite()
        && longitude.is_finite()
        && latitude.abs() <= 90.0
        && longitude.abs() <= 180.0
}

/// Haversine distance between two points, in the requested unit.
///
/// Returns `0.0` when any coordinate is non-finite or out of range.
pub fn distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64, unit: DistanceUnit) -> f64 {
    if !valid_coordinate(lat1, lon1) || !valid_coordinate(lat2, lon2) {
        return 0.0;
    }

    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    unit.earth_radius() * c
}

/// Convenience wrapper over [`distance`] for coordinate pairs.
pub fn distance_between(a: &Coordinates, b: &Coordinates, unit: DistanceUnit) -> f64 {
    distance(a.latitude, a.longitude, b.latitude, b.longitude, unit)
}

/// Short human-readable form: feet below a tenth of a mile, otherwise
/// tenths of a mile.
pub fn format_distance(miles: f64) -> String {
    if miles < 0.1 {
        let feet = (miles * FEET_PER_MILE).round() as i64;
        format!("{feet} ft")
    } else {
        format!("{miles:.1} mi")
    }
}

/// Transport mode suggested for a given distance band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    Walking,
    Biking,
    Driving,
    Transit,
}

impl TransportMode {
    pub const fn label(self) -> &'static str {
        match self {
            TransportMode::Walking => "walking",
            TransportMode::Biking => "biking",
            TransportMode::Driving => "driving",
            TransportMode::Transit => "transit",
        }
    }
}

/// A mode plus a rough door-to-door estimate in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TransportSuggestion {
    pub mode: TransportMode,
    pub minutes: u32,
}

/// Map a distance in miles to a suggested mode and time estimate: walking up
/// to half a mile, biking to two, driving to ten, transit beyond.
pub fn suggest_transport(miles: f64) -> TransportSuggestion {
    let miles = miles.max(0.0);
    let (mode, minutes_per_mile) = if miles <= 0.5 {
        (TransportMode::Walking, 20.0)
    } else if miles <= 2.0 {
        (TransportMode::Biking, 6.0)
    } else if miles <= 10.0 {
        (TransportMode::Driving, 2.5)
    } else {
        (TransportMode::Transit, 3.5)
    };

    let minutes = (miles * minutes_per_mile).ceil().max(1.0) as u32;
    TransportSuggestion { mode, minutes }
}
