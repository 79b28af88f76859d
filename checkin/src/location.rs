//! Coordinate validation and geofence evaluation.
//!
//! A pair is usable only when both values are finite, inside the usual degree ranges and
//! not exactly `(0, 0)`. Browsers and the upstream forms report "no GPS fix" as zeroes,
//! so that point is treated as missing rather than as a real position in the Gulf of Guinea.
//! Accepted values are rounded to six decimals (about 11 cm) before anything compares or
//! stores them.

use crate::geo;
use crate::types::Coordinates;

/// Decimal places kept for every accepted coordinate.
pub const COORDINATE_DECIMALS: i32 = 6;

/// Rounds a coordinate to [`COORDINATE_DECIMALS`] places.
pub fn round_coordinate(value: f64) -> f64 {
    let factor = 10f64.powi(COORDINATE_DECIMALS);
    (value * factor).round() / factor
}

/// Returns `true` if the pair is a usable position.
pub fn is_valid(latitude: f64, longitude: f64) -> bool {
    normalize(latitude, longitude).is_some()
}

/// Validates a pair and returns it rounded, or `None` if it is not a usable position.
pub fn normalize(latitude: f64, longitude: f64) -> Option<Coordinates> {
    if !latitude.is_finite() || !longitude.is_finite() {
        return None;
    }
    if latitude.abs() > 90.0 || longitude.abs() > 180.0 {
        return None;
    }

    let latitude = round_coordinate(latitude);
    let longitude = round_coordinate(longitude);
    if latitude == 0.0 && longitude == 0.0 {
        return None;
    }

    Some(Coordinates {
        latitude,
        longitude,
    })
}

/// Resolves a session anchor. Missing halves or an invalid pair disable geofencing.
pub fn anchor(latitude: Option<f64>, longitude: Option<f64>) -> Option<Coordinates> {
    match (latitude, longitude) {
        (Some(lat), Some(lon)) => normalize(lat, lon),
        _ => None,
    }
}

/// Outcome of comparing a submission against a session anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Geofence {
    /// The session has no usable anchor; location is not enforced.
    Disabled,
    /// The session has an anchor but the submission is not a usable position.
    InvalidSubmission,
    /// Both positions are usable and the distance was measured.
    Measured {
        distance_meters: f64,
        radius_meters: i32,
    },
}

impl Geofence {
    /// Compares `submitted` against `anchor` using `radius_meters` as the allowed distance.
    pub fn evaluate(
        anchor: Option<Coordinates>,
        submitted: Option<Coordinates>,
        radius_meters: i32,
    ) -> Self {
        let Some(anchor) = anchor else {
            return Geofence::Disabled;
        };
        let Some(submitted) = submitted else {
            return Geofence::InvalidSubmission;
        };

        let distance_meters = geo::distance_meters(
            submitted.latitude,
            submitted.longitude,
            anchor.latitude,
            anchor.longitude,
        );

        Geofence::Measured {
            distance_meters,
            radius_meters,
        }
    }

    /// Distance to record on the check-in. Zero when nothing was measured.
    pub fn distance_meters(&self) -> f64 {
        match self {
            Geofence::Measured {
                distance_meters, ..
            } => *distance_meters,
            _ => 0.0,
        }
    }

    pub fn out_of_range(&self) -> bool {
        match self {
            Geofence::Measured {
                distance_meters,
                radius_meters,
            } => *distance_meters > f64::from(*radius_meters),
            _ => false,
        }
    }

    pub fn invalid_location(&self) -> bool {
        matches!(self, Geofence::InvalidSubmission)
    }
}
