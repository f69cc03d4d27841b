//! Great-circle distance and travel duration estimation
//!
//! Pure functions with no latency or credit cost of their own; the places
//! provider wraps them in its metered `directions` call.

use crate::places::Location;
use serde::{Deserialize, Serialize};

/// Earth radius in kilometers, as used by the haversine formula
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Assumed average travel speed for duration estimates
const AVERAGE_SPEED_KMH: f64 = 80.0;

/// Distance and estimated travel duration between two points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistanceEstimate {
    /// Great-circle distance in kilometers
    pub kilometers: f64,
    /// Estimated travel time in minutes at 80 km/h, rounded
    pub minutes: f64,
}

/// Haversine distance in kilometers between two lat/lng pairs (degrees)
pub fn haversine_km(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lng = (lng2 - lng1).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Distance and duration between two locations
pub fn distance(origin: &Location, destination: &Location) -> DistanceEstimate {
    let kilometers = haversine_km(
        origin.latitude,
        origin.longitude,
        destination.latitude,
        destination.longitude,
    );
    let minutes = (kilometers / AVERAGE_SPEED_KMH * 60.0).round();

    DistanceEstimate {
        kilometers,
        minutes,
    }
}
