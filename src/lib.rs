//! # Travel Mock API
//!
//! A set of simulated travel data providers with the same async contract as
//! their real paid counterparts: a place directory, a weather oracle, and a
//! flight-availability search. Each call pays a fixed simulated latency and
//! consumes credits from a per-provider quota.
//!
//! All synthesized data is deterministic: the generators derive a numeric
//! seed from the call arguments (trigonometric seeding, no RNG), so the same
//! query always returns the same result. Reproducibility is part of the
//! contract, not an implementation detail.

pub mod credits;
pub mod flights;
pub mod geo;
pub mod places;
pub mod weather;

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

// Re-export main types for convenience
pub use credits::CreditMeter;
pub use flights::{
    Airline, Airport, BookingConfirmation, Flight, FlightClient, FlightSearchParams,
    FlightSegment, Passenger, Price,
};
pub use geo::DistanceEstimate;
pub use places::{Location, PlacesClient};
pub use weather::{
    ForecastDay, TimeOfDay, WeatherClient, WeatherCondition, WeatherObservation,
};

/// Error types for the travel mock API
#[derive(Error, Debug)]
pub enum TravelApiError {
    #[error("Invalid cabin class: {0}")]
    CabinClassParseError(String),
}

/// Fare tier affecting synthesized flight prices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CabinClass {
    Economy,
    PremiumEconomy,
    Business,
    First,
}

impl CabinClass {
    /// Price multiplier applied on top of the distance-derived base fare
    pub fn price_multiplier(&self) -> f64 {
        match self {
            CabinClass::Economy => 1.0,
            CabinClass::PremiumEconomy => 1.5,
            CabinClass::Business => 2.5,
            CabinClass::First => 4.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CabinClass::Economy => "economy",
            CabinClass::PremiumEconomy => "premium_economy",
            CabinClass::Business => "business",
            CabinClass::First => "first",
        }
    }
}

impl FromStr for CabinClass {
    type Err = TravelApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "economy" => Ok(CabinClass::Economy),
            "premium-economy" | "premium_economy" => Ok(CabinClass::PremiumEconomy),
            "business" => Ok(CabinClass::Business),
            "first" => Ok(CabinClass::First),
            _ => Err(TravelApiError::CabinClassParseError(s.to_string())),
        }
    }
}
