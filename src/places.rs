//! Simulated place directory provider
//!
//! Mimics a paid geocoding/places API: substring search over a fixed table
//! of well-known destinations, id lookup, and a directions call backed by
//! the haversine estimate in [`crate::geo`]. Every call sleeps for the
//! provider's advertised latency and consumes credits, even when it finds
//! nothing.

use crate::credits::CreditMeter;
use crate::geo::{self, DistanceEstimate};
use serde::Serialize;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info};

/// A named place drawn from the static directory table
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Location {
    pub id: &'static str,
    pub name: &'static str,
    pub latitude: f64,
    pub longitude: f64,
    pub formatted_address: &'static str,
    pub country: &'static str,
}

/// Fixed directory of searchable places
pub static LOCATIONS: [Location; 5] = [
    Location {
        id: "paris-france",
        name: "Paris",
        latitude: 48.8566,
        longitude: 2.3522,
        formatted_address: "Paris, France",
        country: "France",
    },
    Location {
        id: "tokyo-japan",
        name: "Tokyo",
        latitude: 35.6762,
        longitude: 139.6503,
        formatted_address: "Tokyo, Japan",
        country: "Japan",
    },
    Location {
        id: "new-york-usa",
        name: "New York City",
        latitude: 40.7128,
        longitude: -74.0060,
        formatted_address: "New York, NY, USA",
        country: "United States",
    },
    Location {
        id: "bali-indonesia",
        name: "Bali",
        latitude: -8.3405,
        longitude: 115.0920,
        formatted_address: "Bali, Indonesia",
        country: "Indonesia",
    },
    Location {
        id: "rome-italy",
        name: "Rome",
        latitude: 41.9028,
        longitude: 12.4964,
        formatted_address: "Rome, Italy",
        country: "Italy",
    },
];

const SEARCH_LATENCY: Duration = Duration::from_millis(300);
const DETAILS_LATENCY: Duration = Duration::from_millis(200);
const DIRECTIONS_LATENCY: Duration = Duration::from_millis(500);

const SEARCH_COST: u32 = 1;
const DETAILS_COST: u32 = 2;
const DIRECTIONS_COST: u32 = 10;

/// Free credits granted to the place directory at startup
pub const PLACES_CREDIT_CAP: u32 = 200;

/// Simulated place directory client
#[derive(Debug)]
pub struct PlacesClient {
    credits: CreditMeter,
}

impl Default for PlacesClient {
    fn default() -> Self {
        Self::new()
    }
}

impl PlacesClient {
    pub fn new() -> Self {
        Self {
            credits: CreditMeter::new("places", PLACES_CREDIT_CAP),
        }
    }

    /// Search the directory for places matching `query`.
    ///
    /// Matches case-insensitively against name or country, preserving table
    /// order. An empty query returns no results. The call is charged even
    /// when nothing matches.
    pub async fn search(&self, query: &str) -> Vec<Location> {
        sleep(SEARCH_LATENCY).await;
        self.credits.deduct(SEARCH_COST);

        if query.is_empty() {
            return Vec::new();
        }

        let needle = query.to_lowercase();
        let results: Vec<Location> = LOCATIONS
            .iter()
            .filter(|location| {
                location.name.to_lowercase().contains(&needle)
                    || location.country.to_lowercase().contains(&needle)
            })
            .copied()
            .collect();

        info!(query, matches = results.len(), "place search completed");
        results
    }

    /// Look up a place by its directory id
    pub async fn location_details(&self, location_id: &str) -> Option<Location> {
        sleep(DETAILS_LATENCY).await;
        self.credits.deduct(DETAILS_COST);

        let result = LOCATIONS
            .iter()
            .find(|location| location.id == location_id)
            .copied();
        debug!(location_id, found = result.is_some(), "location details lookup");
        result
    }

    /// Distance and estimated travel duration between two places
    pub async fn directions(
        &self,
        origin: &Location,
        destination: &Location,
    ) -> DistanceEstimate {
        sleep(DIRECTIONS_LATENCY).await;
        self.credits.deduct(DIRECTIONS_COST);

        let estimate = geo::distance(origin, destination);
        info!(
            from = origin.id,
            to = destination.id,
            kilometers = estimate.kilometers,
            "directions computed"
        );
        estimate
    }

    /// Remaining credit balance; free to read
    pub fn credit_balance(&self) -> u32 {
        self.credits.balance()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_search_tokyo_returns_single_match() {
        let client = PlacesClient::new();
        let results = client.search("tokyo").await;

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Tokyo");
        assert_eq!(results[0].country, "Japan");
    }

    #[tokio::test(start_paused = true)]
    async fn test_search_matches_country_substring() {
        let client = PlacesClient::new();
        let results = client.search("ital").await;

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Rome");
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_query_returns_nothing_but_still_charges() {
        let client = PlacesClient::new();
        let before = client.credit_balance();

        let results = client.search("").await;
        assert!(results.is_empty());
        assert_eq!(client.credit_balance(), before - 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_search_preserves_table_order() {
        let client = PlacesClient::new();
        // every name or country contains an "a", so the whole table matches
        let results = client.search("a").await;
        let names: Vec<&str> = results.iter().map(|l| l.name).collect();

        assert_eq!(names, vec!["Paris", "Tokyo", "New York City", "Bali", "Rome"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_location_details_by_id() {
        let client = PlacesClient::new();

        let found = client.location_details("bali-indonesia").await;
        assert_eq!(found.map(|l| l.name), Some("Bali"));

        let missing = client.location_details("atlantis").await;
        assert!(missing.is_none());
        // Both lookups charged 2 credits each
        assert_eq!(client.credit_balance(), PLACES_CREDIT_CAP - 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_directions_charges_ten_credits() {
        let client = PlacesClient::new();
        let estimate = client.directions(&LOCATIONS[0], &LOCATIONS[1]).await;

        assert!(estimate.kilometers > 0.0);
        assert_eq!(client.credit_balance(), PLACES_CREDIT_CAP - 10);
    }
}
