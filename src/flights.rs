//! Simulated flight-availability provider
//!
//! Offers are synthesized per search from an integer seed built out of the
//! airport codes and the day of month. Pricing uses the "distance" between
//! the codes' character sums, scaled by cabin class, so a given route and
//! date always quotes the same flights.

use crate::credits::CreditMeter;
use crate::CabinClass;
use chrono::{Datelike, NaiveDate, NaiveDateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, warn};

/// An airport drawn from the static reference table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Airport {
    /// Three-letter IATA code
    pub code: &'static str,
    pub name: &'static str,
    pub city: &'static str,
    pub country: &'static str,
}

/// An airline drawn from the static reference table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Airline {
    pub code: &'static str,
    pub name: &'static str,
    pub logo: &'static str,
}

/// Fixed airport reference table
pub static AIRPORTS: [Airport; 8] = [
    Airport { code: "JFK", name: "John F. Kennedy International Airport", city: "New York", country: "USA" },
    Airport { code: "LHR", name: "Heathrow Airport", city: "London", country: "UK" },
    Airport { code: "CDG", name: "Charles de Gaulle Airport", city: "Paris", country: "France" },
    Airport { code: "HND", name: "Haneda Airport", city: "Tokyo", country: "Japan" },
    Airport { code: "SIN", name: "Changi Airport", city: "Singapore", country: "Singapore" },
    Airport { code: "SYD", name: "Sydney Airport", city: "Sydney", country: "Australia" },
    Airport { code: "DXB", name: "Dubai International Airport", city: "Dubai", country: "UAE" },
    Airport { code: "FCO", name: "Leonardo da Vinci International Airport", city: "Rome", country: "Italy" },
];

/// Fixed airline reference table
pub static AIRLINES: [Airline; 8] = [
    Airline { code: "BA", name: "British Airways", logo: "ba-logo.png" },
    Airline { code: "AF", name: "Air France", logo: "af-logo.png" },
    Airline { code: "LH", name: "Lufthansa", logo: "lh-logo.png" },
    Airline { code: "AA", name: "American Airlines", logo: "aa-logo.png" },
    Airline { code: "DL", name: "Delta Air Lines", logo: "dl-logo.png" },
    Airline { code: "EK", name: "Emirates", logo: "ek-logo.png" },
    Airline { code: "SQ", name: "Singapore Airlines", logo: "sq-logo.png" },
    Airline { code: "QF", name: "Qantas", logo: "qf-logo.png" },
];

const AIRPORT_SEARCH_LATENCY: Duration = Duration::from_millis(200);
const FLIGHT_SEARCH_LATENCY: Duration = Duration::from_millis(800);
const DETAILS_LATENCY: Duration = Duration::from_millis(300);
const BOOKING_LATENCY: Duration = Duration::from_millis(1000);

const AIRPORT_SEARCH_COST: u32 = 1;
const FLIGHT_SEARCH_COST: u32 = 5;
const DETAILS_COST: u32 = 2;
const BOOKING_COST: u32 = 10;

/// Free credits granted to the flight provider at startup
pub const FLIGHTS_CREDIT_CAP: u32 = 100;

/// Offers returned per search
const OFFERS_PER_SEARCH: usize = 5;

const MIN_DURATION_MINUTES: i64 = 60;
const MAX_DURATION_MINUTES: i64 = 720;

/// One leg of a synthesized flight
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlightSegment {
    pub departure_airport: Airport,
    pub arrival_airport: Airport,
    pub departure_time: NaiveDateTime,
    pub arrival_time: NaiveDateTime,
    pub flight_number: String,
    pub duration_minutes: u32,
    pub airline: Airline,
}

/// Amount and currency of a quoted fare
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    pub amount: u32,
    pub currency: String,
}

/// A synthesized flight offer; created fresh per search, never persisted
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Flight {
    pub id: String,
    pub segments: Vec<FlightSegment>,
    pub price: Price,
    pub seats_available: u32,
    pub cabin_class: CabinClass,
}

/// Flight search parameters as supplied by the consumer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightSearchParams {
    /// Airport code or city name
    pub origin: String,
    /// Airport code or city name
    pub destination: String,
    /// Departure date, YYYY-MM-DD
    pub departure_date: String,
    pub return_date: Option<String>,
    pub passengers: u32,
    pub cabin_class: CabinClass,
}

/// A passenger on a booking request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Passenger {
    pub first_name: String,
    pub last_name: String,
}

/// Result of a booking call; always successful in this simulation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingConfirmation {
    pub booking_id: String,
    pub success: bool,
    pub message: String,
}

/// Synthesize `count` flight offers for a route and date.
///
/// Deterministic: the seed is `(first char of origin code + first char of
/// destination code) * day of month`, and every per-offer attribute is a
/// modular slice of it. When `forced_id` is given the single generated
/// offer carries that id instead of the derived one.
pub fn generate_flights(
    origin: &Airport,
    destination: &Airport,
    date: NaiveDate,
    cabin_class: CabinClass,
    count: usize,
    forced_id: Option<&str>,
) -> Vec<Flight> {
    let origin_bytes = origin.code.as_bytes();
    let destination_bytes = destination.code.as_bytes();
    let seed = (i64::from(origin_bytes[0]) + i64::from(destination_bytes[0]))
        * i64::from(date.day());

    // "Distance" between the routes' code character sums drives duration
    // and price
    let origin_sum: i64 = origin_bytes.iter().map(|&b| i64::from(b)).sum();
    let destination_sum: i64 = destination_bytes.iter().map(|&b| i64::from(b)).sum();
    let raw_distance = (origin_sum - destination_sum).abs();

    let mut flights = Vec::with_capacity(count);
    for index in 0..count as i64 {
        let id = match forced_id {
            Some(forced) => forced.to_string(),
            None => format!(
                "{}-{}-{}-{}",
                origin.code,
                destination.code,
                date.day(),
                index
            ),
        };

        let airline = AIRLINES[((seed + index).abs() % AIRLINES.len() as i64) as usize];

        // Departures land between 06:00 and 20:59 local time
        let hour = 6 + (seed + index * 3).abs() % 15;
        let minute = (seed + index * 7).abs() % 60;
        let departure_time = date
            .and_hms_opt(hour as u32, minute as u32, 0)
            .unwrap_or_default();

        let duration_minutes = (raw_distance * 3 + seed % 120)
            .clamp(MIN_DURATION_MINUTES, MAX_DURATION_MINUTES);
        let arrival_time = departure_time + TimeDelta::minutes(duration_minutes);

        let base_price = raw_distance as f64 * 0.5 * cabin_class.price_multiplier();
        let random_factor = 0.8 + ((seed + index) % 40) as f64 / 100.0;
        let amount = (base_price * random_factor).round() as u32 * 10;

        let flight_number = format!("{}{}", airline.code, 100 + (seed + index).abs() % 900);
        let seats_available = ((seed + index * 5).abs() % 50 + 1) as u32;

        flights.push(Flight {
            id,
            segments: vec![FlightSegment {
                departure_airport: *origin,
                arrival_airport: *destination,
                departure_time,
                arrival_time,
                flight_number,
                duration_minutes: duration_minutes as u32,
                airline,
            }],
            price: Price {
                amount,
                currency: "USD".to_string(),
            },
            seats_available,
            cabin_class,
        });
    }

    flights
}

fn resolve_airport(identifier: &str) -> Option<&'static Airport> {
    AIRPORTS
        .iter()
        .find(|airport| airport.code == identifier || airport.city.eq_ignore_ascii_case(identifier))
}

fn to_base36_upper(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

/// Simulated flight-availability search client
#[derive(Debug)]
pub struct FlightClient {
    credits: CreditMeter,
}

impl Default for FlightClient {
    fn default() -> Self {
        Self::new()
    }
}

impl FlightClient {
    pub fn new() -> Self {
        Self {
            credits: CreditMeter::new("flights", FLIGHTS_CREDIT_CAP),
        }
    }

    /// Search airports by code, name, city or country substring
    pub async fn search_airports(&self, query: &str) -> Vec<Airport> {
        sleep(AIRPORT_SEARCH_LATENCY).await;
        self.credits.deduct(AIRPORT_SEARCH_COST);

        if query.is_empty() {
            return Vec::new();
        }

        let needle = query.to_lowercase();
        AIRPORTS
            .iter()
            .filter(|airport| {
                airport.code.to_lowercase().contains(&needle)
                    || airport.name.to_lowercase().contains(&needle)
                    || airport.city.to_lowercase().contains(&needle)
                    || airport.country.to_lowercase().contains(&needle)
            })
            .copied()
            .collect()
    }

    /// Search flight offers for the given parameters.
    ///
    /// Origin and destination resolve by exact airport code or
    /// case-insensitive city name. An unresolvable endpoint or an
    /// unparseable date yields an empty result, but the search cost is
    /// charged either way.
    pub async fn search_flights(&self, params: &FlightSearchParams) -> Vec<Flight> {
        sleep(FLIGHT_SEARCH_LATENCY).await;
        self.credits.deduct(FLIGHT_SEARCH_COST);

        let (Some(origin), Some(destination)) = (
            resolve_airport(&params.origin),
            resolve_airport(&params.destination),
        ) else {
            warn!(
                origin = %params.origin,
                destination = %params.destination,
                "unresolvable airport in search"
            );
            return Vec::new();
        };

        let Ok(date) = NaiveDate::parse_from_str(&params.departure_date, "%Y-%m-%d") else {
            warn!(date = %params.departure_date, "unparseable departure date");
            return Vec::new();
        };

        let flights = generate_flights(
            origin,
            destination,
            date,
            params.cabin_class,
            OFFERS_PER_SEARCH,
            None,
        );
        info!(
            origin = origin.code,
            destination = destination.code,
            date = %date,
            offers = flights.len(),
            "flight search completed"
        );
        flights
    }

    /// Re-derive a single flight from its id (`ORG-DST-day-index`).
    ///
    /// Unknown airport codes or a malformed id yield `None`. The day part
    /// selects the day of the current month; out-of-range days fall back to
    /// today, as does a day of zero.
    pub async fn flight_details(&self, flight_id: &str) -> Option<Flight> {
        sleep(DETAILS_LATENCY).await;
        self.credits.deduct(DETAILS_COST);

        let parts: Vec<&str> = flight_id.split('-').collect();
        if parts.len() < 3 {
            return None;
        }

        let origin = AIRPORTS.iter().find(|airport| airport.code == parts[0])?;
        let destination = AIRPORTS.iter().find(|airport| airport.code == parts[1])?;

        let today = Utc::now().date_naive();
        let date = parts[2]
            .parse::<u32>()
            .ok()
            .filter(|&day| day > 0)
            .and_then(|day| today.with_day(day))
            .unwrap_or(today);

        let flights = generate_flights(
            origin,
            destination,
            date,
            CabinClass::Economy,
            1,
            Some(flight_id),
        );
        debug!(flight_id, found = !flights.is_empty(), "flight details lookup");
        flights.into_iter().next()
    }

    /// Book a flight.
    ///
    /// The simulation performs no validation of the flight id or passenger
    /// list and always confirms with a fresh booking identifier.
    pub async fn book_flight(
        &self,
        flight_id: &str,
        passengers: &[Passenger],
    ) -> BookingConfirmation {
        sleep(BOOKING_LATENCY).await;
        self.credits.deduct(BOOKING_COST);

        let booking_id = format!(
            "BK-{}",
            to_base36_upper(Utc::now().timestamp_millis().unsigned_abs())
        );
        info!(flight_id, passengers = passengers.len(), booking_id = %booking_id, "flight booked");

        BookingConfirmation {
            booking_id,
            success: true,
            message: "Flight booked successfully!".to_string(),
        }
    }

    /// Remaining credit balance; free to read
    pub fn credit_balance(&self) -> u32 {
        self.credits.balance()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn airport(code: &str) -> &'static Airport {
        AIRPORTS.iter().find(|a| a.code == code).unwrap()
    }

    #[test]
    fn test_generation_is_deterministic() {
        let date = NaiveDate::from_ymd_opt(2025, 2, 3).unwrap();
        let first = generate_flights(airport("JFK"), airport("HND"), date, CabinClass::Economy, 5, None);
        let second = generate_flights(airport("JFK"), airport("HND"), date, CabinClass::Economy, 5, None);
        assert_eq!(first, second);
    }

    #[test]
    fn test_durations_stay_within_bounds() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 28).unwrap();
        for origin in &AIRPORTS {
            for destination in &AIRPORTS {
                if origin.code == destination.code {
                    continue;
                }
                for flight in generate_flights(origin, destination, date, CabinClass::Business, 5, None) {
                    let duration = flight.segments[0].duration_minutes;
                    assert!((60..=720).contains(&duration), "duration {}", duration);
                }
            }
        }
    }

    #[test]
    fn test_arrival_follows_departure_by_duration() {
        let date = NaiveDate::from_ymd_opt(2025, 2, 3).unwrap();
        for flight in generate_flights(airport("LHR"), airport("SIN"), date, CabinClass::Economy, 5, None) {
            let segment = &flight.segments[0];
            let elapsed = segment.arrival_time - segment.departure_time;
            assert_eq!(elapsed.num_minutes(), i64::from(segment.duration_minutes));
            assert!(segment.departure_time.time().hour() >= 6);
        }
    }

    #[test]
    fn test_seats_and_prices_are_positive() {
        let date = NaiveDate::from_ymd_opt(2025, 11, 15).unwrap();
        for flight in generate_flights(airport("CDG"), airport("DXB"), date, CabinClass::First, 5, None) {
            assert!(flight.seats_available >= 1);
            assert!(flight.seats_available <= 50);
            assert_eq!(flight.price.currency, "USD");
            assert_eq!(flight.price.amount % 10, 0);
        }
    }

    #[test]
    fn test_cabin_class_scales_price() {
        let date = NaiveDate::from_ymd_opt(2025, 2, 3).unwrap();
        let economy = generate_flights(airport("JFK"), airport("SYD"), date, CabinClass::Economy, 1, None);
        let first = generate_flights(airport("JFK"), airport("SYD"), date, CabinClass::First, 1, None);
        assert!(first[0].price.amount > economy[0].price.amount);
    }

    #[test]
    fn test_forced_id_overrides_derived_id() {
        let date = NaiveDate::from_ymd_opt(2025, 2, 3).unwrap();
        let flights = generate_flights(
            airport("JFK"),
            airport("HND"),
            date,
            CabinClass::Economy,
            1,
            Some("JFK-HND-3-0"),
        );
        assert_eq!(flights.len(), 1);
        assert_eq!(flights[0].id, "JFK-HND-3-0");
    }

    #[test]
    fn test_base36_encoding() {
        assert_eq!(to_base36_upper(0), "0");
        assert_eq!(to_base36_upper(35), "Z");
        assert_eq!(to_base36_upper(36), "10");
        assert_eq!(to_base36_upper(1295), "ZZ");
    }

    #[tokio::test(start_paused = true)]
    async fn test_airport_search_matches_city() {
        let client = FlightClient::new();
        let results = client.search_airports("tokyo").await;
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].code, "HND");

        let empty = client.search_airports("").await;
        assert!(empty.is_empty());
        // Both calls charged
        assert_eq!(client.credit_balance(), FLIGHTS_CREDIT_CAP - 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_search_resolves_city_names() {
        let client = FlightClient::new();
        let params = FlightSearchParams {
            origin: "new york".to_string(),
            destination: "London".to_string(),
            departure_date: "2025-03-14".to_string(),
            return_date: None,
            passengers: 2,
            cabin_class: CabinClass::PremiumEconomy,
        };

        let flights = client.search_flights(&params).await;
        assert_eq!(flights.len(), 5);
        assert_eq!(flights[0].segments[0].departure_airport.code, "JFK");
        assert_eq!(flights[0].segments[0].arrival_airport.code, "LHR");
    }

    #[tokio::test(start_paused = true)]
    async fn test_unknown_destination_returns_empty_but_charges() {
        let client = FlightClient::new();
        let params = FlightSearchParams {
            origin: "JFK".to_string(),
            destination: "Nowhere".to_string(),
            departure_date: "2025-03-14".to_string(),
            return_date: None,
            passengers: 1,
            cabin_class: CabinClass::Economy,
        };

        let flights = client.search_flights(&params).await;
        assert!(flights.is_empty());
        assert_eq!(client.credit_balance(), FLIGHTS_CREDIT_CAP - 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_bad_date_returns_empty_but_charges() {
        let client = FlightClient::new();
        let params = FlightSearchParams {
            origin: "JFK".to_string(),
            destination: "HND".to_string(),
            departure_date: "not-a-date".to_string(),
            return_date: None,
            passengers: 1,
            cabin_class: CabinClass::Economy,
        };

        assert!(client.search_flights(&params).await.is_empty());
        assert_eq!(client.credit_balance(), FLIGHTS_CREDIT_CAP - 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_flight_details_regenerates_single_offer() {
        let client = FlightClient::new();

        let flight = client.flight_details("JFK-HND-3-0").await;
        assert!(flight.is_some());
        assert_eq!(flight.unwrap().id, "JFK-HND-3-0");

        assert!(client.flight_details("garbage").await.is_none());
        assert!(client.flight_details("XXX-HND-3-0").await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_booking_always_succeeds() {
        let client = FlightClient::new();
        let passengers = vec![Passenger {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
        }];

        let confirmation = client.book_flight("JFK-HND-3-0", &passengers).await;
        assert!(confirmation.success);
        assert!(confirmation.booking_id.starts_with("BK-"));
        assert_eq!(client.credit_balance(), FLIGHTS_CREDIT_CAP - 10);

        // Even a nonsense id books fine; the mock does not validate
        let confirmation = client.book_flight("no-such-flight", &[]).await;
        assert!(confirmation.success);
    }
}
