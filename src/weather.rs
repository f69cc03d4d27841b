//! Simulated weather oracle provider
//!
//! Observations are synthesized from a trigonometric seed derived from the
//! coordinates and day offset, so identical queries always produce
//! identical weather. The real-valued seed is floored before every modulo
//! so that reimplementations stay bit-for-bit reproducible.

use crate::credits::CreditMeter;
use chrono::{Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info};

const CURRENT_LATENCY: Duration = Duration::from_millis(300);
const FORECAST_LATENCY: Duration = Duration::from_millis(500);
const ALERTS_LATENCY: Duration = Duration::from_millis(200);

const CURRENT_COST: u32 = 1;
const ALERTS_COST: u32 = 3;

/// Free credits granted to the weather provider at startup
pub const WEATHER_CREDIT_CAP: u32 = 50;

/// Fixed alert texts; one is emitted when the alert seed lines up
const ALERT_TYPES: [&str; 5] = [
    "Heavy rain expected in the next 24 hours",
    "High winds advisory for your destination",
    "Unusually high temperatures expected",
    "Air quality alert in effect",
    "Thunderstorms possible during your stay",
];

/// Whether an observation describes daytime or nighttime conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Day,
    Night,
}

/// Sky condition bucket, with a fixed description and icon key each
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherCondition {
    Clear,
    Clouds,
    Rain,
    Thunderstorm,
}

impl WeatherCondition {
    pub fn id(&self) -> &'static str {
        match self {
            WeatherCondition::Clear => "clear",
            WeatherCondition::Clouds => "clouds",
            WeatherCondition::Rain => "rain",
            WeatherCondition::Thunderstorm => "thunderstorm",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            WeatherCondition::Clear => "Clear sky",
            WeatherCondition::Clouds => "Scattered clouds",
            WeatherCondition::Rain => "Light rain",
            WeatherCondition::Thunderstorm => "Thunderstorm",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            WeatherCondition::Clear => "sun",
            WeatherCondition::Clouds => "cloud",
            WeatherCondition::Rain => "cloud-rain",
            WeatherCondition::Thunderstorm => "cloud-lightning",
        }
    }
}

/// Icon key for an arbitrary condition text, matched by substring
pub fn icon_for(condition: &str) -> &'static str {
    let condition = condition.to_lowercase();
    let map = [
        ("clear", "sun"),
        ("clouds", "cloud"),
        ("rain", "cloud-rain"),
        ("drizzle", "cloud-drizzle"),
        ("thunderstorm", "cloud-lightning"),
        ("snow", "cloud-snow"),
        ("mist", "cloud-fog"),
        ("fog", "cloud-fog"),
    ];

    for (key, icon) in map {
        if condition.contains(key) {
            return icon;
        }
    }

    "help-circle"
}

/// A single synthesized weather observation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherObservation {
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: u8,
    pub pressure_hpa: u16,
    pub wind_speed_kmh: f64,
    pub condition: WeatherCondition,
}

/// One forecast day with separate day and night observations
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub day: WeatherObservation,
    pub night: WeatherObservation,
}

/// Floored floating-point modulo, the seeding convention used throughout
fn seed_mod(seed: f64, modulus: f64) -> f64 {
    seed.floor() % modulus
}

/// Synthesize a weather observation for the given coordinates.
///
/// Pure and deterministic: the only inputs are the arguments. Temperature
/// falls off with latitude (faster in the northern hemisphere), nights run
/// 8 degrees colder, and everything else is derived from the seed.
pub fn generate_observation(
    lat: f64,
    lng: f64,
    day_offset: u32,
    time_of_day: TimeOfDay,
) -> WeatherObservation {
    let seed = ((lat + lng + f64::from(day_offset)).sin() + 1.0) * 5000.0;

    let lat_effect = if lat > 0.0 {
        40.0 - lat.abs() * 0.5
    } else {
        30.0 - lat.abs() * 0.3
    };

    let base_temp = match time_of_day {
        TimeOfDay::Day => lat_effect,
        TimeOfDay::Night => lat_effect - 8.0,
    };
    let temperature_c = base_temp + seed_mod(seed, 10.0) - 5.0;

    let condition_seed = seed_mod(seed.abs(), 100.0);
    let condition = if condition_seed < 60.0 {
        WeatherCondition::Clear
    } else if condition_seed < 80.0 {
        WeatherCondition::Clouds
    } else if condition_seed < 95.0 {
        WeatherCondition::Rain
    } else {
        WeatherCondition::Thunderstorm
    };

    WeatherObservation {
        temperature_c,
        feels_like_c: temperature_c - 2.0 + seed_mod(seed, 4.0),
        humidity_pct: (40.0 + seed_mod(seed, 40.0)) as u8,
        pressure_hpa: (1000.0 + seed_mod(seed, 30.0)) as u16,
        wind_speed_kmh: 2.0 + seed_mod(seed, 20.0) / 2.0,
        condition,
    }
}

/// Simulated weather oracle client
#[derive(Debug)]
pub struct WeatherClient {
    credits: CreditMeter,
}

impl Default for WeatherClient {
    fn default() -> Self {
        Self::new()
    }
}

impl WeatherClient {
    pub fn new() -> Self {
        Self {
            credits: CreditMeter::new("weather", WEATHER_CREDIT_CAP),
        }
    }

    /// Current daytime weather at the given coordinates
    pub async fn current(&self, lat: f64, lng: f64) -> WeatherObservation {
        sleep(CURRENT_LATENCY).await;
        self.credits.deduct(CURRENT_COST);

        let observation = generate_observation(lat, lng, 0, TimeOfDay::Day);
        debug!(lat, lng, condition = observation.condition.id(), "current weather");
        observation
    }

    /// Day-by-day forecast starting today; costs one credit per day
    pub async fn forecast(&self, lat: f64, lng: f64, days: u32) -> Vec<ForecastDay> {
        sleep(FORECAST_LATENCY).await;
        self.credits.deduct(days);

        let today = Utc::now().date_naive();
        let forecast: Vec<ForecastDay> = (0..days)
            .map(|offset| ForecastDay {
                date: today
                    .checked_add_days(Days::new(u64::from(offset)))
                    .unwrap_or(today),
                day: generate_observation(lat, lng, offset, TimeOfDay::Day),
                night: generate_observation(lat, lng, offset, TimeOfDay::Night),
            })
            .collect();

        info!(lat, lng, days, "forecast generated");
        forecast
    }

    /// Severe weather alerts, present for roughly one location in seven.
    ///
    /// Charged whether or not an alert fires.
    pub async fn alerts(&self, lat: f64, lng: f64) -> Vec<String> {
        sleep(ALERTS_LATENCY).await;
        self.credits.deduct(ALERTS_COST);

        let alert_seed = (lat * lng).sin() * 10000.0;
        let magnitude = alert_seed.abs().floor();
        if magnitude % 7.0 < 1.0 {
            let index = (magnitude % ALERT_TYPES.len() as f64) as usize;
            let alert = ALERT_TYPES[index].to_string();
            info!(lat, lng, alert = %alert, "weather alert active");
            vec![alert]
        } else {
            Vec::new()
        }
    }

    /// Remaining credit balance; free to read
    pub fn credit_balance(&self) -> u32 {
        self.credits.balance()
    }
}
