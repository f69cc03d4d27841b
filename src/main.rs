//! CLI interface for travel-mock-api

use clap::{Parser, Subcommand};
use std::fs;
use travel_mock_api::{
    CabinClass, FlightClient, FlightSearchParams, PlacesClient, WeatherClient,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "travel-mock-api")]
#[command(about = "Simulated travel data providers with credit metering")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search the place directory
    Places {
        /// Name or country substring
        query: String,
    },
    /// Current weather at coordinates
    Weather {
        #[arg(long)]
        lat: f64,
        #[arg(long)]
        lng: f64,
    },
    /// Multi-day weather forecast at coordinates
    Forecast {
        #[arg(long)]
        lat: f64,
        #[arg(long)]
        lng: f64,
        /// Number of days (costs one credit each)
        #[arg(long, default_value = "5")]
        days: u32,
    },
    /// Search for flights
    Search {
        /// Origin airport code or city
        #[arg(short, long)]
        from: String,
        /// Destination airport code or city
        #[arg(short, long)]
        to: String,
        /// Departure date (YYYY-MM-DD)
        #[arg(short, long)]
        date: String,
        /// Number of passengers
        #[arg(long, default_value = "1")]
        passengers: u32,
        /// Cabin class (economy, premium-economy, business, first)
        #[arg(long, default_value = "economy")]
        class: String,
        /// Output file for JSON results
        #[arg(short, long)]
        output: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Places { query } => {
            let client = PlacesClient::new();
            let results = client.search(&query).await;
            println!("{}", serde_json::to_string_pretty(&results)?);
            println!(
                "\nFound {} places ({} credits left)",
                results.len(),
                client.credit_balance()
            );
        }
        Commands::Weather { lat, lng } => {
            let client = WeatherClient::new();
            let observation = client.current(lat, lng).await;
            println!("{}", serde_json::to_string_pretty(&observation)?);
            println!(
                "\n{} ({}), {:.1}°C ({} credits left)",
                observation.condition.description(),
                observation.condition.icon(),
                observation.temperature_c,
                client.credit_balance()
            );
        }
        Commands::Forecast { lat, lng, days } => {
            let client = WeatherClient::new();
            let forecast = client.forecast(lat, lng, days).await;
            println!("{}", serde_json::to_string_pretty(&forecast)?);
            println!(
                "\n{}-day forecast ({} credits left)",
                forecast.len(),
                client.credit_balance()
            );
        }
        Commands::Search {
            from,
            to,
            date,
            passengers,
            class,
            output,
        } => {
            let cabin_class = class.parse::<CabinClass>()?;
            let params = FlightSearchParams {
                origin: from,
                destination: to,
                departure_date: date,
                return_date: None,
                passengers,
                cabin_class,
            };

            let client = FlightClient::new();
            println!("Searching for flights...");
            let flights = client.search_flights(&params).await;

            let json = serde_json::to_string_pretty(&flights)?;
            if let Some(output_file) = output {
                fs::write(&output_file, &json)?;
                println!("Results saved to {}", output_file);
            } else {
                println!("{}", json);
            }

            println!("\nSummary:");
            println!("Found {} flights", flights.len());
            println!("Credits remaining: {}", client.credit_balance());

            if let Some(cheapest) = flights.iter().min_by_key(|f| f.price.amount) {
                println!(
                    "Cheapest: {} at {} {}",
                    cheapest.segments[0].flight_number,
                    cheapest.price.amount,
                    cheapest.price.currency
                );
            }
        }
    }

    Ok(())
}
